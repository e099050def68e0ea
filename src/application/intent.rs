//! # Intent Dispatcher
//!
//! Maps a parsed text [`Command`] to its handler.

use crate::application::services::BotServices;
use crate::application::state::SharedState;
use crate::domain::error::DispatchResult;
use crate::domain::types::{Activity, Command, CommandKind, OutboundMessage};
use crate::interface::commands;
use crate::strings::help;

pub async fn dispatch(
    services: &BotServices,
    state: &SharedState,
    command: &Command,
    activity: &Activity,
) -> DispatchResult<Vec<OutboundMessage>> {
    // Typing a command abandons any flow that was waiting for input.
    if let Some(abandoned) = state.lock().await.take_pending(activity.conversation_id()) {
        tracing::debug!("Cleared pending flow {:?}", abandoned);
    }

    match command.kind {
        CommandKind::Help => Ok(commands::help::handle_help(help::HELP_LEAD)),
        CommandKind::Welcome => Ok(commands::help::handle_help(help::WELCOME_LEAD)),
        CommandKind::Unknown => Ok(commands::help::handle_help(help::NOT_UNDERSTOOD_LEAD)),
        CommandKind::Login => Ok(commands::login::handle_login(services)),
        CommandKind::TopCandidates => match command.args.first() {
            Some(req_id) => commands::candidates::handle_top_candidates(services, req_id).await,
            None => Ok(commands::help::handle_help(help::NOT_UNDERSTOOD_LEAD)),
        },
        CommandKind::OpenPositions => {
            commands::positions::handle_open_positions(services, activity).await
        }
        CommandKind::CandidateDetails => {
            commands::candidates::handle_candidate_details(services, activity, &command.args)
                .await
        }
        CommandKind::NewPosting => Ok(commands::positions::handle_new_posting(services)),
    }
}
