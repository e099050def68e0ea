//! # Activity Router
//!
//! Entry point for every inbound activity. It takes the conversation's turn gate,
//! sends text to the command parser and intent dispatcher and everything else to the
//! structured action dispatcher, then turns any failure into a reply.
//!
//! `route` never fails: once it returns, the conversation is ready for its next activity.

use crate::application::actions;
use crate::application::intent;
use crate::application::parsing;
use crate::application::services::BotServices;
use crate::application::state::{ConversationGate, SharedState};
use crate::domain::error::DispatchError;
use crate::domain::types::{
    Activity, ActivityType, Command, CommandKind, OutboundMessage, TurnOutcome,
};
use crate::interface::commands::extension;
use crate::strings::messages;

#[derive(Clone)]
pub struct ActivityRouter {
    services: BotServices,
    state: SharedState,
    gate: ConversationGate,
}

impl ActivityRouter {
    pub fn new(services: BotServices, state: SharedState) -> Self {
        Self {
            services,
            state,
            gate: ConversationGate::new(),
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn is_ready(&self, conversation_id: &str) -> bool {
        self.gate.is_ready(conversation_id)
    }

    pub async fn route(&self, activity: &Activity) -> TurnOutcome {
        let conversation_id = activity.conversation_id().to_string();
        let _turn = self.gate.acquire(&conversation_id).await;

        let outcome = match activity.kind {
            ActivityType::ConversationUpdate => self.route_conversation_update(activity).await,
            _ => match message_text(activity) {
                Some(text) => self.route_text(activity, &text).await,
                None => self.route_structured(activity).await,
            },
        };

        self.state
            .lock()
            .await
            .get_conversation_state(&conversation_id)
            .turns += 1;
        outcome
    }

    async fn route_text(&self, activity: &Activity, text: &str) -> TurnOutcome {
        let command = parsing::parse(text);
        tracing::info!(
            "Routing {:?} args={:?} from '{}' in {}",
            command.kind,
            command.args,
            activity.from.name,
            activity.conversation_id()
        );
        self.run_command(&command, activity).await
    }

    async fn run_command(&self, command: &Command, activity: &Activity) -> TurnOutcome {
        match intent::dispatch(&self.services, &self.state, command, activity).await {
            Ok(messages) => TurnOutcome::messages(messages),
            Err(e) => failure_outcome(&e, false),
        }
    }

    async fn route_structured(&self, activity: &Activity) -> TurnOutcome {
        let action = actions::classify(activity);
        tracing::info!(
            "Routing structured action {:?} (invoke={:?}) in {}",
            action,
            activity.name,
            activity.conversation_id()
        );
        match actions::dispatch(&self.services, &self.state, &action, activity).await {
            Ok(outcome) => outcome,
            Err(e) => failure_outcome(&e, actions::is_extension(&action)),
        }
    }

    /// Greets the conversation when the bot itself is added to it.
    async fn route_conversation_update(&self, activity: &Activity) -> TurnOutcome {
        let bot_added = activity
            .recipient
            .as_ref()
            .is_some_and(|bot| activity.members_added.iter().any(|m| m.id == bot.id));
        if !bot_added {
            return TurnOutcome::default();
        }
        tracing::info!("Added to conversation {}", activity.conversation_id());
        self.run_command(&Command::new(CommandKind::Welcome), activity)
            .await
    }
}

/// Text with mentions removed, or `None` when nothing is left to parse.
fn message_text(activity: &Activity) -> Option<String> {
    let text = activity.text.as_deref()?;
    let stripped = parsing::strip_mentions(text);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}

fn failure_outcome(error: &DispatchError, extension_invoke: bool) -> TurnOutcome {
    let text = match error {
        DispatchError::Validation { field, reason } => {
            tracing::warn!("Rejected payload: {}", error);
            messages::invalid_field(field, reason)
        }
        DispatchError::Gateway(_) | DispatchError::Identity(_) => {
            tracing::error!("Turn failed: {:#}", error);
            messages::SOMETHING_WENT_WRONG.to_string()
        }
    };

    if extension_invoke {
        TurnOutcome::invoke(extension::message_response(&text))
    } else {
        TurnOutcome::messages(vec![OutboundMessage::text(text)])
    }
}
