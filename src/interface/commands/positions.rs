//! # Position Commands
//!
//! `open positions` and `new job posting`.

use crate::application::services::BotServices;
use crate::domain::error::{DispatchError, DispatchResult};
use crate::domain::traits::{CardStyle, CardSubject};
use crate::domain::types::{Activity, LOCATIONS, OutboundMessage};
use crate::strings::messages;

/// Lists open positions, followed by a card with the "view details" and "add new posting" buttons.
pub async fn handle_open_positions(
    services: &BotServices,
    activity: &Activity,
) -> DispatchResult<Vec<OutboundMessage>> {
    let positions = services
        .positions
        .list(services.config.limits.open_positions)
        .await
        .map_err(DispatchError::Gateway)?;

    let mut attachments: Vec<_> = positions
        .iter()
        .map(|p| {
            services
                .cards
                .render(CardSubject::Position(p), CardStyle::ThumbnailWithActions)
        })
        .collect();
    attachments.push(services.cards.render(
        CardSubject::PostingActions {
            details_url: &services.config.bot.details_url,
        },
        CardStyle::ThumbnailWithActions,
    ));

    Ok(vec![OutboundMessage {
        text: Some(messages::open_positions(&activity.from.name, positions.len())),
        attachments,
        ..Default::default()
    }])
}

/// Sends the posting form. The position is only created once the form is submitted.
pub fn handle_new_posting(services: &BotServices) -> Vec<OutboundMessage> {
    vec![OutboundMessage::card(
        services
            .cards
            .render(CardSubject::PostingForm(LOCATIONS), CardStyle::Form),
    )]
}
