//! # Candidate Commands
//!
//! `top candidates <reqId>` and `candidate details <name>`.

use crate::application::services::BotServices;
use crate::domain::error::{DispatchError, DispatchResult};
use crate::domain::traits::{CardStyle, CardSubject};
use crate::domain::types::{Activity, AttachmentLayout, Candidate, OutboundMessage};
use crate::strings::messages;

/// One summary card per candidate in a carousel. An empty result is still a reply.
pub async fn handle_top_candidates(
    services: &BotServices,
    req_id: &str,
) -> DispatchResult<Vec<OutboundMessage>> {
    let candidates = services
        .candidates
        .get_top(req_id)
        .await
        .map_err(DispatchError::Gateway)?;
    tracing::debug!("Found {} top candidates for {}", candidates.len(), req_id);

    let attachments = candidates
        .iter()
        .map(|c| {
            services
                .cards
                .render(CardSubject::Candidate(c), CardStyle::Summary)
        })
        .collect();

    Ok(vec![OutboundMessage {
        text: Some(messages::TOP_CANDIDATES.to_string()),
        attachments,
        attachment_layout: AttachmentLayout::Carousel,
    }])
}

/// A candidate carried by the card payload wins over a name lookup.
pub async fn handle_candidate_details(
    services: &BotServices,
    activity: &Activity,
    keywords: &[String],
) -> DispatchResult<Vec<OutboundMessage>> {
    if let Some(candidate) = activity.value.as_ref().and_then(Candidate::from_value) {
        return Ok(vec![details_message(services, &candidate)]);
    }

    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    let name = keywords.join(" ");
    let found = services
        .candidates
        .get_by_name(&name)
        .await
        .map_err(DispatchError::Gateway)?;

    match found {
        Some(candidate) => Ok(vec![details_message(services, &candidate)]),
        None => Ok(vec![OutboundMessage::text(messages::candidate_not_found(
            &name,
        ))]),
    }
}

fn details_message(services: &BotServices, candidate: &Candidate) -> OutboundMessage {
    OutboundMessage::card(
        services
            .cards
            .render(CardSubject::Candidate(candidate), CardStyle::FullDetail),
    )
}
