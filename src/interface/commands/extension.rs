//! # Messaging Extension
//!
//! Answers the search-style surface: position and candidate queries, the task-module
//! fetch for a new posting, and its submission. Responses are invoke bodies, not chat messages.

use serde_json::{Value, json};

use crate::application::services::BotServices;
use crate::domain::error::{DispatchError, DispatchResult};
use crate::domain::traits::{CardStyle, CardSubject};
use crate::domain::types::{Card, LOCATIONS, PostingFields};
use crate::interface::commands::posting;

pub const SEARCH_POSITIONS: &str = "searchPositions";
pub const SEARCH_CANDIDATES: &str = "searchCandidates";
pub const NEW_POSITION: &str = "newPosition";
/// Parameter name the client sends when the extension is first opened.
pub const INITIAL_RUN: &str = "initialRun";
/// Requisition whose candidates back the candidate search.
pub const CANDIDATE_SEARCH_REQ_ID: &str = "ABCD1234";

pub async fn handle_search_positions(
    services: &BotServices,
    parameter: &str,
    query: &str,
) -> DispatchResult<Value> {
    let positions = services
        .positions
        .list(services.config.limits.extension_results)
        .await
        .map_err(DispatchError::Gateway)?;

    let needle = query.to_lowercase();
    let cards: Vec<Card> = positions
        .iter()
        .filter(|p| parameter == INITIAL_RUN || p.title.to_lowercase().contains(&needle))
        .map(|p| {
            services
                .cards
                .render(CardSubject::Position(p), CardStyle::ThumbnailWithActions)
        })
        .collect();

    Ok(result_response(&cards))
}

/// Not a real search: the query text is grafted onto fixed candidates as their last name.
pub async fn handle_search_candidates(
    services: &BotServices,
    query: &str,
) -> DispatchResult<Value> {
    let candidates = services
        .candidates
        .get_top(CANDIDATE_SEARCH_REQ_ID)
        .await
        .map_err(DispatchError::Gateway)?;

    let last_name = title_case(query);
    let cards: Vec<Card> = candidates
        .into_iter()
        .map(|mut c| {
            c.name = format!("{} {}", c.first_name(), last_name);
            let preview = services
                .cards
                .render(CardSubject::Candidate(&c), CardStyle::Preview);
            services
                .cards
                .render(CardSubject::Candidate(&c), CardStyle::Summary)
                .with_preview(preview)
        })
        .collect();

    Ok(result_response(&cards))
}

/// Task module for `newPosition`; other commands have no task module.
pub fn handle_fetch_task(services: &BotServices, command_id: &str) -> Option<Value> {
    if command_id != NEW_POSITION {
        return None;
    }
    let card = services
        .cards
        .render(CardSubject::PostingForm(LOCATIONS), CardStyle::Form);
    Some(json!({
        "task": {
            "type": "continue",
            "value": {
                "title": "Create new job posting",
                "height": "medium",
                "width": "medium",
                "card": { "contentType": card.content_type, "content": card.content },
            }
        }
    }))
}

pub async fn handle_submit_position(
    services: &BotServices,
    fields: &PostingFields,
) -> DispatchResult<Value> {
    let position = posting::create_posting(services, fields).await?;
    let card = services
        .cards
        .render(CardSubject::Position(&position), CardStyle::ThumbnailWithActions);
    Ok(result_response(&[card]))
}

/// Extension reply shown in place of results, e.g. for a validation problem.
pub fn message_response(text: &str) -> Value {
    json!({ "composeExtension": { "type": "message", "text": text } })
}

fn result_response(cards: &[Card]) -> Value {
    let attachments: Vec<Value> = cards.iter().map(extension_attachment).collect();
    json!({
        "composeExtension": {
            "type": "result",
            "attachmentLayout": "list",
            "attachments": attachments,
        }
    })
}

fn extension_attachment(card: &Card) -> Value {
    let mut attachment = json!({
        "contentType": card.content_type,
        "content": card.content,
    });
    if let Some(preview) = &card.preview {
        attachment["preview"] = json!({
            "contentType": preview.content_type,
            "content": preview.content,
        });
    }
    attachment
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
