//! # Posting Submission
//!
//! Validates the fields of a submitted posting form and creates the position.
//! Shared by the chat form (`createPosting`) and the messaging extension (`newPosition`).

use serde_json::Value;

use crate::application::services::BotServices;
use crate::application::state::{ConversationTurnState, SharedState};
use crate::domain::error::{DispatchError, DispatchResult};
use crate::domain::traits::{CardStyle, CardSubject};
use crate::domain::types::{LOCATIONS, NewPosting, OpenPosition, OutboundMessage, PostingFields};
use crate::strings::messages;

pub const TITLE_FIELD: &str = "jobTitle";
pub const LEVEL_FIELD: &str = "jobLevel";
pub const LOCATION_FIELD: &str = "jobLocation";

pub fn validate_posting(fields: &PostingFields) -> DispatchResult<NewPosting> {
    let title = match &fields.title {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) => return Err(DispatchError::validation(TITLE_FIELD, "must not be empty")),
        None | Some(Value::Null) => return Err(DispatchError::validation(TITLE_FIELD, "missing")),
        Some(other) => {
            return Err(DispatchError::validation(
                TITLE_FIELD,
                format!("expected text, got {other}"),
            ));
        }
    };

    let level = integer_field(fields.level.as_ref(), LEVEL_FIELD)?;
    let level = u32::try_from(level)
        .map_err(|_| DispatchError::validation(LEVEL_FIELD, format!("{level} is too large")))?;

    let index = integer_field(fields.location.as_ref(), LOCATION_FIELD)?;
    let location = usize::try_from(index)
        .ok()
        .and_then(|i| LOCATIONS.get(i))
        .ok_or_else(|| {
            DispatchError::validation(
                LOCATION_FIELD,
                format!("{index} is not one of the {} known locations", LOCATIONS.len()),
            )
        })?;

    Ok(NewPosting {
        title,
        level,
        location: location.to_string(),
        created_by: fields.created_by.clone(),
    })
}

fn integer_field(value: Option<&Value>, field: &'static str) -> DispatchResult<u64> {
    match value {
        None | Some(Value::Null) => Err(DispatchError::validation(field, "missing")),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            DispatchError::validation(field, format!("expected a whole number, got {n}"))
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| {
            DispatchError::validation(field, format!("expected a whole number, got \"{s}\""))
        }),
        Some(other) => Err(DispatchError::validation(
            field,
            format!("expected a whole number, got {other}"),
        )),
    }
}

/// Validates and creates the posting via the gateway.
pub async fn create_posting(
    services: &BotServices,
    fields: &PostingFields,
) -> DispatchResult<OpenPosition> {
    let posting = validate_posting(fields)?;
    let position = services
        .positions
        .create(posting)
        .await
        .map_err(DispatchError::Gateway)?;
    tracing::info!(
        "Created posting {} '{}' for {}",
        position.req_id,
        position.title,
        fields.created_by
    );
    Ok(position)
}

/// Chat form submission. Arms the conversation to expect the job description upload.
pub async fn handle_create_posting(
    services: &BotServices,
    state: &SharedState,
    conversation_id: &str,
    fields: &PostingFields,
) -> DispatchResult<Vec<OutboundMessage>> {
    let position = create_posting(services, fields).await?;

    {
        let mut guard = state.lock().await;
        guard.set_pending(
            conversation_id,
            ConversationTurnState::AwaitingJobDescription {
                req_id: position.req_id.clone(),
                title: position.title.clone(),
            },
        );
    }

    let card = services
        .cards
        .render(CardSubject::Position(&position), CardStyle::FullDetail);
    Ok(vec![OutboundMessage {
        text: Some(messages::posting_created(&position.title, &position.req_id)),
        attachments: vec![card],
        ..Default::default()
    }])
}
