//! # Structured Action Dispatcher
//!
//! Handles activities without text: card submissions, file upload notifications,
//! sign-in verification and messaging-extension invokes. [`classify`] inspects the
//! payload shape (first match wins) and [`dispatch`] runs the matching handler.

use serde_json::Value;

use crate::application::services::BotServices;
use crate::application::state::SharedState;
use crate::domain::error::DispatchResult;
use crate::domain::types::{Activity, PostingFields, StructuredAction, TurnOutcome};
use crate::interface::commands::{self, extension};

pub const VERIFY_STATE: &str = "signin/verifyState";
pub const EXTENSION_QUERY: &str = "composeExtension/query";
pub const EXTENSION_FETCH_TASK: &str = "composeExtension/fetchTask";
pub const EXTENSION_SUBMIT_ACTION: &str = "composeExtension/submitAction";

pub const CREATE_POSTING: &str = "createPosting";
pub const FILE_DOWNLOAD_INFO: &str = "application/vnd.microsoft.teams.file.download.info";

pub fn classify(activity: &Activity) -> StructuredAction {
    let value = activity.value.as_ref().filter(|v| v.is_object());

    if let Some(name) = activity.name.as_deref() {
        return classify_invoke(name, value, activity);
    }

    if let Some(value) = value {
        if text_field(value, "command").as_deref() == Some(CREATE_POSTING) {
            return StructuredAction::SubmitNewPosting(posting_fields(value, activity));
        }
        return StructuredAction::Unknown;
    }

    // Only the first attachment is considered.
    if let Some(attachment) = activity.attachments.first() {
        if attachment.content_type == FILE_DOWNLOAD_INFO {
            let file_type = attachment
                .content
                .as_ref()
                .and_then(|c| text_field(c, "fileType"))
                .unwrap_or_default();
            return StructuredAction::FileUpload {
                name: attachment.name.clone().unwrap_or_default(),
                file_type,
            };
        }
    }

    StructuredAction::Unknown
}

fn classify_invoke(name: &str, value: Option<&Value>, activity: &Activity) -> StructuredAction {
    match name {
        VERIFY_STATE => StructuredAction::OAuthVerification {
            code: value.and_then(|v| text_field(v, "state")),
        },
        EXTENSION_QUERY => {
            let Some(value) = value else {
                return StructuredAction::Unknown;
            };
            let first = value
                .get("parameters")
                .and_then(Value::as_array)
                .and_then(|p| p.first());
            let (Some(command_id), Some(first)) = (text_field(value, "commandId"), first) else {
                return StructuredAction::Unknown;
            };
            let parameter = text_field(first, "name").unwrap_or_default();
            let query = text_field(first, "value").unwrap_or_default();
            match command_id.as_str() {
                extension::SEARCH_POSITIONS => {
                    StructuredAction::ExtensionSearchPositions { parameter, query }
                }
                extension::SEARCH_CANDIDATES => StructuredAction::ExtensionSearchCandidates { query },
                _ => StructuredAction::Unknown,
            }
        }
        EXTENSION_FETCH_TASK => match value.and_then(|v| text_field(v, "commandId")) {
            Some(command_id) => StructuredAction::ExtensionFetchTask { command_id },
            None => StructuredAction::Unknown,
        },
        EXTENSION_SUBMIT_ACTION => {
            let Some(value) = value else {
                return StructuredAction::Unknown;
            };
            if text_field(value, "commandId").as_deref() != Some(extension::NEW_POSITION) {
                return StructuredAction::Unknown;
            }
            match value.get("data").filter(|d| d.is_object()) {
                Some(data) => StructuredAction::ExtensionSubmitNewPosting(posting_fields(data, activity)),
                None => StructuredAction::ExtensionSubmitNewPosting(PostingFields {
                    created_by: activity.from.name.clone(),
                    ..Default::default()
                }),
            }
        }
        _ => StructuredAction::Unknown,
    }
}

/// Reads a field as text, accepting numbers and booleans as well.
fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn posting_fields(data: &Value, activity: &Activity) -> PostingFields {
    PostingFields {
        title: data.get(commands::posting::TITLE_FIELD).cloned(),
        level: data.get(commands::posting::LEVEL_FIELD).cloned(),
        location: data.get(commands::posting::LOCATION_FIELD).cloned(),
        created_by: activity.from.name.clone(),
    }
}

/// True for actions answered through an extension invoke body rather than chat messages.
pub fn is_extension(action: &StructuredAction) -> bool {
    matches!(
        action,
        StructuredAction::ExtensionSearchPositions { .. }
            | StructuredAction::ExtensionSearchCandidates { .. }
            | StructuredAction::ExtensionFetchTask { .. }
            | StructuredAction::ExtensionSubmitNewPosting(_)
    )
}

pub async fn dispatch(
    services: &BotServices,
    state: &SharedState,
    action: &StructuredAction,
    activity: &Activity,
) -> DispatchResult<TurnOutcome> {
    let outcome = match action {
        StructuredAction::OAuthVerification { code } => TurnOutcome::messages(
            commands::login::handle_verification(services, activity, code.as_deref()).await?,
        ),
        StructuredAction::SubmitNewPosting(fields) => TurnOutcome::messages(
            commands::posting::handle_create_posting(
                services,
                state,
                activity.conversation_id(),
                fields,
            )
            .await?,
        ),
        StructuredAction::FileUpload { name, file_type } => TurnOutcome::messages(
            commands::upload::handle_file_upload(state, activity.conversation_id(), name, file_type)
                .await,
        ),
        StructuredAction::ExtensionSearchPositions { parameter, query } => TurnOutcome::invoke(
            extension::handle_search_positions(services, parameter, query).await?,
        ),
        StructuredAction::ExtensionSearchCandidates { query } => {
            TurnOutcome::invoke(extension::handle_search_candidates(services, query).await?)
        }
        StructuredAction::ExtensionFetchTask { command_id } => TurnOutcome {
            messages: Vec::new(),
            invoke_response: extension::handle_fetch_task(services, command_id),
        },
        StructuredAction::ExtensionSubmitNewPosting(fields) => {
            TurnOutcome::invoke(extension::handle_submit_position(services, fields).await?)
        }
        StructuredAction::Unknown => TurnOutcome::default(),
    };
    Ok(outcome)
}
