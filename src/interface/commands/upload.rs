//! # File Uploads
//!
//! Confirms uploaded job descriptions. Only Word and PDF documents are accepted.

use crate::application::state::{ConversationTurnState, SharedState};
use crate::domain::types::OutboundMessage;
use crate::strings::messages;

const ACCEPTED_TYPES: [&str; 2] = ["docx", "pdf"];

pub fn is_accepted_file_type(file_type: &str) -> bool {
    let file_type = file_type.to_lowercase();
    ACCEPTED_TYPES.iter().any(|t| file_type.contains(t))
}

/// A valid upload consumes a pending job description request, if there is one.
pub async fn handle_file_upload(
    state: &SharedState,
    conversation_id: &str,
    name: &str,
    file_type: &str,
) -> Vec<OutboundMessage> {
    if !is_accepted_file_type(file_type) {
        tracing::warn!("Rejected upload '{}' of type '{}'", name, file_type);
        return vec![OutboundMessage::text(messages::INVALID_FILE_TYPE)];
    }

    let pending = state.lock().await.take_pending(conversation_id);
    let text = match pending {
        Some(ConversationTurnState::AwaitingJobDescription { title, .. }) => {
            messages::job_description_attached(name, &title)
        }
        None => messages::file_received(name),
    };
    vec![OutboundMessage::text(text)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::BotState;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[test]
    fn file_type_check_is_case_insensitive_containment() {
        assert!(is_accepted_file_type("docx"));
        assert!(is_accepted_file_type("PDF"));
        assert!(is_accepted_file_type("application/pdf"));
        assert!(!is_accepted_file_type("png"));
        assert!(!is_accepted_file_type(""));
    }

    #[tokio::test]
    async fn upload_consumes_pending_flow() {
        let state = Arc::new(Mutex::new(BotState::default()));
        state.lock().await.set_pending(
            "conv",
            ConversationTurnState::AwaitingJobDescription {
                req_id: "R1".into(),
                title: "Engineer".into(),
            },
        );

        let replies = handle_file_upload(&state, "conv", "jd.docx", "docx").await;
        assert_eq!(
            replies[0].text.as_deref(),
            Some(messages::job_description_attached("jd.docx", "Engineer").as_str())
        );
        assert!(state.lock().await.pending("conv").is_none());
    }

    #[tokio::test]
    async fn rejected_upload_keeps_pending_flow() {
        let state = Arc::new(Mutex::new(BotState::default()));
        state.lock().await.set_pending(
            "conv",
            ConversationTurnState::AwaitingJobDescription {
                req_id: "R1".into(),
                title: "Engineer".into(),
            },
        );

        let replies = handle_file_upload(&state, "conv", "photo.png", "png").await;
        assert_eq!(replies[0].text.as_deref(), Some(messages::INVALID_FILE_TYPE));
        assert!(state.lock().await.pending("conv").is_some());
    }
}
