//! # Console Channel
//!
//! Implements `ChatProvider` by printing replies to stdout as JSON, one conversation per instance.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::traits::ChatProvider;
use crate::domain::types::OutboundMessage;

pub struct ConsoleChat {
    conversation_id: String,
    sent: AtomicU64,
}

impl ConsoleChat {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            sent: AtomicU64::new(0),
        }
    }

    /// Invoke bodies go back to the caller rather than into the conversation.
    pub fn print_invoke_response(&self, body: &Value) {
        match serde_json::to_string_pretty(body) {
            Ok(json) => println!("[{}] invoke response:\n{}", self.conversation_id, json),
            Err(e) => tracing::error!("Failed to serialize invoke response: {}", e),
        }
    }
}

#[async_trait]
impl ChatProvider for ConsoleChat {
    async fn send_message(&self, message: &OutboundMessage) -> Result<String, String> {
        let json = serde_json::to_string_pretty(message).map_err(|e| e.to_string())?;
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("{}:{}", self.conversation_id, n);
        tracing::info!("Bot sending message {} ({} attachments)", id, message.attachments.len());
        println!("[{}] message {}:\n{}", self.conversation_id, n, json);
        Ok(id)
    }

    fn conversation_id(&self) -> String {
        self.conversation_id.clone()
    }
}
