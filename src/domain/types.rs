//! # Domain Types
//!
//! Data structures shared by the dispatchers: inbound activities, parsed intents,
//! the talent records handed to the card renderer, and outbound replies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Locations a posting can be created in. Form submissions carry an index into this table.
pub const LOCATIONS: &[&str] = &[
    "Redmond",
    "Seattle",
    "Bellevue",
    "San Francisco",
    "New York",
    "London",
];

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    #[default]
    Message,
    Invoke,
    ConversationUpdate,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationAccount {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
}

/// One inbound unit from the channel. Immutable once received.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type", default)]
    pub kind: ActivityType,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub from: ChannelAccount,
    #[serde(default)]
    pub recipient: Option<ChannelAccount>,
    #[serde(default)]
    pub conversation: ConversationAccount,
    #[serde(default)]
    pub channel_id: String,
    /// Invoke name for system activities (verification, extension query/fetch/submit).
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members_added: Vec<ChannelAccount>,
}

impl Activity {
    pub fn conversation_id(&self) -> &str {
        &self.conversation.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Welcome,
    Login,
    TopCandidates,
    OpenPositions,
    CandidateDetails,
    NewPosting,
    Unknown,
}

/// Intent parsed from activity text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
        }
    }

    pub fn with_args(kind: CommandKind, args: Vec<String>) -> Self {
        Self { kind, args }
    }
}

/// Raw posting fields as they arrive from a form, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingFields {
    pub title: Option<Value>,
    pub level: Option<Value>,
    pub location: Option<Value>,
    pub created_by: String,
}

/// Intent derived from a non-text activity.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredAction {
    OAuthVerification { code: Option<String> },
    SubmitNewPosting(PostingFields),
    FileUpload { name: String, file_type: String },
    ExtensionSearchPositions { parameter: String, query: String },
    ExtensionSearchCandidates { query: String },
    ExtensionFetchTask { command_id: String },
    ExtensionSubmitNewPosting(PostingFields),
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub name: String,
    pub current_role: String,
    pub stage: String,
    pub req_id: String,
    pub location: String,
    pub years_experience: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Candidate {
    /// Reads a candidate out of a card payload. Payloads without a name are not candidates.
    pub fn from_value(value: &Value) -> Option<Self> {
        let candidate: Candidate = serde_json::from_value(value.clone()).ok()?;
        if candidate.name.trim().is_empty() {
            return None;
        }
        Some(candidate)
    }

    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenPosition {
    pub req_id: String,
    pub title: String,
    pub level: u32,
    pub location: String,
    pub days_open: u32,
    pub applicants: u32,
    pub hiring_manager: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Validated input for creating a posting.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPosting {
    pub title: String,
    pub level: u32,
    pub location: String,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: String,
    #[serde(default)]
    pub mail: Option<String>,
}

/// Presentational payload produced by the card renderer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub content_type: String,
    pub content: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Box<Card>>,
}

impl Card {
    pub fn with_preview(mut self, preview: Card) -> Self {
        self.preview = Some(Box::new(preview));
        self
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentLayout {
    #[default]
    List,
    Carousel,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub attachments: Vec<Card>,
    pub attachment_layout: AttachmentLayout,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn card(card: Card) -> Self {
        Self {
            attachments: vec![card],
            ..Default::default()
        }
    }
}

/// Everything a single turn produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnOutcome {
    pub messages: Vec<OutboundMessage>,
    /// Body returned synchronously to invoke activities.
    pub invoke_response: Option<Value>,
}

impl TurnOutcome {
    pub fn messages(messages: Vec<OutboundMessage>) -> Self {
        Self {
            messages,
            invoke_response: None,
        }
    }

    pub fn invoke(body: Value) -> Self {
        Self {
            messages: Vec::new(),
            invoke_response: Some(body),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.invoke_response.is_none()
    }
}
