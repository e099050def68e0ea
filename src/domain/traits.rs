//! # Domain Traits
//!
//! Narrow interfaces to the collaborators the dispatchers consume:
//! talent data gateways, the identity service, the card renderer and the outbound channel.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::types::{
    Candidate, Card, NewPosting, OpenPosition, OutboundMessage, Token, UserProfile,
};

/// Candidate lookups.
#[async_trait]
pub trait CandidateGateway: Send + Sync {
    async fn get_by_name(&self, name: &str) -> Result<Option<Candidate>>;

    /// Top candidates for a requisition, most relevant first.
    async fn get_top(&self, req_id: &str) -> Result<Vec<Candidate>>;
}

/// Open position listing and creation.
#[async_trait]
pub trait PositionGateway: Send + Sync {
    async fn list(&self, max_count: usize) -> Result<Vec<OpenPosition>>;

    async fn create(&self, posting: NewPosting) -> Result<OpenPosition>;
}

/// OAuth code exchange and profile lookup.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn exchange_code(&self, user_id: &str, resource: &str, code: &str)
    -> Result<Option<Token>>;

    async fn get_current_user(&self, token: &Token) -> Result<UserProfile>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    FullDetail,
    Summary,
    Preview,
    ThumbnailWithActions,
    Form,
}

/// What a card is rendered from.
#[derive(Debug, Clone, Copy)]
pub enum CardSubject<'a> {
    Candidate(&'a Candidate),
    Position(&'a OpenPosition),
    /// Form for a new posting, offering the given locations.
    PostingForm(&'a [&'a str]),
    /// Trailing actions under the open positions list.
    PostingActions { details_url: &'a str },
    SignIn { connection_name: &'a str },
}

/// Pure, infallible rendering of records into card payloads.
pub trait CardRenderer: Send + Sync {
    fn render(&self, subject: CardSubject<'_>, style: CardStyle) -> Card;
}

/// Abstract interface for delivering replies to a conversation.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the conversation, returning its id.
    async fn send_message(&self, message: &OutboundMessage) -> Result<String, String>;

    fn conversation_id(&self) -> String;
}
