//! # Services
//!
//! Bundles the collaborators every handler may need, so the router can hand one
//! reference down instead of five.

use std::sync::Arc;

use crate::domain::config::AppConfig;
use crate::domain::traits::{CandidateGateway, CardRenderer, IdentityClient, PositionGateway};

#[derive(Clone)]
pub struct BotServices {
    pub config: AppConfig,
    pub candidates: Arc<dyn CandidateGateway>,
    pub positions: Arc<dyn PositionGateway>,
    pub identity: Arc<dyn IdentityClient>,
    pub cards: Arc<dyn CardRenderer>,
}

impl BotServices {
    pub fn new(
        config: AppConfig,
        candidates: Arc<dyn CandidateGateway>,
        positions: Arc<dyn PositionGateway>,
        identity: Arc<dyn IdentityClient>,
        cards: Arc<dyn CardRenderer>,
    ) -> Self {
        Self {
            config,
            candidates,
            positions,
            identity,
            cards,
        }
    }
}
