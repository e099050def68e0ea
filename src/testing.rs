//! Test doubles for the collaborators, with call counters.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

use crate::application::actions::FILE_DOWNLOAD_INFO;
use crate::application::services::BotServices;
use crate::application::state::{BotState, SharedState};
use crate::domain::config::AppConfig;
use crate::domain::traits::{CandidateGateway, IdentityClient, PositionGateway};
use crate::domain::types::{
    Activity, ActivityType, Attachment, Candidate, ChannelAccount, ConversationAccount,
    NewPosting, OpenPosition, Token, UserProfile,
};
use crate::infrastructure::cards::AdaptiveCardRenderer;
use crate::infrastructure::memory;

pub struct RecordingCandidates {
    candidates: Vec<Candidate>,
    pub fail: AtomicBool,
    pub by_name_calls: AtomicUsize,
    pub top_calls: AtomicUsize,
    pub last_name: StdMutex<Option<String>>,
}

impl RecordingCandidates {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            fail: AtomicBool::new(false),
            by_name_calls: AtomicUsize::new(0),
            top_calls: AtomicUsize::new(0),
            last_name: StdMutex::new(None),
        }
    }
}

#[async_trait]
impl CandidateGateway for RecordingCandidates {
    async fn get_by_name(&self, name: &str) -> Result<Option<Candidate>> {
        self.by_name_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_name.lock().unwrap() = Some(name.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("candidate store unreachable"));
        }
        Ok(self
            .candidates
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn get_top(&self, _req_id: &str) -> Result<Vec<Candidate>> {
        self.top_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("candidate store unreachable"));
        }
        Ok(self.candidates.clone())
    }
}

pub struct RecordingPositions {
    positions: Vec<OpenPosition>,
    pub fail: AtomicBool,
    pub create_calls: AtomicUsize,
    pub last_list_limit: StdMutex<Option<usize>>,
}

impl RecordingPositions {
    pub fn new(positions: Vec<OpenPosition>) -> Self {
        Self {
            positions,
            fail: AtomicBool::new(false),
            create_calls: AtomicUsize::new(0),
            last_list_limit: StdMutex::new(None),
        }
    }

    pub fn seeded_len(&self) -> usize {
        self.positions.len()
    }
}

#[async_trait]
impl PositionGateway for RecordingPositions {
    async fn list(&self, max_count: usize) -> Result<Vec<OpenPosition>> {
        *self.last_list_limit.lock().unwrap() = Some(max_count);
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("position store unreachable"));
        }
        Ok(self.positions.iter().take(max_count).cloned().collect())
    }

    async fn create(&self, posting: NewPosting) -> Result<OpenPosition> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("position store unreachable"));
        }
        Ok(OpenPosition {
            req_id: "NEW00001".into(),
            title: posting.title,
            level: posting.level,
            location: posting.location,
            days_open: 0,
            applicants: 0,
            hiring_manager: posting.created_by.clone(),
            created_by: Some(posting.created_by),
        })
    }
}

pub struct StubIdentity {
    pub token: Option<Token>,
    pub fail: AtomicBool,
    pub last_code: StdMutex<Option<String>>,
}

#[async_trait]
impl IdentityClient for StubIdentity {
    async fn exchange_code(
        &self,
        _user_id: &str,
        _resource: &str,
        code: &str,
    ) -> Result<Option<Token>> {
        *self.last_code.lock().unwrap() = Some(code.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("token service unreachable"));
        }
        Ok(self.token.clone())
    }

    async fn get_current_user(&self, _token: &Token) -> Result<UserProfile> {
        Ok(UserProfile {
            display_name: "Megan Bowen".into(),
            mail: Some("megan@contoso.com".into()),
        })
    }
}

/// Collaborators plus state for one test.
pub struct Fixture {
    pub config: AppConfig,
    pub candidates: Arc<RecordingCandidates>,
    pub positions: Arc<RecordingPositions>,
    pub identity: Arc<StubIdentity>,
    pub state: SharedState,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            candidates: Arc::new(RecordingCandidates::new(memory::seed_candidates())),
            positions: Arc::new(RecordingPositions::new(memory::seed_positions())),
            identity: Arc::new(StubIdentity {
                token: Some(Token {
                    token: "token".into(),
                }),
                fail: AtomicBool::new(false),
                last_code: StdMutex::new(None),
            }),
            state: Arc::new(Mutex::new(BotState::default())),
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<Candidate>) -> Self {
        self.candidates = Arc::new(RecordingCandidates::new(candidates));
        self
    }

    pub fn with_positions(mut self, positions: Vec<OpenPosition>) -> Self {
        self.positions = Arc::new(RecordingPositions::new(positions));
        self
    }

    pub fn failing_gateways(self) -> Self {
        self.candidates.fail.store(true, Ordering::SeqCst);
        self.positions.fail.store(true, Ordering::SeqCst);
        self.identity.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn without_token(mut self) -> Self {
        self.identity = Arc::new(StubIdentity {
            token: None,
            fail: AtomicBool::new(false),
            last_code: StdMutex::new(None),
        });
        self
    }

    pub fn services(&self) -> BotServices {
        BotServices::new(
            self.config.clone(),
            self.candidates.clone(),
            self.positions.clone(),
            self.identity.clone(),
            Arc::new(AdaptiveCardRenderer),
        )
    }
}

fn sender() -> ChannelAccount {
    ChannelAccount {
        id: "29:megan".into(),
        name: "Megan Bowen".into(),
    }
}

fn base_activity(conversation_id: &str, kind: ActivityType) -> Activity {
    Activity {
        kind,
        from: sender(),
        conversation: ConversationAccount {
            id: conversation_id.into(),
        },
        channel_id: "msteams".into(),
        ..Default::default()
    }
}

pub fn text_activity(conversation_id: &str, text: &str) -> Activity {
    Activity {
        text: Some(text.into()),
        ..base_activity(conversation_id, ActivityType::Message)
    }
}

pub fn value_activity(conversation_id: &str, value: Value) -> Activity {
    Activity {
        value: Some(value),
        ..base_activity(conversation_id, ActivityType::Message)
    }
}

pub fn invoke_activity(conversation_id: &str, name: &str, value: Option<Value>) -> Activity {
    Activity {
        name: Some(name.into()),
        value,
        ..base_activity(conversation_id, ActivityType::Invoke)
    }
}

pub fn file_activity(conversation_id: &str, file_name: &str, file_type: &str) -> Activity {
    Activity {
        attachments: vec![Attachment {
            content_type: FILE_DOWNLOAD_INFO.into(),
            content: Some(json!({
                "downloadUrl": format!("https://contoso.sharepoint.com/{file_name}"),
                "uniqueId": "1",
                "fileType": file_type,
            })),
            name: Some(file_name.into()),
            content_url: None,
        }],
        ..base_activity(conversation_id, ActivityType::Message)
    }
}
