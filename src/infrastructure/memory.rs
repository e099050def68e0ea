//! # In-Memory Talent Data
//!
//! Seeded candidate and position stores used by the console channel.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::RwLock;

use crate::domain::traits::{CandidateGateway, PositionGateway};
use crate::domain::types::{Candidate, LOCATIONS, NewPosting, OpenPosition};

fn candidate(name: &str, role: &str, stage: &str, req_id: &str, location: &str, years: u32) -> Candidate {
    Candidate {
        name: name.to_string(),
        current_role: role.to_string(),
        stage: stage.to_string(),
        req_id: req_id.to_string(),
        location: location.to_string(),
        years_experience: years,
        profile_picture: None,
        summary: None,
    }
}

pub fn seed_candidates() -> Vec<Candidate> {
    vec![
        candidate("John Smith", "Software Engineer", "Interviewing", "0F812D01", "Seattle", 6),
        candidate("Adele Vance", "Senior Software Engineer", "Offer", "0F812D01", "Redmond", 9),
        candidate("Lee Gu", "Data Scientist", "Applied", "0F812D01", "Bellevue", 4),
        candidate("Alex Wilber", "Product Manager", "Screening", "ABCD1234", "London", 7),
        candidate("Diego Siciliani", "Designer", "Applied", "ABCD1234", "New York", 3),
        candidate("Isaiah Langer", "Support Engineer", "Interviewing", "ABCD1234", "San Francisco", 5),
    ]
}

fn position(req_id: &str, title: &str, level: u32, location: usize, days_open: u32, applicants: u32) -> OpenPosition {
    OpenPosition {
        req_id: req_id.to_string(),
        title: title.to_string(),
        level,
        location: LOCATIONS[location % LOCATIONS.len()].to_string(),
        days_open,
        applicants,
        hiring_manager: "Megan Bowen".to_string(),
        created_by: None,
    }
}

pub fn seed_positions() -> Vec<OpenPosition> {
    vec![
        position("0F812D01", "Software Engineer", 62, 0, 12, 24),
        position("0F812D02", "Senior Software Engineer", 64, 1, 30, 41),
        position("0F812D03", "Data Scientist", 61, 2, 5, 8),
        position("0F812D04", "Program Manager", 63, 0, 21, 17),
        position("0F812D05", "Support Engineer", 60, 3, 2, 3),
        position("0F812D06", "Designer", 62, 4, 44, 29),
        position("0F812D07", "Engineering Manager", 65, 5, 9, 6),
    ]
}

pub struct InMemoryCandidates {
    candidates: Vec<Candidate>,
}

impl InMemoryCandidates {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn seeded() -> Self {
        Self::new(seed_candidates())
    }
}

#[async_trait]
impl CandidateGateway for InMemoryCandidates {
    async fn get_by_name(&self, name: &str) -> Result<Option<Candidate>> {
        let name = name.trim();
        Ok(self
            .candidates
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn get_top(&self, req_id: &str) -> Result<Vec<Candidate>> {
        let mut top: Vec<Candidate> = self
            .candidates
            .iter()
            .filter(|c| c.req_id.eq_ignore_ascii_case(req_id))
            .cloned()
            .collect();
        top.sort_by(|a, b| b.years_experience.cmp(&a.years_experience));
        Ok(top)
    }
}

pub struct InMemoryPositions {
    positions: RwLock<Vec<OpenPosition>>,
    next_id: AtomicU32,
}

impl InMemoryPositions {
    pub fn new(positions: Vec<OpenPosition>) -> Self {
        Self {
            positions: RwLock::new(positions),
            next_id: AtomicU32::new(1),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_positions())
    }
}

#[async_trait]
impl PositionGateway for InMemoryPositions {
    async fn list(&self, max_count: usize) -> Result<Vec<OpenPosition>> {
        let positions = self.positions.read().await;
        Ok(positions.iter().take(max_count).cloned().collect())
    }

    async fn create(&self, posting: NewPosting) -> Result<OpenPosition> {
        if !LOCATIONS.contains(&posting.location.as_str()) {
            bail!("unknown location '{}'", posting.location);
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = OpenPosition {
            req_id: format!("{}{:02X}", chrono::Utc::now().format("%y%m%d"), n),
            title: posting.title,
            level: posting.level,
            location: posting.location,
            days_open: 0,
            applicants: 0,
            hiring_manager: posting.created_by.clone(),
            created_by: Some(posting.created_by),
        };
        // Newest first, so it shows up in the next listing.
        self.positions.write().await.insert(0, created.clone());
        Ok(created)
    }
}
