//! # Bot State
//!
//! Per-conversation continuation state (`ConversationState`) and the gate that keeps
//! one turn in flight per conversation.
//!
//! A pending flow is an explicit entry keyed by conversation id. It is set only after
//! the action that starts the flow succeeded, and cleared when consumed or when the
//! user issues an unrelated command.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// What the conversation is waiting for next.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationTurnState {
    /// A posting was just created; a job description upload is expected.
    AwaitingJobDescription { req_id: String, title: String },
}

/// State for a single conversation.
#[derive(Debug, Default, Clone)]
pub struct ConversationState {
    pub pending: Option<ConversationTurnState>,
    /// Number of turns completed on this conversation.
    pub turns: u64,
}

/// Maps conversation ids to their state.
///
/// Entries are kept for the life of the process, so the map grows with the number of
/// distinct conversations in the replayed input.
#[derive(Debug, Default, Clone)]
pub struct BotState {
    pub conversations: HashMap<String, ConversationState>,
}

impl BotState {
    /// Gets or creates the state for a specific conversation.
    pub fn get_conversation_state(&mut self, conversation_id: &str) -> &mut ConversationState {
        self.conversations
            .entry(conversation_id.to_string())
            .or_default()
    }

    pub fn pending(&self, conversation_id: &str) -> Option<&ConversationTurnState> {
        self.conversations
            .get(conversation_id)
            .and_then(|c| c.pending.as_ref())
    }

    pub fn set_pending(&mut self, conversation_id: &str, pending: ConversationTurnState) {
        self.get_conversation_state(conversation_id).pending = Some(pending);
    }

    /// Clears and returns the pending flow, if any.
    pub fn take_pending(&mut self, conversation_id: &str) -> Option<ConversationTurnState> {
        self.conversations
            .get_mut(conversation_id)
            .and_then(|c| c.pending.take())
    }
}

pub type SharedState = Arc<Mutex<BotState>>;

type LockMap = HashMap<String, Arc<Mutex<()>>>;

/// One lock per conversation. Holding the guard means owning that conversation's turn;
/// turns on other conversations are unaffected. A lock is dropped from the map once no
/// turn holds or waits on it.
#[derive(Debug, Default, Clone)]
pub struct ConversationGate {
    locks: Arc<StdMutex<LockMap>>,
}

/// Exclusive hold on one conversation's turn. Released on drop.
pub struct TurnGuard {
    guard: Option<OwnedMutexGuard<()>>,
    conversation_id: String,
    locks: Arc<StdMutex<LockMap>>,
}

impl Drop for TurnGuard {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map still holds the lock: nobody is running or queued.
        if locks
            .get(&self.conversation_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.conversation_id);
        }
    }
}

impl ConversationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn is running on `conversation_id`.
    pub async fn acquire(&self, conversation_id: &str) -> TurnGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(conversation_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        TurnGuard {
            guard: Some(lock.lock_owned().await),
            conversation_id: conversation_id.to_string(),
            locks: self.locks.clone(),
        }
    }

    /// True when a new turn on `conversation_id` could start right now.
    pub fn is_ready(&self, conversation_id: &str) -> bool {
        let locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        match locks.get(conversation_id) {
            Some(lock) => lock.try_lock().is_ok(),
            None => true,
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn awaiting() -> ConversationTurnState {
        ConversationTurnState::AwaitingJobDescription {
            req_id: "R1".into(),
            title: "Engineer".into(),
        }
    }

    #[test]
    fn pending_is_scoped_per_conversation() {
        let mut state = BotState::default();
        state.set_pending("a", awaiting());
        assert_eq!(state.pending("a"), Some(&awaiting()));
        assert_eq!(state.pending("b"), None);

        assert_eq!(state.take_pending("a"), Some(awaiting()));
        assert_eq!(state.pending("a"), None);
        assert_eq!(state.take_pending("a"), None);
    }

    #[tokio::test]
    async fn gate_serializes_same_conversation_only() {
        let gate = ConversationGate::new();
        let guard = gate.acquire("a").await;

        assert!(!gate.is_ready("a"));
        assert!(gate.is_ready("b"));
        let other = tokio::time::timeout(Duration::from_millis(100), gate.acquire("b")).await;
        assert!(other.is_ok());

        let blocked = tokio::time::timeout(Duration::from_millis(50), gate.acquire("a")).await;
        assert!(blocked.is_err());

        drop(guard);
        assert!(gate.is_ready("a"));
    }

    #[tokio::test]
    async fn idle_locks_are_released() {
        let gate = ConversationGate::new();
        let first = gate.acquire("a").await;
        let second = gate.acquire("b").await;
        assert_eq!(gate.tracked(), 2);

        drop(first);
        assert_eq!(gate.tracked(), 1);
        drop(second);
        assert_eq!(gate.tracked(), 0);
    }

    #[tokio::test]
    async fn lock_survives_while_a_turn_is_queued() {
        let gate = ConversationGate::new();
        let running = gate.acquire("a").await;

        let queued = {
            let gate = gate.clone();
            tokio::spawn(async move {
                let _turn = gate.acquire("a").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(running);
        assert_eq!(gate.tracked(), 1);
        queued.await.unwrap();
        assert_eq!(gate.tracked(), 0);
    }
}
