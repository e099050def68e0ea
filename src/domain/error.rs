//! # Dispatch Errors
//!
//! Failures that can happen inside a single turn. None of them escape the turn:
//! the router turns each into a reply.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// A structured payload field was missing or malformed.
    #[error("invalid `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("data gateway failed: {0}")]
    Gateway(#[source] anyhow::Error),

    #[error("identity service failed: {0}")]
    Identity(#[source] anyhow::Error),
}

impl DispatchError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
