//! # Command Handlers
//!
//! One handler module per thing the bot can do. These are invoked by the dispatchers
//! in the application layer.

pub mod candidates;
pub mod extension;
pub mod help;
pub mod login;
pub mod positions;
pub mod posting;
pub mod upload;
