//! # Application Layer
//!
//! The dispatch core: command parsing, the intent and structured action dispatchers,
//! conversation state, and the router that ties them into one turn.

pub mod actions;
pub mod intent;
pub mod parsing;
pub mod router;
pub mod services;
pub mod state;
