//! # Domain Layer
//!
//! Core definitions, types, and traits that define the business domain of the bot.
//! Independent of the channel and of the data backends, serving as the contract for other layers.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;
