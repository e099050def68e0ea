//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (gateways, identity, cards, chat).

pub mod cards;
pub mod console;
pub mod identity;
pub mod memory;
