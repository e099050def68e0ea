//! # Help Command
//!
//! Handles `help`, greetings and unrecognized text.

use crate::domain::types::OutboundMessage;
use crate::strings::help;

pub fn handle_help(first_line: &str) -> Vec<OutboundMessage> {
    vec![OutboundMessage::text(help::help_message(first_line))]
}
