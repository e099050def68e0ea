//! # Command Parsing
//!
//! Turns the text of a chat message into a [`Command`]. Matching is loose:
//! the first word only has to *contain* a keyword, and arguments start at the third word
//! so that two-word prefixes like `candidate details` or `top candidates` are skipped.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::types::{Command, CommandKind};

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<at[^>]*>.*?</at>").expect("mention pattern is valid"));

/// Removes `<at>…</at>` mention markup so bot names never reach keyword matching.
pub fn strip_mentions(text: &str) -> String {
    MENTION.replace_all(text, " ").trim().to_string()
}

pub fn parse(text: &str) -> Command {
    let normalized = strip_mentions(text);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    if tokens.len() < 2 {
        let word = tokens.first().map(|t| t.to_lowercase()).unwrap_or_default();
        let kind = if word.contains("help") {
            CommandKind::Help
        } else if ["welcome", "hello", "hi"].iter().any(|k| word.contains(k)) {
            CommandKind::Welcome
        } else if word.contains("login") {
            CommandKind::Login
        } else {
            CommandKind::Unknown
        };
        return Command::new(kind);
    }

    let cmd = tokens[0].to_lowercase();
    let keywords: Vec<String> = tokens.iter().skip(2).map(|t| t.to_string()).collect();

    if cmd.contains("top") && !keywords.is_empty() {
        Command::with_args(CommandKind::TopCandidates, keywords)
    } else if cmd.contains("open") {
        Command::with_args(CommandKind::OpenPositions, keywords)
    } else if cmd.contains("candidate") {
        // May be empty: the dispatcher can still answer from a card payload.
        Command::with_args(CommandKind::CandidateDetails, keywords)
    } else if cmd.contains("new") {
        Command::with_args(CommandKind::NewPosting, keywords)
    } else {
        Command::new(CommandKind::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_candidates_takes_third_token() {
        assert_eq!(
            parse("top candidates 0F812D01"),
            Command::with_args(CommandKind::TopCandidates, vec!["0F812D01".into()])
        );
    }

    #[test]
    fn candidate_details_skips_second_token() {
        // The second word is always dropped, even when it is part of the name.
        assert_eq!(
            parse("candidate details John Smith"),
            Command::with_args(
                CommandKind::CandidateDetails,
                vec!["John".into(), "Smith".into()]
            )
        );
        assert_eq!(
            parse("candidate John Smith"),
            Command::with_args(CommandKind::CandidateDetails, vec!["Smith".into()])
        );
    }

    #[test]
    fn open_positions_has_no_args() {
        assert_eq!(
            parse("open positions"),
            Command::new(CommandKind::OpenPositions)
        );
    }

    #[test]
    fn first_token_matches_by_containment() {
        assert_eq!(parse("TOPx candidates R1").kind, CommandKind::TopCandidates);
        assert_eq!(parse("reopen stuff").kind, CommandKind::OpenPositions);
        assert_eq!(parse("renew posting").kind, CommandKind::NewPosting);
        // "top" wins over "open" when both are present.
        assert_eq!(parse("topopen x R1").kind, CommandKind::TopCandidates);
    }

    #[test]
    fn top_without_keyword_falls_through() {
        assert_eq!(parse("top candidates").kind, CommandKind::Unknown);
        assert_eq!(parse("topnew candidates").kind, CommandKind::NewPosting);
    }

    #[test]
    fn single_tokens_never_carry_args() {
        for (text, kind) in [
            ("help", CommandKind::Help),
            ("HELLO", CommandKind::Welcome),
            ("hi", CommandKind::Welcome),
            ("welcome", CommandKind::Welcome),
            ("login", CommandKind::Login),
            ("help!", CommandKind::Help),
            ("help?", CommandKind::Help),
            ("hello,", CommandKind::Welcome),
            ("hi!", CommandKind::Welcome),
            ("hiya", CommandKind::Welcome),
            ("Login.", CommandKind::Login),
            ("top", CommandKind::Unknown),
            ("", CommandKind::Unknown),
            ("   ", CommandKind::Unknown),
        ] {
            let command = parse(text);
            assert_eq!(command.kind, kind, "input {text:?}");
            assert!(command.args.is_empty());
        }
    }

    #[test]
    fn single_token_keywords_are_checked_in_order() {
        // "help" outranks the greeting words it happens to contain.
        assert_eq!(parse("helphi").kind, CommandKind::Help);
        assert_eq!(parse("hi-login").kind, CommandKind::Welcome);
        assert_eq!(parse("thanks").kind, CommandKind::Unknown);
    }

    #[test]
    fn mentions_are_stripped_before_matching() {
        assert_eq!(
            strip_mentions("<at>Talent Bot</at> open positions"),
            "open positions"
        );
        assert_eq!(parse("<at>Talent Bot</at> help").kind, CommandKind::Help);
        assert_eq!(
            parse("<at>Top Bot</at> new posting").kind,
            CommandKind::NewPosting
        );
    }

    #[test]
    fn unmatched_multi_word_text_is_unknown() {
        assert_eq!(parse("schedule interview John").kind, CommandKind::Unknown);
    }
}
