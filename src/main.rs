//! # Main Entry Point
//!
//! Runs the talent bot against a console channel:
//! - Domain: Configuration, Types, Collaborator traits
//! - Infrastructure: In-memory talent data, Graph identity client, Card renderer, Console chat
//! - Application: Router, Parser, Intent and Structured Action dispatchers, Conversation state
//! - Interface: Command Handlers
//!
//! Activities are read as JSON lines (Bot Framework activity schema) from a file or stdin.
//! Each conversation is replayed in order; different conversations run concurrently.

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::Mutex;

use crate::application::router::ActivityRouter;
use crate::application::services::BotServices;
use crate::application::state::BotState;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::domain::types::Activity;
use crate::infrastructure::cards::AdaptiveCardRenderer;
use crate::infrastructure::console::ConsoleChat;
use crate::infrastructure::identity::HttpIdentityClient;
use crate::infrastructure::memory::{InMemoryCandidates, InMemoryPositions};

#[derive(Debug, Parser)]
#[command(name = "talent-bot", about = "Talent management chat bot (console channel)")]
struct Args {
    /// Configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// JSON-lines file of activities; reads stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Only log to the session file
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = if args.config.exists() {
        AppConfig::load(&args.config)?
    } else {
        AppConfig::default()
    };

    // 2. Logging Setup
    let log_dir = std::path::Path::new(&config.logging.directory);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }
    let file_appender =
        tracing_appender::rolling::never(&config.logging.directory, &config.logging.file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    // Replies go to stdout, so console logs go to stderr.
    let console_layer = if !args.quiet {
        Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    } else {
        None
    };

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if !args.config.exists() {
        tracing::warn!("{} not found, using defaults", args.config.display());
    }
    tracing::info!("Starting {}...", config.bot.name);

    // 3. Initialize Infrastructure
    let identity = HttpIdentityClient::new(config.identity.clone())?;
    let services = BotServices::new(
        config.clone(),
        Arc::new(InMemoryCandidates::seeded()),
        Arc::new(InMemoryPositions::seeded()),
        Arc::new(identity),
        Arc::new(AdaptiveCardRenderer),
    );

    // 4. Initialize Application Components
    let state = Arc::new(Mutex::new(BotState::default()));
    let router = ActivityRouter::new(services, state);

    // 5. Read Activities
    let activities = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_activities(file).await?
        }
        None => read_activities(tokio::io::stdin()).await?,
    };
    tracing::info!("Loaded {} activities", activities.len());

    // 6. Replay, one task per conversation
    let turns = group_by_conversation(activities)
        .into_iter()
        .map(|(conversation_id, activities)| {
            let router = router.clone();
            async move { replay_conversation(&router, conversation_id, activities).await }
        });
    futures::future::join_all(turns).await;

    let conversations = router.state().lock().await.conversations.len();
    tracing::info!("Done, {} conversations served", conversations);
    Ok(())
}

async fn read_activities<R>(reader: R) -> Result<Vec<Activity>>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut activities = Vec::new();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<Activity>(line) {
            Ok(activity) => activities.push(activity),
            Err(e) => tracing::warn!("Skipping line {}: not an activity ({})", line_no, e),
        }
    }
    Ok(activities)
}

/// Groups activities per conversation, keeping arrival order within and across groups.
fn group_by_conversation(activities: Vec<Activity>) -> Vec<(String, Vec<Activity>)> {
    let mut groups: Vec<(String, Vec<Activity>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for activity in activities {
        let id = activity.conversation_id().to_string();
        match index.get(&id) {
            Some(&i) => groups[i].1.push(activity),
            None => {
                index.insert(id.clone(), groups.len());
                groups.push((id, vec![activity]));
            }
        }
    }
    groups
}

async fn replay_conversation(
    router: &ActivityRouter,
    conversation_id: String,
    activities: Vec<Activity>,
) {
    let chat = ConsoleChat::new(conversation_id);
    for activity in &activities {
        let outcome = router.route(activity).await;
        for message in &outcome.messages {
            if let Err(e) = chat.send_message(message).await {
                tracing::error!(
                    "Failed to deliver message to {}: {}",
                    chat.conversation_id(),
                    e
                );
            }
        }
        if let Some(body) = &outcome.invoke_response {
            chat.print_invoke_response(body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_json_lines_and_skips_noise() {
        let input = concat!(
            "# comment\n",
            "{\"type\":\"message\",\"text\":\"help\",\"conversation\":{\"id\":\"a\"},\"from\":{\"id\":\"u1\",\"name\":\"Megan\"}}\n",
            "\n",
            "not json\n",
            "{\"type\":\"invoke\",\"name\":\"composeExtension/query\",\"value\":{\"commandId\":\"searchPositions\"},\"conversation\":{\"id\":\"b\"}}\n",
        );
        let activities = read_activities(input.as_bytes()).await.unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].text.as_deref(), Some("help"));
        assert_eq!(activities[1].name.as_deref(), Some("composeExtension/query"));
    }

    #[test]
    fn grouping_keeps_order() {
        let activity = |conv: &str, text: &str| Activity {
            text: Some(text.into()),
            conversation: crate::domain::types::ConversationAccount { id: conv.into() },
            ..Default::default()
        };
        let groups = group_by_conversation(vec![
            activity("a", "1"),
            activity("b", "2"),
            activity("a", "3"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "a");
        let texts: Vec<_> = groups[0].1.iter().map(|a| a.text.clone().unwrap()).collect();
        assert_eq!(texts, vec!["1", "3"]);
    }
}
