// Lia chat agent entry point
// Reads chat lines from stdin and answers through the configured backend.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use uuid::Uuid;

use lia_core::actors::{AgentHandle, HttpChatBackend};
use lia_core::brain::{ClassificationInput, MessageAnalyzer};
use lia_core::config::AgentConfig;
use lia_core::logging::init_tracing;
use lia_core::mode::{next_transition, Mode};

enum Command {
    Mode(Mode),
    Context(bool),
    Clear,
    Quit,
}

fn parse_command(line: &str) -> Option<Result<Command, String>> {
    let rest = line.strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let command = match (name, arg) {
        ("mode", Some(value)) => value
            .parse::<Mode>()
            .map(Command::Mode)
            .map_err(|e| e.to_string()),
        ("context", Some("on")) => Ok(Command::Context(true)),
        ("context", Some("off")) => Ok(Command::Context(false)),
        ("clear", None) => Ok(Command::Clear),
        ("quit", None) | ("exit", None) => Ok(Command::Quit),
        _ => Err(format!(
            "Unknown command '{}'. Use /mode normal|prompt|image, /context on|off, /clear, /quit",
            line
        )),
    };
    Some(command)
}

/// Prints one JSON analysis per input line. The mode carries over between
/// lines the same way it does in a chat session.
async fn run_classify() -> Result<()> {
    let analyzer = MessageAnalyzer::new();
    let mut mode = Mode::Normal;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let analysis = analyzer.analyze(&ClassificationInput::new(line, mode));
        let transition = next_transition(mode, &analysis);
        mode = transition.to;

        let output = serde_json::json!({
            "analysis": analysis,
            "transition": transition,
        });
        println!("{}", serde_json::to_string(&output)?);
    }
    Ok(())
}

async fn run_chat(config: AgentConfig) -> Result<()> {
    let backend = HttpChatBackend::new(&config).context("Failed to build backend client")?;
    info!("Backend endpoint: {}", backend.endpoint());

    let agent = AgentHandle::new(Arc::new(backend), config);
    let session_id = Uuid::new_v4().to_string();
    info!(session_id = %session_id, "Chat session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = parse_command(line) {
            match command {
                Ok(Command::Mode(mode)) => {
                    let mode = agent.set_mode(session_id.clone(), mode).await?;
                    println!("[{}] {}", mode, mode.acknowledgement());
                }
                Ok(Command::Context(enabled)) => {
                    agent
                        .set_persistent_context(session_id.clone(), enabled)
                        .await?;
                    println!("Persistent context {}", if enabled { "on" } else { "off" });
                }
                Ok(Command::Clear) => {
                    agent.clear_history(session_id.clone()).await?;
                    println!("History cleared");
                }
                Ok(Command::Quit) => break,
                Err(message) => eprintln!("{}", message),
            }
            continue;
        }

        match agent
            .process_message(session_id.clone(), line.to_string())
            .await
        {
            Ok(reply) => {
                if let Some(ack) = reply.acknowledgement() {
                    println!("[{}] {}", reply.mode, ack);
                }
                if let Some(response) = &reply.response {
                    println!("{}", response);
                }
            }
            Err(e) => error!("Message failed: {}", e),
        }
    }

    agent.shutdown().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AgentConfig::load().context("Invalid configuration")?;
    init_tracing(config.log_format)?;

    match std::env::args().nth(1).as_deref() {
        Some("classify") => run_classify().await,
        Some(other) => anyhow::bail!("Unknown subcommand '{}'. Expected: classify", other),
        None => run_chat(config).await,
    }
}
