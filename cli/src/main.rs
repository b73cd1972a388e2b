//! CLI entrypoint for pawchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use pawchat_application::{ChatSession, ChatTurnUseCase};
use pawchat_infrastructure::{ConfigLoader, JsonlConversationLogger, OpenAiCompletionGateway};
use pawchat_presentation::{ChatRepl, Cli, ConsoleFormatter, ReplConfig};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        ConsoleFormatter::disable_color();
    }

    info!("Starting pawchat");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    // CLI flags take precedence over every config source
    if let Some(model) = &cli.model {
        config.openai.model = model.clone();
    }
    if let Some(prompt) = &cli.system_prompt {
        config.chat.system_prompt = Some(prompt.clone());
    }
    if let Some(path) = &cli.transcript {
        config.transcript.path = Some(path.display().to_string());
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", config.to_toml().context("Failed to render configuration")?);
        return Ok(());
    }

    config.validate()?;
    let api_key = config.openai.resolve_api_key()?;

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiCompletionGateway::new(
        config.openai.base_url.clone(),
        api_key,
    )?);

    let mut use_case = ChatTurnUseCase::new(gateway, config.openai.completion_params());

    if let Some(path) = &config.transcript.path {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Writing transcript to {}", logger.path().display());
                use_case = use_case.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Transcript disabled: could not open {}", path),
        }
    }

    let session = match &config.chat.system_prompt {
        Some(prompt) => ChatSession::with_default_system_prompt(prompt.trim()),
        None => ChatSession::new(),
    };

    let repl_config = ReplConfig {
        show_progress: !cli.quiet,
        history_file: config.repl.history_path(),
    };

    let mut repl = ChatRepl::new(use_case, session).with_config(repl_config);

    // Single message mode
    if let Some(message) = &cli.message {
        let outcome = repl.send_once(message).await;
        if let Some(e) = &outcome.failure {
            eprintln!(
                "{}",
                ConsoleFormatter::error(&format!("OpenAI API 호출 중 오류 발생: {}", e))
            );
        }
        println!("{}", outcome.reply);
        return Ok(());
    }

    repl.run().await?;

    Ok(())
}
