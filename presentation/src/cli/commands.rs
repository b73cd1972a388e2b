//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for pawchat
#[derive(Parser, Debug)]
#[command(name = "pawchat")]
#[command(author, version, about = "Dog breed recommendation chatbot for the terminal")]
#[command(long_about = r#"
pawchat recommends dog breeds from your lifestyle and preferences, and keeps
the conversation going with follow-up questions.

Without a MESSAGE argument an interactive chat starts. Inside the chat:
  /system <text>   Replace the system prompt (bare /system opens a multi-line editor)
  /reset           Start a new chat, keeping the system prompt
  /history         Show the conversation so far
  /quit            Exit

The OpenAI API key is read from $OPENAI_API_KEY (see [openai].api_key_env).

Configuration files are loaded from (in priority order):
1. PAWCHAT_* environment variables (e.g. PAWCHAT_OPENAI__MODEL)
2. --config <path>     Explicit config file
3. ./pawchat.toml      Project-level config
4. ~/.config/pawchat/config.toml   Global config

Example:
  pawchat
  pawchat "아파트에서 키우기 좋은 조용한 소형견을 추천해 주세요"
  pawchat -m gpt-4o --transcript ./chat.jsonl
"#)]
pub struct Cli {
    /// Send a single message, print the reply and exit
    pub message: Option<String>,

    /// Model to use for completions
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// System prompt for the new conversation
    #[arg(long, value_name = "TEXT")]
    pub system_prompt: Option<String>,

    /// Append a JSONL transcript of the conversation to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
