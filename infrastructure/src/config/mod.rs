//! Configuration file loading for pawchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PAWCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./pawchat.toml` or `./.pawchat.toml`
//! 4. Global: `$XDG_CONFIG_HOME/pawchat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileOpenAiConfig, FileReplConfig,
    FileTranscriptConfig,
};
pub use loader::ConfigLoader;
