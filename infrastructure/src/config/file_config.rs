//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types where
//! the rest of the program needs them.

use pawchat_application::CompletionParams;
use pawchat_application::config::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("openai.model cannot be empty")]
    EmptyModelName,

    #[error("openai.temperature must be between 0.0 and 2.0 (got {0})")]
    InvalidTemperature(f32),

    #[error("openai.max_tokens cannot be 0")]
    InvalidMaxTokens,

    #[error("chat.system_prompt cannot be blank")]
    BlankSystemPrompt,

    #[error(
        "OpenAI API key is not configured. Set the {env} environment variable or openai.api_key"
    )]
    MissingApiKey { env: String },
}

/// OpenAI-compatible completion endpoint configuration (`[openai]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended: use env var instead).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL for the API (can point at any OpenAI-compatible server).
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Max tokens per response.
    pub max_tokens: u32,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl FileOpenAiConfig {
    /// Resolve the credential: a direct `api_key` wins over the environment variable.
    pub fn resolve_api_key(&self) -> Result<String, ConfigValidationError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigValidationError> {
        self.api_key
            .clone()
            .or_else(|| lookup(&self.api_key_env))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigValidationError::MissingApiKey {
                env: self.api_key_env.clone(),
            })
    }

    /// Convert to request-level parameters.
    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams::default()
            .with_model(self.model.clone())
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_tokens)
    }
}

/// Conversation configuration (`[chat]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Replaces the built-in system prompt for new sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

/// REPL configuration (`[repl]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to history file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<String>,
}

impl FileReplConfig {
    /// Configured history path, or `<data_dir>/pawchat/history.txt`.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::data_dir().map(|p| p.join("pawchat").join("history.txt")),
        }
    }
}

/// Transcript configuration (`[transcript]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTranscriptConfig {
    /// JSONL file receiving every conversation event; disabled when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Root of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub openai: FileOpenAiConfig,
    pub chat: FileChatConfig,
    pub repl: FileReplConfig,
    pub transcript: FileTranscriptConfig,
}

impl FileConfig {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.openai.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if !(0.0..=2.0).contains(&self.openai.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.openai.temperature,
            ));
        }

        if self.openai.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }

        if let Some(prompt) = &self.chat.system_prompt
            && prompt.trim().is_empty()
        {
            return Err(ConfigValidationError::BlankSystemPrompt);
        }

        Ok(())
    }

    /// Render the effective configuration as TOML (API key omitted).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        let mut redacted = self.clone();
        redacted.openai.api_key = None;
        toml::to_string_pretty(&redacted)
    }
}
