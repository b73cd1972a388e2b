//! Completion Gateway port
//!
//! Defines the interface for calling a remote chat-completion service.

use crate::config::CompletionParams;
use async_trait::async_trait;
use pawchat_domain::{CompletionReply, Message};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Body of a completion call: the full conversation snapshot plus sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    #[serde(rename = "max_tokens")]
    pub max_output_tokens: u32,
}

impl CompletionRequest {
    /// Build a request from a snapshot of the conversation (system message included).
    pub fn new(messages: &[Message], params: &CompletionParams) -> Self {
        Self {
            model: params.model.clone(),
            messages: messages.to_vec(),
            temperature: params.temperature,
            max_output_tokens: params.max_output_tokens,
        }
    }
}

/// Gateway to a remote completion service
///
/// This port defines how the application layer reaches the model.
/// Implementations (adapters) live in the infrastructure layer. A gateway
/// never sees the live conversation, only the request built from a snapshot.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send the request and return the classified reply body
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, GatewayError>;
}
