//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording transcript events
//! (prompt edits, resets, user messages, assistant replies) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! conversation transcript in a machine-readable format (JSONL).

use pawchat_domain::Message;
use serde_json::{Value, json};

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The sink adds the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    /// Event type identifier (e.g., "user_message", "assistant_reply").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn system_prompt_replaced(content: &str) -> Self {
        Self::new("system_prompt_replaced", json!({ "content": content }))
    }

    pub fn conversation_reset(system_prompt: &str) -> Self {
        Self::new("conversation_reset", json!({ "system_prompt": system_prompt }))
    }

    pub fn user_message(message: &Message) -> Self {
        Self::new("user_message", json!({ "content": message.content }))
    }

    pub fn assistant_reply(model: &str, content: &str, fallback: bool) -> Self {
        Self::new(
            "assistant_reply",
            json!({ "model": model, "content": content, "fallback": fallback }),
        )
    }

    pub fn completion_failed(model: &str, error: &str) -> Self {
        Self::new(
            "completion_failed",
            json!({ "model": model, "error": error }),
        )
    }
}

/// Port for logging conversation events to a structured log.
///
/// The `log` method is synchronous and non-fallible; sink failures are
/// swallowed by the implementation and never reach the chat flow.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
