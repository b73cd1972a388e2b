//! Domain layer for pawchat
//!
//! This crate contains the conversation model and the completion reply
//! normalization rules. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! One system message at index 0, followed by user/assistant turns. It is
//! append-only apart from two explicit operations: reset (truncate to the
//! system message) and system prompt replacement.
//!
//! ## Completion Reply
//!
//! The remote completion body arrives in one of several shapes;
//! [`CompletionReply`] names them and reduces each to plain text.

pub mod completion;
pub mod conversation;
pub mod core;

// Re-export commonly used types
pub use completion::reply::{CompletionReply, FALLBACK_REPLY, normalize};
pub use conversation::{
    entities::{Conversation, Message, Role},
    prompt::DEFAULT_SYSTEM_PROMPT,
};
pub use crate::core::error::DomainError;
