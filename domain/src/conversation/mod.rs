//! Conversation domain.
//!
//! - [`entities::Conversation`]: the ordered system + turn sequence of a session
//! - [`entities::Message`]: a single message within a conversation
//! - [`prompt::DEFAULT_SYSTEM_PROMPT`]: instruction used for a fresh conversation

pub mod entities;
pub mod prompt;
