//! Session-scoped conversation state.
//!
//! [`ChatSession`] owns the one [`Conversation`] of a running session.
//! Lifecycle: the conversation is created on first access, lives as long
//! as the session value, and is dropped with it. There is no teardown hook
//! and nothing is persisted.

use pawchat_domain::{Conversation, DEFAULT_SYSTEM_PROMPT};
use tracing::debug;

/// Holder for the session's conversation, initialized on first use.
#[derive(Debug)]
pub struct ChatSession {
    default_system_prompt: String,
    conversation: Option<Conversation>,
}

impl ChatSession {
    /// Session whose conversation will start from the built-in instruction.
    pub fn new() -> Self {
        Self::with_default_system_prompt(DEFAULT_SYSTEM_PROMPT)
    }

    /// Session whose conversation will start from `system_prompt`.
    pub fn with_default_system_prompt(system_prompt: impl Into<String>) -> Self {
        Self {
            default_system_prompt: system_prompt.into(),
            conversation: None,
        }
    }

    /// The session's conversation, created on first access.
    pub fn conversation(&mut self) -> &mut Conversation {
        let default_prompt = &self.default_system_prompt;
        self.conversation.get_or_insert_with(|| {
            debug!("Initializing conversation for session");
            Conversation::with_system_prompt(default_prompt.clone())
        })
    }

    /// Whether the conversation has been created yet.
    pub fn is_initialized(&self) -> bool {
        self.conversation.is_some()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_initialization() {
        let mut session = ChatSession::new();
        assert!(!session.is_initialized());

        let conversation = session.conversation();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert!(session.is_initialized());
    }

    #[test]
    fn test_conversation_survives_between_accesses() {
        let mut session = ChatSession::with_default_system_prompt("custom");
        session.conversation().add_user_message("hello");

        let conversation = session.conversation();
        assert_eq!(conversation.system_prompt(), "custom");
        assert_eq!(conversation.len(), 2);
    }
}
