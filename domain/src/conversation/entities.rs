//! Conversation domain entities

use super::prompt::DEFAULT_SYSTEM_PROMPT;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// The ordered message sequence of one chat session (Entity)
///
/// Index 0 always holds the single `System` message; everything after it is
/// user and assistant turns in arrival order. The sequence only grows,
/// except through [`reset`](Self::reset) (truncate to the system message)
/// and [`replace_system_prompt`](Self::replace_system_prompt) (rewrite
/// message 0 in place).
///
/// # Examples
///
/// ```
/// use pawchat_domain::{Conversation, Role};
///
/// let mut conversation = Conversation::initialize();
/// conversation.append(Role::User, "아파트에서 키울 작은 개를 찾고 있어요");
/// conversation.append(Role::Assistant, "푸들이나 시츄를 추천합니다.");
/// assert_eq!(conversation.len(), 3);
/// assert_eq!(conversation.visible_messages().count(), 2);
///
/// conversation.reset();
/// assert_eq!(conversation.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Start a conversation holding only the built-in system instruction.
    pub fn initialize() -> Self {
        Self::with_system_prompt(DEFAULT_SYSTEM_PROMPT)
    }

    /// Start a conversation holding only the given system instruction.
    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Replace the content of the system message with the trimmed `new_text`.
    ///
    /// Blank input is rejected with [`DomainError::EmptyInput`] and the
    /// conversation is left untouched.
    pub fn replace_system_prompt(&mut self, new_text: &str) -> Result<(), DomainError> {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyInput);
        }
        self.messages[0].content = trimmed.to_string();
        Ok(())
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.append(Role::User, content);
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.append(Role::Assistant, content);
    }

    /// Drop every turn, keeping the (possibly edited) system message.
    pub fn reset(&mut self) {
        self.messages.truncate(1);
    }

    /// Messages meant for display: everything except the system message.
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role != Role::System)
    }

    /// Full snapshot including the system message, as sent to the model.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn system_prompt(&self) -> &str {
        &self.messages[0].content
    }

    /// Number of messages, system message included. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::initialize()
    }
}
