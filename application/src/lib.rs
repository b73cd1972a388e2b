//! Application layer for pawchat
//!
//! This crate contains use cases, port definitions, session state and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session;
pub mod use_cases;

// Re-export commonly used types
pub use config::CompletionParams;
pub use ports::{
    completion_gateway::{CompletionGateway, CompletionRequest, GatewayError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
};
pub use session::ChatSession;
pub use use_cases::chat_turn::{ChatTurnUseCase, TurnOutcome};
