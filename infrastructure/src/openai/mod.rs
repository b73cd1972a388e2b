//! OpenAI Chat Completions adapter
//!
//! Implements the [`CompletionGateway`](pawchat_application::CompletionGateway)
//! port over HTTPS with `reqwest`.

pub mod gateway;

pub use gateway::OpenAiCompletionGateway;
