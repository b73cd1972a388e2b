//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ChatRepl;
