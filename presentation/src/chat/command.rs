//! Slash commands understood by the chat REPL

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Quit,
    /// `/system <text>`
    SetSystemPrompt(String),
    /// Bare `/system`: show the prompt and open the multi-line editor
    EditSystemPrompt,
    Reset,
    History,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a trimmed input line. Returns `None` for ordinary chat input.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "help" | "h" | "?" => ReplCommand::Help,
            "system" | "prompt" if arg.is_empty() => ReplCommand::EditSystemPrompt,
            "system" | "prompt" => ReplCommand::SetSystemPrompt(arg.to_string()),
            "reset" | "new" | "clear" => ReplCommand::Reset,
            "history" => ReplCommand::History,
            _ => ReplCommand::Unknown(line.to_string()),
        };
        Some(command)
    }
}
