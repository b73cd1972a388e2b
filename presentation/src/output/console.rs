//! Console output formatter for the chat transcript

use colored::Colorize;
use pawchat_domain::{Conversation, Message, Role};

/// Title shown at the top of the chat
pub const TITLE: &str = "🐶 강아지 품종 추천 챗봇";

/// One-line description under the title
pub const DESCRIPTION: &str =
    "강아지의 생활 방식과 선호도를 입력하면 적합한 품종을 추천해주고, 추가 질문으로 대화를 이어갑니다.";

/// Hint describing what to type
pub const INPUT_HINT: &str =
    "강아지에 대해 어떤 점을 중요하게 생각하시나요? (예: 활동량, 크기, 알레르기 등)";

/// Formats chat messages and notices for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn off ANSI colors for everything printed afterwards
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Banner printed when the chat starts
    pub fn welcome(model: &str) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(&format!("{}\n", TITLE.bold()));
        output.push_str(&format!("{}\n\n", DESCRIPTION));
        output.push_str(&format!("{} {}\n\n", "Model:".cyan().bold(), model));
        output.push_str(&Self::help());
        output.push_str(&format!("\n{}\n", INPUT_HINT.dimmed()));
        output
    }

    /// Slash command reference
    pub fn help() -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Commands:".cyan().bold()));
        output.push_str("  /system <text>  - Replace the system prompt\n");
        output.push_str("  /system         - Show the system prompt and edit it (end with a '.' line)\n");
        output.push_str("  /reset          - Start a new chat (대화 초기화)\n");
        output.push_str("  /history        - Show the conversation so far\n");
        output.push_str("  /help           - Show this help\n");
        output.push_str("  /quit           - Exit chat\n");
        output
    }

    /// A single chat message with a role label
    pub fn format_message(message: &Message) -> String {
        let label = match message.role {
            Role::User => "You".cyan().bold(),
            Role::Assistant => "Assistant".yellow().bold(),
            Role::System => "System".magenta().bold(),
        };
        format!("{}\n{}\n", label, message.content)
    }

    /// All visible messages, in order; the system message is never shown
    pub fn format_history(conversation: &Conversation) -> String {
        let mut output = String::new();
        for message in conversation.visible_messages() {
            output.push_str(&Self::format_message(message));
            output.push('\n');
        }
        if output.is_empty() {
            output.push_str(&format!("{}\n", "(no messages yet)".dimmed()));
        }
        output
    }

    /// Current system prompt, for the editor
    pub fn format_system_prompt(prompt: &str) -> String {
        format!("{}\n{}\n", "Current system prompt:".cyan().bold(), prompt)
    }

    pub fn success(message: &str) -> String {
        format!("{} {}", "✔".green().bold(), message.green())
    }

    pub fn warning(message: &str) -> String {
        format!("{} {}", "!".yellow().bold(), message.yellow())
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "✘".red().bold(), message.red())
    }
}
