//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::ReplCommand;
use crate::ConsoleFormatter;
use crate::ReplConfig;
use crate::progress::ThinkingSpinner;
use pawchat_application::{ChatSession, ChatTurnUseCase, TurnOutcome};
use pawchat_domain::Message;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::debug;

const MSG_PROMPT_APPLIED: &str = "시스템 프롬프트가 적용되었습니다.";
const MSG_PROMPT_BLANK: &str =
    "빈 입력은 적용할 수 없습니다. 기존 프롬프트를 보려면 /system 을 입력하세요.";
const MSG_RESET: &str = "대화가 초기화되었습니다.";
const MSG_THINKING: &str = "답변을 생성하는 중...";

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: ChatTurnUseCase,
    session: ChatSession,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: ChatTurnUseCase, session: ChatSession) -> Self {
        Self {
            use_case,
            session,
            config: ReplConfig::default(),
        }
    }

    /// Set REPL configuration
    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Send one message outside the interactive loop and return the outcome
    pub async fn send_once(&mut self, text: &str) -> TurnOutcome {
        let spinner = ThinkingSpinner::start(self.config.show_progress, MSG_THINKING);
        let outcome = self
            .use_case
            .send_user_message(self.session.conversation(), text)
            .await;
        spinner.finish();
        outcome
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        println!("{}", ConsoleFormatter::welcome(&self.use_case.params().model));
        let conversation = self.session.conversation();
        if conversation.visible_messages().next().is_some() {
            print!("{}", ConsoleFormatter::format_history(conversation));
        }

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command, &mut rl) {
                            break;
                        }
                        continue;
                    }

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand, rl: &mut DefaultEditor) -> bool {
        debug!("REPL command: {:?}", command);
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                print!("{}", ConsoleFormatter::help());
            }
            ReplCommand::SetSystemPrompt(text) => self.apply_system_prompt(&text),
            ReplCommand::EditSystemPrompt => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_system_prompt(
                        self.session.conversation().system_prompt()
                    )
                );
                println!();
                if let Some(text) = read_multiline(rl) {
                    self.apply_system_prompt(&text);
                }
            }
            ReplCommand::Reset => {
                self.use_case.reset(self.session.conversation());
                println!("{}", ConsoleFormatter::success(MSG_RESET));
            }
            ReplCommand::History => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_history(self.session.conversation())
                );
            }
            ReplCommand::Unknown(input) => {
                println!("Unknown command: {}", input);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn apply_system_prompt(&mut self, text: &str) {
        match self
            .use_case
            .apply_system_prompt(self.session.conversation(), text)
        {
            Ok(()) => println!("{}", ConsoleFormatter::success(MSG_PROMPT_APPLIED)),
            Err(_) => println!("{}", ConsoleFormatter::warning(MSG_PROMPT_BLANK)),
        }
    }

    async fn process_message(&mut self, text: &str) {
        println!();
        let outcome = self.send_once(text).await;

        if let Some(e) = &outcome.failure {
            eprintln!(
                "{}",
                ConsoleFormatter::error(&format!("OpenAI API 호출 중 오류 발생: {}", e))
            );
        }
        println!(
            "{}",
            ConsoleFormatter::format_message(&Message::assistant(outcome.reply))
        );
    }
}

/// Read lines until a line holding only `.` or EOF. Ctrl-C cancels.
fn read_multiline(rl: &mut DefaultEditor) -> Option<String> {
    println!("Enter the new system prompt. Finish with a line containing only '.', Ctrl-C to cancel.");
    let mut lines = Vec::new();
    loop {
        match rl.readline("... ") {
            Ok(line) if line.trim() == "." => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Eof) => break,
            Err(_) => {
                println!("^C");
                return None;
            }
        }
    }
    Some(lines.join("\n"))
}
