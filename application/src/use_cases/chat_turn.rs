//! Chat turn use case.
//!
//! Handles the three interactions a chat front-end can trigger against a
//! session's [`Conversation`]:
//!
//! 1. Replace the system prompt ([`ChatTurnUseCase::apply_system_prompt`])
//! 2. Start over ([`ChatTurnUseCase::reset`])
//! 3. Send a user message and append the model's reply
//!    ([`ChatTurnUseCase::send_user_message`])
//!
//! The conversation is passed in by the caller for each interaction; the
//! use case holds no conversation state of its own.

use crate::config::CompletionParams;
use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use pawchat_domain::{Conversation, DomainError, FALLBACK_REPLY, Message};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a user turn.
///
/// `reply` is what was appended to the conversation as the assistant
/// message. When the completion call failed, `reply` is the fixed
/// fallback text and `failure` carries the cause for display.
#[derive(Debug)]
pub struct TurnOutcome {
    pub reply: String,
    pub failure: Option<GatewayError>,
}

impl TurnOutcome {
    pub fn is_fallback(&self) -> bool {
        self.failure.is_some()
    }
}

/// Use case for driving a conversation turn by turn.
pub struct ChatTurnUseCase {
    gateway: Arc<dyn CompletionGateway>,
    params: CompletionParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatTurnUseCase {
    pub fn new(gateway: Arc<dyn CompletionGateway>, params: CompletionParams) -> Self {
        Self {
            gateway,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &CompletionParams {
        &self.params
    }

    /// Replace the system prompt. Blank input leaves the conversation unchanged.
    pub fn apply_system_prompt(
        &self,
        conversation: &mut Conversation,
        new_text: &str,
    ) -> Result<(), DomainError> {
        match conversation.replace_system_prompt(new_text) {
            Ok(()) => {
                info!("System prompt replaced ({} chars)", conversation.system_prompt().len());
                self.conversation_logger
                    .log(ConversationEvent::system_prompt_replaced(
                        conversation.system_prompt(),
                    ));
                Ok(())
            }
            Err(e) => {
                warn!("Rejected system prompt edit: {}", e);
                Err(e)
            }
        }
    }

    /// Discard all turns, keeping the current system prompt.
    pub fn reset(&self, conversation: &mut Conversation) {
        let discarded = conversation.len() - 1;
        conversation.reset();
        info!("Conversation reset ({} messages discarded)", discarded);
        self.conversation_logger
            .log(ConversationEvent::conversation_reset(
                conversation.system_prompt(),
            ));
    }

    /// Append the user message, ask the model, and append its reply.
    ///
    /// Exactly one assistant message is appended on every call: the
    /// normalized reply on success, [`FALLBACK_REPLY`] on any gateway error.
    pub async fn send_user_message(
        &self,
        conversation: &mut Conversation,
        text: impl Into<String>,
    ) -> TurnOutcome {
        let message = Message::user(text);
        self.conversation_logger
            .log(ConversationEvent::user_message(&message));
        conversation.append(message.role, message.content);

        let outcome = match self.complete(conversation.messages()).await {
            Ok(reply) => TurnOutcome {
                reply,
                failure: None,
            },
            Err(e) => {
                warn!("Completion failed, substituting fallback reply: {}", e);
                self.conversation_logger.log(ConversationEvent::completion_failed(
                    &self.params.model,
                    &e.to_string(),
                ));
                TurnOutcome {
                    reply: FALLBACK_REPLY.to_string(),
                    failure: Some(e),
                }
            }
        };

        self.conversation_logger
            .log(ConversationEvent::assistant_reply(
                &self.params.model,
                &outcome.reply,
                outcome.is_fallback(),
            ));
        conversation.add_assistant_message(outcome.reply.clone());
        outcome
    }

    /// Call the gateway with a snapshot and normalize the reply, without fallback.
    pub async fn complete(&self, snapshot: &[Message]) -> Result<String, GatewayError> {
        let request = CompletionRequest::new(snapshot, &self.params);
        debug!(
            "Requesting completion from {} with {} messages",
            request.model,
            request.messages.len()
        );

        let reply = self.gateway.complete(&request).await?;
        debug!("Completion reply shape: {}", reply.shape());
        Ok(reply.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pawchat_domain::{CompletionReply, Role};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockGateway {
        responses: Mutex<VecDeque<Result<CompletionReply, GatewayError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockGateway {
        fn new(responses: Vec<Result<CompletionReply, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn replying(text: &str) -> Self {
            Self::new(vec![Ok(CompletionReply::ChoicesWithMapMessage {
                content: Some(text.to_string()),
            })])
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionGateway for MockGateway {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionReply, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<ConversationEvent>>,
    }

    impl RecordingLogger {
        fn event_types(&self) -> Vec<&'static str> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.event_type)
                .collect()
        }
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn use_case(gateway: Arc<MockGateway>) -> ChatTurnUseCase {
        ChatTurnUseCase::new(gateway, CompletionParams::default())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_user_turn_appends_user_and_assistant() {
        let gateway = Arc::new(MockGateway::replying("Golden Retriever 추천합니다"));
        let use_case = use_case(gateway.clone());
        let mut conversation = Conversation::initialize();

        let outcome = use_case
            .send_user_message(&mut conversation, "가족용 대형견")
            .await;

        assert_eq!(outcome.reply, "Golden Retriever 추천합니다");
        assert!(!outcome.is_fallback());
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.messages()[1], Message::user("가족용 대형견"));
        assert_eq!(
            conversation.messages()[2],
            Message::assistant("Golden Retriever 추천합니다")
        );
    }

    #[tokio::test]
    async fn test_request_carries_full_conversation_and_params() {
        let gateway = Arc::new(MockGateway::replying("reply"));
        let use_case = use_case(gateway.clone());
        let mut conversation = Conversation::with_system_prompt("system text");
        conversation.add_user_message("earlier");
        conversation.add_assistant_message("earlier reply");

        use_case.send_user_message(&mut conversation, "now").await;

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_output_tokens, 600);
        assert_eq!(request.messages.len(), 4);
        assert_eq!(request.messages[0], Message::system("system text"));
        assert_eq!(request.messages[3], Message::user("now"));
    }

    #[tokio::test]
    async fn test_gateway_failure_appends_fallback() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Connection(
            "refused".to_string(),
        ))]));
        let use_case = use_case(gateway);
        let mut conversation = Conversation::initialize();

        let outcome = use_case.send_user_message(&mut conversation, "hi").await;

        assert_eq!(outcome.reply, FALLBACK_REPLY);
        assert!(matches!(outcome.failure, Some(GatewayError::Connection(_))));
        assert_eq!(conversation.len(), 3);
        let assistant: Vec<&Message> = conversation
            .messages()
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .collect();
        assert_eq!(assistant, vec![&Message::assistant(FALLBACK_REPLY)]);
    }

    #[tokio::test]
    async fn test_reply_is_normalized_before_append() {
        let gateway = Arc::new(MockGateway::new(vec![Ok(CompletionReply::ChoicesWithText {
            text: Some("푸들".to_string()),
        })]));
        let use_case = use_case(gateway);
        let mut conversation = Conversation::initialize();

        use_case.send_user_message(&mut conversation, "알레르기").await;

        assert_eq!(
            conversation.messages().last(),
            Some(&Message::assistant("푸들"))
        );
    }

    #[tokio::test]
    async fn test_complete_does_not_substitute_fallback() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Authentication(
            "bad key".to_string(),
        ))]));
        let use_case = use_case(gateway);
        let conversation = Conversation::initialize();

        let result = use_case.complete(conversation.messages()).await;

        assert!(matches!(result, Err(GatewayError::Authentication(_))));
    }

    #[test]
    fn test_apply_system_prompt() {
        let use_case = use_case(Arc::new(MockGateway::new(vec![])));
        let mut conversation = Conversation::initialize();
        conversation.add_user_message("turn");

        use_case
            .apply_system_prompt(&mut conversation, "  새 지침  ")
            .unwrap();

        assert_eq!(conversation.system_prompt(), "새 지침");
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn test_apply_blank_system_prompt_is_rejected() {
        let use_case = use_case(Arc::new(MockGateway::new(vec![])));
        let mut conversation = Conversation::initialize();
        let before = conversation.clone();

        let result = use_case.apply_system_prompt(&mut conversation, "   ");

        assert_eq!(result, Err(DomainError::EmptyInput));
        assert_eq!(conversation, before);
    }

    #[tokio::test]
    async fn test_reset_after_turns() {
        let gateway = Arc::new(MockGateway::replying("reply"));
        let use_case = use_case(gateway);
        let mut conversation = Conversation::initialize();
        use_case
            .apply_system_prompt(&mut conversation, "edited")
            .unwrap();
        use_case.send_user_message(&mut conversation, "hi").await;

        use_case.reset(&mut conversation);

        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0], Message::system("edited"));
    }

    #[tokio::test]
    async fn test_transcript_events() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok(CompletionReply::NoChoicesWithText {
                text: "ok".to_string(),
            }),
            Err(GatewayError::Other("boom".to_string())),
        ]));
        let logger = Arc::new(RecordingLogger::default());
        let use_case = use_case(gateway).with_conversation_logger(logger.clone());
        let mut conversation = Conversation::initialize();

        use_case.send_user_message(&mut conversation, "one").await;
        use_case.send_user_message(&mut conversation, "two").await;
        let _ = use_case.apply_system_prompt(&mut conversation, "");
        use_case.reset(&mut conversation);

        assert_eq!(
            logger.event_types(),
            vec![
                "user_message",
                "assistant_reply",
                "user_message",
                "completion_failed",
                "assistant_reply",
                "conversation_reset",
            ]
        );
    }
}
