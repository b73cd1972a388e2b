//! OpenAI-compatible Completion Gateway implementation

use async_trait::async_trait;
use pawchat_application::{CompletionGateway, CompletionRequest, GatewayError};
use pawchat_domain::CompletionReply;
use reqwest::StatusCode;
use tracing::{debug, info};

/// Path of the chat completions endpoint, relative to the base URL
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Maximum length of a raw error body carried into an error message
const MAX_ERROR_BODY: usize = 500;

/// Completion gateway for the OpenAI Chat Completions API (or any server speaking it)
pub struct OpenAiCompletionGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompletionGateway {
    /// Create a new gateway for the given base URL and credential
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pawchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Create a gateway with an existing HTTP client
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        info!("OpenAiCompletionGateway initialized for {}", base_url);
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Full URL of the chat completions endpoint
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompletionGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, GatewayError> {
        let endpoint = self.endpoint();
        debug!("POST {} (model {})", endpoint, request.model);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        debug!("Completion response: {} ({} bytes)", status, body.len());
        classify_response(status, &body)
    }
}

/// Map an HTTP status and raw body to a classified reply or an error
fn classify_response(status: StatusCode, body: &str) -> Result<CompletionReply, GatewayError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(GatewayError::Authentication(error_message(body)));
    }

    if !status.is_success() {
        return Err(GatewayError::RequestFailed {
            status: status.as_u16(),
            body: error_message(body),
        });
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("{}: {}", e, truncate(body))))?;

    Ok(CompletionReply::from_json(&value))
}

/// Prefer the API's `error.message`; fall back to the (truncated) raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| truncate(body))
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawchat_application::CompletionParams;
    use pawchat_domain::Message;

    #[test]
    fn test_endpoint_joins_base_url() {
        let gateway =
            OpenAiCompletionGateway::with_client(reqwest::Client::new(), "https://api.openai.com/", "k");
        assert_eq!(gateway.endpoint(), "https://api.openai.com/v1/chat/completions");

        let gateway =
            OpenAiCompletionGateway::with_client(reqwest::Client::new(), "http://localhost:8080", "k");
        assert_eq!(gateway.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_classify_success_body() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Golden Retriever 추천합니다"},
                "finish_reason": "stop"
            }]
        }"#;

        let reply = classify_response(StatusCode::OK, body).unwrap();
        assert_eq!(reply.into_text(), "Golden Retriever 추천합니다");
    }

    #[test]
    fn test_classify_auth_failure() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let err = classify_response(StatusCode::UNAUTHORIZED, body).unwrap_err();
        match err {
            GatewayError::Authentication(message) => {
                assert_eq!(message, "Incorrect API key provided")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classify_server_error_keeps_raw_body() {
        let err = classify_response(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        match err {
            GatewayError::RequestFailed { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classify_invalid_json() {
        let err = classify_response(StatusCode::OK, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "가".repeat(MAX_ERROR_BODY + 10);
        let truncated = truncate(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), MAX_ERROR_BODY + 3);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        let gateway = OpenAiCompletionGateway::new("http://127.0.0.1:1", "k").unwrap();
        let request = CompletionRequest::new(
            &[Message::system("s"), Message::user("u")],
            &CompletionParams::default(),
        );

        let err = gateway.complete(&request).await.unwrap_err();

        assert!(matches!(err, GatewayError::Connection(_)));
    }
}
