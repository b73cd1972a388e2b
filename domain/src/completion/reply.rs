//! Completion reply shapes and their normalization to plain text.
//!
//! Chat-completion services do not return one stable body shape: depending
//! on API generation and client version the assistant text sits under
//! `choices[0].message.content`, under `choices[0].message.text`, under
//! `choices[0].text`, or under a top-level `text`. [`CompletionReply`] names
//! each of these shapes explicitly so normalization is a `match` instead of
//! a chain of field probes.
//!
//! # Normalization precedence
//!
//! ```text
//! choices non-empty ─┬─ message.content is a string ─────► ChoicesWithMapMessage
//!                    ├─ message present, no string content ► ChoicesWithObjectMessage
//!                    └─ no message ─────────────────────────► ChoicesWithText
//! no choices ────────┬─ non-empty top-level text ──────────► NoChoicesWithText
//!                    └─ anything else ─────────────────────► Unrecognized
//! ```

use serde_json::Value;

/// Reply appended to the conversation when the completion call fails.
pub const FALLBACK_REPLY: &str =
    "죄송합니다. 응답을 생성하는 중 문제가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// The recognised shapes of a completion result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionReply {
    /// `choices[0].message` is a key/value map carrying `content`.
    ChoicesWithMapMessage { content: Option<String> },

    /// `choices[0].message` exists but has no plain string `content`.
    ///
    /// `content` holds the joined text of structured content parts, if any;
    /// `text` is the message's own `text` field.
    ChoicesWithObjectMessage {
        content: Option<String>,
        text: Option<String>,
    },

    /// Legacy completion shape: `choices[0].text`, no `message`.
    ChoicesWithText { text: Option<String> },

    /// No usable `choices`; a top-level `text` carries the reply.
    NoChoicesWithText { text: String },

    /// Nothing recognisable; `raw` is the body's own string rendering.
    Unrecognized { raw: String },
}

impl CompletionReply {
    /// Classify a decoded response body.
    pub fn from_json(body: &Value) -> Self {
        let first_choice = body
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first());

        if let Some(choice) = first_choice {
            return match choice.get("message") {
                Some(message) => match message.get("content") {
                    Some(Value::String(content)) => CompletionReply::ChoicesWithMapMessage {
                        content: Some(content.clone()),
                    },
                    other => CompletionReply::ChoicesWithObjectMessage {
                        content: other.and_then(joined_content_parts),
                        text: string_field(message, "text"),
                    },
                },
                None => CompletionReply::ChoicesWithText {
                    text: string_field(choice, "text"),
                },
            };
        }

        match string_field(body, "text") {
            Some(text) if !text.is_empty() => CompletionReply::NoChoicesWithText { text },
            _ => CompletionReply::Unrecognized {
                raw: body.to_string(),
            },
        }
    }

    /// Extract the assistant text following the fixed fallback precedence.
    pub fn into_text(self) -> String {
        match self {
            CompletionReply::ChoicesWithMapMessage { content } => content.unwrap_or_default(),
            CompletionReply::ChoicesWithObjectMessage { content, text } => content
                .filter(|c| !c.is_empty())
                .or(text)
                .unwrap_or_default(),
            CompletionReply::ChoicesWithText { text } => text.unwrap_or_default(),
            CompletionReply::NoChoicesWithText { text } => text,
            CompletionReply::Unrecognized { raw } => raw,
        }
    }

    /// Short name of the shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            CompletionReply::ChoicesWithMapMessage { .. } => "choices_with_map_message",
            CompletionReply::ChoicesWithObjectMessage { .. } => "choices_with_object_message",
            CompletionReply::ChoicesWithText { .. } => "choices_with_text",
            CompletionReply::NoChoicesWithText { .. } => "no_choices_with_text",
            CompletionReply::Unrecognized { .. } => "unrecognized",
        }
    }
}

/// Classify and normalize a response body in one step.
pub fn normalize(body: &Value) -> String {
    CompletionReply::from_json(body).into_text()
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

// `[{"type": "text", "text": "..."}, ...]`
fn joined_content_parts(content: &Value) -> Option<String> {
    let parts = content.as_array()?;
    let joined: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if joined.is_empty() { None } else { Some(joined) }
}
