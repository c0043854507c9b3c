//! Bot API request and response types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Text formatting mode understood by the Bot API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// Legacy Markdown (`*bold*`, `_italic_`).
    Markdown,
    /// `MarkdownV2` with mandatory escaping.
    MarkdownV2,
    /// HTML subset.
    #[serde(rename = "HTML")]
    Html,
}

/// Body of a `sendMessage` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessage {
    /// Target chat identifier or `@channel` username.
    pub chat_id: String,
    /// Message text.
    pub text: String,
    /// Formatting mode for `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
}

impl SendMessage {
    /// Creates a plain-text message.
    #[must_use]
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
        }
    }

    /// Sets the parse mode.
    #[must_use]
    pub const fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }
}

/// The envelope every Bot API method answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was accepted.
    pub ok: bool,
    /// Method result when `ok` is true.
    pub result: Option<T>,
    /// Error code when `ok` is false.
    pub error_code: Option<i64>,
    /// Error description when `ok` is false.
    pub description: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Converts the envelope into a `Result`.
    ///
    /// `ok` alone decides acceptance; an accepted envelope may omit
    /// `result`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Rejected` when `ok` is false.
    pub fn into_result(self) -> Result<Option<T>> {
        if !self.ok {
            return Err(Error::rejected(
                self.error_code,
                self.description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }
        Ok(self.result)
    }
}

/// The subset of a sent message the client cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    /// Message identifier inside the chat.
    pub message_id: i64,
    /// Unix time the message was sent.
    #[serde(default)]
    pub date: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_serializes_parse_mode() {
        let body = SendMessage::new("42", "*hi*").with_parse_mode(ParseMode::Markdown);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["chat_id"], "42");
        assert_eq!(json["text"], "*hi*");
        assert_eq!(json["parse_mode"], "Markdown");
    }

    #[test]
    fn test_send_message_omits_missing_parse_mode() {
        let json = serde_json::to_value(SendMessage::new("42", "hi")).unwrap();
        assert!(json.get("parse_mode").is_none());
    }

    #[test]
    fn test_rejected_envelope() {
        let envelope: ApiResponse<Message> = serde_json::from_str(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(err.is_rejection());
        assert!(err.to_string().contains("chat not found"));
    }

    #[test]
    fn test_accepted_envelope() {
        let envelope: ApiResponse<Message> =
            serde_json::from_str(r#"{"ok":true,"result":{"message_id":7,"date":1700000000}}"#)
                .unwrap();
        assert_eq!(envelope.into_result().unwrap().unwrap().message_id, 7);
    }

    #[test]
    fn test_accepted_envelope_without_result() {
        let envelope: ApiResponse<Message> = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap(), None);
    }
}
