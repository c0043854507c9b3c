//! HTTP client for the Bot API.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::types::{ApiResponse, Message, SendMessage};

/// Public Bot API host.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Longest response body kept in `Error::InvalidResponse`.
const MAX_ERROR_BODY: usize = 256;

/// Bot API client bound to a single bot token.
#[derive(Clone)]
pub struct BotClient {
    api_base: Url,
    token: String,
    http_client: Client,
}

impl BotClient {
    /// Creates a client for `token` against `api_base`.
    ///
    /// Every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty, the base URL is invalid, or
    /// the HTTP client cannot be built.
    pub fn new(api_base: &str, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::InvalidConfig("bot token is empty".to_string()));
        }

        let api_base = Url::parse(api_base.trim_end_matches('/'))?;
        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            api_base,
            token,
            http_client,
        })
    }

    /// URL of a Bot API method for this token.
    fn method_url(&self, method: &str) -> Result<Url> {
        let base = self.api_base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/bot{}/{method}", self.token))?)
    }

    /// Sends a message through `sendMessage`.
    ///
    /// The envelope's `ok` flag decides success, whatever the HTTP status.
    /// The sent message is returned when `result` has the expected shape,
    /// `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` on transport failure, `Error::Rejected` when the
    /// API refuses the message, and `Error::InvalidResponse` when the body is
    /// not a Bot API envelope.
    pub async fn send_message(&self, request: &SendMessage) -> Result<Option<Message>> {
        let url = self.method_url("sendMessage")?;
        debug!(chat_id = %request.chat_id, "Sending bot message");

        let response = self.http_client.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<serde_json::Value> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(status = status.as_u16(), "Unparseable Bot API response: {e}");
                return Err(Error::InvalidResponse {
                    status: status.as_u16(),
                    body: body.chars().take(MAX_ERROR_BODY).collect(),
                });
            }
        };

        let message = envelope
            .into_result()?
            .and_then(|result| serde_json::from_value::<Message>(result).ok());
        match &message {
            Some(message) => debug!(message_id = message.message_id, "Bot message accepted"),
            None => debug!("Bot message accepted without a message result"),
        }
        Ok(message)
    }
}

impl fmt::Debug for BotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotClient")
            .field("api_base", &self.api_base.as_str())
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}
