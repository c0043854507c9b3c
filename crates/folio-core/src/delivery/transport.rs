//! Direct delivery through the bot API.

use std::time::Duration;

use async_trait::async_trait;
use folio_telegram::{BotClient, ParseMode, SendMessage};

use crate::config::BotConfig;

/// Why a direct delivery did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The request never got an answer.
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded its time budget.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-ok payload.
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl From<folio_telegram::Error> for DeliveryError {
    fn from(err: folio_telegram::Error) -> Self {
        match err {
            folio_telegram::Error::Rejected { description, .. } => Self::Rejected(description),
            other => Self::Network(other.to_string()),
        }
    }
}

/// Sends a Markdown message to a chat.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Sends `text` to `chat_id`; `Ok` only when the endpoint accepted it.
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}

/// [`MessageTransport`] over the bot API.
#[derive(Debug, Clone)]
pub struct BotTransport {
    client: BotClient,
}

impl BotTransport {
    /// Wraps an existing client.
    #[must_use]
    pub const fn new(client: BotClient) -> Self {
        Self { client }
    }

    /// Builds a transport from configuration, `None` when the bot is not
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn from_config(config: &BotConfig) -> folio_telegram::Result<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }
        let client = BotClient::new(&config.api_base, config.token.clone(), config.timeout())?;
        Ok(Some(Self::new(client)))
    }
}

#[async_trait]
impl MessageTransport for BotTransport {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let request = SendMessage::new(chat_id, text).with_parse_mode(ParseMode::Markdown);
        self.client.send_message(&request).await?;
        Ok(())
    }
}
