//! Contact submission dispatch.
//!
//! A submission is validated, logged, and then handed to the delivery
//! chain. Logging always happens before any delivery attempt, and a logged
//! submission stays logged whatever the chain does.

use std::sync::Arc;

use chrono::{Local, Utc};
use tracing::{info, warn};

use crate::config::{BotConfig, DeepLinkConfig, FolioConfig};
use crate::delivery::{
    AttemptOutcome, BotTransport, ClipboardWriter, DeliveryAttempt, DeliveryError, DeliveryReport,
    DeliveryStatus, LinkOpener, ManualCopyPrompt, MessageTransport, Strategy, SystemLinkOpener,
    format_bot_message, format_plain_message,
};
use crate::notify::NotificationCenter;
use crate::submissions::{ContactForm, SubmissionLog, SubmissionRecord, ValidationError, validate};

/// Notification for a form with blank required fields.
pub const MSG_MISSING_FIELDS: &str = "Please fill in all required fields.";
/// Notification when the submission could not be logged.
pub const MSG_STORAGE_FAILED: &str = "Error sending message. Please try again.";

/// Errors that stop a submission before delivery.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Required fields were blank; nothing was logged or sent.
    #[error("Invalid submission: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The submission could not be logged; nothing was sent.
    #[error("Could not log submission: {0}")]
    Storage(#[from] crate::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Settings the dispatcher reads; a copy taken at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Direct delivery.
    pub bot: BotConfig,
    /// Deep-link fallback.
    pub deep_link: DeepLinkConfig,
}

impl From<&FolioConfig> for DispatcherConfig {
    fn from(config: &FolioConfig) -> Self {
        Self {
            bot: config.bot.clone(),
            deep_link: config.deep_link.clone(),
        }
    }
}

/// What a successful `submit` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The logged record.
    pub record: SubmissionRecord,
    /// How delivery went.
    pub delivery: DeliveryReport,
}

/// Validates, logs and delivers contact submissions.
pub struct SubmissionDispatcher {
    config: DispatcherConfig,
    log: SubmissionLog,
    notifications: NotificationCenter,
    transport: Option<Arc<dyn MessageTransport>>,
    opener: Arc<dyn LinkOpener>,
}

impl SubmissionDispatcher {
    /// Creates a dispatcher using the bot API (when configured) and the
    /// system browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the bot client cannot be built.
    pub fn new(
        config: DispatcherConfig,
        log: SubmissionLog,
        notifications: NotificationCenter,
    ) -> folio_telegram::Result<Self> {
        let transport = BotTransport::from_config(&config.bot)?
            .map(|t| Arc::new(t) as Arc<dyn MessageTransport>);

        Ok(Self {
            config,
            log,
            notifications,
            transport,
            opener: Arc::new(SystemLinkOpener),
        })
    }

    /// Replaces the direct-delivery transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn MessageTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the link opener.
    #[must_use]
    pub fn with_opener(mut self, opener: Arc<dyn LinkOpener>) -> Self {
        self.opener = opener;
        self
    }

    /// The submission log.
    #[must_use]
    pub const fn log(&self) -> &SubmissionLog {
        &self.log
    }

    /// Handles one form submission.
    ///
    /// Blank required fields abort with an error notification and leave the
    /// form as typed. Otherwise the submission is logged, the delivery chain
    /// runs to completion, and the form is cleared.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Validation` before anything is logged or
    /// sent, or `DispatchError::Storage` if logging fails.
    pub async fn submit(&self, form: &mut ContactForm) -> Result<SubmitOutcome, DispatchError> {
        let submission = match validate(form) {
            Ok(submission) => submission,
            Err(errors) => {
                self.notifications.error(MSG_MISSING_FIELDS);
                return Err(DispatchError::Validation(errors));
            }
        };

        let record = match self.log.append(submission, Utc::now()).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to log submission: {e}");
                self.notifications.error(MSG_STORAGE_FAILED);
                return Err(DispatchError::Storage(e));
            }
        };
        info!(id = record.id, "Submission logged");

        let delivery = self.deliver(&record).await;
        form.reset();

        Ok(SubmitOutcome { record, delivery })
    }

    /// Runs the delivery chain for a logged record.
    ///
    /// The bot API is tried once when configured; on any failure the deep
    /// link is opened. Exactly one terminal branch runs.
    pub async fn deliver(&self, record: &SubmissionRecord) -> DeliveryReport {
        let mut attempts = Vec::new();

        if let Some(transport) = self.direct_transport() {
            match self.send_direct(transport, record).await {
                Ok(()) => {
                    attempts.push(DeliveryAttempt {
                        strategy: Strategy::DirectApi,
                        outcome: AttemptOutcome::Success,
                    });
                    info!(id = record.id, "Submission delivered through bot API");
                    self.notifications.success(format!(
                        "Thank you {}! Your message has been received.",
                        record.name
                    ));
                    return DeliveryReport {
                        attempts,
                        status: DeliveryStatus::Delivered,
                    };
                }
                Err(e) => {
                    warn!(id = record.id, "Bot delivery failed, falling back to deep link: {e}");
                    attempts.push(DeliveryAttempt {
                        strategy: Strategy::DirectApi,
                        outcome: AttemptOutcome::Failure,
                    });
                }
            }
        }

        let status = match self.open_deep_link(record) {
            Ok(()) => {
                attempts.push(DeliveryAttempt {
                    strategy: Strategy::DeepLink,
                    outcome: AttemptOutcome::Success,
                });
                self.notifications.info(format!(
                    "Thank you {}! Opening Telegram so you can send your message.",
                    record.name
                ));
                DeliveryStatus::FallbackOpened
            }
            Err(e) => {
                warn!(id = record.id, "Deep link fallback failed: {e}");
                attempts.push(DeliveryAttempt {
                    strategy: Strategy::DeepLink,
                    outcome: AttemptOutcome::Failure,
                });
                self.notifications
                    .error("Could not open Telegram. Your message was saved.");
                DeliveryStatus::FallbackFailed
            }
        };

        DeliveryReport { attempts, status }
    }

    fn direct_transport(&self) -> Option<&Arc<dyn MessageTransport>> {
        if self.config.bot.is_configured() {
            self.transport.as_ref()
        } else {
            None
        }
    }

    async fn send_direct(
        &self,
        transport: &Arc<dyn MessageTransport>,
        record: &SubmissionRecord,
    ) -> Result<(), DeliveryError> {
        let text = format_bot_message(record, *Local::now().offset());
        let budget = self.config.bot.timeout();

        tokio::time::timeout(budget, transport.send(&self.config.bot.chat_id, &text))
            .await
            .map_err(|_| DeliveryError::Timeout(budget))?
    }

    fn open_deep_link(&self, record: &SubmissionRecord) -> Result<(), String> {
        let url = folio_telegram::deep_link(
            &self.config.deep_link.base,
            &self.config.deep_link.handle,
            &format_plain_message(record),
        )
        .map_err(|e| e.to_string())?;

        self.opener.open(&url).map_err(|e| e.to_string())
    }

    /// The manual copy prompt for a record. Never part of the automatic
    /// chain.
    #[must_use]
    pub fn manual_copy_prompt(&self, record: &SubmissionRecord) -> ManualCopyPrompt {
        ManualCopyPrompt::new(format_plain_message(record))
    }

    /// Copies the prompt text and shows the generic confirmation.
    pub fn copy_to_clipboard(
        &self,
        prompt: &ManualCopyPrompt,
        primary: &dyn ClipboardWriter,
        fallback: &dyn ClipboardWriter,
    ) {
        let confirmation = prompt.copy(primary, fallback);
        self.notifications.success(confirmation);
    }
}

impl std::fmt::Debug for SubmissionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionDispatcher")
            .field("config", &self.config)
            .field("direct", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}
