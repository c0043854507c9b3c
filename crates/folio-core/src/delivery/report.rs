//! Delivery attempt bookkeeping.

/// A way of getting a submission to the site owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Bot API `sendMessage`.
    DirectApi,
    /// Open a prefilled chat link.
    DeepLink,
    /// Show the text with a copy action.
    ManualCopyPrompt,
}

/// Result of one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The strategy completed.
    Success,
    /// The strategy failed; the next one may run.
    Failure,
}

/// One strategy tried for one submission. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryAttempt {
    /// Strategy tried.
    pub strategy: Strategy,
    /// How it went.
    pub outcome: AttemptOutcome,
}

/// Where the chain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The bot API accepted the message.
    Delivered,
    /// The deep link was opened. Whether the visitor sent the message is
    /// unknown.
    FallbackOpened,
    /// The deep link could not be opened either.
    FallbackFailed,
}

/// The attempts made for one submission and the terminal status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Attempts in the order they ran.
    pub attempts: Vec<DeliveryAttempt>,
    /// Terminal status.
    pub status: DeliveryStatus,
}

impl DeliveryReport {
    /// Whether `strategy` was tried.
    #[must_use]
    pub fn tried(&self, strategy: Strategy) -> bool {
        self.attempts.iter().any(|a| a.strategy == strategy)
    }
}
