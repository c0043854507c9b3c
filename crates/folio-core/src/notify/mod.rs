//! Transient user notifications.
//!
//! At most one notification is visible at a time. Showing a new one retires
//! the current one immediately; otherwise it is dismissed after the
//! configured display duration.

mod center;
mod presenter;

pub use center::NotificationCenter;
pub use presenter::{DesktopPresenter, LogPresenter, NotificationPresenter};

/// Visual class of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Neutral progress information.
    Info,
}

impl NotificationKind {
    /// Icon name for desktop notifications.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "dialog-ok",
            Self::Error => "dialog-error",
            Self::Info => "dialog-information",
        }
    }
}

/// A notification as shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Visual class.
    pub kind: NotificationKind,
    /// Text shown.
    pub message: String,
}

impl Notification {
    /// Creates a notification.
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
