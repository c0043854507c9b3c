//! Notification backends.

use std::time::Duration;

use notify_rust::Timeout;
use tracing::{info, warn};

use super::{Notification, NotificationKind};

/// Renders notifications somewhere the visitor can see them.
pub trait NotificationPresenter: Send + Sync {
    /// Make `notification` visible.
    fn present(&self, notification: &Notification);

    /// Remove `notification` from view.
    fn retire(&self, notification: &Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPresenter;

impl NotificationPresenter for LogPresenter {
    fn present(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Error => warn!(target: "folio::notify", "{}", notification.message),
            NotificationKind::Success | NotificationKind::Info => {
                info!(target: "folio::notify", "{}", notification.message);
            }
        }
    }

    fn retire(&self, _notification: &Notification) {}
}

/// Sends notifications to the desktop notification daemon.
///
/// The daemon expires each notification after the display duration, so
/// retiring is left to it.
#[derive(Debug, Clone)]
pub struct DesktopPresenter {
    app_name: String,
    display: Duration,
}

impl DesktopPresenter {
    /// Creates a presenter labelled `app_name`.
    #[must_use]
    pub fn new(app_name: impl Into<String>, display: Duration) -> Self {
        Self {
            app_name: app_name.into(),
            display,
        }
    }
}

impl NotificationPresenter for DesktopPresenter {
    fn present(&self, notification: &Notification) {
        let millis = u32::try_from(self.display.as_millis()).unwrap_or(u32::MAX);
        let result = notify_rust::Notification::new()
            .appname(&self.app_name)
            .summary(&self.app_name)
            .body(&notification.message)
            .icon(notification.kind.icon())
            .timeout(Timeout::Milliseconds(millis))
            .show();

        if let Err(e) = result {
            warn!("Desktop notification failed: {e}");
            LogPresenter.present(notification);
        }
    }

    fn retire(&self, _notification: &Notification) {}
}
