//! Single-slot notification center.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::presenter::NotificationPresenter;
use super::{Notification, NotificationKind};

#[derive(Default)]
struct Slot {
    next_id: u64,
    current: Option<(u64, Notification)>,
    dismiss: Option<JoinHandle<()>>,
}

/// Shows one notification at a time and dismisses it after a fixed delay.
///
/// Cloning yields a handle to the same slot.
#[derive(Clone)]
pub struct NotificationCenter {
    presenter: Arc<dyn NotificationPresenter>,
    display: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl NotificationCenter {
    /// Creates a center rendering through `presenter`.
    #[must_use]
    pub fn new(presenter: Arc<dyn NotificationPresenter>, display: Duration) -> Self {
        Self {
            presenter,
            display,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Shows a notification, retiring whichever one is visible.
    ///
    /// Auto-dismissal needs a Tokio runtime; without one the notification
    /// stays until replaced or dismissed.
    pub fn show(&self, kind: NotificationKind, message: impl Into<String>) {
        let notification = Notification::new(kind, message);
        let previous = {
            let mut slot = self.lock();
            if let Some(handle) = slot.dismiss.take() {
                handle.abort();
            }
            let previous = slot.current.take().map(|(_, n)| n);

            slot.next_id += 1;
            let id = slot.next_id;
            slot.current = Some((id, notification.clone()));

            if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                let center = self.clone();
                slot.dismiss = Some(runtime.spawn(async move {
                    tokio::time::sleep(center.display).await;
                    center.dismiss_if_current(id);
                }));
            }
            previous
        };

        if let Some(previous) = previous {
            self.presenter.retire(&previous);
        }
        self.presenter.present(&notification);
    }

    /// Shows a success notification.
    pub fn success(&self, message: impl Into<String>) {
        self.show(NotificationKind::Success, message);
    }

    /// Shows an error notification.
    pub fn error(&self, message: impl Into<String>) {
        self.show(NotificationKind::Error, message);
    }

    /// Shows an informational notification.
    pub fn info(&self, message: impl Into<String>) {
        self.show(NotificationKind::Info, message);
    }

    /// The visible notification, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.lock().current.as_ref().map(|(_, n)| n.clone())
    }

    /// Retires the visible notification now.
    pub fn dismiss(&self) {
        let retired = {
            let mut slot = self.lock();
            if let Some(handle) = slot.dismiss.take() {
                handle.abort();
            }
            slot.current.take()
        };
        if let Some((_, notification)) = retired {
            self.presenter.retire(&notification);
        }
    }

    fn dismiss_if_current(&self, id: u64) {
        let retired = {
            let mut slot = self.lock();
            if slot.current.as_ref().is_some_and(|(current, _)| *current == id) {
                slot.dismiss = None;
                slot.current.take()
            } else {
                None
            }
        };
        if let Some((_, notification)) = retired {
            self.presenter.retire(&notification);
        }
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("display", &self.display)
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}
