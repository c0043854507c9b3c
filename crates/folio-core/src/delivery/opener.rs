//! Opening deep links.

use tracing::debug;
use url::Url;

/// The link could not be handed to a browser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Could not open {url}: {reason}")]
pub struct OpenError {
    /// Link that failed to open.
    pub url: String,
    /// Underlying failure.
    pub reason: String,
}

/// Opens a URL in a new browsing context.
///
/// Success means the link was handed off, nothing more.
pub trait LinkOpener: Send + Sync {
    /// Opens `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if no browser could be launched.
    fn open(&self, url: &Url) -> Result<(), OpenError>;
}

/// Opens links with the system browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &Url) -> Result<(), OpenError> {
        debug!(host = url.host_str().unwrap_or_default(), "Opening deep link");
        opener::open_browser(url.as_str()).map_err(|e| OpenError {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
