//! Manual copy prompt, the last-resort delivery strategy.

use std::io::{self, IsTerminal, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

/// Confirmation shown after a copy, whichever writer succeeded.
pub const COPY_CONFIRMATION: &str = "Message copied to clipboard!";

/// Puts text somewhere the visitor can paste it from.
pub trait ClipboardWriter {
    /// Writes `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text could not be placed.
    fn write_text(&self, text: &str) -> io::Result<()>;
}

/// OSC 52 escape sequence that asks the terminal to set the clipboard.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Sets the clipboard through the terminal with OSC 52.
#[derive(Debug, Clone, Copy, Default)]
pub struct Osc52Clipboard;

impl ClipboardWriter for Osc52Clipboard {
    fn write_text(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        if !stdout.is_terminal() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdout is not a terminal",
            ));
        }
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()
    }
}

/// Prints the text between markers so it can be selected by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionFallback;

impl ClipboardWriter for SelectionFallback {
    fn write_text(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "----- select and copy -----")?;
        writeln!(stdout, "{text}")?;
        writeln!(stdout, "---------------------------")?;
        stdout.flush()
    }
}

/// The plain message with a copy action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualCopyPrompt {
    /// Text to copy.
    pub text: String,
}

impl ManualCopyPrompt {
    /// Creates a prompt for `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Copies with `primary`, degrading silently to `fallback`.
    ///
    /// Failures are never surfaced; the generic confirmation is returned
    /// either way.
    pub fn copy(&self, primary: &dyn ClipboardWriter, fallback: &dyn ClipboardWriter) -> &'static str {
        if let Err(e) = primary.write_text(&self.text) {
            debug!("Clipboard write failed, using fallback: {e}");
            if let Err(e) = fallback.write_text(&self.text) {
                debug!("Fallback copy failed: {e}");
            }
        }
        COPY_CONFIRMATION
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct Recording {
        fail: bool,
        written: RefCell<Vec<String>>,
    }

    impl Recording {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                written: RefCell::new(Vec::new()),
            }
        }
    }

    impl ClipboardWriter for Recording {
        fn write_text(&self, text: &str) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::other("denied"));
            }
            self.written.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let primary = Recording::new(false);
        let fallback = Recording::new(false);

        let confirmation = ManualCopyPrompt::new("hello").copy(&primary, &fallback);
        assert_eq!(confirmation, COPY_CONFIRMATION);
        assert_eq!(*primary.written.borrow(), vec!["hello"]);
        assert!(fallback.written.borrow().is_empty());
    }

    #[test]
    fn test_primary_failure_degrades_silently() {
        let primary = Recording::new(true);
        let fallback = Recording::new(false);

        let confirmation = ManualCopyPrompt::new("hello").copy(&primary, &fallback);
        assert_eq!(confirmation, COPY_CONFIRMATION);
        assert_eq!(*fallback.written.borrow(), vec!["hello"]);
    }

    #[test]
    fn test_both_failing_still_confirms() {
        let prompt = ManualCopyPrompt::new("hello");
        assert_eq!(
            prompt.copy(&Recording::new(true), &Recording::new(true)),
            COPY_CONFIRMATION
        );
    }
}
