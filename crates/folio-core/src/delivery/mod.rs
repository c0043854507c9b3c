//! Delivery strategies for logged submissions.
//!
//! Strategies are tried in a fixed order: the bot API first when it is
//! configured, then a deep link that opens a prefilled chat. A manual copy
//! prompt exists as a last resort, but only runs when a caller asks for it.

mod clipboard;
mod message;
mod opener;
mod report;
mod transport;

pub use clipboard::{
    COPY_CONFIRMATION, ClipboardWriter, ManualCopyPrompt, Osc52Clipboard, SelectionFallback,
    osc52_sequence,
};
pub use message::{SOURCE_LABEL, format_bot_message, format_plain_message};
pub use opener::{LinkOpener, OpenError, SystemLinkOpener};
pub use report::{AttemptOutcome, DeliveryAttempt, DeliveryReport, DeliveryStatus, Strategy};
pub use transport::{BotTransport, DeliveryError, MessageTransport};
