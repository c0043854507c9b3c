//! # folio-telegram
//!
//! Minimal Bot API client used to relay contact-form submissions.
//!
//! ## Features
//!
//! - **`sendMessage`**: typed request body and response envelope
//! - **Deep links**: `https://t.me/<handle>?text=...` with percent-encoded text
//! - **Bounded requests**: every client is built with an explicit timeout
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use folio_telegram::{BotClient, ParseMode, SendMessage, DEFAULT_API_BASE};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BotClient::new(DEFAULT_API_BASE, "123:abc", Duration::from_secs(10))?;
//!     let request = SendMessage::new("4242", "*Hello*").with_parse_mode(ParseMode::Markdown);
//!     if let Some(message) = client.send_message(&request).await? {
//!         println!("sent #{}", message.message_id);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod link;
mod types;

pub use client::{BotClient, DEFAULT_API_BASE};
pub use error::{Error, Result};
pub use link::{DEFAULT_LINK_BASE, deep_link};
pub use types::{ApiResponse, Message, ParseMode, SendMessage};
