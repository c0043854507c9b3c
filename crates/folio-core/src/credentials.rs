//! Bot token storage in the system keyring.
//!
//! Keeps the bot token out of the plain-text config file:
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - macOS: Keychain
//! - Windows: Credential Manager

use keyring::Entry;
use tracing::debug;

/// Service name used for keyring entries.
const SERVICE_NAME: &str = "folio";

/// Entry name for the bot token.
const BOT_TOKEN_CREDENTIAL: &str = "bot_token";

/// Error type for credential operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Failed to access keyring.
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type for credential operations.
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

fn bot_token_entry() -> CredentialResult<Entry> {
    Ok(Entry::new(SERVICE_NAME, BOT_TOKEN_CREDENTIAL)?)
}

/// Stores the bot token in the system keyring.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn store_bot_token(token: &str) -> CredentialResult<()> {
    bot_token_entry()?.set_password(token)?;
    debug!("Stored bot token");
    Ok(())
}

/// Retrieves the bot token, `None` if it was never stored.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn get_bot_token() -> CredentialResult<Option<String>> {
    match bot_token_entry()?.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => {
            debug!("No bot token in keyring");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Removes the bot token. Removing a missing token is not an error.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn delete_bot_token() -> CredentialResult<()> {
    match bot_token_entry()?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => {
            debug!("Deleted bot token");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
