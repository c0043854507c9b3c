//! Runtime configuration.
//!
//! Configuration is an explicit value handed to the components that need
//! it. Nothing in the crate reads process globals on its own; the binary
//! loads a JSON file and then layers environment overrides on top through
//! [`FolioConfig::apply_env`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Directory name used under the platform config and data directories.
const APP_DIR: &str = "folio";

/// Environment variable overriding [`BotConfig::token`].
pub const ENV_BOT_TOKEN: &str = "FOLIO_BOT_TOKEN";
/// Environment variable overriding [`BotConfig::chat_id`].
pub const ENV_CHAT_ID: &str = "FOLIO_CHAT_ID";
/// Environment variable overriding [`CacheConfig::origin`].
pub const ENV_CACHE_ORIGIN: &str = "FOLIO_CACHE_ORIGIN";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Direct delivery through the bot API.
    pub bot: BotConfig,
    /// Deep-link fallback.
    pub deep_link: DeepLinkConfig,
    /// Offline resource cache.
    pub cache: CacheConfig,
    /// Transient notifications.
    pub notifications: NotificationConfig,
}

/// Bot API credentials and limits.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Bot token; empty when unset.
    pub token: String,
    /// Recipient chat identifier; empty when unset.
    pub chat_id: String,
    /// Bot API host.
    pub api_base: String,
    /// Upper bound for one `sendMessage` round trip.
    pub timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_id: String::new(),
            api_base: folio_telegram::DEFAULT_API_BASE.to_string(),
            timeout_secs: 10,
        }
    }
}

impl BotConfig {
    /// Direct delivery needs both a token and a chat id.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Where the deep-link fallback points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepLinkConfig {
    /// Messaging host.
    pub base: String,
    /// Fixed recipient handle.
    pub handle: String,
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            base: folio_telegram::DEFAULT_LINK_BASE.to_string(),
            handle: "cykablyat572".to_string(),
        }
    }
}

/// Offline cache generation and its warm-up manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Current generation name; bump it on every deploy.
    pub name: String,
    /// Origin that relative manifest entries resolve against.
    pub origin: String,
    /// Resources fetched and stored at install time.
    pub manifest: Vec<String>,
    /// Upper bound for one network fetch.
    pub timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: "portfolio-v1.0.1".to_string(),
            origin: "http://localhost:8000".to_string(),
            manifest: [
                "/",
                "/index.html",
                "/styles.css?v=1.0.1",
                "/script.js?v=1.0.1",
                "/portfolio-assets/images/profile/your-photo.png?v=1.0.1",
                "/portfolio-assets/images/profile/your-photo-about.jpg",
                "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700;800&display=swap",
                "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            timeout_secs: 15,
        }
    }
}

impl CacheConfig {
    /// Fetch timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Notification display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a notification stays visible.
    pub display_ms: u64,
    /// Mirror notifications to the desktop notification daemon.
    pub desktop: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: 3500,
            desktop: false,
        }
    }
}

impl NotificationConfig {
    /// Display duration as a `Duration`.
    #[must_use]
    pub const fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }
}

impl FolioConfig {
    /// Default location of the configuration file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.json")
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for a zero timeout, a blank generation name,
    /// or an origin that is not an absolute URL.
    pub fn validate(&self) -> Result<()> {
        if self.bot.timeout_secs == 0 || self.cache.timeout_secs == 0 {
            return Err(Error::Config("timeouts must be at least one second".into()));
        }
        if self.cache.name.trim().is_empty() {
            return Err(Error::Config("cache name must not be empty".into()));
        }
        if url::Url::parse(&self.cache.origin).is_err() {
            return Err(Error::Config(format!(
                "cache origin {} is not an absolute URL",
                self.cache.origin
            )));
        }
        Ok(())
    }

    /// Save configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        info!("Config saved to {}", path.display());
        Ok(())
    }

    /// Apply overrides from environment-style key/value pairs.
    ///
    /// Only non-empty values override; unknown keys are ignored.
    pub fn apply_env<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let value = value.into();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                ENV_BOT_TOKEN => self.bot.token = value,
                ENV_CHAT_ID => self.bot.chat_id = value,
                ENV_CACHE_ORIGIN => self.cache.origin = value,
                _ => {}
            }
        }
    }
}

/// Directory for the submission log and cache databases.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
