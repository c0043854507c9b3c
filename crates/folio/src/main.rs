//! `folio` - host process for the portfolio site's offline cache and
//! contact form.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod commands;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use folio_core::{FolioConfig, credentials};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info,folio_core=info,folio_telegram=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(FolioConfig::default_path);
    let config = load_config(&config_path).await?;

    match cli.command {
        Command::Submit(args) => commands::submit(&config, args).await,
        Command::Log { action } => commands::log(action).await,
        Command::Cache { action } => commands::cache(&config, action).await,
        Command::Project { id, json } => commands::project(id.as_deref(), json),
        Command::Token { action } => commands::token(action),
    }
}

/// Loads the config file, applies environment overrides, and falls back to
/// the keyring for the bot token.
async fn load_config(path: &Path) -> anyhow::Result<FolioConfig> {
    let mut config = FolioConfig::load(path)
        .await
        .with_context(|| format!("loading {}", path.display()))?;
    config.apply_env(std::env::vars());

    if config.bot.token.is_empty() {
        match credentials::get_bot_token() {
            Ok(Some(token)) => {
                debug!("Using bot token from keyring");
                config.bot.token = token;
            }
            Ok(None) => {}
            Err(e) => warn!("Keyring unavailable: {e}"),
        }
    }

    info!(
        direct = config.bot.is_configured(),
        generation = %config.cache.name,
        "Configuration loaded"
    );
    Ok(config)
}
