//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Offline cache and contact form for the Folio portfolio site.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit the contact form.
    Submit(SubmitArgs),
    /// Inspect or maintain the local submission log.
    Log {
        #[command(subcommand)]
        action: LogCommand,
    },
    /// Manage the offline resource cache.
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
    /// Show a project's details.
    Project {
        /// Project id; omit to list the ids.
        id: Option<String>,
        /// Print the view as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Store or remove the bot token in the system keyring.
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Your name.
    #[arg(long, default_value = "")]
    pub name: String,
    /// Your email address.
    #[arg(long, default_value = "")]
    pub email: String,
    /// Subject line.
    #[arg(long, default_value = "")]
    pub subject: String,
    /// Message body.
    #[arg(long, default_value = "")]
    pub message: String,
}

#[derive(Debug, Subcommand)]
pub enum LogCommand {
    /// List logged submissions, oldest first.
    List,
    /// Print the log as JSON.
    Export,
    /// Delete every logged submission.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Fetch and store every manifest entry.
    Install,
    /// Activate the installed generation, evicting older ones.
    Activate,
    /// Serve one request through the cache.
    Fetch {
        /// Absolute URL or path relative to the origin.
        url: String,
    },
    /// List stored generations.
    List,
}

#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Store the bot token.
    Set {
        /// Token issued for the bot.
        value: String,
    },
    /// Remove the stored bot token.
    Clear,
}
