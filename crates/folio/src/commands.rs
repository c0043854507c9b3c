//! Subcommand handlers.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, bail};
use folio_core::cache::HttpFetcher;
use folio_core::config::data_dir;
use folio_core::delivery::{Osc52Clipboard, SelectionFallback};
use folio_core::notify::{DesktopPresenter, LogPresenter, NotificationPresenter};
use folio_core::{
    CacheManager, CacheStorage, ContactForm, DeliveryStatus, DispatchError, DispatcherConfig,
    FolioConfig, NotificationCenter, RequestKey, SubmissionDispatcher, SubmissionLog,
    credentials, project_ids, project_view,
};
use tracing::info;

use crate::cli::{CacheCommand, LogCommand, SubmitArgs, TokenCommand};

const SUBMISSIONS_DB: &str = "submissions.db";
const CACHE_DB: &str = "cache.db";

async fn database_path(file: &str) -> anyhow::Result<String> {
    let dir = data_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir.join(file).to_string_lossy().into_owned())
}

async fn open_log() -> anyhow::Result<SubmissionLog> {
    let path = database_path(SUBMISSIONS_DB).await?;
    Ok(SubmissionLog::new(&path).await?)
}

fn notification_center(config: &FolioConfig) -> NotificationCenter {
    let display = config.notifications.display();
    let presenter: Arc<dyn NotificationPresenter> = if config.notifications.desktop {
        Arc::new(DesktopPresenter::new("Folio", display))
    } else {
        Arc::new(LogPresenter)
    };
    NotificationCenter::new(presenter, display)
}

pub async fn submit(config: &FolioConfig, args: SubmitArgs) -> anyhow::Result<()> {
    let log = open_log().await?;
    let dispatcher = SubmissionDispatcher::new(
        DispatcherConfig::from(config),
        log,
        notification_center(config),
    )?;

    let mut form = ContactForm::new(args.name, args.email, args.subject, args.message);
    let outcome = match dispatcher.submit(&mut form).await {
        Ok(outcome) => outcome,
        Err(DispatchError::Validation(errors)) => {
            for error in &errors {
                eprintln!("  {}: {}", error.field(), error.message());
            }
            bail!("submission rejected");
        }
        Err(e) => return Err(e.into()),
    };

    println!("Logged submission #{}", outcome.record.id);
    if outcome.delivery.status == DeliveryStatus::FallbackFailed {
        let prompt = dispatcher.manual_copy_prompt(&outcome.record);
        dispatcher.copy_to_clipboard(&prompt, &Osc52Clipboard, &SelectionFallback);
    }
    Ok(())
}

pub async fn log(action: LogCommand) -> anyhow::Result<()> {
    let log = open_log().await?;
    match action {
        LogCommand::List => {
            for record in log.list().await? {
                println!(
                    "#{} {} {} <{}> {}",
                    record.id,
                    record.timestamp.to_rfc3339(),
                    record.name,
                    record.email,
                    record.subject
                );
            }
        }
        LogCommand::Export => println!("{}", log.export_json().await?),
        LogCommand::Clear => {
            let removed = log.clear().await?;
            println!("Removed {removed} submissions");
        }
    }
    Ok(())
}

pub async fn cache(config: &FolioConfig, action: CacheCommand) -> anyhow::Result<()> {
    let path = database_path(CACHE_DB).await?;
    let storage = CacheStorage::new(&path).await?;
    let fetcher = HttpFetcher::new(&config.cache.origin, config.cache.timeout())?;
    let manager = CacheManager::restore(&config.cache, storage, Arc::new(fetcher)).await?;

    match action {
        CacheCommand::Install => {
            let count = manager.install().await?;
            println!("Installed {} with {count} entries", manager.name());
        }
        CacheCommand::Activate => {
            let evicted = manager.activate().await?;
            println!("Activated {}", manager.name());
            for name in evicted {
                println!("  evicted {name}");
            }
        }
        CacheCommand::Fetch { url } => {
            let resource = manager.handle_fetch(&RequestKey::get(url)).await?;
            info!(url = %resource.url, status = resource.status, "Served");
            std::io::stdout().write_all(&resource.body)?;
        }
        CacheCommand::List => {
            for generation in manager.generations().await? {
                let marker = if generation.name == manager.name() { "*" } else { " " };
                println!(
                    "{marker} {} ({}, {} entries)",
                    generation.name, generation.state, generation.entries
                );
            }
        }
    }
    Ok(())
}

pub fn project(id: Option<&str>, json: bool) -> anyhow::Result<()> {
    let Some(id) = id else {
        for id in project_ids() {
            println!("{id}");
        }
        return Ok(());
    };

    let Some(view) = project_view(id) else {
        bail!("unknown project {id}; known: {}", project_ids().join(", "));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{view}");
    }
    Ok(())
}

pub fn token(action: TokenCommand) -> anyhow::Result<()> {
    match action {
        TokenCommand::Set { value } => {
            credentials::store_bot_token(value.trim())?;
            println!("Bot token stored in keyring");
        }
        TokenCommand::Clear => {
            credentials::delete_bot_token()?;
            println!("Bot token removed from keyring");
        }
    }
    Ok(())
}
