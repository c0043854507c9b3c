//! # folio-core
//!
//! Core logic behind the Folio portfolio site.
//!
//! This crate provides:
//! - **Offline Cache** - network-first resource cache with generation eviction
//! - **Submissions** - contact form validation and the local submission log
//! - **Delivery** - bot API relay with a deep-link fallback
//! - **Notifications** - one transient status message at a time
//! - Configuration and keyring-backed credentials
//! - Project detail view-models

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod config;
pub mod credentials;
pub mod delivery;
pub mod dispatcher;
mod error;
pub mod notify;
pub mod projects;
pub mod submissions;

pub use cache::{
    CacheError, CacheManager, CacheStorage, FetchError, Fetcher, GenerationSummary, HttpFetcher,
    LifecycleState, RequestKey, Resource,
};
pub use config::{BotConfig, CacheConfig, DeepLinkConfig, FolioConfig, NotificationConfig};
pub use credentials::{CredentialError, CredentialResult};
pub use delivery::{DeliveryReport, DeliveryStatus, ManualCopyPrompt, Strategy};
pub use dispatcher::{DispatchError, DispatcherConfig, SubmissionDispatcher, SubmitOutcome};
pub use error::{Error, Result};
pub use notify::{Notification, NotificationCenter, NotificationKind};
pub use projects::{ProjectView, project_ids, project_view};
pub use submissions::{ContactForm, SubmissionLog, SubmissionRecord, ValidationError};
