//! Offline resource cache.
//!
//! A single named generation holds the site's resources. Requests are served
//! network-first: a live response always wins and refreshes the stored copy,
//! and the stored copy is only returned when the network fails. Deploying a
//! new generation name evicts every older generation wholesale on activation.

mod fetcher;
mod manager;
mod model;
mod storage;

pub use fetcher::{FetchError, Fetcher, HttpFetcher};
pub use manager::{CacheError, CacheManager};
pub use model::{GenerationSummary, LifecycleState, RequestKey, Resource};
pub use storage::CacheStorage;
