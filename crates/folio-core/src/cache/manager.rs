//! Cache generation lifecycle and fetch interception.

use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::fetcher::{FetchError, Fetcher};
use super::model::{GenerationSummary, LifecycleState, RequestKey, Resource};
use super::storage::CacheStorage;
use crate::config::CacheConfig;

/// Errors from the cache manager.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Storage failed.
    #[error(transparent)]
    Storage(#[from] crate::Error),

    /// Network failed and the request was not meant to be served from cache.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Network failed and the current generation holds no copy.
    #[error("{url} is not cached and the network failed: {source}")]
    NotCached {
        /// Requested URL.
        url: String,
        /// The network failure.
        source: FetchError,
    },

    /// A manifest entry answered with a non-2xx status during install.
    #[error("Manifest entry {url} returned HTTP {status}")]
    BadStatus {
        /// Manifest URL.
        url: String,
        /// Status received.
        status: u16,
    },

    /// The operation is not valid in the current lifecycle state.
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        /// Attempted operation.
        operation: &'static str,
        /// Current state.
        state: LifecycleState,
    },
}

/// Drives one cache generation through install, activation and
/// network-first interception.
pub struct CacheManager {
    name: String,
    manifest: Vec<String>,
    storage: CacheStorage,
    fetcher: Arc<dyn Fetcher>,
    state: RwLock<LifecycleState>,
}

impl CacheManager {
    /// Creates a manager for the generation named in `config`.
    #[must_use]
    pub fn new(config: &CacheConfig, storage: CacheStorage, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            name: config.name.clone(),
            manifest: config.manifest.clone(),
            storage,
            fetcher,
            state: RwLock::new(LifecycleState::Uninstalled),
        }
    }

    /// Creates a manager and restores the lifecycle state persisted for its
    /// generation by an earlier process.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored state cannot be read.
    pub async fn restore(
        config: &CacheConfig,
        storage: CacheStorage,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, CacheError> {
        let manager = Self::new(config, storage, fetcher);
        let stored = manager.storage.state(&manager.name).await?;

        // An install interrupted mid-way never completed.
        let state = match stored {
            Some(LifecycleState::Installing) | None => LifecycleState::Uninstalled,
            Some(state) => state,
        };
        *manager.state.write().await = state;

        debug!(generation = %manager.name, %state, "Restored cache lifecycle");
        Ok(manager)
    }

    /// Name of the current generation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        *self.state.read().await
    }

    async fn transition(&self, state: LifecycleState) -> Result<(), CacheError> {
        self.storage.set_state(&self.name, state).await?;
        *self.state.write().await = state;
        Ok(())
    }

    /// Opens the generation and stores every manifest entry.
    ///
    /// All entries are fetched concurrently. If any fetch fails or returns a
    /// non-2xx status, nothing is stored and the manager stays
    /// `Uninstalled`. On success the generation is `Waiting`.
    ///
    /// Returns the number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidState` unless `Uninstalled`, or the first
    /// fetch/status/storage failure.
    pub async fn install(&self) -> Result<usize, CacheError> {
        {
            let mut state = self.state.write().await;
            if *state != LifecycleState::Uninstalled {
                return Err(CacheError::InvalidState {
                    operation: "install",
                    state: *state,
                });
            }
            *state = LifecycleState::Installing;
        }

        info!(generation = %self.name, entries = self.manifest.len(), "Installing cache");

        match self.warm().await {
            Ok(count) => {
                self.transition(LifecycleState::Waiting).await?;
                info!(generation = %self.name, count, "Cache installed");
                Ok(count)
            }
            Err(e) => {
                warn!(generation = %self.name, "Cache install failed: {e}");
                *self.state.write().await = LifecycleState::Uninstalled;
                Err(e)
            }
        }
    }

    async fn warm(&self) -> Result<usize, CacheError> {
        self.storage.open(&self.name).await?;

        let fetches = self.manifest.iter().map(|url| async move {
            let key = RequestKey::get(url.clone());
            let resource = self.fetcher.fetch(&key).await?;
            if !resource.is_ok() {
                return Err(CacheError::BadStatus {
                    url: url.clone(),
                    status: resource.status,
                });
            }
            Ok((key, resource))
        });
        let entries = try_join_all(fetches).await?;

        self.storage.put_all(&self.name, &entries).await?;
        Ok(entries.len())
    }

    /// Activates the installed generation.
    ///
    /// Every stored generation whose name differs from the current one is
    /// deleted wholesale before interception starts. Returns the evicted
    /// names.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidState` unless `Waiting`, or a storage error.
    pub async fn activate(&self) -> Result<Vec<String>, CacheError> {
        let state = self.state().await;
        if state != LifecycleState::Waiting {
            return Err(CacheError::InvalidState {
                operation: "activate",
                state,
            });
        }

        let mut evicted = Vec::new();
        for name in self.storage.keys().await? {
            if name != self.name {
                info!(generation = %name, "Evicting stale cache generation");
                self.storage.delete(&name).await?;
                evicted.push(name);
            }
        }

        self.transition(LifecycleState::Active).await?;
        info!(generation = %self.name, evicted = evicted.len(), "Cache active");
        Ok(evicted)
    }

    /// Serves a request, network first.
    ///
    /// While `Active`, the stored copy is looked up concurrently with the
    /// network request. A network response always wins and is written back;
    /// a failed write is logged and does not affect the returned response.
    /// When the network fails, the stored copy is returned if there is one.
    ///
    /// Outside `Active`, and for non-`GET` requests, the network is used
    /// directly.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::NotCached` when the network fails and no copy is
    /// stored, or `CacheError::Fetch` for pass-through requests.
    pub async fn handle_fetch(&self, key: &RequestKey) -> Result<Resource, CacheError> {
        if self.state().await != LifecycleState::Active || !key.is_cacheable() {
            return Ok(self.fetcher.fetch(key).await?);
        }

        let (cached, network) = tokio::join!(
            self.storage.lookup(&self.name, key),
            self.fetcher.fetch(key)
        );

        match network {
            Ok(resource) => {
                match self.storage.put(&self.name, key, &resource).await {
                    Ok(true) => {}
                    Ok(false) => debug!(%key, "Generation no longer stored, skipping write-back"),
                    Err(e) => warn!(%key, "Failed to update cached copy: {e}"),
                }
                Ok(resource)
            }
            Err(source) => match cached {
                Ok(Some(resource)) => {
                    debug!(%key, "Network failed, serving cached copy: {source}");
                    Ok(resource)
                }
                Ok(None) => Err(CacheError::NotCached {
                    url: key.url.clone(),
                    source,
                }),
                Err(e) => {
                    warn!(%key, "Cache lookup failed: {e}");
                    Err(CacheError::NotCached {
                        url: key.url.clone(),
                        source,
                    })
                }
            },
        }
    }

    /// Every stored generation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn generations(&self) -> Result<Vec<GenerationSummary>, CacheError> {
        Ok(self.storage.summaries().await?)
    }
}
