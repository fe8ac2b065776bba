//! Configuration file watcher for hot reload.
//!
//! A reload loads and validates the file, compiles a fresh router, and swaps
//! it into the shared [`RouterStore`]. Failures leave the current router in
//! place.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::config::loader::{load_config, ConfigError};
use crate::routing::error::RouterError;
use crate::routing::router::Router;
use crate::routing::store::RouterStore;

/// Why a reload was rejected.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Router(#[from] RouterError),
}

/// Load `path` and publish the compiled router into `store`.
///
/// Returns the new store generation.
pub fn reload_into(path: &Path, store: &RouterStore) -> Result<u64, ReloadError> {
    let config = load_config(path)?;
    let compiled = Router::from_config(&config)?.compile()?;
    let generation = store.replace(compiled);
    tracing::info!(
        path = %path.display(),
        generation,
        routes = config.routes.len(),
        "Router reloaded"
    );
    Ok(generation)
}

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    store: Arc<RouterStore>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, store: Arc<RouterStore>) -> Self {
        Self {
            path: path.to_path_buf(),
            store,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for reloads to continue.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let store = Arc::clone(&self.store);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = %path.display(), "Config file change detected, reloading");
                    if let Err(e) = reload_into(&path, &store) {
                        tracing::error!(error = %e, "Failed to reload config, keeping current router");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}
