//! FILENAME: app/src/lib.rs
//! Storeboard presentation host.
//!
//! A thin HTTP service over the computation core: it owns the single
//! piece of process state (the memoized source dataset) and exposes each
//! dashboard output as an independently retrievable JSON value, plus the
//! CSV download. All computation per request is synchronous; the shared
//! dataset is immutable after load.

pub mod api_types;
pub mod routes;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dataset::{Dataset, DatasetCache};
use persistence::PersistenceError;

pub use api_types::DashboardQuery;
pub use routes::router;

// ============================================================================
// APP STATE
// ============================================================================

/// Process-wide state: where the source data lives and its load-once
/// cache.
pub struct AppState {
    source_path: PathBuf,
    cache: DatasetCache,
}

impl AppState {
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The memoized source dataset. The first call reads and parses the
    /// file; later calls share the same immutable handle.
    pub fn dataset(&self) -> Result<Arc<Dataset>, PersistenceError> {
        self.cache.get_or_load(|| persistence::load(&self.source_path))
    }

    /// Drops the cached dataset so the next request reloads from disk.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

pub fn create_app_state(source_path: PathBuf) -> AppState {
    AppState {
        source_path,
        cache: DatasetCache::new(),
    }
}
