//! FILENAME: dataset/src/cache.rs
//! Load-once dataset handle.
//!
//! The source dataset is read a single time per process and treated as
//! immutable afterwards. Rather than hiding that behind implicit global
//! state, the cache is an explicit value: it runs the supplied loader at
//! most once, hands out shared references, and exposes an invalidation
//! hook that forces the next access to reload.

use std::sync::{Arc, Mutex};

use crate::collection::Dataset;

/// Memoizing handle around a fallible dataset loader.
///
/// Errors are not cached: a failed load leaves the slot empty so the next
/// access retries.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slot: Mutex<Option<Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        DatasetCache {
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached dataset, running `loader` first if the slot is
    /// empty. The loader runs under the slot lock, so concurrent callers
    /// never load twice.
    pub fn get_or_load<E>(
        &self,
        loader: impl FnOnce() -> Result<Dataset, E>,
    ) -> Result<Arc<Dataset>, E> {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(dataset) = slot.as_ref() {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(loader()?);
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drops the cached dataset so the next access reloads from source.
    pub fn invalidate(&self) {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = None;
    }

    pub fn is_loaded(&self) -> bool {
        match self.slot.lock() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }
}
