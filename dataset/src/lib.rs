//! FILENAME: dataset/src/lib.rs
//! Storeboard domain model.
//!
//! This crate holds the shared types the rest of the workspace computes
//! over: the transaction record, the immutable dataset collection, the
//! user's filter selection, and the load-once dataset cache. It performs
//! no I/O and no aggregation itself.
//!
//! Layers:
//! - `transaction`: One order line item and the canonical column names.
//! - `collection`: The immutable, insertion-ordered dataset.
//! - `selection`: User-facing filter and display choices.
//! - `cache`: The memoized load-once handle with explicit invalidation.

pub mod cache;
pub mod collection;
pub mod selection;
pub mod transaction;

pub use cache::DatasetCache;
pub use collection::{Dataset, Dimension};
pub use selection::{FilterSelection, Granularity, Metric, ParseChoiceError, Theme};
pub use transaction::{Transaction, COLUMNS};
