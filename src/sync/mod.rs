//! Chain Synchronization Module
//!
//! This module holds the stateful core of the service: the address index and the loop that
//! fills it from the node.
//!
//! - `index`: The concurrency-safe map from subscribed address to its matching transactions.
//! - `fetcher`: Pulls one block with full transactions from the node.
//! - `engine`: Owns the block cursor and runs the periodic fetch-and-filter sweep.
//! - `subscriptions`: Creates index slots for addresses of interest.
//! - `progress_tracker`: Per-sweep statistics and gap reporting.
//!
//! The engine is the only writer of slot contents. The subscription manager is the only creator
//! of slots. Readers go through the engine and never mutate.

/// Main sync loop and block cursor
pub mod engine;
/// Block retrieval by height
pub mod fetcher;
/// Address to transactions index
pub mod index;
/// Tracks per-sweep progress and gaps
pub mod progress_tracker;
/// Address registration
pub mod subscriptions;
/// Sync error taxonomy
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{SyncConfig, SyncEngine};
pub use types::SyncError;
