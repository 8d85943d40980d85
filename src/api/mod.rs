//! REST API for the address indexer
//!
//! Provides endpoints for:
//! - Querying the node's current head block
//! - Subscribing an address
//! - Listing the indexed transactions of an address
//!
//! Address format is validated here; the sync engine only ever sees well-formed addresses.

mod handlers;

pub use handlers::create_api_router;

use crate::sync::SyncEngine;
use std::sync::Arc;

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
	pub engine: Arc<SyncEngine>,
}

impl ApiState {
	pub fn new(engine: Arc<SyncEngine>) -> Arc<Self> {
		Arc::new(Self { engine })
	}
}
