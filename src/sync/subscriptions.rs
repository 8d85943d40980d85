use crate::sync::index::AddressIndex;
use crate::utils::normalize_address;
use std::sync::Arc;
use tracing::debug;

/// Registers addresses of interest in the index.
///
/// Callers validate the address format first; this only normalizes it.
#[derive(Clone)]
pub struct SubscriptionManager {
	index: Arc<AddressIndex>,
}

impl SubscriptionManager {
	pub fn new(index: Arc<AddressIndex>) -> Self {
		Self { index }
	}

	pub async fn subscribe(&self, address: &str) -> bool {
		let address = normalize_address(address);
		debug!("Subscribing {}", address);
		self.index.register(&address).await
	}
}
