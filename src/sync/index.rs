//! In-memory index of transactions per subscribed address.
//!
//! A single `RwLock` guards the whole map. Every append for one block happens inside one
//! exclusive section, so a reader never sees a transaction under its sender without also
//! seeing it under its (subscribed) recipient.

use crate::rpc::Transaction;
use crate::utils::normalize_address;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Mapping from normalized address to the transactions that touched it, in discovery order.
///
/// A key exists iff the address was subscribed.
#[derive(Debug, Default)]
pub struct AddressIndex {
	slots: RwLock<HashMap<String, Vec<Transaction>>>,
}

impl AddressIndex {
	pub fn new() -> Self {
		Self::default()
	}

	/// Ensure a slot exists for `address`. Idempotent; existing transactions are kept.
	pub async fn register(&self, address: &str) -> bool {
		let mut slots = self.slots.write().await;
		slots.entry(address.to_string()).or_default();
		true
	}

	/// Append `transaction` to the slot of `address` if one exists.
	///
	/// Returns whether the transaction was appended.
	#[allow(dead_code)]
	pub async fn append_if_subscribed(&self, address: &str, transaction: Transaction) -> bool {
		let mut slots = self.slots.write().await;
		append_locked(&mut slots, address, &transaction)
	}

	/// Index every transaction of one block under its subscribed sender and recipient.
	///
	/// Addresses are normalized before lookup. A self-transfer is appended once. Returns the
	/// number of appends performed.
	pub async fn apply_block(&self, transactions: &[Transaction]) -> usize {
		let mut slots = self.slots.write().await;
		let mut appended = 0;

		for tx in transactions {
			let from = normalize_address(&tx.from);
			if append_locked(&mut slots, &from, tx) {
				appended += 1;
			}

			if let Some(to) = tx.to.as_deref().map(normalize_address) {
				if to != from && append_locked(&mut slots, &to, tx) {
					appended += 1;
				}
			}
		}

		appended
	}

	/// Snapshot of the transactions indexed for `address`, empty if it was never subscribed.
	pub async fn read(&self, address: &str) -> Vec<Transaction> {
		let slots = self.slots.read().await;
		slots.get(address).cloned().unwrap_or_default()
	}

	#[allow(dead_code)]
	pub async fn is_subscribed(&self, address: &str) -> bool {
		self.slots.read().await.contains_key(address)
	}

	/// Number of subscribed addresses.
	pub async fn subscription_count(&self) -> usize {
		self.slots.read().await.len()
	}
}

fn append_locked(
	slots: &mut HashMap<String, Vec<Transaction>>,
	address: &str,
	transaction: &Transaction,
) -> bool {
	match slots.get_mut(address) {
		Some(slot) => {
			slot.push(transaction.clone());
			true
		}
		None => false,
	}
}
