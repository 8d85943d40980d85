//! Sync engine: block cursor, periodic sweep, and the read/subscribe surface.
//!
//! The `SyncEngine` is constructed once at startup and shared behind an `Arc` with both the
//! background sync task and the HTTP layer. Construction only records the node's current head;
//! nothing runs until `start` is called.
//!
//! Each tick queries the head `H` and walks every height in `(last_synced, H]` in ascending
//! order. A block that cannot be fetched is logged and skipped, and the cursor still advances to
//! `H` once the range is walked. Skipped heights are not retried; they are reported as gaps.

use crate::rpc::{ChainRpc, Transaction};
use crate::sync::SyncError;
use crate::sync::fetcher::BlockFetcher;
use crate::sync::index::AddressIndex;
use crate::sync::progress_tracker::{SyncProgressTracker, SyncStats};
use crate::sync::subscriptions::SubscriptionManager;
use crate::utils::normalize_address;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Configuration for the sync loop
#[derive(Debug, Clone)]
pub struct SyncConfig {
	/// Time between the start of two ticks. A slow sweep delays the next tick instead of
	/// overlapping with it.
	pub poll_interval: Duration,
}

impl Default for SyncConfig {
	fn default() -> Self {
		Self {
			poll_interval: Duration::from_secs(5),
		}
	}
}

pub struct SyncEngine {
	rpc: Arc<dyn ChainRpc>,
	fetcher: BlockFetcher,
	index: Arc<AddressIndex>,
	subscriptions: SubscriptionManager,
	/// Highest height whose matches are fully applied. `None` until a head query succeeds.
	last_synced: RwLock<Option<u64>>,
	/// Held for the whole of a sweep so two sweeps never overlap.
	sweep_lock: Mutex<()>,
	config: SyncConfig,
}

impl SyncEngine {
	/// Create an engine whose cursor starts at the node's current head.
	///
	/// A failed head query leaves the cursor unknown; the first successful tick adopts the head
	/// it observes.
	pub async fn new(rpc: Arc<dyn ChainRpc>, config: SyncConfig) -> Self {
		let last_synced = match rpc.block_number().await {
			Ok(head) => {
				info!("Starting from head block {}", head);
				Some(head)
			}
			Err(e) => {
				warn!("Failed to query head block, cursor unknown until next tick: {}", e);
				None
			}
		};

		Self::with_cursor(rpc, config, last_synced)
	}

	/// Create an engine with an explicit starting cursor.
	pub fn with_cursor(
		rpc: Arc<dyn ChainRpc>,
		config: SyncConfig,
		last_synced: Option<u64>,
	) -> Self {
		let index = Arc::new(AddressIndex::new());

		Self {
			fetcher: BlockFetcher::new(rpc.clone()),
			subscriptions: SubscriptionManager::new(index.clone()),
			rpc,
			index,
			last_synced: RwLock::new(last_synced),
			sweep_lock: Mutex::new(()),
			config,
		}
	}

	/// Spawn the periodic sync task.
	///
	/// The task stops once `cancel` fires. A sweep already in flight is finished first, so the
	/// cursor never points past blocks that were only partly applied.
	pub fn start(self: Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
		tokio::spawn(async move { self.run(cancel).await })
	}

	async fn run(&self, cancel: CancellationToken) {
		let mut ticker = tokio::time::interval(self.config.poll_interval);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
		// The first tick completes immediately; the first sweep waits one full interval.
		ticker.tick().await;

		info!(
			"Sync loop started, polling every {}ms",
			self.config.poll_interval.as_millis()
		);

		loop {
			tokio::select! {
				_ = cancel.cancelled() => {
					info!("Sync loop stopped");
					break;
				}
				_ = ticker.tick() => {
					match self.sync_once().await {
						Ok(stats) if !stats.is_empty() => info!("{}", stats.summary()),
						Ok(_) => {}
						Err(e) => error!("Sync tick aborted: {}", e),
					}
				}
			}
		}
	}

	/// Run one sweep from the cursor up to the node's current head.
	///
	/// Only a failed head query is returned as an error; in that case nothing changed. Block
	/// fetch failures are logged and reported as gaps in the returned stats.
	pub async fn sync_once(&self) -> Result<SyncStats, SyncError> {
		let _sweep = self.sweep_lock.lock().await;

		let head = self
			.rpc
			.block_number()
			.await
			.map_err(SyncError::HeightQuery)?;

		let cursor = *self.last_synced.read().await;
		let Some(last_synced) = cursor else {
			info!("Cursor was unknown, adopting head block {}", head);
			*self.last_synced.write().await = Some(head);
			return Ok(SyncProgressTracker::new(head.saturating_add(1), head).get_stats());
		};

		let from = last_synced + 1;
		let mut tracker = SyncProgressTracker::new(from, head);
		if head <= last_synced {
			debug!("No new blocks (head {}, synced {})", head, last_synced);
			return Ok(tracker.get_stats());
		}

		info!("Syncing from block {} to {}", from, head);

		for height in from..=head {
			match self.fetcher.fetch(height).await {
				Ok(block) => {
					let matched = self.index.apply_block(&block.transactions).await;
					if matched > 0 {
						debug!("Block {}: {} transactions indexed", height, matched);
					}
					tracker.record_block(height, matched);
				}
				Err(e) => {
					error!("{}", e);
					tracker.record_skipped(height);
				}
			}
			tracker.log_progress(false);
		}

		*self.last_synced.write().await = Some(head);

		let stats = tracker.get_stats();
		for (start, end) in &stats.gaps {
			warn!(
				"Gap left in index: blocks {} to {} were skipped and will not be retried",
				start, end
			);
		}

		Ok(stats)
	}

	/// The node's current head, queried live. `None` when the node cannot be reached.
	pub async fn current_height(&self) -> Option<u64> {
		match self.rpc.block_number().await {
			Ok(head) => Some(head),
			Err(e) => {
				warn!("Failed to query head block: {}", e);
				None
			}
		}
	}

	/// Highest block whose matches are fully indexed.
	pub async fn last_synced_height(&self) -> Option<u64> {
		*self.last_synced.read().await
	}

	pub async fn subscribe(&self, address: &str) -> bool {
		self.subscriptions.subscribe(address).await
	}

	/// Transactions indexed for `address`, oldest first. Empty if never subscribed.
	pub async fn transactions_for(&self, address: &str) -> Vec<Transaction> {
		self.index.read(&normalize_address(address)).await
	}

	pub async fn subscription_count(&self) -> usize {
		self.index.subscription_count().await
	}
}
