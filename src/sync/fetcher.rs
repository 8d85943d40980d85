use crate::rpc::{Block, ChainRpc};
use crate::sync::SyncError;
use std::sync::Arc;
use tracing::debug;

/// Retrieves a single block with full transaction objects from the node.
///
/// There is no retry here. The sync loop decides what a failed height means.
#[derive(Clone)]
pub struct BlockFetcher {
	rpc: Arc<dyn ChainRpc>,
}

impl BlockFetcher {
	pub fn new(rpc: Arc<dyn ChainRpc>) -> Self {
		Self { rpc }
	}

	/// Fetch the block at `height`.
	pub async fn fetch(&self, height: u64) -> Result<Block, SyncError> {
		let block = self
			.rpc
			.block_by_number(height)
			.await
			.map_err(|source| SyncError::BlockFetch { height, source })?;

		debug!(
			"Fetched block {} ({}) with {} transactions",
			height,
			block.number,
			block.transactions.len()
		);
		Ok(block)
	}
}
