use crate::rpc::RpcError;

/// Failures raised while syncing against the node.
///
/// Neither variant is fatal. A failed head query aborts the current tick only. A failed block
/// fetch is logged and the sweep continues with the next height.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
	#[error("Head height query failed: {0}")]
	HeightQuery(#[source] RpcError),

	#[error("Failed to fetch block {height}: {source}")]
	BlockFetch {
		height: u64,
		#[source]
		source: RpcError,
	},
}
