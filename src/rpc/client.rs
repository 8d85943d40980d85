//!
//! JSON-RPC client for Ethereum nodes.
//!
//! This module provides an async HTTP client speaking JSON-RPC 2.0, plus the `ChainRpc` trait
//! that the sync engine depends on. Keeping the engine behind the trait lets it run against
//! any node implementation, including in-memory ones in tests.

use super::types::*;
use crate::utils::{parse_quantity, to_quantity};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Node operations the sync engine needs.
#[async_trait::async_trait]
pub trait ChainRpc: Send + Sync {
	/// Current head height as reported by the node.
	async fn block_number(&self) -> Result<u64, RpcError>;

	/// Block at `height` with full transaction objects.
	async fn block_by_number(&self, height: u64) -> Result<Block, RpcError>;
}

/// Ethereum JSON-RPC client over HTTP
pub struct EthRpcClient {
	/// The underlying HTTP client.
	http_client: Client,
	/// The node's JSON-RPC endpoint.
	rpc_url: String,
	/// Request id counter.
	next_id: AtomicU64,
}

impl EthRpcClient {
	/// Create a new RPC client.
	///
	/// # Arguments
	/// * `rpc_url` - The HTTP endpoint of the node.
	/// * `timeout` - Per-request timeout applied by the HTTP client.
	pub fn new(rpc_url: String, timeout: Duration) -> Result<Self, RpcError> {
		let http_client = Client::builder().timeout(timeout).build()?;

		Ok(Self {
			http_client,
			rpc_url,
			next_id: AtomicU64::new(1),
		})
	}

	/// Execute a JSON-RPC call.
	///
	/// # Arguments
	/// * `method` - The RPC method name.
	/// * `params` - Positional parameters.
	///
	/// # Returns
	/// The decoded `result` field. A JSON-RPC error object, a non-success HTTP status or a
	/// `null` result are all reported as `RpcError`.
	pub async fn call<T: DeserializeOwned>(
		&self,
		method: &'static str,
		params: serde_json::Value,
	) -> Result<T, RpcError> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let request_body = json!({
			"jsonrpc": "2.0",
			"method": method,
			"params": params,
			"id": id
		});

		debug!("RPC request {} #{}", method, id);

		let response = self
			.http_client
			.post(&self.rpc_url)
			.header("Content-Type", "application/json")
			.json(&request_body)
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(RpcError::HttpStatus(response.status()));
		}

		let body = response.bytes().await?;
		decode_response(method, &body)
	}
}

/// Decode a raw JSON-RPC response body into its result.
fn decode_response<T: DeserializeOwned>(method: &'static str, body: &[u8]) -> Result<T, RpcError> {
	let response: RpcResponse<T> = serde_json::from_slice(body)?;

	if let Some(error) = response.error {
		return Err(RpcError::NodeError {
			code: error.code,
			message: error.message,
		});
	}

	response.result.ok_or(RpcError::NullResult(method))
}

#[async_trait::async_trait]
impl ChainRpc for EthRpcClient {
	async fn block_number(&self) -> Result<u64, RpcError> {
		let head: String = self.call("eth_blockNumber", json!([])).await?;
		parse_quantity(&head)
	}

	async fn block_by_number(&self, height: u64) -> Result<Block, RpcError> {
		self.call("eth_getBlockByNumber", json!([to_quantity(height), true]))
			.await
	}
}
