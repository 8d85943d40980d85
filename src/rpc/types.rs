//! Wire types for Ethereum JSON-RPC responses

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 response envelope.
///
/// Either `result` or `error` is set by a well-behaved node. A `null` result is legal on the
/// wire (e.g. a block that does not exist yet) and is surfaced as `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// Error object returned by the node inside a JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// A block as returned by `eth_getBlockByNumber` with full transaction objects.
///
/// Only the fields the index needs are decoded; everything else the node sends is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// The block number as a hex quantity.
    pub number: String,
    /// Transactions in the order the node reported them.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Transaction record stored in the address index.
///
/// Field values are kept exactly as the node reported them. `value` and `block_number` are hex
/// quantities that are never parsed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Sender address.
    pub from: String,
    /// Recipient address, `None` for contract creations.
    pub to: Option<String>,
    /// Transferred value in wei, hex encoded.
    pub value: String,
    /// Height of the containing block, hex encoded.
    pub block_number: String,
    /// Transaction hash.
    pub hash: String,
}

/// Error types for JSON-RPC transport and decoding
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP status: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Node error {code}: {message}")]
    NodeError { code: i64, message: String },

    #[error("Null result for {0}")]
    NullResult(&'static str),

    #[error("Invalid hex quantity: {0}")]
    InvalidQuantity(String),
}
