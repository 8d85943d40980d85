//! JSON-RPC integration module for Ethereum nodes
//!
//! This module provides the client and types for talking to an Ethereum JSON-RPC endpoint.
//! Only the two calls the sync engine needs are modelled: the current head height and a
//! block by height with full transaction objects.

/// HTTP JSON-RPC client and the `ChainRpc` seam used by the sync engine
mod client;
/// Wire types and the transport error
mod types;

pub use client::{ChainRpc, EthRpcClient};
pub use types::*;
