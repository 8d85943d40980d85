//!
//! Utility module for the address indexer.
//!
//! Re-exports the hex quantity codec and address helpers used by the RPC client, the sync
//! engine and the HTTP API.
/// Address format validation and normalization
pub mod address;
/// Hex quantity encoding as used by Ethereum JSON-RPC
pub mod quantity;

pub use address::{is_valid_address, normalize_address};
pub use quantity::{parse_quantity, to_quantity};
