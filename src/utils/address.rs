const ADDRESS_LEN: usize = 42;

/// Check that `address` is a `0x`-prefixed, 20-byte hex account identifier.
pub fn is_valid_address(address: &str) -> bool {
	match address.strip_prefix("0x") {
		Some(body) if address.len() == ADDRESS_LEN => hex::decode(body).is_ok(),
		_ => false,
	}
}

/// Canonical form used as the index key.
pub fn normalize_address(address: &str) -> String {
	address.to_ascii_lowercase()
}
