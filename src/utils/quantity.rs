use crate::rpc::RpcError;

/// Parse a JSON-RPC hex quantity such as `0x1b4` into an integer.
pub fn parse_quantity(value: &str) -> Result<u64, RpcError> {
	let digits = value
		.strip_prefix("0x")
		.filter(|d| !d.is_empty())
		.ok_or_else(|| RpcError::InvalidQuantity(value.to_string()))?;

	u64::from_str_radix(digits, 16).map_err(|_| RpcError::InvalidQuantity(value.to_string()))
}

/// Encode an integer as a JSON-RPC hex quantity.
pub fn to_quantity(value: u64) -> String {
	format!("{:#x}", value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_quantity() {
		assert_eq!(parse_quantity("0x0").unwrap(), 0);
		assert_eq!(parse_quantity("0x1b4").unwrap(), 436);
		assert_eq!(parse_quantity("0x12A05F200").unwrap(), 5_000_000_000);
	}

	#[test]
	fn test_parse_quantity_rejects_malformed() {
		for bad in ["", "0x", "1b4", "0xzz", "0x-1"] {
			assert!(
				matches!(parse_quantity(bad), Err(RpcError::InvalidQuantity(_))),
				"{bad:?} should be rejected"
			);
		}
	}

	#[test]
	fn test_to_quantity() {
		assert_eq!(to_quantity(0), "0x0");
		assert_eq!(to_quantity(436), "0x1b4");
	}
}
