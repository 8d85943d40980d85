//! Process configuration from command-line flags and environment variables.

use crate::sync::SyncConfig;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[clap(rename_all = "kebab-case", author, version)]
pub struct Config {
	/// Ethereum JSON-RPC endpoint to poll
	#[clap(env, long, default_value = "https://cloudflare-eth.com")]
	pub rpc_url: String,
	/// Address the HTTP API binds to
	#[clap(env, long, default_value = "0.0.0.0:8080")]
	pub listen_address: SocketAddr,
	/// Seconds between sync ticks
	#[clap(env, long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
	pub poll_interval_secs: u64,
	/// Per-request timeout for RPC calls, in seconds
	#[clap(env, long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
	pub rpc_timeout_secs: u64,
}

impl Config {
	pub fn sync_config(&self) -> SyncConfig {
		SyncConfig {
			poll_interval: Duration::from_secs(self.poll_interval_secs),
		}
	}

	pub fn rpc_timeout(&self) -> Duration {
		Duration::from_secs(self.rpc_timeout_secs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = Config::try_parse_from(["eth-address-sync"]).unwrap();
		assert_eq!(config.listen_address, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
		assert_eq!(config.sync_config().poll_interval, Duration::from_secs(5));
		assert_eq!(config.rpc_timeout(), Duration::from_secs(30));
	}

	#[test]
	fn test_flags_override_defaults() {
		let config = Config::try_parse_from([
			"eth-address-sync",
			"--rpc-url",
			"http://localhost:8545",
			"--poll-interval-secs",
			"12",
		])
		.unwrap();
		assert_eq!(config.rpc_url, "http://localhost:8545");
		assert_eq!(config.poll_interval_secs, 12);
	}

	#[test]
	fn test_zero_interval_rejected() {
		assert!(Config::try_parse_from(["eth-address-sync", "--poll-interval-secs", "0"]).is_err());
	}
}
