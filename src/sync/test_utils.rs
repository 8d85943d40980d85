//! In-memory node used by the sync and API tests.

use crate::rpc::{Block, ChainRpc, RpcError, Transaction};
use crate::utils::to_quantity;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const ALICE: &str = "0x00000000000000000000000000000000000a11ce";
pub const BOB: &str = "0x0000000000000000000000000000000000000b0b";
pub const CAROL: &str = "0x00000000000000000000000000000000000ca201";

pub fn tx(from: &str, to: &str, height: u64, hash: &str) -> Transaction {
	Transaction {
		from: from.to_string(),
		to: Some(to.to_string()),
		value: "0x1".to_string(),
		block_number: to_quantity(height),
		hash: hash.to_string(),
	}
}

#[derive(Default)]
struct MockState {
	/// `None` makes the head query fail.
	head: Option<u64>,
	blocks: HashMap<u64, Vec<Transaction>>,
	failing: HashSet<u64>,
	head_calls: usize,
	fetched: Vec<u64>,
}

/// Node whose head, blocks and failures are scripted by the test.
#[derive(Default)]
pub struct MockChain {
	state: Mutex<MockState>,
	/// Yield to the scheduler on every block fetch so readers can interleave with a sweep.
	yield_on_fetch: bool,
}

impl MockChain {
	pub fn new(head: u64) -> Self {
		let chain = Self::default();
		chain.set_head(Some(head));
		chain
	}

	pub fn yielding(mut self) -> Self {
		self.yield_on_fetch = true;
		self
	}

	pub fn set_head(&self, head: Option<u64>) {
		self.state.lock().unwrap().head = head;
	}

	pub fn insert_block(&self, height: u64, transactions: Vec<Transaction>) {
		self.state.lock().unwrap().blocks.insert(height, transactions);
	}

	pub fn fail_block(&self, height: u64) {
		self.state.lock().unwrap().failing.insert(height);
	}

	/// Heights requested so far, in request order.
	pub fn fetched(&self) -> Vec<u64> {
		self.state.lock().unwrap().fetched.clone()
	}

	pub fn head_calls(&self) -> usize {
		self.state.lock().unwrap().head_calls
	}
}

#[async_trait::async_trait]
impl ChainRpc for MockChain {
	async fn block_number(&self) -> Result<u64, RpcError> {
		let mut state = self.state.lock().unwrap();
		state.head_calls += 1;
		state.head.ok_or(RpcError::NodeError {
			code: -32000,
			message: "node unavailable".to_string(),
		})
	}

	async fn block_by_number(&self, height: u64) -> Result<Block, RpcError> {
		let result = {
			let mut state = self.state.lock().unwrap();
			state.fetched.push(height);
			if state.failing.contains(&height) {
				Err(RpcError::NodeError {
					code: -32000,
					message: format!("block {} unavailable", height),
				})
			} else {
				Ok(Block {
					number: to_quantity(height),
					transactions: state.blocks.get(&height).cloned().unwrap_or_default(),
				})
			}
		};

		if self.yield_on_fetch {
			tokio::task::yield_now().await;
		}
		result
	}
}
