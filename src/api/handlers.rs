use crate::api::ApiState;
use crate::rpc::Transaction;
use crate::utils::{is_valid_address, normalize_address};
use axum::{
	Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Json, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Reported in place of a height when the node cannot be reached.
const UNKNOWN_HEIGHT: i64 = -1;

pub fn create_api_router(state: Arc<ApiState>) -> Router {
	Router::new()
		.route("/currentBlock", get(current_block))
		.route("/subscribe", post(subscribe))
		.route("/transactions", get(transactions))
		.route("/health", get(health_check))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
struct AddressQuery {
	address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CurrentBlockResponse {
	current_block: i64,
}

#[derive(Debug, Serialize)]
struct SubscribeResponse {
	success: bool,
}

#[derive(Debug, Serialize)]
struct TransactionsResponse {
	transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
	status: &'static str,
	last_synced_block: Option<u64>,
	subscriptions: usize,
}

async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok",
		last_synced_block: state.engine.last_synced_height().await,
		subscriptions: state.engine.subscription_count().await,
	})
}

/// Live head block of the node, `-1` if it cannot be queried
async fn current_block(State(state): State<Arc<ApiState>>) -> Json<CurrentBlockResponse> {
	let current_block = state
		.engine
		.current_height()
		.await
		.and_then(|height| i64::try_from(height).ok())
		.unwrap_or(UNKNOWN_HEIGHT);

	Json(CurrentBlockResponse { current_block })
}

async fn subscribe(
	State(state): State<Arc<ApiState>>,
	Query(query): Query<AddressQuery>,
) -> Result<Json<SubscribeResponse>, ApiErrorResponse> {
	let address = validated_address(query)?;
	let success = state.engine.subscribe(&address).await;
	debug!("Subscribed {}: {}", address, success);

	Ok(Json(SubscribeResponse { success }))
}

async fn transactions(
	State(state): State<Arc<ApiState>>,
	Query(query): Query<AddressQuery>,
) -> Result<Json<TransactionsResponse>, ApiErrorResponse> {
	let address = validated_address(query)?;
	let transactions = state.engine.transactions_for(&address).await;

	Ok(Json(TransactionsResponse { transactions }))
}

fn validated_address(query: AddressQuery) -> Result<String, ApiErrorResponse> {
	match query.address {
		Some(address) if is_valid_address(&address) => Ok(normalize_address(&address)),
		_ => Err(ApiErrorResponse::bad_request("Invalid address")),
	}
}

#[derive(Debug, Serialize)]
struct ApiError {
	error: String,
	message: String,
}

pub(crate) struct ApiErrorResponse {
	status: StatusCode,
	body: Json<ApiError>,
}

impl ApiErrorResponse {
	fn new(status: StatusCode, error: &str, message: &str) -> Self {
		Self {
			status,
			body: Json(ApiError {
				error: error.to_string(),
				message: message.to_string(),
			}),
		}
	}

	fn bad_request(message: &str) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
	}
}

impl IntoResponse for ApiErrorResponse {
	fn into_response(self) -> Response {
		(self.status, self.body).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sync::test_utils::{ALICE, BOB, MockChain, tx};
	use crate::sync::{SyncConfig, SyncEngine};

	fn state(chain: &Arc<MockChain>, cursor: Option<u64>) -> Arc<ApiState> {
		ApiState::new(Arc::new(SyncEngine::with_cursor(
			chain.clone(),
			SyncConfig::default(),
			cursor,
		)))
	}

	fn query(address: &str) -> Query<AddressQuery> {
		Query(AddressQuery {
			address: Some(address.to_string()),
		})
	}

	#[tokio::test]
	async fn test_current_block() {
		let chain = Arc::new(MockChain::new(0x1234));
		let state = state(&chain, None);
		assert_eq!(current_block(State(state.clone())).await.0.current_block, 0x1234);

		chain.set_head(None);
		assert_eq!(current_block(State(state)).await.0.current_block, UNKNOWN_HEIGHT);
	}

	#[tokio::test]
	async fn test_subscribe_then_list_transactions() {
		let chain = Arc::new(MockChain::new(2));
		chain.insert_block(2, vec![tx(ALICE, BOB, 2, "0x02")]);
		let state = state(&chain, Some(1));

		let mixed = format!("0x{}", BOB[2..].to_ascii_uppercase());
		let response = subscribe(State(state.clone()), query(&mixed)).await;
		assert!(response.map(|r| r.0.success).unwrap_or(false));

		state.engine.sync_once().await.unwrap();

		let Ok(Json(listed)) = transactions(State(state.clone()), query(BOB)).await else {
			panic!("valid address rejected");
		};
		assert_eq!(listed.transactions.len(), 1);
		assert_eq!(listed.transactions[0].hash, "0x02");

		let Ok(Json(listed)) = transactions(State(state), query(ALICE)).await else {
			panic!("valid address rejected");
		};
		assert!(listed.transactions.is_empty());
	}

	#[tokio::test]
	async fn test_invalid_address_is_bad_request() {
		let chain = Arc::new(MockChain::new(1));
		let state = state(&chain, Some(1));

		for bad in ["", "0x1234", "not-an-address"] {
			let Err(err) = subscribe(State(state.clone()), query(bad)).await else {
				panic!("{bad:?} accepted");
			};
			assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
		}

		let missing = Query(AddressQuery { address: None });
		let Err(err) = transactions(State(state.clone()), missing).await else {
			panic!("missing address accepted");
		};
		assert_eq!(err.status, StatusCode::BAD_REQUEST);
		assert_eq!(err.body.0.error, "bad_request");
		assert_eq!(state.engine.subscription_count().await, 0);
	}

	#[tokio::test]
	async fn test_health_reports_cursor_and_subscriptions() {
		let chain = Arc::new(MockChain::new(9));
		let state = state(&chain, Some(9));
		state.engine.subscribe(ALICE).await;

		let Json(health) = health_check(State(state)).await;
		assert_eq!(health.status, "ok");
		assert_eq!(health.last_synced_block, Some(9));
		assert_eq!(health.subscriptions, 1);
	}
}
