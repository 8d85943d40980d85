mod api;
mod config;
mod rpc;
mod sync;
mod utils;

use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::api::{ApiState, create_api_router};
use crate::config::Config;
use crate::rpc::EthRpcClient;
use crate::sync::SyncEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.with_timer(tracing_subscriber::fmt::time::time())
		.init();

	let config = Config::parse();
	info!("Starting address indexer against {}", config.rpc_url);

	let rpc = Arc::new(EthRpcClient::new(
		config.rpc_url.clone(),
		config.rpc_timeout(),
	)?);

	let engine = Arc::new(SyncEngine::new(rpc, config.sync_config()).await);

	let cancel = CancellationToken::new();
	let sync_handle = engine.clone().start(cancel.clone());
	tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

	let app = create_api_router(ApiState::new(engine));
	let listener = tokio::net::TcpListener::bind(config.listen_address).await?;
	info!("API server listening on {}", config.listen_address);

	let served = axum::serve(listener, app)
		.with_graceful_shutdown(cancel.clone().cancelled_owned())
		.await;

	// Stop the sync loop even if the server exited on its own.
	cancel.cancel();
	sync_handle.await?;
	served?;

	info!("Shutdown complete");
	Ok(())
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
	match tokio::signal::ctrl_c().await {
		Ok(()) => {
			info!("Received Ctrl-C, shutting down");
			cancel.cancel();
		}
		Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
	}
}
