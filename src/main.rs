// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use papervault_gateway::{
    api::router,
    config::{
        CONTRACT_ADDRESS_ENV, DEFAULT_PORT, DEFAULT_RPC_URL, HOST_ENV, LOG_FORMAT_ENV, PORT_ENV,
        RPC_URL_ENV,
    },
    ledger::PaperLedger,
    pinning::PinataClient,
    state::AppState,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let rpc_url = env::var(RPC_URL_ENV).unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
    let contract_address =
        env::var(CONTRACT_ADDRESS_ENV).expect("CONTRACT_ADDRESS must be set");

    let mut ledger =
        PaperLedger::connect(&rpc_url, &contract_address).expect("Failed to build ledger client");
    ledger
        .use_node_account()
        .await
        .expect("Failed to resolve gateway account from node");
    tracing::info!(sender = %ledger.default_sender(), %rpc_url, "ledger client ready");

    let blobs = PinataClient::from_env().expect("Pinning service configuration invalid");

    let state = AppState::new(Arc::new(ledger), Arc::new(blobs));
    let app = router(state);

    // Parse bind address
    let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var(PORT_ENV)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("PaperVault gateway listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("HTTP server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    if env::var(LOG_FORMAT_ENV).as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
