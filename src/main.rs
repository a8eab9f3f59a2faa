// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use fabric_donation_gateway::{
    api::router,
    config::{
        ConnectionProfile, CONNECTION_PROFILE_ENV, DEFAULT_CONNECTION_PROFILE, DEFAULT_PORT,
        DEFAULT_WALLET_DIR, WALLET_DIR_ENV,
    },
    state::AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Load the connection profile once; it is immutable for process lifetime.
    let profile_path = env::var(CONNECTION_PROFILE_ENV)
        .unwrap_or_else(|_| DEFAULT_CONNECTION_PROFILE.to_string());
    let profile = ConnectionProfile::load(&profile_path)
        .unwrap_or_else(|e| panic!("failed to load connection profile {profile_path}: {e}"));

    let wallet_dir = env::var(WALLET_DIR_ENV).unwrap_or_else(|_| DEFAULT_WALLET_DIR.to_string());
    tracing::info!(profile = %profile_path, wallet = %wallet_dir, "configuration loaded");

    let state = AppState::new(profile, &wallet_dir).expect("failed to build gateway clients");
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    tracing::info!("donation gateway listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}
