use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use configs::AppConfig;
use service::{reload::ReloadScheduler, storage::JsonFileRepository, QuoteStore};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let s = &cfg.server;
    format!("{}:{}", s.host, s.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", s.host, s.port))
}

/// Open the data file and build the handler state. Any load failure is fatal.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let data_path = &cfg.quotes.data_path;
    common::env::ensure_data_dir(data_path).await?;

    let repo = Arc::new(JsonFileRepository::new(data_path));
    let store = QuoteStore::open(repo)
        .await
        .with_context(|| format!("loading quotes from {}", data_path.display()))?;

    let trusted = cfg.server.trusted_proxy_addrs()?;
    Ok(AppState::new(store, cfg.quotes.read_only, trusted))
}

/// Startup banner: how many quotes were loaded and how to add the first one.
async fn announce(state: &AppState, cfg: &AppConfig, addr: SocketAddr) {
    let count = state.store.len().await;
    info!(event = "quotes_loaded", count, path = %cfg.quotes.data_path.display(), "loaded quotes");
    if count == 0 {
        warn!(
            event = "no_quotes",
            example = %format!(
                r#"curl -X POST http://{addr}/quotes -H "Content-Type: application/json" -d '{{"quote": "If it builds, it ships."}}'"#
            ),
            "no quotes found in data file; add quotes using the POST /quotes endpoint"
        );
    }
    if state.read_only {
        info!(event = "read_only", "API running in read-only mode - POST requests will be disabled");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: load data, start the reload timer and serve HTTP until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    announce(&state, &cfg, addr).await;

    let scheduler = ReloadScheduler::new(Arc::clone(&state.store), cfg.quotes.reload_interval());
    let reload_task = scheduler.spawn();

    let app: Router = routes::build_router(state, build_cors());

    info!(%addr, "starting quote server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    reload_task.abort();
    Ok(())
}
