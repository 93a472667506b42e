//! blog server
//!
//! - Public API: `/`, `/posts`, `/posts/{id}` on `app.listen`
//! - Monitoring: `/healthz`, `/metrics` on `monitoring.listen`
//! - Optional snapshot: loaded at start, saved after graceful shutdown

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use blog_core::error::{BlogError, Result};
use blog_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "blog-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen = cfg.app.listen_addr()?;
    let monitoring = cfg.monitoring.listen_addr()?;

    let state = AppState::new(cfg)?;

    let ops_listener = bind(monitoring).await?;
    let ops = router::build_ops_router(state.clone());
    tracing::info!(%monitoring, "metrics exporter listening");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(ops_listener, ops).await {
            tracing::error!(error = %e, "monitoring server failed");
        }
    });

    let listener = bind(listen).await?;
    let app = router::build_router(state.clone());
    tracing::info!(%listen, "blog-server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BlogError::Internal(format!("server failed: {e}")))?;
    tracing::info!("server gracefully shut down");

    state.save_snapshot()
}

async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| BlogError::Internal(format!("failed to bind {addr}: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
