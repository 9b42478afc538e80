//! Live leaderboard server.
mod config;

use std::sync::Arc;

use tokio::{net::TcpListener, signal};
use tracing::info;

use podium_api::{HttpApi, StoreAdapter};
use podium_core::store::SubmissionStore;
use podium_observe::{LoggerConfig, init_local_offset, init_logger};

use crate::config::ServerConfig;

fn main() -> anyhow::Result<()> {
    // Local offset detection only works while the process is single-threaded.
    init_local_offset();

    // 1) logger
    let log_cfg = LoggerConfig::from_env()?;
    init_logger(&log_cfg)?;
    info!(format = %log_cfg.format, level = log_cfg.level.as_str(), "logger initialized");

    // 2) config
    let cfg = ServerConfig::from_env()?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve(cfg, log_cfg))
}

async fn serve(cfg: ServerConfig, log_cfg: LoggerConfig) -> anyhow::Result<()> {
    // 3) store + handler
    let store = Arc::new(SubmissionStore::new());
    let adapter = Arc::new(StoreAdapter::new(store, cfg.metric_table()));
    info!(metric = %cfg.metric, overrides = cfg.task_metrics.len(), "ranking configured");

    // 4) routes
    let mut api = HttpApi::new(adapter).with_page(cfg.page_options(log_cfg.tz));
    if let Some(dir) = &cfg.static_dir {
        info!(dir = %dir.display(), "serving static files under /static");
        api = api.with_static_dir(dir.clone());
    }
    let app = api.router();

    // 5) listen
    let listener = TcpListener::bind(cfg.addr).await?;
    info!(addr = %listener.local_addr()?, "leaderboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("leaderboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
