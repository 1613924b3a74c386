pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod routes;

use config::ServerConfig;
use infra::init_db;
use routes::{build_router, AppState};
use tokio::net::TcpListener;
use tokio::signal;

/// Open the store, bind the listener and serve until Ctrl+C or SIGTERM.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    log::info!("DB path: {:?}", config.db_path);
    let pool = init_db(&config.db_path).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e
    })?;

    let state = AppState::new(pool, config.resolve_secret());
    let app = build_router(state);

    let listener = TcpListener::bind(&config.listen).await?;
    log::info!("Serving cafes on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        log::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                log::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
