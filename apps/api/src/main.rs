//! # Kasir POS API Server
//!
//! ## Usage
//!
//! ```bash
//! # Optional overrides (or put them in .env)
//! export PORT=8080
//! export KASIR_DB_PATH=./kasir.db
//!
//! # Seed some products, then run the server
//! cargo run -p kasir-db --bin seed -- --db ./kasir.db
//! cargo run -p kasir-api
//! ```

use anyhow::Context;
use kasir_api::{init_tracing, routes, AppState, ServerConfig};
use kasir_db::Database;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Invalid configuration")?;

    init_tracing();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.database_path.display(),
        "Starting Kasir API"
    );

    let db = Database::new(config.db_config())
        .await
        .context("Failed to open database")?;

    let app = routes::create_router(AppState::new(db.clone()));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Resolves on Ctrl+C or SIGTERM. If a handler cannot be installed the
/// corresponding branch never resolves, so the server keeps running.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
