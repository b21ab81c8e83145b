//! surfsup - a read-only JSON API over the Hawaii weather dataset
//!
//! This is the main entry point for the surfsup server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tracing::{error, info};

use surfsup::db::{dataset_summary, open_database};
use surfsup::handlers::heartbeat;
use surfsup::{
    create_router, init_tracing, log_dataset_stats, log_error, log_operation_end,
    log_operation_start, Config, Result, SurfsUpError,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before tracing so the configured level applies
    let config = Config::load()?;
    init_tracing(&config.log_level);
    heartbeat::mark_start();

    info!("Starting surfsup v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let database_path = config.database.path.display().to_string();
    let load_start = Instant::now();
    log_operation_start("dataset_open", Some(database_path.as_str()));

    // Open the database and create application state
    let app_state = open_database(config.clone()).await.map_err(|e| {
        log_error(&e, "opening database");
        e
    })?;

    {
        let mut conn = app_state.acquire().await?;
        let summary = dataset_summary(&mut conn).await?;
        log_dataset_stats(&database_path, &summary);
    }
    log_operation_end("dataset_open", load_start, true);

    let state = Arc::new(app_state);
    let app = create_router(state);

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| SurfsUpError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
