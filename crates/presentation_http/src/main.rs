//! Hawaii climate API server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{ClimateQueryConfig, ClimateQueryService, ports::DatabaseHealthPort};
use infrastructure::{
    AppConfig, AsyncDatabase, SqliteDatabaseHealth, SqliteMeasurementRepository, TemplateEngine,
    init_telemetry,
};
use presentation_http::{AppState, routes, set_expose_internal_errors};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration; it carries the log filter
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_telemetry(&config.telemetry)?;

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Hawaii climate API starting"
    );
    info!(
        host = %config.server.host,
        port = config.server.port,
        database = %config.database.path,
        "Configuration loaded"
    );

    set_expose_internal_errors(!config.is_production());

    // Open the measurement database
    let db = AsyncDatabase::open(&config.database).await?;

    let query_config = ClimateQueryConfig::from(&config.query);
    query_config.validate()?;

    let repository = Arc::new(SqliteMeasurementRepository::new(db.pool().clone()));
    let query_service = ClimateQueryService::new(repository, query_config);
    let database_health: Arc<dyn DatabaseHealthPort> =
        Arc::new(SqliteDatabaseHealth::new(db.pool().clone()));

    if !database_health.is_available().await {
        warn!("Database did not answer the startup probe");
    }

    let templates = TemplateEngine::new()?;
    let config = Arc::new(config);

    let state = AppState::new(
        Arc::new(query_service),
        database_health,
        templates,
        Arc::clone(&config),
    );
    let app = routes::create_app(state, &config.server);

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    info!("Waiting up to {:?} for connections to close", timeout);
}
