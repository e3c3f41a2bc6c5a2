//! Restaurant Review Service
//!
//! Serves the restaurant pages over HTTP.
//! Reads configuration from TOML file (~/.config/restaurant-review/config.toml).

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use restaurant_review::config::LoggingConfig;
use restaurant_review::domain::RepositoryProvider;
use restaurant_review::infrastructure::database::migrator::Migrator;
use restaurant_review::shared::ShutdownSignal;
use restaurant_review::{
    create_app_router, default_config_path, init_database, AppConfig, AppState,
    InMemoryRepositoryProvider, SeaOrmRepositoryProvider, StorageBackend,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = default_config_path();
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_logging(&cfg.logging);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_logging(&LoggingConfig::default());
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Restaurant Review Service...");

    // ── Prometheus metrics recorder (before any metrics calls) ──
    let prometheus_handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");

    // ── Storage ────────────────────────────────────────────────
    let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
        match app_cfg.database.backend {
            StorageBackend::SeaOrm => {
                let db = match init_database(&app_cfg.database.connection()).await {
                    Ok(db) => db,
                    Err(e) => {
                        error!("Failed to connect to database: {}", e);
                        return Err(e.into());
                    }
                };

                info!("Running database migrations...");
                if let Err(e) = Migrator::up(&db, None).await {
                    error!("Failed to run migrations: {}", e);
                    return Err(e.into());
                }
                info!("Migrations completed");

                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage with demo data; nothing is persisted");
                (Arc::new(InMemoryRepositoryProvider::with_demo_data()), None)
            }
        };

    let state = AppState::new(repos, app_cfg.listing_settings(), prometheus_handle);
    let router = create_app_router(state);

    // ── Shutdown signal (SIGTERM, SIGINT) ──────────────────────
    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_os_signals();

    // ── HTTP server ────────────────────────────────────────────
    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let server_shutdown = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                server_shutdown.wait().await;
                info!("HTTP server received shutdown signal, draining requests");
            })
            .await
    });

    let drain = Duration::from_secs(app_cfg.server.shutdown_timeout);
    let finished = tokio::select! {
        result = &mut server => Ok(result),
        _ = shutdown.wait() => tokio::time::timeout(drain, server).await,
    };

    match finished {
        Ok(Ok(Ok(()))) => info!("HTTP server stopped"),
        Ok(Ok(Err(e))) => error!("HTTP server error: {}", e),
        Ok(Err(e)) => error!("HTTP server task panicked: {}", e),
        Err(_) => warn!("In-flight requests still running after {:?}, exiting", drain),
    }

    // ── Cleanup ────────────────────────────────────────────────
    if let Some(db) = db {
        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    }

    info!("Restaurant Review Service shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(cfg: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    if cfg.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
