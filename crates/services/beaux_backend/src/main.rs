// --- File: crates/services/beaux_backend/src/main.rs ---
use beaux_common::{logging, FeatureFlags};
use beaux_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Kept alive until shutdown so the file writer flushes.
    let _log_guard = match std::env::var("BEAUX_LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            Some(logging::init_with_file(dir, "beaux-backend", tracing::Level::INFO))
        }
        _ => {
            logging::init();
            None
        }
    };

    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            logging::log_error(e, "Failed to load config");
            std::process::exit(1);
        }
    };
    if config.backend.is_none() {
        error!("No backend section configured; feature endpoints will answer 500");
    }

    info!(
        "Enabled features: {:?}",
        FeatureFlags::from_config(&config).enabled()
    );

    let app = beaux_backend::app(config.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            logging::log_error(e, &format!("Could not bind {}", addr));
            std::process::exit(1);
        }
    };
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        logging::log_error(e, "Server error");
        std::process::exit(1);
    }
}
