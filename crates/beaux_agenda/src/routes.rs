// --- File: crates/beaux_agenda/src/routes.rs ---

use crate::clock::{Clock, SystemClock};
use crate::error::AgendaError;
use crate::handlers::{agenda_handler, grid_handler, occupancy_handler, AgendaState, SourceFactory};
use crate::service::HttpAgendaSource;
use crate::DynAgendaSource;
use axum::{routing::get, Router};
use beaux_common::ApiClient;
use beaux_config::AppConfig;
use std::sync::Arc;
use tracing::warn;

/// Creates a router containing all routes for the agenda feature.
///
/// Each request reads the backend with the caller's token.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let client = config
        .backend
        .as_ref()
        .and_then(|backend| match ApiClient::from_config(backend) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Agenda backend client unavailable: {}", e);
                None
            }
        });
    let sources: SourceFactory = Arc::new(
        move |token: Option<String>| -> Result<Arc<DynAgendaSource>, AgendaError> {
            let client = client.as_ref().ok_or(AgendaError::ConfigMissing)?;
            let source: Arc<DynAgendaSource> =
                Arc::new(HttpAgendaSource::new(client.with_token(token)));
            Ok(source)
        },
    );
    routes_with_parts(config, sources, Arc::new(SystemClock))
}

/// Same as [`routes`] with one fixed source shared by every request.
pub fn routes_with_source(
    config: Arc<AppConfig>,
    source: Arc<DynAgendaSource>,
    clock: Arc<dyn Clock>,
) -> Router {
    let sources: SourceFactory = Arc::new(
        move |_: Option<String>| -> Result<Arc<DynAgendaSource>, AgendaError> {
            Ok(Arc::clone(&source))
        },
    );
    routes_with_parts(config, sources, clock)
}

fn routes_with_parts(config: Arc<AppConfig>, sources: SourceFactory, clock: Arc<dyn Clock>) -> Router {
    let state = Arc::new(AgendaState {
        config,
        sources,
        clock,
    });

    Router::new()
        .route("/agenda", get(agenda_handler))
        .route("/agenda/occupancy", get(occupancy_handler))
        .route("/agenda/grid", get(grid_handler))
        .with_state(state)
}
