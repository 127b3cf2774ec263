// --- File: crates/services/beaux_backend/src/lib.rs ---
//! Router assembly for the Beaux server. `main` only loads the config,
//! sets up logging and serves what [`app`] returns.

use axum::{extract::State, routing::get, Json, Router};
use beaux_common::features::FeatureFlags;
use beaux_config::AppConfig;
use http::{header, Method};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    #[serde(flatten)]
    features: FeatureFlags,
    backend_configured: bool,
}

async fn health(State(config): State<Arc<AppConfig>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        features: FeatureFlags::from_config(&config),
        backend_configured: config.backend.is_some(),
    })
}

/// Feature routers merged under `/api`.
pub fn api_router(config: Arc<AppConfig>) -> Router {
    #[allow(unused_mut)] // only mutated when a feature is compiled in
    let mut router = Router::new()
        .route("/", get(|| async { "Welcome to the Beaux API!" }))
        .route("/health", get(health))
        .with_state(config.clone());

    #[cfg(feature = "agenda")]
    {
        router = router.merge(beaux_agenda::routes::routes(config.clone()));
    }
    #[cfg(feature = "quotes")]
    {
        router = router.merge(beaux_quotes::routes::routes(config.clone()));
    }
    #[cfg(feature = "catalog")]
    {
        router = router.merge(beaux_catalog::routes::routes(config.clone()));
    }
    #[cfg(feature = "sales")]
    {
        router = router.merge(beaux_sales::routes::routes(config.clone()));
    }
    Router::new().nest("/api", router)
}

#[cfg(feature = "openapi")]
fn with_swagger(app: Router) -> Router {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Beaux API",
            version = "0.1.0",
            description = "Salon agenda, appointments, catalog and sales",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        tags((name = "Beaux", description = "Core service endpoints")),
        servers((url = "/api", description = "Main API Prefix")),
    )]
    struct ApiDoc;

    #[allow(unused_mut)]
    let mut doc = ApiDoc::openapi();
    #[cfg(feature = "agenda")]
    doc.merge(beaux_agenda::doc::AgendaApiDoc::openapi());
    #[cfg(feature = "quotes")]
    doc.merge(beaux_quotes::doc::QuotesApiDoc::openapi());
    #[cfg(feature = "catalog")]
    doc.merge(beaux_catalog::doc::CatalogApiDoc::openapi());
    #[cfg(feature = "sales")]
    doc.merge(beaux_sales::doc::SalesApiDoc::openapi());

    tracing::info!("Adding Swagger UI at /api/docs");
    app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", doc))
}

/// The whole application with tracing and CORS layers.
pub fn app(config: Arc<AppConfig>) -> Router {
    let app = api_router(config);
    #[cfg(feature = "openapi")]
    let app = with_swagger(app);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    app.layer(TraceLayer::new_for_http()).layer(cors)
}
