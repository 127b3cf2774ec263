use axum::{
    body::{to_bytes, Body},
    extract::{Path, Query, State},
    http::{Method, Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use beaux_catalog::logic::{list_productos, list_servicios, servicios_estilista};
use beaux_catalog::routes::{routes, routes_with_client};
use beaux_common::ApiClient;
use beaux_config::{AgendaConfig, AppConfig, BackendConfig, ServerConfig, SessionConfig};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

type Calls = Arc<Mutex<Vec<String>>>;

fn backend(calls: Calls) -> Router {
    Router::new()
        .route(
            "/scheduling/services/",
            get(
                |State(calls): State<Calls>, Query(q): Query<HashMap<String, String>>| async move {
                    calls.lock().unwrap().push(format!("services {:?}", q.get("sede_id")));
                    Json(json!({"servicios": [
                        {"_id": "s1", "servicio_id": "SV-A", "nombre": "Color",
                         "precios": {"USD": 300.0}, "duracion_minutos": 120},
                        {"_id": "s2", "servicio_id": "SV-B", "nombre": "Manicure",
                         "precios": {"USD": 10.0}}
                    ]}))
                },
            ),
        )
        .route(
            "/admin/servicios/",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") })
                .post(|Json(body): Json<Value>| async move {
                    Json(json!({"success": true, "servicio": body}))
                }),
        )
        .route(
            "/admin/profesionales/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "P-1" {
                    Json(json!({"profesional_id": "P-1", "nombre": "Ana",
                                "servicios_no_presta": ["SV-B", "736534"]}))
                    .into_response()
                } else {
                    StatusCode::NOT_FOUND.into_response()
                }
            }),
        )
        .route(
            "/inventary/product/productos/",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                if q.get("moneda").map(String::as_str) == Some("COP") {
                    Json(json!([{"id": "p1", "nombre": "Shampoo", "precios": {"COP": 45000}}]))
                } else {
                    Json(json!({"detail": "sin productos"}))
                }
            }),
        )
        .with_state(calls)
}

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/", addr)
}

fn session(sede_id: &str, moneda: &str) -> SessionConfig {
    SessionConfig {
        sede_id: Some(sede_id.to_string()),
        moneda: Some(moneda.to_string()),
        ..Default::default()
    }
}

fn create_test_config(base_url: Option<&str>, session: SessionConfig) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        use_agenda: false,
        use_quotes: false,
        use_catalog: true,
        use_sales: false,
        backend: base_url.map(|base_url| BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            follow_redirects: true,
            access_token: None,
        }),
        session,
        agenda: AgendaConfig::default(),
    })
}

async fn client() -> (ApiClient, Calls) {
    let calls = Calls::default();
    let base = spawn_backend(backend(calls.clone())).await;
    (ApiClient::new(base, None, reqwest::Client::new()), calls)
}

async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_guayaquil_listing_is_completed_from_reference() {
    let (client, calls) = client().await;
    let servicios = list_servicios(&client, &session("SD-28080", "USD")).await;

    assert_eq!(servicios.len(), 2 + 21);
    assert_eq!(servicios[0].codigo_referencia.as_deref(), Some("1128696"));
    assert_eq!(servicios[1].codigo_referencia.as_deref(), Some(""));
    assert!(servicios[2..].iter().all(|s| s.id.starts_with("faltante-")));
    assert!(!servicios.iter().any(|s| s.id == "faltante-1128696"));
    assert_eq!(*calls.lock().unwrap(), vec!["services Some(\"SD-28080\")"]);
}

#[tokio::test]
async fn test_guayaquil_uses_reference_list_when_backend_fails() {
    let base = spawn_backend(Router::new()).await;
    let client = ApiClient::new(base, None, reqwest::Client::new());
    let servicios = list_servicios(&client, &session("SD-28080", "COP")).await;

    assert_eq!(servicios.len(), 22);
    assert!(servicios.iter().all(|s| s.id.starts_with("guayaquil-exclusivo-")));
    assert_eq!(servicios[0].moneda_local, "COP");
    assert_eq!(servicios[0].precio, 20_000.0);
}

#[tokio::test]
async fn test_other_branch_errors_give_empty_list() {
    let (client, _) = client().await;
    assert!(list_servicios(&client, &session("SD-1", "COP")).await.is_empty());
}

#[tokio::test]
async fn test_stylist_filter_excludes_by_id_and_code() {
    let (client, _) = client().await;
    let session = session("SD-28080", "USD");

    let todos = list_servicios(&client, &session).await;
    let filtrados = servicios_estilista(&client, &session, "P-1").await;
    assert_eq!(filtrados.len(), todos.len() - 2);
    assert!(!filtrados.iter().any(|s| s.servicio_id == "SV-B"));
    assert!(!filtrados.iter().any(|s| s.codigo_referencia.as_deref() == Some("736534")));

    let sin_perfil = servicios_estilista(&client, &session, "P-404").await;
    assert_eq!(sin_perfil.len(), todos.len());
}

#[tokio::test]
async fn test_productos_non_array_is_empty() {
    let (client, _) = client().await;

    let productos = list_productos(&client, "cop").await.unwrap();
    assert_eq!(productos.len(), 1);
    assert_eq!(productos[0].precio, 45_000.0);
    assert_eq!(productos[0].moneda_local, "COP");

    assert!(list_productos(&client, "USD").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_servicios_endpoint_overlays_query_session() {
    let (client, _) = client().await;
    let app = routes_with_client(
        create_test_config(None, session("SD-1", "USD")),
        Some(client),
    );

    let (status, body) = call(app.clone(), Method::GET, "/catalog/servicios", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = call(
        app.clone(),
        Method::GET,
        "/catalog/servicios?sede_id=SD-28080",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 23);
    assert_eq!(body[0]["precio_formateado"], "$300 USD");

    let (status, body) = call(
        app.clone(),
        Method::GET,
        "/catalog/servicios/codigo/736625?sede_id=SD-28080",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nombre"], "CORTE DE FORMA");

    let (status, _) = call(app, Method::GET, "/catalog/servicios/codigo/000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_endpoint_validates_and_forwards() {
    let (client, _) = client().await;
    let app = routes_with_client(create_test_config(None, SessionConfig::default()), Some(client));

    let (status, body) = call(
        app.clone(),
        Method::POST,
        "/catalog/servicios",
        Some(json!({"nombre": "", "duracion_minutos": 30, "precios": {"USD": 10}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Validation error: El nombre del servicio es obligatorio"
    );

    let (status, body) = call(
        app,
        Method::POST,
        "/catalog/servicios",
        Some(json!({"nombre": "Cejas", "duracion_minutos": 20, "precios": {"USD": 10}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servicio"]["categoria"], "General");
}

#[tokio::test]
async fn test_missing_backend_and_disabled_feature() {
    let app = routes(create_test_config(None, SessionConfig::default()));
    let (status, _) = call(app, Method::GET, "/catalog/productos", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let mut config = (*create_test_config(Some("http://127.0.0.1:9/"), SessionConfig::default())).clone();
    config.use_catalog = false;
    let (status, _) = call(routes(Arc::new(config)), Method::GET, "/catalog/productos", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

fn recording_backend(calls: Calls) -> Router {
    Router::new()
        .fallback(
            |State(calls): State<Calls>, method: Method, uri: axum::http::Uri| async move {
                calls.lock().unwrap().push(format!("{} {}", method, uri.path()));
                Json(json!([{"_id": "s1", "servicio_id": "SV-1", "nombre": "Color",
                             "precios": {"COP": 120000}}]))
            },
        )
        .with_state(calls)
}

#[tokio::test]
async fn test_ids_cannot_escape_the_servicios_path() {
    let calls = Calls::default();
    let base = spawn_backend(recording_backend(calls.clone())).await;
    let client = ApiClient::new(base, Some("SERVICE-TOKEN".to_string()), reqwest::Client::new());
    let config = create_test_config(Some("http://unused/"), session("SD-1", "COP"));

    for (method, uri) in [
        (Method::DELETE, "/catalog/servicios/..%2F..%2Fadmin%2Fsystem-users%2FU-1"),
        (Method::GET, "/catalog/servicios/..%2Fprofesionales"),
        (Method::PUT, "/catalog/servicios/SV-1%3Fforce%3Dtrue"),
        (Method::DELETE, "/catalog/servicios/.."),
    ] {
        let app = routes_with_client(config.clone(), Some(client.clone()));
        let body = (method == Method::PUT).then(|| json!({"nombre": "Color"}));
        let (status, body) = call(app, method, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"]["message"].as_str().unwrap().contains("servicio_id"));
    }
    assert!(calls.lock().unwrap().is_empty());

    let app = routes_with_client(config.clone(), Some(client.clone()));
    let (status, _) = call(app, Method::DELETE, "/catalog/servicios/SV-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(*calls.lock().unwrap(), vec!["DELETE /admin/servicios/SV-1"]);
}

#[tokio::test]
async fn test_invalid_profesional_id_never_reaches_backend() {
    let calls = Calls::default();
    let base = spawn_backend(recording_backend(calls.clone())).await;
    let client = ApiClient::new(base, None, reqwest::Client::new());

    let servicios = servicios_estilista(&client, &session("SD-1", "COP"), "../system-users").await;
    assert_eq!(servicios.len(), 1);
    assert_eq!(*calls.lock().unwrap(), vec!["GET /admin/servicios/"]);
}
