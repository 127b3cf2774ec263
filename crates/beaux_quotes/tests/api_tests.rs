use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use beaux_common::services::CitaFilter;
use beaux_common::ApiClient;
use beaux_config::{AgendaConfig, AppConfig, BackendConfig, ServerConfig, SessionConfig};
use beaux_quotes::bloqueos::{actualizar_bloqueo, list_bloqueos, BloqueoFiltro, CambiosBloqueo};
use beaux_quotes::logic::list_citas;
use beaux_quotes::routes::routes;
use beaux_quotes::{BackendRejection, QuotesError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

type Calls = Arc<Mutex<Vec<String>>>;

fn record(calls: &Calls, line: String) {
    calls.lock().unwrap().push(line);
}

// Stub of the salon backend with a few scripted answers.
fn backend(calls: Calls) -> Router {
    Router::new()
        .route(
            "/scheduling/quotes/",
            get(|State(calls): State<Calls>| async move {
                record(&calls, "GET /scheduling/quotes/".into());
                Json(json!({"citas": [
                    {"_id": "c1", "profesional_id": "P-1", "fecha": "2025-03-10",
                     "hora_inicio": "10:00", "hora_fin": "10:30", "estado": "confirmada"},
                    {"unexpected": true}
                ]}))
            })
            .post(
                |State(calls): State<Calls>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-")
                        .to_string();
                    record(&calls, format!("POST /scheduling/quotes/ {} {}", auth, body));
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"detail": "El profesional ya tiene una cita en ese horario"})),
                    )
                },
            ),
        )
        .route(
            "/scheduling/block/{id}",
            patch(|State(calls): State<Calls>| async move {
                record(&calls, "PATCH /scheduling/block".into());
                StatusCode::METHOD_NOT_ALLOWED
            })
            .put(|State(calls): State<Calls>| async move {
                record(&calls, "PUT /scheduling/block".into());
                StatusCode::OK.into_response()
            })
            .get(|State(calls): State<Calls>| async move {
                record(&calls, "GET /scheduling/block/{id}".into());
                Json(json!([{"_id": "b1", "profesional_id": "P-1", "fecha": "2025-03-10",
                             "hora_inicio": "12:00", "hora_fin": "13:00"}]))
            }),
        )
        .route(
            "/scheduling/quotes/citas/{id}/pago",
            post(|| async { Json(json!({"success": true, "saldo_pendiente": 0})) }),
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

fn create_test_config(base_url: &str) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        use_agenda: false,
        use_quotes: true,
        use_catalog: false,
        use_sales: false,
        backend: Some(BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            follow_redirects: true,
            access_token: None,
        }),
        session: SessionConfig::default(),
        agenda: AgendaConfig::default(),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_citas_falls_back_to_second_endpoint() {
    let calls = Calls::default();
    let base = spawn_backend(backend(calls.clone())).await;
    let client = ApiClient::new(base, None, reqwest::Client::new());

    let citas = list_citas(
        &client,
        &CitaFilter {
            sede_id: Some("SD-1".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(citas.len(), 2, "undecodable fields default, rows are kept");
    assert_eq!(citas[0].id, "c1");
    assert_eq!(citas[0].raw["estado"], "confirmada");
    assert_eq!(*calls.lock().unwrap(), vec!["GET /scheduling/quotes/"]);
}

#[tokio::test]
async fn test_list_citas_reports_last_error() {
    let base = spawn_backend(Router::new()).await;
    let client = ApiClient::new(base, None, reqwest::Client::new());

    let err = list_citas(&client, &CitaFilter::default()).await.unwrap_err();
    assert!(matches!(err, QuotesError::Rejected { status: 404, .. }));
}

#[tokio::test]
async fn test_update_block_retries_with_put() {
    let calls = Calls::default();
    let base = spawn_backend(backend(calls.clone())).await;
    let client = ApiClient::new(base, None, reqwest::Client::new());

    let updated = actualizar_bloqueo(
        &client,
        "b1",
        &CambiosBloqueo {
            motivo: Some("Capacitación".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated, json!({}));
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["PATCH /scheduling/block", "PUT /scheduling/block"]
    );
}

#[tokio::test]
async fn test_professional_filter_uses_per_professional_endpoint() {
    let calls = Calls::default();
    let base = spawn_backend(backend(calls.clone())).await;
    let client = ApiClient::new(base, None, reqwest::Client::new());

    let bloqueos = list_bloqueos(
        &client,
        &BloqueoFiltro {
            profesional_id: Some("P-1".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(bloqueos.len(), 1);
    assert_eq!(bloqueos[0].hora_inicio, "12:00");
    assert_eq!(*calls.lock().unwrap(), vec!["GET /scheduling/block/{id}"]);
}

#[tokio::test]
async fn test_create_cita_rejection_is_classified() {
    let calls = Calls::default();
    let base = spawn_backend(backend(calls.clone())).await;
    let app = routes(create_test_config(&base));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/citas")
        .header("content-type", "application/json")
        .header("authorization", "Bearer user-token")
        .body(Body::from(
            json!({
                "sede_id": "SD-1", "profesional_id": "P-1", "cliente_id": "C-1",
                "servicios": [{"servicio_id": "SV-1", "precio_personalizado": null}],
                "fecha": "2025-03-10", "hora_inicio": "10:00", "hora_fin": "10:30"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["reason"], "SLOT_TAKEN");
    assert_eq!(
        body["error"]["message"],
        BackendRejection::SlotTaken.to_string()
    );

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("POST /scheduling/quotes/ Bearer user-token"));
    assert!(calls[0].contains("\"metodo_pago_inicial\":\"sin_pago\""));
}

#[tokio::test]
async fn test_create_cita_validation_never_reaches_backend() {
    let calls = Calls::default();
    let base = spawn_backend(backend(calls.clone())).await;
    let app = routes(create_test_config(&base));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/citas")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "sede_id": "SD-1", "profesional_id": "P-1", "cliente_id": "C-1",
                "servicios": [],
                "fecha": "2025-03-10", "hora_inicio": "10:00", "hora_fin": "10:30"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Debe incluir al menos un servicio");
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_payment_passes_backend_answer_through() {
    let base = spawn_backend(backend(Calls::default())).await;
    let app = routes(create_test_config(&base));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/citas/c1/pago")
        .header("content-type", "application/json")
        .body(Body::from(json!({"monto": 45000}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);
}

#[tokio::test]
async fn test_disabled_feature_answers_503() {
    let mut config = (*create_test_config("http://127.0.0.1:9/")).clone();
    config.use_quotes = false;
    let app = routes(Arc::new(config));

    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/citas/c1/cancelar")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_path_ids_stay_inside_their_endpoint() {
    let calls = Calls::default();
    let recorder = Router::new()
        .fallback(
            |State(calls): State<Calls>, method: Method, uri: axum::http::Uri, headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-")
                    .to_string();
                record(&calls, format!("{} {} {}", method, uri.path(), auth));
                Json(json!({"success": true}))
            },
        )
        .with_state(calls.clone());
    let base = spawn_backend(recorder).await;
    let mut config = (*create_test_config(&base)).clone();
    if let Some(backend) = config.backend.as_mut() {
        backend.access_token = Some("SERVICE-TOKEN".into());
    }
    let config = Arc::new(config);

    let escapes = [
        (Method::PATCH, "/citas/..%2F..%2Fadmin%2Fsystem-users%2FU-1/cancelar", None),
        (Method::PUT, "/citas/..%2Fadmin", Some(json!({"notas": "x"}))),
        (Method::PATCH, "/citas/C-1%3Fdelete%3Dall/estado", Some(json!({"nuevo_estado": "confirmada"}))),
        (Method::POST, "/citas/..%2F..%2Fpagos/pago", Some(json!({"monto": 1000, "metodo_pago": "efectivo"}))),
        (Method::DELETE, "/bloqueos/..%2F..%2Fadmin%2Fsedes%2FSD-1", None),
        (Method::PATCH, "/bloqueos/%2E%2E", Some(json!({"motivo": "x"}))),
    ];
    for (method, uri, body) in escapes {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let response = routes(config.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
    assert!(calls.lock().unwrap().is_empty());

    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/citas/C-1/cancelar")
        .body(Body::empty())
        .unwrap();
    let response = routes(config).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["PATCH /scheduling/quotes/C-1/cancelar Bearer SERVICE-TOKEN"]
    );
}
