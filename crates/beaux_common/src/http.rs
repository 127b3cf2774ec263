use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{BeauxError, HttpStatusCode};

pub mod client;
pub mod detail;

/// Renders as `{"error": {"message", "code"}}` with the mapped status.
impl IntoResponse for BeauxError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

/// Caller's bearer token from the `Authorization` header, forwarded to the
/// backend so it applies the caller's permissions.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// An id that can stand as exactly one segment of a backend path.
///
/// Ids arrive percent-decoded from the request path, so separators and dot
/// segments are refused instead of escaped. Returns the trimmed id.
pub fn path_segment(id: &str) -> Option<&str> {
    let id = id.trim();
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | ':' | '@');
    if id.is_empty() || id == "." || id == ".." || !id.chars().all(allowed) {
        return None;
    }
    Some(id)
}
