//! Error bodies returned by the salon backend.
//!
//! The backend is a FastAPI service, so failures carry a `detail` that is a
//! plain string, a list of validation items (`{loc, msg, type}`) or an object.
//! Newer endpoints add a machine-readable `code` next to the message.

use serde::Serialize;
use serde_json::{Map, Value};

/// One entry of a validation `detail` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailItem {
    /// Location path, e.g. `["body", "servicios", 0, "servicio_id"]`.
    pub loc: Vec<String>,
    pub msg: String,
    pub kind: Option<String>,
}

impl DetailItem {
    fn from_value(value: &Value) -> DetailItem {
        let loc = value
            .get("loc")
            .and_then(Value::as_array)
            .map(|parts| {
                parts
                    .iter()
                    .map(|p| match p {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let msg = value
            .get("msg")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string());
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string);
        DetailItem { loc, msg, kind }
    }

    /// The innermost named location, skipping list indices.
    pub fn field(&self) -> Option<&str> {
        self.loc
            .iter()
            .rev()
            .map(String::as_str)
            .find(|part| part.parse::<usize>().is_err())
    }
}

/// A parsed backend error body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ApiDetail {
    Empty,
    Message(String),
    Items(Vec<DetailItem>),
    Object(Map<String, Value>),
}

impl ApiDetail {
    /// Parses a raw response body. Non-JSON bodies become a plain message.
    pub fn parse(body: &str) -> ApiDetail {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return ApiDetail::Empty;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => ApiDetail::from_value(&value),
            Err(_) => ApiDetail::Message(trimmed.to_string()),
        }
    }

    pub fn from_value(value: &Value) -> ApiDetail {
        let Value::Object(map) = value else {
            return ApiDetail::from_detail(value, None);
        };
        let top_code = map.get("code").and_then(Value::as_str);
        match map.get("detail") {
            Some(detail) => ApiDetail::from_detail(detail, top_code),
            None => ApiDetail::Object(map.clone()),
        }
    }

    fn from_detail(detail: &Value, code: Option<&str>) -> ApiDetail {
        match detail {
            Value::Null => ApiDetail::Empty,
            Value::String(s) => match code {
                Some(code) => {
                    let mut map = Map::new();
                    map.insert("code".into(), Value::String(code.to_string()));
                    map.insert("message".into(), Value::String(s.clone()));
                    ApiDetail::Object(map)
                }
                None => ApiDetail::Message(s.clone()),
            },
            Value::Array(items) => {
                ApiDetail::Items(items.iter().map(DetailItem::from_value).collect())
            }
            Value::Object(map) => {
                let mut map = map.clone();
                if let Some(code) = code {
                    map.entry("code")
                        .or_insert_with(|| Value::String(code.to_string()));
                }
                ApiDetail::Object(map)
            }
            other => ApiDetail::Message(other.to_string()),
        }
    }

    /// Machine-readable error code, when the backend sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiDetail::Object(map) => map.get("code").and_then(Value::as_str),
            _ => None,
        }
    }

    /// The message text the backend intended for humans, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            ApiDetail::Empty => None,
            ApiDetail::Message(s) => Some(s.clone()),
            ApiDetail::Items(items) => {
                let joined = items
                    .iter()
                    .map(|i| i.msg.as_str())
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
                    .join(" | ");
                (!joined.is_empty()).then_some(joined)
            }
            ApiDetail::Object(map) => {
                for key in ["message", "mensaje", "error", "detail"] {
                    if let Some(Value::String(s)) = map.get(key) {
                        if !s.trim().is_empty() {
                            return Some(s.clone());
                        }
                    }
                }
                let pairs = map
                    .iter()
                    .filter(|(k, _)| k.as_str() != "code")
                    .map(|(k, v)| match v {
                        Value::String(s) => format!("{}: {}", k, s),
                        other => format!("{}: {}", k, other),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                (!pairs.is_empty()).then_some(pairs)
            }
        }
    }

    /// Human message with a fallback for empty bodies.
    pub fn describe(&self, fallback: &str) -> String {
        self.message().unwrap_or_else(|| fallback.to_string())
    }
}
