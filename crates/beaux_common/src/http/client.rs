// --- File: crates/beaux_common/src/http/client.rs ---
use beaux_config::BackendConfig;
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError, Method};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::detail::ApiDetail;

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A static HTTP client that can be reused across the application.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    create_client(DEFAULT_TIMEOUT_SECS, true).unwrap_or_else(|err| {
        warn!("falling back to default HTTP client: {}", err);
        Client::new()
    })
});

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
/// * `follow_redirects` - Whether the client should follow redirects
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}

/// Failures talking to the salon backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: ReqwestError,
    },

    #[error("{path} returned {status}: {}", .detail.describe("no detail"))]
    Status {
        path: String,
        status: u16,
        detail: ApiDetail,
    },

    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("invalid request: {0}")]
    Url(String),
}

impl ApiError {
    /// HTTP status of a backend rejection, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&ApiDetail> {
        match self {
            ApiError::Status { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// JSON client for the salon backend.
///
/// Paths are relative to `base_url` (`"scheduling/quotes/"`). A bearer token
/// is attached to every request when present.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            client,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        let client = create_client(config.timeout_secs, config.follow_redirects).map_err(
            |source| ApiError::Transport {
                path: config.base_url.clone(),
                source,
            },
        )?;
        Ok(Self::new(
            config.base_url.clone(),
            config.bearer_token().map(str::to_string),
            client,
        ))
    }

    /// Same client acting for a different caller.
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token: token.or_else(|| self.token.clone()),
            client: self.client.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL and appends the encoded query.
    /// `None` fields of the query are left out.
    pub fn url<Q: Serialize + ?Sized>(&self, path: &str, query: Option<&Q>) -> Result<String, ApiError> {
        let mut url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if let Some(query) = query {
            let encoded =
                serde_urlencoded::to_string(query).map_err(|e| ApiError::Url(e.to_string()))?;
            if !encoded.is_empty() {
                url.push('?');
                url.push_str(&encoded);
            }
        }
        Ok(url)
    }

    /// Sends a request and hands back status and body without judging them.
    pub async fn send_raw(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<(u16, String), ApiError> {
        debug!("{} {}", method, url);
        let mut request = self.client.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|source| ApiError::Transport {
            path: url.to_string(),
            source,
        })?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|source| ApiError::Transport {
            path: url.to_string(),
            source,
        })?;
        Ok((status, text))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let (status, text) = self.send_raw(method, &url, body.as_ref()).await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Status {
                path: url,
                status,
                detail: ApiDetail::parse(&text),
            });
        }
        decode_body(&url, &text)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url::<()>(path, None)?;
        self.execute(Method::GET, url, None).await
    }

    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path, Some(query))?;
        self.execute(Method::GET, url, None).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url::<()>(path, None)?;
        self.execute(Method::POST, url, Some(to_body(path, body)?))
            .await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url::<()>(path, None)?;
        self.execute(Method::PUT, url, Some(to_body(path, body)?))
            .await
    }

    pub async fn patch_json<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url::<()>(path, None)?;
        let body = body.map(|b| to_body(path, b)).transpose()?;
        self.execute(Method::PATCH, url, body).await
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url::<()>(path, None)?;
        self.execute(Method::DELETE, url, None).await
    }
}

fn to_body<B: Serialize + ?Sized>(path: &str, body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Empty bodies decode as `{}`.
pub fn decode_body<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, ApiError> {
    let value = if text.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str::<Value>(text).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })?
    };
    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}
