//! Request layer for the Serenity REST API.

use std::{sync::Arc, time::Instant};

use reqwest::{Method, RequestBuilder, Response, StatusCode, header};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::{config::AppConfig, session::SessionStore};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Session expired")]
    Unauthorized,

    #[error("{}", .message.as_deref().unwrap_or("Request failed"))]
    Status { status: u16, message: Option<String> },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Invalid response format: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered but the body could not be read.
    #[error("Incomplete response: {0}")]
    Body(#[source] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 4xx responses are final: retrying cannot change the answer.
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Only failures where the server never answered, or answered 5xx, may be
    /// retried. A 2xx body that fails to decode means the write already
    /// landed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Timeout | ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            ClientError::Unauthorized | ClientError::Decode(_) | ClientError::Body(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(err)
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> ClientResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.json(Method::GET, path, self.request(Method::GET, path))
            .await
    }

    pub async fn get_with<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        self.json(Method::GET, path, builder).await
    }

    /// Raw body of a binary download such as a CSV export.
    pub async fn get_bytes<Q>(&self, path: &str, query: &Q) -> ClientResult<Vec<u8>>
    where
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.dispatch(Method::GET, path, builder).await?;
        let bytes = response.bytes().await.map_err(ClientError::Body)?;
        Ok(bytes.to_vec())
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.json(Method::POST, path, builder).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.json(Method::POST, path, self.request(Method::POST, path))
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).json(body);
        self.json(Method::PUT, path, builder).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PATCH, path).json(body);
        self.json(Method::PATCH, path, builder).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.json(Method::DELETE, path, self.request(Method::DELETE, path))
            .await
    }

    async fn json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> ClientResult<T> {
        let response = self.dispatch(method, path, builder).await?;
        let bytes = response.bytes().await.map_err(ClientError::Body)?;
        // 204s and bare deletes: accept either an optional or an acknowledgement shape.
        if bytes.is_empty() {
            return serde_json::from_slice(b"null")
                .or_else(|_| serde_json::from_slice(b"{}"))
                .map_err(Into::into);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send one request with the session's bearer token and classify the
    /// response. A 401 expires the session that issued the request.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> ClientResult<Response> {
        let credentials = self.session.credentials();
        let request_id = Uuid::new_v4().to_string();

        let mut builder = builder.header("x-request-id", &request_id);
        if let Some(token) = &credentials.token {
            builder = builder.bearer_auth(token);
        }

        let started = Instant::now();
        let response = builder.send().await.inspect_err(|err| {
            tracing::warn!(%method, path, request_id = %request_id, error = %err, "upstream request failed");
        })?;
        let status = response.status();

        tracing::debug!(
            %method,
            path,
            request_id = %request_id,
            status = status.as_u16(),
            ms = started.elapsed().as_millis() as u64,
            "upstream request finished"
        );

        if status == StatusCode::UNAUTHORIZED {
            if self.session.expire(credentials.generation) {
                tracing::warn!(path, "session expired, redirecting to login");
            }
            return Err(ClientError::Unauthorized);
        }

        if status.is_success() || status.is_redirection() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// The API reports failures as `{ "error": ... }` and sometimes only as
/// `{ "message": ... }`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|field| value.get(*field))
        .find_map(|v| match v {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        })
}
