#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
};
use serde_json::Value;
use serenity_admin::{
    config::AppConfig,
    models::{Admin, AuthData},
    routes::create_app,
    session::SessionStore,
    state::AppState,
};
use tower::ServiceExt;

/// One request as the fake API saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

/// A stand-in for the Serenity REST API on an ephemeral port.
pub struct MockApi {
    pub base_url: String,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl MockApi {
    /// Serve `routes` under `/api` and record every request that reaches them.
    pub async fn spawn(routes: Router) -> anyhow::Result<Self> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let recorder = log.clone();
        let app = Router::new()
            .nest("/api", routes)
            .layer(middleware::from_fn(move |req: Request, next: Next| {
                let recorder = recorder.clone();
                async move {
                    let (parts, body) = req.into_parts();
                    let bytes = axum::body::to_bytes(body, usize::MAX)
                        .await
                        .unwrap_or_default();
                    recorder.lock().unwrap().push(Recorded {
                        method: parts.method.to_string(),
                        path: parts.uri.path().to_string(),
                        query: parts.uri.query().map(str::to_string),
                        authorization: parts
                            .headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                        body: serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
                    });
                    next.run(Request::from_parts(parts, Body::from(bytes))).await
                }
            }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            base_url: format!("http://{addr}/api"),
            log,
        })
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    /// Requests whose method and path match exactly.
    pub fn calls(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

/// State talking to `api`, with retries that do not sleep.
pub fn state_for(api: &MockApi) -> anyhow::Result<AppState> {
    let mut config = AppConfig::for_api(&api.base_url);
    config.retry_base_delay = Duration::ZERO;
    config.request_timeout = Duration::from_secs(5);
    Ok(AppState::new(config, Arc::new(SessionStore::in_memory()))?)
}

pub fn admin() -> Admin {
    serde_json::from_value(serde_json::json!({
        "_id": "a1",
        "first_name": "Ada",
        "last_name": "Obi",
        "email": "ada@serenity.test",
        "role": "admin",
        "isVerified": true,
        "isActive": true
    }))
    .unwrap()
}

pub fn auth_data(token: &str) -> AuthData {
    AuthData {
        admin: admin(),
        token: token.to_string(),
        token_exp_time: None,
        refresh_token: Some(format!("refresh-{token}")),
    }
}

pub fn sign_in(state: &AppState, token: &str) -> anyhow::Result<()> {
    state.session.set_auth(auth_data(token))?;
    Ok(())
}

pub fn pagination(total: u64) -> serde_json::Value {
    serde_json::json!({
        "currentPage": 1,
        "totalPages": 1,
        "hasNextPage": false,
        "hasPrevPage": false,
        "limit": 10,
        "totalItems": total
    })
}

/// Drive the dashboard router once and return status, headers and raw body.
pub async fn send_raw(
    state: &AppState,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, HeaderMap, Vec<u8>)> {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => request.body(Body::empty())?,
    };
    let response = create_app(state.clone()).oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, headers, bytes.to_vec()))
}

/// Like [`send_raw`] for JSON answers.
pub async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let (status, _, bytes) = send_raw(state, method, uri, body).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}
