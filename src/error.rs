use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    client::ClientError,
    domain::{assignment::AssignmentError, transitions::TransitionError},
    navigation::LOGIN_ROUTE,
    response::{ApiResponse, Meta},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    /// Client-side validation failure. The message is shown as-is.
    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error(transparent)]
    Upstream(#[from] ClientError),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<AssignmentError> for AppError {
    fn from(err: AssignmentError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl AppError {
    /// Wrap an upstream failure with the message a page shows for it: the
    /// server's own message when it sent one, else `fallback`.
    pub fn upstream_or(err: ClientError, fallback: &str) -> Self {
        match err {
            ClientError::Unauthorized => AppError::Unauthorized,
            ClientError::Status { status, message } => ClientError::Status {
                status,
                message: Some(message.unwrap_or_else(|| fallback.to_string())),
            }
            .into(),
            other => other.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::Upstream(ClientError::Unauthorized) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Upstream(ClientError::Status { status, .. }) if (400..500).contains(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            AppError::Upstream(ClientError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Session(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let redirect = (status == StatusCode::UNAUTHORIZED).then_some(LOGIN_ROUTE);
        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData {
                error: message,
                redirect,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
