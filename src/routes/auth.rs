use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::auth::{LoginRequest, SignupRequest},
    error::AppResult,
    middleware::auth::AdminSession,
    navigation::{HOME_ROUTE, LOGIN_ROUTE},
    queries,
    response::{ApiResponse, Meta},
    session::SessionInfo,
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthOutcome {
    pub session: SessionInfo,
    /// Where the dashboard should go next.
    pub redirect: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", post(logout))
        .route("/refresh", post(refresh))
        .route("/session", get(session))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<AuthOutcome>),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Rejected by the API")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthOutcome>>> {
    queries::auth::login(&state, &payload).await?;
    let data = AuthOutcome {
        session: state.session.info(),
        redirect: HOME_ROUTE,
    };
    Ok(Json(ApiResponse::success("Login successful!", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = ApiResponse<AuthOutcome>),
        (status = 400, description = "Missing fields")
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<ApiResponse<AuthOutcome>>> {
    queries::auth::signup(&state, &payload).await?;
    let data = AuthOutcome {
        session: state.session.info(),
        redirect: HOME_ROUTE,
    };
    Ok(Json(ApiResponse::success(
        "Account created successfully!",
        data,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Signed out", body = ApiResponse<AuthOutcome>),
        (status = 401, description = "No session")
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> AppResult<Json<ApiResponse<AuthOutcome>>> {
    queries::auth::logout(&state).await?;
    let data = AuthOutcome {
        session: state.session.info(),
        redirect: LOGIN_ROUTE,
    };
    Ok(Json(ApiResponse::success("Logged out", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "Tokens refreshed", body = ApiResponse<SessionInfo>),
        (status = 401, description = "Refresh failed; session cleared")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> AppResult<Json<ApiResponse<SessionInfo>>> {
    queries::auth::refresh(&state).await?;
    Ok(Json(ApiResponse::success(
        "Session refreshed",
        state.session.info(),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Current session", body = ApiResponse<SessionInfo>),
        (status = 401, description = "No session")
    ),
    tag = "Auth"
)]
pub async fn session(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> AppResult<Json<ApiResponse<SessionInfo>>> {
    Ok(Json(ApiResponse::success("Ok", state.session.info(), Some(Meta::empty()))))
}
