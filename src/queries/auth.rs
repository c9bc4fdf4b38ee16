use crate::{
    dto::auth::{LoginRequest, SignupRequest},
    error::{AppError, AppResult},
    models::AuthData,
    services::auth_service,
    state::AppState,
};

use super::keys;

pub async fn login(state: &AppState, credentials: &LoginRequest) -> AppResult<AuthData> {
    if !credentials.is_complete() {
        return Err(AppError::BadRequest("Email/phone and password are required".into()));
    }
    let client = &state.client;
    let data = state
        .queries
        .mutate("login", &[keys::auth()], move || auth_service::login(client, credentials))
        .await
        .map_err(|err| AppError::upstream_or(err, "Login failed. Please try again."))?;
    state.session.set_auth(data.clone())?;
    tracing::info!(admin = %data.admin.email, "admin signed in");
    Ok(data)
}

pub async fn signup(state: &AppState, payload: &SignupRequest) -> AppResult<AuthData> {
    if !payload.is_complete() {
        return Err(AppError::BadRequest("Fill all fields".into()));
    }
    let client = &state.client;
    let data = state
        .queries
        .mutate("signup", &[keys::auth()], move || auth_service::signup(client, payload))
        .await
        .map_err(|err| AppError::upstream_or(err, "Signup failed. Please try again."))?;
    state.session.set_auth(data.clone())?;
    tracing::info!(admin = %data.admin.email, "admin account created");
    Ok(data)
}

/// Tell the API, then forget the session and everything cached under it
/// whether or not the API call went through.
pub async fn logout(state: &AppState) -> AppResult<()> {
    let client = &state.client;
    if let Err(err) = state
        .queries
        .mutate("logout", &[], move || auth_service::logout(client))
        .await
    {
        tracing::warn!(error = %err, "logout request failed, clearing session anyway");
    }
    state.session.clear()?;
    state.queries.clear();
    state.views.reset();
    Ok(())
}

/// Exchange the refresh token. A failed refresh signs the admin out.
pub async fn refresh(state: &AppState) -> AppResult<AuthData> {
    let refresh_token = state.session.refresh_token().ok_or(AppError::Unauthorized)?;
    let client = &state.client;
    let token = refresh_token.as_str();
    match state
        .queries
        .mutate("refresh-token", &[keys::auth()], move || auth_service::refresh_token(client, token))
        .await
    {
        Ok(data) => {
            state.session.refresh(data.clone())?;
            Ok(data)
        }
        Err(err) => {
            tracing::warn!(error = %err, "token refresh failed, signing out");
            state.session.clear()?;
            state.queries.clear();
            state.views.reset();
            Err(AppError::Unauthorized)
        }
    }
}
