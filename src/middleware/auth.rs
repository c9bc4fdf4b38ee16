use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, models::Admin, state::AppState};

/// The signed-in admin. Handlers taking this extractor answer 401 with a
/// redirect to the login route while no session is held.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin: Admin,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if !state.session.is_authenticated() {
            return Err(AppError::Unauthorized);
        }
        let admin = state.session.admin().ok_or(AppError::Unauthorized)?;
        Ok(AdminSession { admin })
    }
}
