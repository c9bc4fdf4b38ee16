use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod ads_banners;
pub mod analytics;
pub mod auth;
pub mod bookings;
pub mod doc;
pub mod health;
pub mod house_types;
pub mod navigation;
pub mod overview;
pub mod params;
pub mod subscriptions;
pub mod users;
pub mod withdrawals;
pub mod workers;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/overview", overview::router())
        .nest("/navigation", navigation::router())
        .nest("/users", users::router())
        .nest("/workers", workers::router())
        .nest("/worker-jobs", workers::jobs_router())
        .nest("/bookings", bookings::router())
        .nest("/cleaning-subscriptions", subscriptions::router())
        .nest("/withdrawal-requests", withdrawals::router())
        .nest("/house-types", house_types::router())
        .nest("/ads-banners", ads_banners::router())
        .nest("/analytics", analytics::router())
}

/// The whole application with state bound. Transport layers are added by the
/// binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/auth", auth::router())
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
