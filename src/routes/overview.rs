use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::{users::UserFilters, workers::WorkerFilters},
    error::AppResult,
    middleware::auth::AdminSession,
    models::{CleaningSubscriptionStats, WithdrawalStats},
    queries,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Dashboard landing figures.
#[derive(Debug, Serialize, ToSchema)]
pub struct Overview {
    pub greeting: String,
    pub total_users: u64,
    pub total_workers: u64,
    pub subscriptions: CleaningSubscriptionStats,
    pub withdrawals: WithdrawalStats,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(overview))
}

#[utoipa::path(
    get,
    path = "/api/overview",
    responses(
        (status = 200, description = "Dashboard totals", body = ApiResponse<Overview>),
        (status = 401, description = "No session")
    ),
    tag = "Overview"
)]
pub async fn overview(
    State(state): State<AppState>,
    AdminSession { admin }: AdminSession,
) -> AppResult<Json<ApiResponse<Overview>>> {
    let users = UserFilters::default();
    let workers = WorkerFilters::default();
    let (users, workers, subscriptions, withdrawals) = tokio::try_join!(
        queries::users::list(&state, &users),
        queries::workers::list(&state, &workers),
        queries::subscriptions::stats(&state),
        queries::withdrawals::stats(&state),
    )?;

    // Older API builds omit the total; one page of rows is the best we know.
    let total_users = users
        .pagination
        .total
        .unwrap_or(users.users.len() as u64);
    let total_workers = workers
        .pagination
        .total
        .unwrap_or(workers.workers.len() as u64);

    let data = Overview {
        greeting: format!("Welcome back, {}", admin.first_name),
        total_users,
        total_workers,
        subscriptions,
        withdrawals,
    };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}
