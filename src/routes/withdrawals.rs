use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::filters::{apply_update, go_to_page},
    dto::{
        Ack,
        withdrawals::{
            CreateWithdrawalRequest, ProcessActionBody, WithdrawalFilters, WithdrawalFiltersUpdate, WithdrawalRow,
            WithdrawalSummary,
        },
    },
    error::AppResult,
    middleware::auth::AdminSession,
    models::{WithdrawalRequest, WithdrawalStats},
    queries::{
        self,
        withdrawals::{CREATE, DELETE, PROCESS},
    },
    response::{ApiResponse, ListView, Meta},
    routes::params::{PageQuery, is_filtered},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawalsView {
    #[serde(flatten)]
    pub list: ListView<WithdrawalRow, WithdrawalFilters>,
    pub summary: Option<WithdrawalSummary>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_withdrawals).post(create_withdrawal))
        .route("/filters", patch(update_filters))
        .route("/stats", get(withdrawal_stats))
        .route("/{id}", get(get_withdrawal).delete(delete_withdrawal))
        .route("/{id}/process", post(process_withdrawal))
}

#[utoipa::path(
    get,
    path = "/api/withdrawal-requests",
    params(PageQuery),
    responses(
        (status = 200, description = "Withdrawal requests page", body = ApiResponse<WithdrawalsView>)
    ),
    tag = "Withdrawal Requests"
)]
pub async fn list_withdrawals(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<WithdrawalsView>>> {
    let filters = {
        let mut filters = state.views.withdrawals();
        if let Some(page) = query.page {
            go_to_page(&mut *filters, page);
        }
        filters.clone()
    };
    render(&state, filters).await
}

#[utoipa::path(
    patch,
    path = "/api/withdrawal-requests/filters",
    request_body = WithdrawalFiltersUpdate,
    responses(
        (status = 200, description = "Withdrawal requests for the new filters", body = ApiResponse<WithdrawalsView>)
    ),
    tag = "Withdrawal Requests"
)]
pub async fn update_filters(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(update): Json<WithdrawalFiltersUpdate>,
) -> AppResult<Json<ApiResponse<WithdrawalsView>>> {
    let filters = {
        let mut filters = state.views.withdrawals();
        apply_update(&mut *filters, update);
        filters.clone()
    };
    render(&state, filters).await
}

async fn render(state: &AppState, filters: WithdrawalFilters) -> AppResult<Json<ApiResponse<WithdrawalsView>>> {
    let page = queries::withdrawals::list(state, &filters).await?;
    let meta = Meta::from_pagination(&page.pagination);
    let rows = page
        .withdrawal_requests
        .into_iter()
        .map(WithdrawalRow::from)
        .collect();
    let filtered = is_filtered(&filters);
    let pending = [PROCESS, CREATE, DELETE]
        .iter()
        .any(|name| state.queries.is_pending(name));
    let view = WithdrawalsView {
        list: ListView::new(rows, filters, meta.clone(), filtered, "withdrawal requests").pending(pending),
        summary: page.summary,
    };
    Ok(Json(ApiResponse::success("Ok", view, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/withdrawal-requests/stats",
    responses(
        (status = 200, description = "Withdrawal totals", body = ApiResponse<WithdrawalStats>)
    ),
    tag = "Withdrawal Requests"
)]
pub async fn withdrawal_stats(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> AppResult<Json<ApiResponse<WithdrawalStats>>> {
    let stats = queries::withdrawals::stats(&state).await?;
    Ok(Json(ApiResponse::success("Ok", stats, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/withdrawal-requests/{id}",
    params(("id" = String, Path, description = "Withdrawal request id")),
    responses(
        (status = 200, description = "Withdrawal request", body = ApiResponse<WithdrawalRow>)
    ),
    tag = "Withdrawal Requests"
)]
pub async fn get_withdrawal(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<WithdrawalRow>>> {
    let request = queries::withdrawals::get(&state, &id).await?;
    Ok(Json(ApiResponse::success(
        "Ok",
        WithdrawalRow::from(request),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/withdrawal-requests/{id}/process",
    params(("id" = String, Path, description = "Withdrawal request id")),
    request_body = ProcessActionBody,
    responses(
        (status = 200, description = "Request moved to its next status", body = ApiResponse<WithdrawalRow>),
        (status = 400, description = "Action not allowed or rejection reason missing")
    ),
    tag = "Withdrawal Requests"
)]
pub async fn process_withdrawal(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(body): Json<ProcessActionBody>,
) -> AppResult<Json<ApiResponse<WithdrawalRow>>> {
    let updated = queries::withdrawals::process(
        &state,
        &id,
        body.action,
        body.notes.as_deref(),
        body.rejection_reason.as_deref(),
    )
    .await?;
    Ok(Json(ApiResponse::success(
        format!("Withdrawal request {}", updated.status.as_str()),
        WithdrawalRow::from(updated),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/withdrawal-requests",
    request_body = CreateWithdrawalRequest,
    responses(
        (status = 200, description = "Withdrawal request created", body = ApiResponse<WithdrawalRequest>)
    ),
    tag = "Withdrawal Requests"
)]
pub async fn create_withdrawal(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(payload): Json<CreateWithdrawalRequest>,
) -> AppResult<Json<ApiResponse<WithdrawalRequest>>> {
    let request = queries::withdrawals::create(&state, &payload).await?;
    Ok(Json(ApiResponse::success(
        "Withdrawal request created successfully",
        request,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/withdrawal-requests/{id}",
    params(("id" = String, Path, description = "Withdrawal request id")),
    responses(
        (status = 200, description = "Withdrawal request deleted")
    ),
    tag = "Withdrawal Requests"
)]
pub async fn delete_withdrawal(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<String>>> {
    let Ack { message } = queries::withdrawals::delete(&state, &id).await?;
    Ok(Json(ApiResponse::success(
        "Withdrawal request deleted successfully",
        message,
        Some(Meta::empty()),
    )))
}
