use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use chrono::Local;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::filters::{apply_update, go_to_page},
    dto::analytics::{
        MonthlyTasksParams, MonthlyTasksQuery, MonthlyTasksReport, PeriodicTasksQuery, PeriodicTasksReport,
        WorkerTaskFilters, WorkerTaskFiltersUpdate, WorkerTaskRow, WorkerTaskTotals, monthly_tasks_filename,
        periodic_tasks_filename, worker_tasks_filename,
    },
    error::AppResult,
    middleware::auth::AdminSession,
    queries::{
        self,
        analytics::EXPORT_WORKER_TASKS,
    },
    response::{ApiResponse, ListView, Meta},
    routes::params::{PageQuery, is_filtered},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkerTasksView {
    #[serde(flatten)]
    pub list: ListView<WorkerTaskRow, WorkerTaskFilters>,
    pub totals: WorkerTaskTotals,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/worker-tasks", get(worker_tasks))
        .route("/worker-tasks/filters", patch(update_worker_task_filters))
        .route("/worker-tasks/export", get(export_worker_tasks))
        .route("/monthly-tasks", get(monthly_tasks))
        .route("/monthly-tasks/export", get(export_monthly_tasks))
        .route("/periodic-tasks", get(periodic_tasks))
        .route("/periodic-tasks/export", get(export_periodic_tasks))
}

#[utoipa::path(
    get,
    path = "/api/analytics/worker-tasks",
    params(PageQuery),
    responses(
        (status = 200, description = "Per-worker task statistics", body = ApiResponse<WorkerTasksView>)
    ),
    tag = "Analytics"
)]
pub async fn worker_tasks(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<WorkerTasksView>>> {
    let filters = {
        let mut filters = state.views.worker_tasks();
        if let Some(page) = query.page {
            go_to_page(&mut *filters, page);
        }
        filters.clone()
    };
    render_worker_tasks(&state, filters).await
}

#[utoipa::path(
    patch,
    path = "/api/analytics/worker-tasks/filters",
    request_body = WorkerTaskFiltersUpdate,
    responses(
        (status = 200, description = "Per-worker statistics for the new filters", body = ApiResponse<WorkerTasksView>)
    ),
    tag = "Analytics"
)]
pub async fn update_worker_task_filters(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(update): Json<WorkerTaskFiltersUpdate>,
) -> AppResult<Json<ApiResponse<WorkerTasksView>>> {
    let filters = {
        let mut filters = state.views.worker_tasks();
        apply_update(&mut *filters, update);
        filters.clone()
    };
    render_worker_tasks(&state, filters).await
}

async fn render_worker_tasks(
    state: &AppState,
    filters: WorkerTaskFilters,
) -> AppResult<Json<ApiResponse<WorkerTasksView>>> {
    let report = queries::analytics::worker_tasks(state, &filters).await?;
    let meta = report
        .pagination
        .as_ref()
        .map(Meta::from_pagination)
        .unwrap_or_default();
    let totals = WorkerTaskTotals::from_stats(&report.stats);
    let rows = report.stats.into_iter().map(WorkerTaskRow::from).collect();
    let filtered = is_filtered(&filters);
    let pending = state.queries.is_pending(EXPORT_WORKER_TASKS);
    let view = WorkerTasksView {
        list: ListView::new(rows, filters, meta.clone(), filtered, "worker statistics").pending(pending),
        totals,
    };
    Ok(Json(ApiResponse::success("Ok", view, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/analytics/monthly-tasks",
    params(MonthlyTasksParams),
    responses(
        (status = 200, description = "Task totals per month and per service", body = ApiResponse<MonthlyTasksReport>)
    ),
    tag = "Analytics"
)]
pub async fn monthly_tasks(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(params): Query<MonthlyTasksParams>,
) -> AppResult<Json<ApiResponse<MonthlyTasksReport>>> {
    let query = MonthlyTasksQuery::resolve(params, Local::now().date_naive());
    let report = queries::analytics::monthly_tasks(&state, &query).await?;
    Ok(Json(ApiResponse::success("Ok", report, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/analytics/periodic-tasks",
    params(PeriodicTasksQuery),
    responses(
        (status = 200, description = "Task frequency per period", body = ApiResponse<PeriodicTasksReport>)
    ),
    tag = "Analytics"
)]
pub async fn periodic_tasks(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<PeriodicTasksQuery>,
) -> AppResult<Json<ApiResponse<PeriodicTasksReport>>> {
    let query = query.normalized();
    let report = queries::analytics::periodic_tasks(&state, &query).await?;
    Ok(Json(ApiResponse::success("Ok", report, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/analytics/worker-tasks/export",
    responses(
        (status = 200, description = "CSV of the current worker statistics", content_type = "text/csv", body = String)
    ),
    tag = "Analytics"
)]
pub async fn export_worker_tasks(State(state): State<AppState>, _admin: AdminSession) -> AppResult<Response> {
    let filters = state.views.worker_tasks().clone();
    let csv = queries::analytics::export_worker_tasks(&state, &filters).await?;
    Ok(attachment(csv, worker_tasks_filename(Local::now().date_naive())))
}

#[utoipa::path(
    get,
    path = "/api/analytics/monthly-tasks/export",
    params(MonthlyTasksParams),
    responses(
        (status = 200, description = "CSV of the monthly report", content_type = "text/csv", body = String)
    ),
    tag = "Analytics"
)]
pub async fn export_monthly_tasks(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(params): Query<MonthlyTasksParams>,
) -> AppResult<Response> {
    let query = MonthlyTasksQuery::resolve(params, Local::now().date_naive());
    let csv = queries::analytics::export_monthly_tasks(&state, &query).await?;
    Ok(attachment(csv, monthly_tasks_filename(query.year)))
}

#[utoipa::path(
    get,
    path = "/api/analytics/periodic-tasks/export",
    params(PeriodicTasksQuery),
    responses(
        (status = 200, description = "CSV of the periodic report", content_type = "text/csv", body = String)
    ),
    tag = "Analytics"
)]
pub async fn export_periodic_tasks(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<PeriodicTasksQuery>,
) -> AppResult<Response> {
    let query = query.normalized();
    let csv = queries::analytics::export_periodic_tasks(&state, &query).await?;
    Ok(attachment(csv, periodic_tasks_filename(query.period)))
}

fn attachment(body: Vec<u8>, filename: String) -> Response {
    tracing::info!(filename = %filename, bytes = body.len(), "analytics export ready");
    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
    ];
    (headers, body).into_response()
}
