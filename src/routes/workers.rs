use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};

use crate::{
    domain::filters::{apply_update, go_to_page},
    dto::{
        Ack,
        workers::{
            AssignedJobs, AssignedJobsQuery, CreateWorkerRequest, CurrentJob, JobHistory, JobHistoryQuery,
            UpdateWorkerRequest, WorkerFilters, WorkerFiltersUpdate, WorkerRow,
        },
    },
    error::AppResult,
    middleware::auth::AdminSession,
    models::Worker,
    queries::{self, workers::{CREATE, DELETE, UPDATE}},
    response::{ApiResponse, ListView, Meta},
    routes::params::{PageQuery, is_filtered},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workers).post(create_worker))
        .route("/filters", patch(update_filters))
        .route("/{id}", get(get_worker).put(update_worker).delete(delete_worker))
}

pub fn jobs_router() -> Router<AppState> {
    Router::new()
        .route("/assigned", get(assigned_jobs))
        .route("/current", get(current_job))
        .route("/history", get(job_history))
}

#[utoipa::path(
    get,
    path = "/api/workers",
    params(PageQuery),
    responses(
        (status = 200, description = "Workers page", body = ApiResponse<ListView<WorkerRow, WorkerFilters>>)
    ),
    tag = "Workers"
)]
pub async fn list_workers(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<ListView<WorkerRow, WorkerFilters>>>> {
    let filters = {
        let mut filters = state.views.workers();
        if let Some(page) = query.page {
            go_to_page(&mut *filters, page);
        }
        filters.clone()
    };
    render(&state, filters).await
}

#[utoipa::path(
    patch,
    path = "/api/workers/filters",
    request_body = WorkerFiltersUpdate,
    responses(
        (status = 200, description = "Workers page for the new filters", body = ApiResponse<ListView<WorkerRow, WorkerFilters>>)
    ),
    tag = "Workers"
)]
pub async fn update_filters(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(update): Json<WorkerFiltersUpdate>,
) -> AppResult<Json<ApiResponse<ListView<WorkerRow, WorkerFilters>>>> {
    let filters = {
        let mut filters = state.views.workers();
        apply_update(&mut *filters, update);
        filters.clone()
    };
    render(&state, filters).await
}

async fn render(
    state: &AppState,
    filters: WorkerFilters,
) -> AppResult<Json<ApiResponse<ListView<WorkerRow, WorkerFilters>>>> {
    let page = queries::workers::list(state, &filters).await?;
    let meta = Meta::from_pagination(&page.pagination);
    let rows = page.workers.into_iter().map(WorkerRow::from).collect();
    let filtered = is_filtered(&filters);
    let pending = [CREATE, UPDATE, DELETE]
        .iter()
        .any(|name| state.queries.is_pending(name));
    let view = ListView::new(rows, filters, meta.clone(), filtered, "workers").pending(pending);
    Ok(Json(ApiResponse::success("Ok", view, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/workers",
    request_body = CreateWorkerRequest,
    responses(
        (status = 200, description = "Worker created", body = ApiResponse<Worker>),
        (status = 400, description = "Fill all fields")
    ),
    tag = "Workers"
)]
pub async fn create_worker(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(payload): Json<CreateWorkerRequest>,
) -> AppResult<Json<ApiResponse<Worker>>> {
    let worker = queries::workers::create(&state, &payload).await?;
    Ok(Json(ApiResponse::success("Worker created successfully", worker, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/workers/{id}",
    params(("id" = String, Path, description = "Worker id")),
    responses(
        (status = 200, description = "Worker", body = ApiResponse<Worker>),
        (status = 404, description = "Not found")
    ),
    tag = "Workers"
)]
pub async fn get_worker(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Worker>>> {
    let worker = queries::workers::get(&state, &id).await?;
    Ok(Json(ApiResponse::success("Ok", worker, Some(Meta::empty()))))
}

#[utoipa::path(
    put,
    path = "/api/workers/{id}",
    params(("id" = String, Path, description = "Worker id")),
    request_body = UpdateWorkerRequest,
    responses(
        (status = 200, description = "Worker updated", body = ApiResponse<Worker>)
    ),
    tag = "Workers"
)]
pub async fn update_worker(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<UpdateWorkerRequest>,
) -> AppResult<Json<ApiResponse<Worker>>> {
    let worker = queries::workers::update(&state, &id, &payload).await?;
    Ok(Json(ApiResponse::success("Worker updated successfully", worker, Some(Meta::empty()))))
}

#[utoipa::path(
    delete,
    path = "/api/workers/{id}",
    params(("id" = String, Path, description = "Worker id")),
    responses(
        (status = 200, description = "Worker deleted")
    ),
    tag = "Workers"
)]
pub async fn delete_worker(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<String>>> {
    let Ack { message } = queries::workers::delete(&state, &id).await?;
    Ok(Json(ApiResponse::success("Worker deleted successfully", message, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/worker-jobs/assigned",
    params(AssignedJobsQuery),
    responses(
        (status = 200, description = "Assigned jobs", body = ApiResponse<AssignedJobs>)
    ),
    tag = "Worker Jobs"
)]
pub async fn assigned_jobs(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<AssignedJobsQuery>,
) -> AppResult<Json<ApiResponse<AssignedJobs>>> {
    let jobs = queries::workers::assigned_jobs(&state, &query).await?;
    Ok(Json(ApiResponse::success("Ok", jobs, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/worker-jobs/current",
    responses(
        (status = 200, description = "Current job", body = ApiResponse<CurrentJob>)
    ),
    tag = "Worker Jobs"
)]
pub async fn current_job(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> AppResult<Json<ApiResponse<CurrentJob>>> {
    let job = queries::workers::current_job(&state).await?;
    Ok(Json(ApiResponse::success("Ok", job, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/worker-jobs/history",
    params(JobHistoryQuery),
    responses(
        (status = 200, description = "Job history", body = ApiResponse<JobHistory>)
    ),
    tag = "Worker Jobs"
)]
pub async fn job_history(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<JobHistoryQuery>,
) -> AppResult<Json<ApiResponse<JobHistory>>> {
    let history = queries::workers::job_history(&state, &query).await?;
    Ok(Json(ApiResponse::success("Ok", history, Some(Meta::empty()))))
}
