use crate::{
    dto::{
        Ack,
        workers::{
            AssignedJobs, AssignedJobsQuery, CreateWorkerRequest, CurrentJob, JobHistory, JobHistoryQuery,
            UpdateWorkerRequest, WorkerFilters, WorkersPage,
        },
    },
    error::{AppError, AppResult},
    models::Worker,
    services::worker_service,
    state::AppState,
};

use super::{ASSIGNED_JOBS_STALE_TIME, CURRENT_JOB_STALE_TIME, keys};

pub const CREATE: &str = "create-worker";
pub const UPDATE: &str = "update-worker";
pub const DELETE: &str = "delete-worker";

pub async fn list(state: &AppState, filters: &WorkerFilters) -> AppResult<WorkersPage> {
    let client = &state.client;
    let key = keys::workers().with_params(filters);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || worker_service::list_workers(client, filters))
        .await?)
}

pub async fn get(state: &AppState, id: &str) -> AppResult<Worker> {
    let client = &state.client;
    Ok(state
        .queries
        .fetch(keys::worker(id), state.config.stale_time, move || {
            worker_service::get_worker(client, id)
        })
        .await?)
}

pub async fn create(state: &AppState, payload: &CreateWorkerRequest) -> AppResult<Worker> {
    if !payload.is_complete() {
        return Err(AppError::BadRequest("Fill all fields".into()));
    }
    let client = &state.client;
    let worker = state
        .queries
        .mutate(CREATE, &[keys::workers()], move || {
            worker_service::create_worker(client, payload)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to create worker"))?;
    tracing::info!(worker_id = %worker.id, "worker created");
    Ok(worker)
}

pub async fn update(state: &AppState, id: &str, payload: &UpdateWorkerRequest) -> AppResult<Worker> {
    let client = &state.client;
    state
        .queries
        .mutate(UPDATE, &[keys::workers(), keys::worker(id)], move || {
            worker_service::update_worker(client, id, payload)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to update worker"))
}

pub async fn delete(state: &AppState, id: &str) -> AppResult<Ack> {
    let client = &state.client;
    state
        .queries
        .mutate(DELETE, &[keys::workers(), keys::worker(id)], move || {
            worker_service::delete_worker(client, id)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to delete worker"))
}

pub async fn assigned_jobs(state: &AppState, query: &AssignedJobsQuery) -> AppResult<AssignedJobs> {
    let client = &state.client;
    let key = keys::assigned_jobs().with_params(query);
    Ok(state
        .queries
        .fetch(key, ASSIGNED_JOBS_STALE_TIME, move || worker_service::assigned_jobs(client, query))
        .await?)
}

pub async fn current_job(state: &AppState) -> AppResult<CurrentJob> {
    let client = &state.client;
    Ok(state
        .queries
        .fetch(keys::current_job(), CURRENT_JOB_STALE_TIME, move || {
            worker_service::current_job(client)
        })
        .await?)
}

pub async fn job_history(state: &AppState, query: &JobHistoryQuery) -> AppResult<JobHistory> {
    let client = &state.client;
    let key = keys::job_history().with_params(query);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || worker_service::job_history(client, query))
        .await?)
}
