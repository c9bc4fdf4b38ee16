use crate::{
    dto::analytics::{
        MonthlyTasksQuery, MonthlyTasksReport, PeriodicTasksQuery, PeriodicTasksReport, WorkerTaskFilters,
        WorkerTasksReport,
    },
    error::{AppError, AppResult},
    services::analytics_service,
    state::AppState,
};

use super::keys;

pub const EXPORT_WORKER_TASKS: &str = "export-worker-tasks";
pub const EXPORT_MONTHLY_TASKS: &str = "export-monthly-tasks";
pub const EXPORT_PERIODIC_TASKS: &str = "export-periodic-tasks";

pub async fn worker_tasks(state: &AppState, filters: &WorkerTaskFilters) -> AppResult<WorkerTasksReport> {
    let client = &state.client;
    let key = keys::worker_tasks().with_params(filters);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || {
            analytics_service::worker_tasks(client, filters)
        })
        .await?)
}

pub async fn monthly_tasks(state: &AppState, query: &MonthlyTasksQuery) -> AppResult<MonthlyTasksReport> {
    let client = &state.client;
    let key = keys::monthly_tasks().with_params(query);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || {
            analytics_service::monthly_tasks(client, query)
        })
        .await?)
}

pub async fn periodic_tasks(state: &AppState, query: &PeriodicTasksQuery) -> AppResult<PeriodicTasksReport> {
    let client = &state.client;
    let key = keys::periodic_tasks().with_params(query);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || {
            analytics_service::periodic_tasks(client, query)
        })
        .await?)
}

// Exports are writes as far as the cache is concerned: retried and tracked
// as in flight, never cached.

pub async fn export_worker_tasks(state: &AppState, filters: &WorkerTaskFilters) -> AppResult<Vec<u8>> {
    let client = &state.client;
    state
        .queries
        .mutate(EXPORT_WORKER_TASKS, &[], move || {
            analytics_service::export_worker_tasks(client, filters)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to export analytics data"))
}

pub async fn export_monthly_tasks(state: &AppState, query: &MonthlyTasksQuery) -> AppResult<Vec<u8>> {
    let client = &state.client;
    state
        .queries
        .mutate(EXPORT_MONTHLY_TASKS, &[], move || {
            analytics_service::export_monthly_tasks(client, query)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to export analytics data"))
}

pub async fn export_periodic_tasks(state: &AppState, query: &PeriodicTasksQuery) -> AppResult<Vec<u8>> {
    let client = &state.client;
    state
        .queries
        .mutate(EXPORT_PERIODIC_TASKS, &[], move || {
            analytics_service::export_periodic_tasks(client, query)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to export analytics data"))
}
