use crate::{
    client::{ApiClient, ClientResult},
    dto::{
        Envelope,
        analytics::{
            MonthlyTasksQuery, MonthlyTasksReport, PeriodicTasksQuery, PeriodicTasksReport,
            WorkerTaskFilters, WorkerTasksReport,
        },
    },
};

const BASE: &str = "/admin/analytics";

pub async fn worker_tasks(client: &ApiClient, filters: &WorkerTaskFilters) -> ClientResult<WorkerTasksReport> {
    let response: Envelope<WorkerTasksReport> =
        client.get_with(&format!("{BASE}/worker-tasks"), filters).await?;
    Ok(response.data)
}

/// This report is returned bare, without the `{ message, data }` wrapper.
pub async fn monthly_tasks(client: &ApiClient, query: &MonthlyTasksQuery) -> ClientResult<MonthlyTasksReport> {
    client.get_with(&format!("{BASE}/monthly-tasks"), query).await
}

pub async fn periodic_tasks(
    client: &ApiClient,
    query: &PeriodicTasksQuery,
) -> ClientResult<PeriodicTasksReport> {
    let response: Envelope<PeriodicTasksReport> =
        client.get_with(&format!("{BASE}/periodic-tasks"), query).await?;
    Ok(response.data)
}

pub async fn export_worker_tasks(client: &ApiClient, filters: &WorkerTaskFilters) -> ClientResult<Vec<u8>> {
    client.get_bytes(&format!("{BASE}/worker-tasks/export"), filters).await
}

pub async fn export_monthly_tasks(client: &ApiClient, query: &MonthlyTasksQuery) -> ClientResult<Vec<u8>> {
    client.get_bytes(&format!("{BASE}/monthly-tasks/export"), query).await
}

pub async fn export_periodic_tasks(client: &ApiClient, query: &PeriodicTasksQuery) -> ClientResult<Vec<u8>> {
    client.get_bytes(&format!("{BASE}/periodic-tasks/export"), query).await
}
