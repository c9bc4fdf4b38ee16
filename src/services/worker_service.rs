use crate::{
    client::{ApiClient, ClientResult},
    dto::{
        Ack, Envelope,
        workers::{
            AssignedJobs, AssignedJobsQuery, CreateWorkerRequest, CreatedWorker, CurrentJob,
            JobHistory, JobHistoryQuery, UpdateWorkerRequest, WorkerFilters, WorkersPage,
        },
    },
    models::Worker,
};

pub async fn list_workers(client: &ApiClient, filters: &WorkerFilters) -> ClientResult<WorkersPage> {
    let response: Envelope<WorkersPage> = client.get_with("/admin/workers", filters).await?;
    Ok(response.data)
}

pub async fn get_worker(client: &ApiClient, id: &str) -> ClientResult<Worker> {
    let response: Envelope<Worker> = client.get(&format!("/admin/workers/{id}")).await?;
    Ok(response.data)
}

/// Workers register through the public signup endpoint.
pub async fn create_worker(client: &ApiClient, payload: &CreateWorkerRequest) -> ClientResult<Worker> {
    let response: Envelope<CreatedWorker> = client.post("/worker/signup", payload).await?;
    Ok(response.data.worker)
}

pub async fn update_worker(
    client: &ApiClient,
    id: &str,
    payload: &UpdateWorkerRequest,
) -> ClientResult<Worker> {
    let response: Envelope<Worker> = client.put(&format!("/admin/workers/{id}"), payload).await?;
    Ok(response.data)
}

pub async fn delete_worker(client: &ApiClient, id: &str) -> ClientResult<Ack> {
    client.delete(&format!("/admin/workers/{id}")).await
}

pub async fn assigned_jobs(client: &ApiClient, query: &AssignedJobsQuery) -> ClientResult<AssignedJobs> {
    let response: Envelope<AssignedJobs> = client.get_with("/worker/assigned-jobs", query).await?;
    Ok(response.data)
}

pub async fn current_job(client: &ApiClient) -> ClientResult<CurrentJob> {
    let response: Envelope<CurrentJob> = client.get("/worker/current-job").await?;
    Ok(response.data)
}

pub async fn job_history(client: &ApiClient, query: &JobHistoryQuery) -> ClientResult<JobHistory> {
    let response: Envelope<JobHistory> = client.get_with("/worker/job-history", query).await?;
    Ok(response.data)
}
