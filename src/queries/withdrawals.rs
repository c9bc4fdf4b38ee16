use crate::{
    domain::transitions::{WithdrawalAction, plan_withdrawal},
    dto::{
        Ack,
        withdrawals::{CreateWithdrawalRequest, WithdrawalFilters, WithdrawalsPage},
    },
    error::{AppError, AppResult},
    models::{WithdrawalRequest, WithdrawalStats},
    services::withdrawal_service,
    state::AppState,
};

use super::{STATS_STALE_TIME, keys};

pub const PROCESS: &str = "process-withdrawal";
pub const CREATE: &str = "create-withdrawal";
pub const DELETE: &str = "delete-withdrawal";

pub async fn list(state: &AppState, filters: &WithdrawalFilters) -> AppResult<WithdrawalsPage> {
    let client = &state.client;
    let key = keys::withdrawals().with_params(filters);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || {
            withdrawal_service::list_withdrawals(client, filters)
        })
        .await?)
}

pub async fn stats(state: &AppState) -> AppResult<WithdrawalStats> {
    let client = &state.client;
    Ok(state
        .queries
        .fetch(keys::withdrawal_stats(), STATS_STALE_TIME, move || {
            withdrawal_service::withdrawal_stats(client)
        })
        .await?)
}

pub async fn get(state: &AppState, id: &str) -> AppResult<WithdrawalRequest> {
    let client = &state.client;
    Ok(state
        .queries
        .fetch(keys::withdrawal(id), state.config.stale_time, move || {
            withdrawal_service::get_withdrawal(client, id)
        })
        .await?)
}

/// Move request `id` along the withdrawal pipeline. The request's current
/// status decides whether `action` is allowed; a rejection needs a reason.
pub async fn process(
    state: &AppState,
    id: &str,
    action: WithdrawalAction,
    notes: Option<&str>,
    rejection_reason: Option<&str>,
) -> AppResult<WithdrawalRequest> {
    let current = get(state, id).await?.status;
    let body = plan_withdrawal(current, action, notes, rejection_reason)?;
    let client = &state.client;
    let body = &body;
    let updated = state
        .queries
        .mutate(
            PROCESS,
            &[keys::withdrawals(), keys::withdrawal(id), keys::withdrawal_stats()],
            move || withdrawal_service::process_withdrawal(client, id, body),
        )
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to process withdrawal request"))?;
    tracing::info!(
        withdrawal_id = id,
        action = action.as_str(),
        status = body.status.as_str(),
        "withdrawal request processed"
    );
    Ok(updated)
}

pub async fn create(state: &AppState, payload: &CreateWithdrawalRequest) -> AppResult<WithdrawalRequest> {
    if payload.worker_id.trim().is_empty() || payload.amount <= 0.0 {
        return Err(AppError::BadRequest("Worker and a positive amount are required".into()));
    }
    let client = &state.client;
    state
        .queries
        .mutate(CREATE, &[keys::withdrawals(), keys::withdrawal_stats()], move || {
            withdrawal_service::create_withdrawal(client, payload)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to create withdrawal request"))
}

pub async fn delete(state: &AppState, id: &str) -> AppResult<Ack> {
    let client = &state.client;
    state
        .queries
        .mutate(DELETE, &[keys::withdrawals(), keys::withdrawal_stats()], move || {
            withdrawal_service::delete_withdrawal(client, id)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to delete withdrawal request"))
}
