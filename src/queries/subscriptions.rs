use crate::{
    domain::transitions::{SubscriptionAction, plan_subscription},
    dto::{
        Ack,
        subscriptions::{
            AssignSubscriptionWorkerRequest, OrdersQuery, SubscriptionDetails, SubscriptionFilters,
            SubscriptionOrders, SubscriptionPayload, SubscriptionsPage, UpdateSubscriptionStatusRequest,
        },
    },
    error::{AppError, AppResult},
    models::{CleaningSubscription, CleaningSubscriptionStats, SubscriptionStatus},
    services::subscription_service,
    state::AppState,
};

use super::{STATS_STALE_TIME, keys};

pub const ASSIGN: &str = "assign-subscription-worker";
pub const UPDATE_STATUS: &str = "update-subscription-status";
pub const CREATE: &str = "create-subscription";
pub const UPDATE: &str = "update-subscription";
pub const DELETE: &str = "delete-subscription";

pub async fn list(state: &AppState, filters: &SubscriptionFilters) -> AppResult<SubscriptionsPage> {
    let client = &state.client;
    let key = keys::subscriptions().with_params(filters);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || {
            subscription_service::list_subscriptions(client, filters)
        })
        .await?)
}

pub async fn stats(state: &AppState) -> AppResult<CleaningSubscriptionStats> {
    let client = &state.client;
    Ok(state
        .queries
        .fetch(keys::subscription_stats(), STATS_STALE_TIME, move || {
            subscription_service::subscription_stats(client)
        })
        .await?)
}

pub async fn details(state: &AppState, id: &str) -> AppResult<SubscriptionDetails> {
    let client = &state.client;
    Ok(state
        .queries
        .fetch(keys::subscription(id), state.config.stale_time, move || {
            subscription_service::subscription_details(client, id)
        })
        .await?)
}

pub async fn orders(state: &AppState, id: &str, query: &OrdersQuery) -> AppResult<SubscriptionOrders> {
    let client = &state.client;
    let key = keys::subscription_orders().with(id).with_params(query);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || {
            subscription_service::subscription_orders(client, id, query)
        })
        .await?)
}

/// Send a subscription's order to a worker.
pub async fn assign_worker(state: &AppState, id: &str, worker_id: &str) -> AppResult<Ack> {
    let worker_id = worker_id.trim();
    if worker_id.is_empty() || id.trim().is_empty() {
        return Err(AppError::BadRequest("Please fill in all required fields".into()));
    }
    let body = AssignSubscriptionWorkerRequest {
        worker_id: worker_id.to_string(),
        order_ids: vec![id.to_string()],
    };
    let client = &state.client;
    let body = &body;
    state
        .queries
        .mutate(
            ASSIGN,
            &[keys::subscription(id), keys::subscription_orders(), keys::subscriptions()],
            move || subscription_service::assign_worker(client, id, body),
        )
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to assign worker"))
}

/// Apply `action` if the subscription's current status allows it.
pub async fn apply_action(
    state: &AppState,
    id: &str,
    action: SubscriptionAction,
) -> AppResult<SubscriptionStatus> {
    let current = details(state, id).await?.subscription.status;
    let next = plan_subscription(current, action)?;
    let body = UpdateSubscriptionStatusRequest { status: next };
    let client = &state.client;
    let body = &body;
    state
        .queries
        .mutate(
            UPDATE_STATUS,
            &[keys::subscription(id), keys::subscriptions(), keys::subscription_stats()],
            move || subscription_service::update_status(client, id, body),
        )
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to update subscription status"))?;
    tracing::info!(subscription_id = id, from = current.as_str(), to = next.as_str(), "subscription status changed");
    Ok(next)
}

pub async fn create(state: &AppState, payload: &SubscriptionPayload) -> AppResult<CleaningSubscription> {
    let client = &state.client;
    state
        .queries
        .mutate(CREATE, &[keys::subscriptions(), keys::subscription_stats()], move || {
            subscription_service::create_subscription(client, payload)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to create subscription"))
}

pub async fn update(
    state: &AppState,
    id: &str,
    payload: &SubscriptionPayload,
) -> AppResult<CleaningSubscription> {
    let client = &state.client;
    state
        .queries
        .mutate(
            UPDATE,
            &[keys::subscription(id), keys::subscriptions(), keys::subscription_stats()],
            move || subscription_service::update_subscription(client, id, payload),
        )
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to update subscription"))
}

pub async fn delete(state: &AppState, id: &str) -> AppResult<Ack> {
    let client = &state.client;
    state
        .queries
        .mutate(DELETE, &[keys::subscriptions(), keys::subscription_stats()], move || {
            subscription_service::delete_subscription(client, id)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to delete subscription"))
}
