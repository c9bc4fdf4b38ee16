mod common;

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    routing::{get, patch},
};
use serde_json::{Value, json};
use serenity_admin::{
    domain::transitions::WithdrawalAction, error::AppError, models::WithdrawalStatus, queries,
};

use common::MockApi;

fn withdrawal(status: &str) -> Value {
    json!({
        "_id": "W1",
        "worker_id": "wk1",
        "worker_name": "Bola Ade",
        "amount": 25000,
        "status": status,
        "request_date": "2025-03-01T10:00:00.000Z",
        "bank_details": {
            "account_number": "0123456789",
            "bank_name": "GTB",
            "account_holder_name": "Bola Ade"
        }
    })
}

/// Fake API holding one request whose status follows the PATCHes it receives.
async fn upstream(initial: &str) -> anyhow::Result<MockApi> {
    let status = Arc::new(Mutex::new(initial.to_string()));
    let read = status.clone();
    let write = status.clone();
    let routes = Router::new()
        .route(
            "/admin/withdrawal-requests/stats",
            get(|| async {
                Json(json!({
                    "data": { "total_pending": "1", "total_approved": 0, "pending_amount": "25000" }
                }))
            }),
        )
        .route(
            "/admin/withdrawal-requests/{id}",
            get(move || {
                let status = read.lock().unwrap().clone();
                async move { Json(json!({ "message": "ok", "data": withdrawal(&status) })) }
            }),
        )
        .route(
            "/admin/withdrawal-requests/{id}/process",
            patch(move |Json(body): Json<Value>| {
                let next = body["status"].as_str().unwrap_or_default().to_string();
                *write.lock().unwrap() = next.clone();
                async move { Json(json!({ "message": "Withdrawal updated", "data": withdrawal(&next) })) }
            }),
        );
    MockApi::spawn(routes).await
}

fn patch_bodies(api: &MockApi) -> Vec<Value> {
    api.calls("PATCH", "/api/admin/withdrawal-requests/W1/process")
        .into_iter()
        .map(|r| r.body)
        .collect()
}

#[tokio::test]
async fn pending_request_is_approved_then_processed() -> anyhow::Result<()> {
    let api = upstream("pending").await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    let approved =
        queries::withdrawals::process(&state, "W1", WithdrawalAction::Approve, Some("  paid via GTB  "), None).await?;
    assert_eq!(approved.status, WithdrawalStatus::Approved);

    // The single-request entry was invalidated, so the current status is read again.
    let processed = queries::withdrawals::process(&state, "W1", WithdrawalAction::Process, None, None).await?;
    assert_eq!(processed.status, WithdrawalStatus::Processed);

    assert_eq!(
        patch_bodies(&api),
        vec![
            json!({ "status": "approved", "notes": "paid via GTB" }),
            json!({ "status": "processed" }),
        ]
    );
    assert_eq!(api.calls("GET", "/api/admin/withdrawal-requests/W1").len(), 2);
    Ok(())
}

#[tokio::test]
async fn rejection_requires_a_reason() -> anyhow::Result<()> {
    let api = upstream("approved").await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    let err = queries::withdrawals::process(&state, "W1", WithdrawalAction::Reject, None, Some("   "))
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::BadRequest(msg) if msg == "Rejection reason is required"));
    assert!(patch_bodies(&api).is_empty());

    let rejected = queries::withdrawals::process(
        &state,
        "W1",
        WithdrawalAction::Reject,
        None,
        Some("Account name mismatch"),
    )
    .await?;
    assert_eq!(rejected.status, WithdrawalStatus::Rejected);
    assert_eq!(
        patch_bodies(&api),
        vec![json!({ "status": "rejected", "rejection_reason": "Account name mismatch" })]
    );
    Ok(())
}

#[tokio::test]
async fn actions_outside_the_pipeline_are_refused_locally() -> anyhow::Result<()> {
    let api = upstream("pending").await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    let err = queries::withdrawals::process(&state, "W1", WithdrawalAction::Process, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot process when status is pending");
    assert!(patch_bodies(&api).is_empty());
    Ok(())
}

#[tokio::test]
async fn processing_makes_stats_stale() -> anyhow::Result<()> {
    let api = upstream("pending").await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    let stats = queries::withdrawals::stats(&state).await?;
    assert_eq!(stats.total_pending, 1);
    assert_eq!(stats.pending_amount, 25000.0);
    queries::withdrawals::stats(&state).await?;
    assert_eq!(api.calls("GET", "/api/admin/withdrawal-requests/stats").len(), 1);

    queries::withdrawals::process(&state, "W1", WithdrawalAction::Approve, None, None).await?;
    queries::withdrawals::stats(&state).await?;
    assert_eq!(api.calls("GET", "/api/admin/withdrawal-requests/stats").len(), 2);
    Ok(())
}
