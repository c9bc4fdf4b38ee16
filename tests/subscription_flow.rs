mod common;

use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use serde_json::json;
use serenity_admin::{
    domain::transitions::SubscriptionAction, error::AppError, models::SubscriptionStatus, queries,
};

use common::MockApi;

async fn upstream(status: &'static str) -> anyhow::Result<MockApi> {
    let routes = Router::new()
        .route(
            "/admin/cleaning/subscriptions/{id}",
            get(move || async move {
                Json(json!({
                    "data": {
                        "subscription": {
                            "_id": "S1",
                            "frequency": "weekly",
                            "subscription_status": status,
                            "totalPrice": "40000"
                        },
                        "orders": [{ "_id": "O1", "status": "PENDING", "amount": 10000 }]
                    }
                }))
            }),
        )
        .route(
            "/admin/cleaning/subscriptions/{id}/status",
            patch(|| async { Json(json!({ "message": "Status updated" })) }),
        )
        .route(
            "/admin/cleaning/subscriptions/{id}/assign-worker",
            post(|| async { Json(json!({ "message": "Worker assigned" })) }),
        );
    MockApi::spawn(routes).await
}

#[tokio::test]
async fn pausing_an_active_subscription_sends_the_target_status() -> anyhow::Result<()> {
    let api = upstream("active").await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    let details = queries::subscriptions::details(&state, "S1").await?;
    assert_eq!(details.subscription.total_price, 40000.0);
    assert_eq!(details.orders.len(), 1);

    let next = queries::subscriptions::apply_action(&state, "S1", SubscriptionAction::Pause).await?;
    assert_eq!(next, SubscriptionStatus::Paused);

    let calls = api.calls("PATCH", "/api/admin/cleaning/subscriptions/S1/status");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({ "status": "paused" }));
    Ok(())
}

#[tokio::test]
async fn resume_is_refused_for_an_active_subscription() -> anyhow::Result<()> {
    let api = upstream("active").await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    let err = queries::subscriptions::apply_action(&state, "S1", SubscriptionAction::Resume)
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::BadRequest(msg) if msg == "Cannot resume when status is active"));
    assert!(api.calls("PATCH", "/api/admin/cleaning/subscriptions/S1/status").is_empty());
    Ok(())
}

#[tokio::test]
async fn assigning_a_worker_posts_the_order_ids() -> anyhow::Result<()> {
    let api = upstream("active").await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    let err = queries::subscriptions::assign_worker(&state, "S1", " ").await.unwrap_err();
    assert_eq!(err.to_string(), "Please fill in all required fields");

    let ack = queries::subscriptions::assign_worker(&state, "S1", "w7").await?;
    assert_eq!(ack.message, "Worker assigned");
    let calls = api.calls("POST", "/api/admin/cleaning/subscriptions/S1/assign-worker");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({ "worker_id": "w7", "order_ids": ["S1"] }));
    Ok(())
}
