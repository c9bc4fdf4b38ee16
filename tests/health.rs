mod common;

use axum::{Router, extract::State};
use serenity_admin::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() -> anyhow::Result<()> {
    let api = common::MockApi::spawn(Router::new()).await?;
    let state = common::state_for(&api)?;

    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.upstream, api.base_url);
    assert!(!data.authenticated);
    Ok(())
}
