mod common;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::{StatusCode, header},
    routing::get,
};
use chrono::Local;
use serde_json::json;
use serenity_admin::{queries::analytics::EXPORT_PERIODIC_TASKS, state::AppState};
use tokio::sync::Notify;

use common::{MockApi, send, send_raw};

const CSV: &str = "worker,total\nBola Ade,12\n";

async fn signed_in(api: &MockApi) -> anyhow::Result<AppState> {
    let state = common::state_for(api)?;
    common::sign_in(&state, "tok")?;
    Ok(state)
}

fn csv_routes() -> Router {
    Router::new()
        .route(
            "/admin/analytics/worker-tasks",
            get(|| async { Json(json!({ "data": { "stats": [], "pagination": common::pagination(0) } })) }),
        )
        .route("/admin/analytics/worker-tasks/export", get(|| async { CSV }))
        .route("/admin/analytics/monthly-tasks/export", get(|| async { CSV }))
}

fn disposition(headers: &axum::http::HeaderMap) -> &str {
    headers[header::CONTENT_DISPOSITION].to_str().unwrap_or_default()
}

#[tokio::test]
async fn worker_tasks_export_uses_the_view_filters() -> anyhow::Result<()> {
    let api = MockApi::spawn(csv_routes()).await?;
    let state = signed_in(&api).await?;

    send(
        &state,
        "PATCH",
        "/api/analytics/worker-tasks/filters",
        Some(json!({ "worker_id": "w1", "date_from": "2025-01-01" })),
    )
    .await?;

    let (status, headers, body) = send_raw(&state, "GET", "/api/analytics/worker-tasks/export", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, CSV.as_bytes());
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    let today = Local::now().date_naive().format("%Y-%m-%d");
    assert_eq!(
        disposition(&headers),
        format!("attachment; filename=\"worker-tasks-analytics-{today}.csv\"")
    );

    let calls = api.calls("GET", "/api/admin/analytics/worker-tasks/export");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].query.as_deref(),
        Some("page=1&limit=10&worker_id=w1&date_from=2025-01-01")
    );
    Ok(())
}

#[tokio::test]
async fn monthly_export_is_named_after_the_year() -> anyhow::Result<()> {
    let api = MockApi::spawn(csv_routes()).await?;
    let state = signed_in(&api).await?;

    let (status, headers, _) =
        send_raw(&state, "GET", "/api/analytics/monthly-tasks/export?year=2024&months=6", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        disposition(&headers),
        "attachment; filename=\"monthly-tasks-analytics-2024.csv\""
    );
    assert_eq!(
        api.calls("GET", "/api/admin/analytics/monthly-tasks/export")[0].query.as_deref(),
        Some("year=2024&months=6")
    );
    Ok(())
}

#[tokio::test]
async fn periodic_export_is_pending_until_the_download_finishes() -> anyhow::Result<()> {
    let arrived = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let (seen, gate) = (arrived.clone(), release.clone());
    let routes = Router::new().route(
        "/admin/analytics/periodic-tasks/export",
        get(move || {
            let (seen, gate) = (seen.clone(), gate.clone());
            async move {
                seen.notify_one();
                gate.notified().await;
                CSV
            }
        }),
    );
    let api = MockApi::spawn(routes).await?;
    let state = signed_in(&api).await?;
    assert!(!state.queries.is_pending(EXPORT_PERIODIC_TASKS));

    let export = tokio::spawn({
        let state = state.clone();
        async move {
            send_raw(&state, "GET", "/api/analytics/periodic-tasks/export?period=weekly&task_type=all", None).await
        }
    });

    arrived.notified().await;
    assert!(state.queries.is_pending(EXPORT_PERIODIC_TASKS));

    release.notify_one();
    let (status, headers, _) = export.await??;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        disposition(&headers),
        "attachment; filename=\"periodic-tasks-analytics-weekly.csv\""
    );
    assert!(!state.queries.is_pending(EXPORT_PERIODIC_TASKS));

    // `task_type=all` is dropped before the request goes out.
    assert_eq!(
        api.calls("GET", "/api/admin/analytics/periodic-tasks/export")[0].query.as_deref(),
        Some("period=weekly")
    );
    Ok(())
}

#[tokio::test]
async fn failed_export_reports_and_clears_pending() -> anyhow::Result<()> {
    let routes = Router::new().route(
        "/admin/analytics/periodic-tasks/export",
        get(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid period range" }))) }),
    );
    let api = MockApi::spawn(routes).await?;
    let state = signed_in(&api).await?;

    let (status, body) = send(&state, "GET", "/api/analytics/periodic-tasks/export?period=daily", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid period range");
    assert!(!state.queries.is_pending(EXPORT_PERIODIC_TASKS));
    assert_eq!(api.calls("GET", "/api/admin/analytics/periodic-tasks/export").len(), 1);
    Ok(())
}
