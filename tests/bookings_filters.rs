mod common;

use axum::{Json, Router, extract::RawQuery, http::StatusCode, routing::get};
use serde_json::json;

use common::{MockApi, send};

/// Bookings endpoint that only has rows for unfiltered requests.
async fn upstream() -> anyhow::Result<MockApi> {
    let routes = Router::new().route(
        "/admin/bookings",
        get(|RawQuery(query): RawQuery| async move {
            let query = query.unwrap_or_default();
            let bookings = if query.contains("booking_status") {
                json!([])
            } else {
                json!([{
                    "_id": "b1",
                    "frequency": "weekly",
                    "booking_status": "PAID",
                    "cleaning_time": [{ "opening_time": "09:00", "closing_time": "11:00" }],
                    "scheduled_date": "2025-03-03",
                    "total_amount": 12000
                }])
            };
            Json(json!({ "data": { "bookings": bookings, "pagination": common::pagination(1) } }))
        }),
    );
    MockApi::spawn(routes).await
}

fn upstream_queries(api: &MockApi) -> Vec<String> {
    api.calls("GET", "/api/admin/bookings")
        .into_iter()
        .filter_map(|r| r.query)
        .collect()
}

#[tokio::test]
async fn changing_a_filter_returns_to_the_first_page() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    let (status, body) = send(&state, "GET", "/api/bookings?page=3", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["filters"]["page"], 3);
    assert_eq!(body["data"]["rows"][0]["can_assign"], true);
    assert_eq!(body["data"]["rows"][0]["time_window"], "09:00 - 11:00");

    let (status, body) = send(
        &state,
        "PATCH",
        "/api/bookings/filters",
        Some(json!({ "booking_status": "PAID" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["filters"]["page"], 1);
    assert_eq!(body["data"]["empty_message"], "No cleaning bookings match the current filters");

    assert_eq!(
        upstream_queries(&api),
        vec![
            "booking_type=cleaning&page=3&limit=10".to_string(),
            "booking_type=cleaning&page=1&limit=10&booking_status=PAID".to_string(),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn selecting_all_clears_the_filter() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    send(&state, "PATCH", "/api/bookings/filters", Some(json!({ "booking_status": "PAID" }))).await?;
    let (_, body) = send(&state, "PATCH", "/api/bookings/filters", Some(json!({ "booking_status": "all" }))).await?;

    assert!(body["data"]["filters"].get("booking_status").is_none());
    assert_eq!(body["data"]["rows"].as_array().map(Vec::len), Some(1));
    assert!(body["data"]["empty_message"].is_null());
    Ok(())
}

#[tokio::test]
async fn repeating_the_same_filter_keeps_the_page() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    send(&state, "PATCH", "/api/bookings/filters", Some(json!({ "search": "eze" }))).await?;
    send(&state, "GET", "/api/bookings?page=2", None).await?;
    let (_, body) = send(&state, "PATCH", "/api/bookings/filters", Some(json!({ "search": "eze" }))).await?;
    assert_eq!(body["data"]["filters"]["page"], 2);

    // Switching the service tab is a change like any other.
    let (_, body) = send(&state, "PATCH", "/api/bookings/filters", Some(json!({ "booking_type": "laundry" }))).await?;
    assert_eq!(body["data"]["filters"]["page"], 1);
    assert_eq!(body["data"]["filters"]["booking_type"], "laundry");
    Ok(())
}

#[tokio::test]
async fn null_clears_a_filter_like_all() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;

    send(&state, "PATCH", "/api/bookings/filters", Some(json!({ "booking_status": "PENDING" }))).await?;
    send(&state, "GET", "/api/bookings?page=3", None).await?;
    let (_, body) = send(&state, "PATCH", "/api/bookings/filters", Some(json!({ "booking_status": null }))).await?;

    assert!(body["data"]["filters"].get("booking_status").is_none());
    assert_eq!(body["data"]["filters"]["page"], 1);
    assert_eq!(
        upstream_queries(&api).last().map(String::as_str),
        Some("booking_type=cleaning&page=1&limit=10")
    );
    Ok(())
}
