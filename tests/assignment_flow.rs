mod common;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, patch},
};
use serde_json::json;
use serenity_admin::{
    dto::bookings::BookingFilters, error::AppError, models::BookingType, queries, state::AppState,
};

use common::MockApi;

fn bookings_page() -> serde_json::Value {
    json!({
        "message": "Bookings retrieved",
        "data": {
            "bookings": [
                {
                    "_id": "b1",
                    "user": { "_id": "u1", "first_name": "Chidi", "last_name": "Eze", "email": "chidi@mail.test" },
                    "frequency": "one-time",
                    "booking_status": "PAID",
                    "cleaning_time": [{ "_id": "t1", "opening_time": "09:00", "closing_time": "12:00" }],
                    "scheduled_date": "2025-03-03T00:00:00.000Z",
                    "total_amount": "15000",
                    "agent_assigned": false
                },
                {
                    "_id": "b2",
                    "frequency": "weekly",
                    "booking_status": "ASSIGNED",
                    "cleaning_time": [{ "opening_time": "13:00", "closing_time": "15:00" }],
                    "scheduled_date": "2025-03-04",
                    "agent_assigned": true
                },
                {
                    "_id": "b3",
                    "frequency": "one-time",
                    "booking_status": "PAID",
                    "cleaning_time": [],
                    "scheduled_date": "2025-03-05"
                }
            ],
            "pagination": common::pagination(3)
        }
    })
}

async fn upstream() -> anyhow::Result<MockApi> {
    let assigned = || async { Json(json!({ "message": "Worker assigned to booking", "data": null })) };
    let routes = Router::new()
        .route("/admin/bookings", get(|| async { Json(bookings_page()) }))
        .route("/admin/cleaning/bookings/{id}/assign-worker", patch(assigned))
        .route("/admin/laundry/bookings/{id}/assign-worker", patch(assigned))
        .route("/admin/repair_service/bookings/{id}/assignworker", patch(assigned));
    MockApi::spawn(routes).await
}

async fn signed_in(api: &MockApi) -> anyhow::Result<AppState> {
    let state = common::state_for(api)?;
    common::sign_in(&state, "tok-1")?;
    Ok(state)
}

fn patches(api: &MockApi) -> usize {
    api.requests().iter().filter(|r| r.method == "PATCH").count()
}

#[tokio::test]
async fn assigns_with_schedule_from_first_time_window() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = signed_in(&api).await?;
    let filters = BookingFilters::default();

    queries::bookings::list(&state, &filters).await?;
    let outcome = queries::bookings::assign(&state, &filters, "b1", " w1 ").await?;

    assert_eq!(outcome.message, "Worker assigned to booking");
    assert_eq!(outcome.worker_id, "w1");
    assert_eq!(outcome.schedule.formatted_date, "Monday, March 3, 2025");

    let calls = api.calls("PATCH", "/api/admin/cleaning/bookings/b1/assign-worker");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        json!({
            "worker_id": "w1",
            "assignment_date": "2025-03-03",
            "assignment_time": { "start_time": "09:00", "end_time": "12:00" }
        })
    );
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer tok-1"));

    // The bookings page was invalidated, so the next render refetches.
    queries::bookings::list(&state, &filters).await?;
    assert_eq!(api.calls("GET", "/api/admin/bookings").len(), 2);
    Ok(())
}

#[tokio::test]
async fn each_service_type_uses_its_own_endpoint() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = signed_in(&api).await?;

    for (booking_type, path) in [
        (BookingType::Laundry, "/api/admin/laundry/bookings/b1/assign-worker"),
        (BookingType::Repair, "/api/admin/repair_service/bookings/b1/assignworker"),
    ] {
        let filters = BookingFilters {
            booking_type,
            ..BookingFilters::default()
        };
        queries::bookings::list(&state, &filters).await?;
        queries::bookings::assign(&state, &filters, "b1", "w9").await?;
        assert_eq!(api.calls("PATCH", path).len(), 1, "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn invalid_selections_never_reach_the_api() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = signed_in(&api).await?;
    let filters = BookingFilters::default();
    queries::bookings::list(&state, &filters).await?;

    let cases = [
        ("b1", "   ", "Please select a worker"),
        ("b2", "w1", "A worker is already assigned to this booking"),
        ("b3", "w1", "Booking schedule information is missing"),
    ];
    for (booking, worker, expected) in cases {
        let err = queries::bookings::assign(&state, &filters, booking, worker)
            .await
            .unwrap_err();
        assert!(matches!(&err, AppError::BadRequest(msg) if msg == expected), "{booking}: {err}");
    }

    assert_eq!(patches(&api), 0);
    Ok(())
}

#[tokio::test]
async fn server_rejection_message_is_surfaced_without_retry() -> anyhow::Result<()> {
    let routes = Router::new()
        .route("/admin/bookings", get(|| async { Json(bookings_page()) }))
        .route(
            "/admin/cleaning/bookings/{id}/assign-worker",
            patch(|| async { (StatusCode::CONFLICT, Json(json!({ "error": "Worker is not available" }))) }),
        );
    let api = MockApi::spawn(routes).await?;
    let state = signed_in(&api).await?;
    let filters = BookingFilters::default();
    queries::bookings::list(&state, &filters).await?;

    let err = queries::bookings::assign(&state, &filters, "b1", "w1")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Worker is not available");
    assert_eq!(patches(&api), 1);
    assert!(!state.queries.is_pending(queries::bookings::ASSIGN));
    Ok(())
}

#[tokio::test]
async fn accepted_assignment_with_unreadable_body_is_sent_once() -> anyhow::Result<()> {
    let routes = Router::new()
        .route("/admin/bookings", get(|| async { Json(bookings_page()) }))
        .route(
            "/admin/cleaning/bookings/{id}/assign-worker",
            patch(|| async { "assigned" }),
        );
    let api = MockApi::spawn(routes).await?;
    let state = signed_in(&api).await?;
    let filters = BookingFilters::default();
    queries::bookings::list(&state, &filters).await?;

    let result = queries::bookings::assign(&state, &filters, "b1", "w1").await;
    assert!(result.is_err());
    assert_eq!(patches(&api), 1);
    Ok(())
}

#[test]
fn schedule_accepts_local_timestamps_and_keeps_window_seconds() -> anyhow::Result<()> {
    let booking: serenity_admin::models::Booking = serde_json::from_value(json!({
        "_id": "b9",
        "booking_status": "PAID",
        "cleaning_time": [{ "opening_time": "09:00:30", "closing_time": "11:00" }],
        "scheduled_date": "2025-03-03T00:00:00"
    }))?;

    let body = serenity_admin::domain::assignment::prepare_assignment(&booking, "w1")?;
    assert_eq!(body.assignment_date, "2025-03-03");
    assert_eq!(body.assignment_time.start_time, "09:00:30");
    assert_eq!(body.assignment_time.end_time, "11:00");
    Ok(())
}
