mod common;

use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode},
    routing::get,
};
use serde_json::json;
use serenity_admin::{
    client::ClientError,
    dto::users::UserFilters,
    error::AppError,
    queries,
    routes::create_app,
    session::SessionEvent,
    state::spawn_session_listener,
};
use tokio::sync::broadcast::error::TryRecvError;
use tower::ServiceExt;

use common::MockApi;

async fn rejecting_api() -> anyhow::Result<MockApi> {
    let routes = Router::new().route(
        "/admin/users",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "message": "jwt expired" }))) }),
    );
    MockApi::spawn(routes).await
}

#[tokio::test]
async fn concurrent_401s_expire_the_session_once() -> anyhow::Result<()> {
    let api = rejecting_api().await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;
    let mut events = state.session.subscribe();

    let first = UserFilters::default();
    let second = UserFilters {
        search: Some("ada".into()),
        ..UserFilters::default()
    };
    let (a, b) = tokio::join!(
        queries::users::list(&state, &first),
        queries::users::list(&state, &second),
    );
    for result in [a, b] {
        assert!(matches!(result, Err(AppError::Upstream(ClientError::Unauthorized))));
    }

    assert!(!state.session.is_authenticated());
    assert_eq!(state.session.admin(), None);
    assert_eq!(events.try_recv()?, SessionEvent::Expired);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    // 401 is final: each request went out exactly once.
    assert_eq!(api.calls("GET", "/api/admin/users").len(), 2);
    Ok(())
}

#[tokio::test]
async fn a_401_from_an_older_session_leaves_the_new_one_alone() -> anyhow::Result<()> {
    let api = rejecting_api().await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "old")?;
    let stale = state.session.credentials();

    common::sign_in(&state, "new")?;
    assert!(!state.session.expire(stale.generation));
    assert!(state.session.is_authenticated());

    let current = state.session.credentials();
    assert_eq!(current.token.as_deref(), Some("new"));
    assert!(state.session.expire(current.generation));
    assert!(!state.session.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn expiry_clears_cached_pages_and_filters() -> anyhow::Result<()> {
    let users = Router::new().route(
        "/admin/users",
        get(|| async {
            Json(json!({
                "data": {
                    "users": [{ "_id": "u1", "first_name": "Chidi", "last_name": "Eze", "email": "c@mail.test" }],
                    "pagination": common::pagination(1)
                }
            }))
        }),
    );
    let api = MockApi::spawn(users).await?;
    let state = common::state_for(&api)?;
    common::sign_in(&state, "tok")?;
    let _listener = spawn_session_listener(&state);

    let filters = UserFilters::default();
    queries::users::list(&state, &filters).await?;
    state.views.users().page = 3;

    let generation = state.session.credentials().generation;
    assert!(state.session.expire(generation));

    let cache_key = queries::keys::users().with_params(&filters);
    let mut cleared = false;
    for _ in 0..50 {
        if state.queries.peek::<serenity_admin::dto::users::UsersPage>(&cache_key).is_none() {
            cleared = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(cleared, "cache was not cleared after expiry");
    assert_eq!(state.views.users().page, 1);
    Ok(())
}

#[tokio::test]
async fn gated_routes_answer_401_with_login_redirect() -> anyhow::Result<()> {
    let api = MockApi::spawn(Router::new()).await?;
    let state = common::state_for(&api)?;
    let app = create_app(state);

    let response = app
        .oneshot(Request::builder().uri("/api/users").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["data"]["redirect"], "/auth");
    assert_eq!(body["message"], "Authentication required");
    assert!(api.requests().is_empty());
    Ok(())
}
