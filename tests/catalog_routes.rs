mod common;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use serenity_admin::state::AppState;

use common::{MockApi, send};

fn house_type(id: &str) -> Value {
    json!({
        "_id": id,
        "id": id,
        "house_type": "bungalow",
        "house_title": "Three bedroom bungalow",
        "rooms": 3,
        "toilets": 2,
        "living_rooms": 1,
        "monthly_price": "45000",
        "onetime_price": "15000",
        "isDuplex": false
    })
}

fn banner(id: &str) -> Value {
    json!({ "_id": id, "image": "https://cdn.serenity.test/b.png", "link": "/promo", "is_active": true })
}

async fn upstream() -> anyhow::Result<MockApi> {
    let routes = Router::new()
        .route("/house_type", get(|| async { Json(json!({ "message": "ok", "data": [house_type("h1")] })) }))
        .route(
            "/house_type/create",
            post(|| async { Json(json!({ "message": "created", "data": house_type("h2") })) }),
        )
        .route(
            "/house_type/{id}",
            put(|| async { Json(json!({ "message": "updated", "data": house_type("h1") })) })
                .delete(|| async { Json(json!({ "message": "House type deleted" })) }),
        )
        .route("/ads_banner", get(|| async { Json(json!({ "message": "ok", "data": [banner("a1")] })) }))
        .route(
            "/ads_banner/create",
            post(|| async { Json(json!({ "message": "created", "data": banner("a2") })) }),
        )
        .route(
            "/ads_banner/{id}",
            put(|| async { Json(json!({ "message": "updated", "data": banner("a1") })) })
                .delete(|| async { Json(json!({ "message": "Banner deleted" })) }),
        );
    MockApi::spawn(routes).await
}

async fn signed_in(api: &MockApi) -> anyhow::Result<AppState> {
    let state = common::state_for(api)?;
    common::sign_in(&state, "tok")?;
    Ok(state)
}

#[tokio::test]
async fn house_types_list_forwards_the_duplex_filter() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = signed_in(&api).await?;

    let (status, body) = send(&state, "GET", "/api/house-types?isDuplex=true", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], "h1");
    assert_eq!(body["data"][0]["monthly_price"], 45000.0);

    let calls = api.calls("GET", "/api/house_type");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query.as_deref(), Some("isDuplex=true"));
    Ok(())
}

#[tokio::test]
async fn house_type_writes_hit_their_endpoints_and_refresh_the_list() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = signed_in(&api).await?;
    send(&state, "GET", "/api/house-types", None).await?;

    let create = json!({
        "house_type": "duplex",
        "house_title": "Four bedroom duplex",
        "rooms": 4,
        "toilets": 3,
        "living_rooms": 2,
        "monthly_price": "60000",
        "onetime_price": "20000",
        "isDuplex": true
    });
    let (status, body) = send(&state, "POST", "/api/house-types", Some(create.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "House type created successfully");
    assert_eq!(api.calls("POST", "/api/house_type/create")[0].body, create);

    let (status, _) = send(&state, "PUT", "/api/house-types/h1", Some(json!({ "rooms": 5 }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(api.calls("PUT", "/api/house_type/h1")[0].body, json!({ "rooms": 5 }));

    let (status, body) = send(&state, "DELETE", "/api/house-types/h1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "House type deleted");
    assert_eq!(api.calls("DELETE", "/api/house_type/h1").len(), 1);

    send(&state, "GET", "/api/house-types", None).await?;
    assert_eq!(api.calls("GET", "/api/house_type").len(), 2);
    Ok(())
}

#[tokio::test]
async fn blank_house_title_is_refused_locally() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = signed_in(&api).await?;

    let (status, body) = send(
        &state,
        "POST",
        "/api/house-types",
        Some(json!({
            "house_type": "flat",
            "house_title": "  ",
            "rooms": 1,
            "toilets": 1,
            "living_rooms": 1,
            "monthly_price": "1",
            "onetime_price": "1"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "House type and title are required");
    assert!(api.calls("POST", "/api/house_type/create").is_empty());
    Ok(())
}

#[tokio::test]
async fn banner_without_an_image_url_never_reaches_the_api() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = signed_in(&api).await?;

    for image in ["", "banner.png", "ftp://cdn.serenity.test/b.png"] {
        let (status, body) = send(
            &state,
            "POST",
            "/api/ads-banners",
            Some(json!({ "image": image, "link": "/promo", "is_active": true })),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{image:?}");
        assert_eq!(body["message"], "Banner image URL is required");
    }
    assert!(api.calls("POST", "/api/ads_banner/create").is_empty());

    let valid = json!({ "image": "https://cdn.serenity.test/new.png", "link": "/spring", "is_active": false });
    let (status, body) = send(&state, "POST", "/api/ads-banners", Some(valid.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "a2");
    assert_eq!(api.calls("POST", "/api/ads_banner/create")[0].body, valid);
    Ok(())
}

#[tokio::test]
async fn banner_list_update_and_delete() -> anyhow::Result<()> {
    let api = upstream().await?;
    let state = signed_in(&api).await?;

    let (_, body) = send(&state, "GET", "/api/ads-banners?is_active=true", None).await?;
    assert_eq!(body["data"][0]["id"], "a1");
    assert_eq!(api.calls("GET", "/api/ads_banner")[0].query.as_deref(), Some("is_active=true"));

    send(&state, "PUT", "/api/ads-banners/a1", Some(json!({ "is_active": false }))).await?;
    assert_eq!(api.calls("PUT", "/api/ads_banner/a1")[0].body, json!({ "is_active": false }));

    let (status, _) = send(&state, "DELETE", "/api/ads-banners/a1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(api.calls("DELETE", "/api/ads_banner/a1").len(), 1);
    Ok(())
}
