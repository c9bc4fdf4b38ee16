use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};

use crate::{
    dto::{
        Ack,
        ads_banners::{AdsBannerQuery, CreateAdsBanner, UpdateAdsBanner},
    },
    error::AppResult,
    middleware::auth::AdminSession,
    models::AdsBanner,
    queries,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_banners).post(create_banner))
        .route("/{id}", put(update_banner).delete(delete_banner))
}

#[utoipa::path(
    get,
    path = "/api/ads-banners",
    params(AdsBannerQuery),
    responses(
        (status = 200, description = "Ads banners", body = ApiResponse<Vec<AdsBanner>>)
    ),
    tag = "Ads Banners"
)]
pub async fn list_banners(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<AdsBannerQuery>,
) -> AppResult<Json<ApiResponse<Vec<AdsBanner>>>> {
    let banners = queries::ads_banners::list(&state, &query).await?;
    Ok(Json(ApiResponse::success("Ok", banners, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/api/ads-banners",
    request_body = CreateAdsBanner,
    responses(
        (status = 200, description = "Ads banner created", body = ApiResponse<AdsBanner>),
        (status = 400, description = "Banner image is required")
    ),
    tag = "Ads Banners"
)]
pub async fn create_banner(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(payload): Json<CreateAdsBanner>,
) -> AppResult<Json<ApiResponse<AdsBanner>>> {
    let banner = queries::ads_banners::create(&state, &payload).await?;
    Ok(Json(ApiResponse::success(
        "Ads banner created successfully",
        banner,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/ads-banners/{id}",
    params(("id" = String, Path, description = "Banner id")),
    request_body = UpdateAdsBanner,
    responses(
        (status = 200, description = "Ads banner updated", body = ApiResponse<AdsBanner>)
    ),
    tag = "Ads Banners"
)]
pub async fn update_banner(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAdsBanner>,
) -> AppResult<Json<ApiResponse<AdsBanner>>> {
    let banner = queries::ads_banners::update(&state, &id, &payload).await?;
    Ok(Json(ApiResponse::success(
        "Ads banner updated successfully",
        banner,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/ads-banners/{id}",
    params(("id" = String, Path, description = "Banner id")),
    responses(
        (status = 200, description = "Ads banner deleted")
    ),
    tag = "Ads Banners"
)]
pub async fn delete_banner(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<String>>> {
    let Ack { message } = queries::ads_banners::delete(&state, &id).await?;
    Ok(Json(ApiResponse::success(
        "Ads banner deleted successfully",
        message,
        Some(Meta::empty()),
    )))
}
