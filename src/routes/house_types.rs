use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};

use crate::{
    dto::{
        Ack,
        house_types::{CreateHouseType, HouseTypeQuery, UpdateHouseType},
    },
    error::AppResult,
    middleware::auth::AdminSession,
    models::HouseType,
    queries,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_house_types).post(create_house_type))
        .route("/{id}", put(update_house_type).delete(delete_house_type))
}

#[utoipa::path(
    get,
    path = "/api/house-types",
    params(HouseTypeQuery),
    responses(
        (status = 200, description = "House types", body = ApiResponse<Vec<HouseType>>)
    ),
    tag = "House Types"
)]
pub async fn list_house_types(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<HouseTypeQuery>,
) -> AppResult<Json<ApiResponse<Vec<HouseType>>>> {
    let house_types = queries::house_types::list(&state, &query).await?;
    Ok(Json(ApiResponse::success("Ok", house_types, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/api/house-types",
    request_body = CreateHouseType,
    responses(
        (status = 200, description = "House type created", body = ApiResponse<HouseType>),
        (status = 400, description = "House type and title are required")
    ),
    tag = "House Types"
)]
pub async fn create_house_type(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(payload): Json<CreateHouseType>,
) -> AppResult<Json<ApiResponse<HouseType>>> {
    let house_type = queries::house_types::create(&state, &payload).await?;
    Ok(Json(ApiResponse::success(
        "House type created successfully",
        house_type,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/house-types/{id}",
    params(("id" = String, Path, description = "House type id")),
    request_body = UpdateHouseType,
    responses(
        (status = 200, description = "House type updated", body = ApiResponse<HouseType>)
    ),
    tag = "House Types"
)]
pub async fn update_house_type(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<UpdateHouseType>,
) -> AppResult<Json<ApiResponse<HouseType>>> {
    let house_type = queries::house_types::update(&state, &id, &payload).await?;
    Ok(Json(ApiResponse::success(
        "House type updated successfully",
        house_type,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/house-types/{id}",
    params(("id" = String, Path, description = "House type id")),
    responses(
        (status = 200, description = "House type deleted")
    ),
    tag = "House Types"
)]
pub async fn delete_house_type(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<String>>> {
    let Ack { message } = queries::house_types::delete(&state, &id).await?;
    Ok(Json(ApiResponse::success(
        "House type deleted successfully",
        message,
        Some(Meta::empty()),
    )))
}
