use crate::{
    dto::{
        Ack,
        house_types::{CreateHouseType, HouseTypeQuery, UpdateHouseType},
    },
    error::{AppError, AppResult},
    models::HouseType,
    services::house_type_service,
    state::AppState,
};

use super::keys;

pub async fn list(state: &AppState, query: &HouseTypeQuery) -> AppResult<Vec<HouseType>> {
    let client = &state.client;
    let key = keys::house_types().with_params(query);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || {
            house_type_service::list_house_types(client, query)
        })
        .await?)
}

pub async fn create(state: &AppState, payload: &CreateHouseType) -> AppResult<HouseType> {
    if payload.house_type.trim().is_empty() || payload.house_title.trim().is_empty() {
        return Err(AppError::BadRequest("House type and title are required".into()));
    }
    let client = &state.client;
    state
        .queries
        .mutate("create-house-type", &[keys::house_types()], move || {
            house_type_service::create_house_type(client, payload)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to create house type"))
}

pub async fn update(state: &AppState, id: &str, payload: &UpdateHouseType) -> AppResult<HouseType> {
    let client = &state.client;
    state
        .queries
        .mutate("update-house-type", &[keys::house_types()], move || {
            house_type_service::update_house_type(client, id, payload)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to update house type"))
}

pub async fn delete(state: &AppState, id: &str) -> AppResult<Ack> {
    let client = &state.client;
    state
        .queries
        .mutate("delete-house-type", &[keys::house_types()], move || {
            house_type_service::delete_house_type(client, id)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to delete house type"))
}
