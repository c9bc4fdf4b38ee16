use crate::{
    dto::{
        Ack,
        ads_banners::{AdsBannerQuery, CreateAdsBanner, UpdateAdsBanner},
    },
    error::{AppError, AppResult},
    models::AdsBanner,
    services::ads_banner_service,
    state::AppState,
};

use super::keys;

pub async fn list(state: &AppState, query: &AdsBannerQuery) -> AppResult<Vec<AdsBanner>> {
    let client = &state.client;
    let key = keys::ads_banners().with_params(query);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || {
            ads_banner_service::list_banners(client, query)
        })
        .await?)
}

pub async fn create(state: &AppState, payload: &CreateAdsBanner) -> AppResult<AdsBanner> {
    if !payload.has_image() {
        return Err(AppError::BadRequest("Banner image URL is required".into()));
    }
    let client = &state.client;
    state
        .queries
        .mutate("create-ads-banner", &[keys::ads_banners()], move || {
            ads_banner_service::create_banner(client, payload)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to create ads banner"))
}

pub async fn update(state: &AppState, id: &str, payload: &UpdateAdsBanner) -> AppResult<AdsBanner> {
    let client = &state.client;
    state
        .queries
        .mutate("update-ads-banner", &[keys::ads_banners()], move || {
            ads_banner_service::update_banner(client, id, payload)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to update ads banner"))
}

pub async fn delete(state: &AppState, id: &str) -> AppResult<Ack> {
    let client = &state.client;
    state
        .queries
        .mutate("delete-ads-banner", &[keys::ads_banners()], move || {
            ads_banner_service::delete_banner(client, id)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to delete ads banner"))
}
