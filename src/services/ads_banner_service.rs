use crate::{
    client::{ApiClient, ClientResult},
    dto::{
        Ack, Envelope,
        ads_banners::{AdsBannerQuery, CreateAdsBanner, UpdateAdsBanner},
    },
    models::AdsBanner,
};

pub async fn list_banners(client: &ApiClient, query: &AdsBannerQuery) -> ClientResult<Vec<AdsBanner>> {
    let response: Envelope<Vec<AdsBanner>> = client.get_with("/ads_banner", query).await?;
    Ok(response.data)
}

pub async fn create_banner(client: &ApiClient, payload: &CreateAdsBanner) -> ClientResult<AdsBanner> {
    let response: Envelope<AdsBanner> = client.post("/ads_banner/create", payload).await?;
    Ok(response.data)
}

pub async fn update_banner(
    client: &ApiClient,
    id: &str,
    payload: &UpdateAdsBanner,
) -> ClientResult<AdsBanner> {
    let response: Envelope<AdsBanner> = client.put(&format!("/ads_banner/{id}"), payload).await?;
    Ok(response.data)
}

pub async fn delete_banner(client: &ApiClient, id: &str) -> ClientResult<Ack> {
    client.delete(&format!("/ads_banner/{id}")).await
}
