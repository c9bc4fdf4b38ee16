use crate::{
    client::{ApiClient, ClientResult},
    dto::{
        Ack, Envelope,
        house_types::{CreateHouseType, HouseTypeQuery, UpdateHouseType},
    },
    models::HouseType,
};

pub async fn list_house_types(client: &ApiClient, query: &HouseTypeQuery) -> ClientResult<Vec<HouseType>> {
    let response: Envelope<Vec<HouseType>> = client.get_with("/house_type", query).await?;
    Ok(response.data)
}

pub async fn create_house_type(client: &ApiClient, payload: &CreateHouseType) -> ClientResult<HouseType> {
    let response: Envelope<HouseType> = client.post("/house_type/create", payload).await?;
    Ok(response.data)
}

pub async fn update_house_type(
    client: &ApiClient,
    id: &str,
    payload: &UpdateHouseType,
) -> ClientResult<HouseType> {
    let response: Envelope<HouseType> = client.put(&format!("/house_type/{id}"), payload).await?;
    Ok(response.data)
}

pub async fn delete_house_type(client: &ApiClient, id: &str) -> ClientResult<Ack> {
    client.delete(&format!("/house_type/{id}")).await
}
