use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct HouseTypeQuery {
    #[serde(default, rename = "isDuplex", skip_serializing_if = "Option::is_none")]
    pub is_duplex: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateHouseType {
    pub house_type: String,
    pub house_title: String,
    pub rooms: u32,
    pub toilets: u32,
    pub living_rooms: u32,
    pub monthly_price: String,
    pub onetime_price: String,
    #[serde(default, rename = "isDuplex")]
    pub is_duplex: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateHouseType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toilets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living_rooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onetime_price: Option<String>,
    #[serde(default, rename = "isDuplex", skip_serializing_if = "Option::is_none")]
    pub is_duplex: Option<bool>,
}
