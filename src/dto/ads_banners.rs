use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct AdsBannerQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// `image` is a URL the admin already uploaded somewhere reachable.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAdsBanner {
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub is_active: bool,
}

impl CreateAdsBanner {
    pub fn has_image(&self) -> bool {
        let image = self.image.trim();
        image.starts_with("https://") || image.starts_with("http://")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAdsBanner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
