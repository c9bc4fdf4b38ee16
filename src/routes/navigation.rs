use axum::{
    Json, Router,
    extract::Query,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    middleware::auth::AdminSession,
    navigation::{NavItem, NavSection, SECTIONS, active_item},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct NavigationQuery {
    /// Route currently shown, used to pick the highlighted item.
    pub path: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminIdentity {
    pub full_name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Navigation {
    #[schema(value_type = Object)]
    pub sections: &'static [NavSection],
    pub active: Option<NavItem>,
    pub admin: AdminIdentity,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(navigation))
}

#[utoipa::path(
    get,
    path = "/api/navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Sidebar sections and the signed-in admin", body = ApiResponse<Navigation>),
        (status = 401, description = "No session")
    ),
    tag = "Navigation"
)]
pub async fn navigation(
    AdminSession { admin }: AdminSession,
    Query(query): Query<NavigationQuery>,
) -> AppResult<Json<ApiResponse<Navigation>>> {
    let active = query.path.as_deref().and_then(active_item).cloned();
    let data = Navigation {
        sections: SECTIONS,
        active,
        admin: AdminIdentity {
            full_name: admin.full_name(),
            email: admin.email,
            role: admin.role,
        },
    };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}
