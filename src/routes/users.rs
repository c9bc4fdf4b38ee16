use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, patch},
};

use crate::{
    domain::filters::{apply_update, go_to_page},
    dto::users::{UserFilters, UserFiltersUpdate, UserRow},
    error::AppResult,
    middleware::auth::AdminSession,
    queries,
    response::{ApiResponse, ListView, Meta},
    routes::params::{PageQuery, is_filtered},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/filters", patch(update_filters))
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Users page", body = ApiResponse<ListView<UserRow, UserFilters>>),
        (status = 401, description = "No session")
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<ListView<UserRow, UserFilters>>>> {
    let filters = {
        let mut filters = state.views.users();
        if let Some(page) = query.page {
            go_to_page(&mut *filters, page);
        }
        filters.clone()
    };
    render(&state, filters).await
}

#[utoipa::path(
    patch,
    path = "/api/users/filters",
    request_body = UserFiltersUpdate,
    responses(
        (status = 200, description = "Users page for the new filters", body = ApiResponse<ListView<UserRow, UserFilters>>)
    ),
    tag = "Users"
)]
pub async fn update_filters(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(update): Json<UserFiltersUpdate>,
) -> AppResult<Json<ApiResponse<ListView<UserRow, UserFilters>>>> {
    let filters = {
        let mut filters = state.views.users();
        apply_update(&mut *filters, update);
        filters.clone()
    };
    render(&state, filters).await
}

async fn render(
    state: &AppState,
    filters: UserFilters,
) -> AppResult<Json<ApiResponse<ListView<UserRow, UserFilters>>>> {
    let page = queries::users::list(state, &filters).await?;
    let meta = Meta::from_pagination(&page.pagination);
    let rows = page.users.into_iter().map(UserRow::from).collect();
    let filtered = is_filtered(&filters);
    let view = ListView::new(rows, filters, meta.clone(), filtered, "users");
    Ok(Json(ApiResponse::success("Ok", view, Some(meta))))
}
