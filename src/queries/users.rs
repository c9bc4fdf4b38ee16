use crate::{
    dto::users::{UserFilters, UsersPage},
    error::AppResult,
    services::user_service,
    state::AppState,
};

use super::keys;

pub async fn list(state: &AppState, filters: &UserFilters) -> AppResult<UsersPage> {
    let client = &state.client;
    let key = keys::users().with_params(filters);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || user_service::list_users(client, filters))
        .await?)
}
