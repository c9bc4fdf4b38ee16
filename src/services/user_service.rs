use crate::{
    client::{ApiClient, ClientResult},
    dto::{
        Envelope,
        users::{UserFilters, UsersPage},
    },
};

pub async fn list_users(client: &ApiClient, filters: &UserFilters) -> ClientResult<UsersPage> {
    let response: Envelope<UsersPage> = client.get_with("/admin/users", filters).await?;
    Ok(response.data)
}
