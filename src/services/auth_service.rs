use crate::{
    client::{ApiClient, ClientResult},
    dto::{
        Envelope,
        auth::{LoginRequest, RefreshTokenRequest, SignupRequest},
    },
    models::AuthData,
};

pub async fn login(client: &ApiClient, credentials: &LoginRequest) -> ClientResult<AuthData> {
    let response: Envelope<AuthData> = client.post("/admin/login", credentials).await?;
    Ok(response.data)
}

pub async fn signup(client: &ApiClient, payload: &SignupRequest) -> ClientResult<AuthData> {
    let response: Envelope<AuthData> = client.post("/admin/signup", payload).await?;
    Ok(response.data)
}

pub async fn logout(client: &ApiClient) -> ClientResult<()> {
    let _: serde_json::Value = client.post_empty("/admin/logout").await?;
    Ok(())
}

pub async fn refresh_token(client: &ApiClient, refresh_token: &str) -> ClientResult<AuthData> {
    let body = RefreshTokenRequest {
        refresh_token: refresh_token.to_string(),
    };
    let response: Envelope<AuthData> = client.post("/admin/refresh-token", &body).await?;
    Ok(response.data)
}
