use crate::{
    client::{ApiClient, ClientResult},
    domain::transitions::ProcessWithdrawalRequest,
    dto::{
        Ack, Envelope,
        withdrawals::{CreateWithdrawalRequest, WithdrawalFilters, WithdrawalsPage},
    },
    models::{WithdrawalRequest, WithdrawalStats},
};

const BASE: &str = "/admin/withdrawal-requests";

pub async fn list_withdrawals(
    client: &ApiClient,
    filters: &WithdrawalFilters,
) -> ClientResult<WithdrawalsPage> {
    let response: Envelope<WithdrawalsPage> = client.get_with(BASE, filters).await?;
    Ok(response.data)
}

pub async fn withdrawal_stats(client: &ApiClient) -> ClientResult<WithdrawalStats> {
    let response: Envelope<WithdrawalStats> = client.get(&format!("{BASE}/stats")).await?;
    Ok(response.data)
}

pub async fn get_withdrawal(client: &ApiClient, id: &str) -> ClientResult<WithdrawalRequest> {
    let response: Envelope<WithdrawalRequest> = client.get(&format!("{BASE}/{id}")).await?;
    Ok(response.data)
}

pub async fn process_withdrawal(
    client: &ApiClient,
    id: &str,
    body: &ProcessWithdrawalRequest,
) -> ClientResult<WithdrawalRequest> {
    let response: Envelope<WithdrawalRequest> =
        client.patch(&format!("{BASE}/{id}/process"), body).await?;
    Ok(response.data)
}

pub async fn create_withdrawal(
    client: &ApiClient,
    payload: &CreateWithdrawalRequest,
) -> ClientResult<WithdrawalRequest> {
    let response: Envelope<WithdrawalRequest> = client.post(BASE, payload).await?;
    Ok(response.data)
}

pub async fn delete_withdrawal(client: &ApiClient, id: &str) -> ClientResult<Ack> {
    client.delete(&format!("{BASE}/{id}")).await
}
