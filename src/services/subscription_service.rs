use crate::{
    client::{ApiClient, ClientResult},
    dto::{
        Ack, Envelope,
        subscriptions::{
            AssignSubscriptionWorkerRequest, OrdersQuery, SubscriptionDetails, SubscriptionFilters,
            SubscriptionOrders, SubscriptionPayload, SubscriptionsPage, UpdateSubscriptionStatusRequest,
        },
    },
    models::{CleaningSubscription, CleaningSubscriptionStats},
};

const BASE: &str = "/admin/cleaning/subscriptions";

pub async fn list_subscriptions(
    client: &ApiClient,
    filters: &SubscriptionFilters,
) -> ClientResult<SubscriptionsPage> {
    let response: Envelope<SubscriptionsPage> = client.get_with(BASE, filters).await?;
    Ok(response.data)
}

pub async fn subscription_stats(client: &ApiClient) -> ClientResult<CleaningSubscriptionStats> {
    let response: Envelope<CleaningSubscriptionStats> = client.get(&format!("{BASE}/stats")).await?;
    Ok(response.data)
}

pub async fn subscription_details(client: &ApiClient, id: &str) -> ClientResult<SubscriptionDetails> {
    let response: Envelope<SubscriptionDetails> = client.get(&format!("{BASE}/{id}")).await?;
    Ok(response.data)
}

pub async fn subscription_orders(
    client: &ApiClient,
    id: &str,
    query: &OrdersQuery,
) -> ClientResult<SubscriptionOrders> {
    let response: Envelope<SubscriptionOrders> =
        client.get_with(&format!("{BASE}/{id}/orders"), query).await?;
    Ok(response.data)
}

pub async fn assign_worker(
    client: &ApiClient,
    id: &str,
    body: &AssignSubscriptionWorkerRequest,
) -> ClientResult<Ack> {
    client.post(&format!("{BASE}/{id}/assign-worker"), body).await
}

pub async fn update_status(
    client: &ApiClient,
    id: &str,
    body: &UpdateSubscriptionStatusRequest,
) -> ClientResult<Ack> {
    client.patch(&format!("{BASE}/{id}/status"), body).await
}

pub async fn create_subscription(
    client: &ApiClient,
    payload: &SubscriptionPayload,
) -> ClientResult<CleaningSubscription> {
    let response: Envelope<CleaningSubscription> = client.post(BASE, payload).await?;
    Ok(response.data)
}

pub async fn update_subscription(
    client: &ApiClient,
    id: &str,
    payload: &SubscriptionPayload,
) -> ClientResult<CleaningSubscription> {
    let response: Envelope<CleaningSubscription> = client.put(&format!("{BASE}/{id}"), payload).await?;
    Ok(response.data)
}

pub async fn delete_subscription(client: &ApiClient, id: &str) -> ClientResult<Ack> {
    client.delete(&format!("{BASE}/{id}")).await
}
