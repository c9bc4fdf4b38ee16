use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::{
        filters::{apply_update, go_to_page},
        transitions::{SubscriptionAction, subscription_actions},
    },
    dto::{
        Ack,
        bookings::AssignWorkerBody,
        subscriptions::{
            OrdersQuery, SubscriptionActionBody, SubscriptionFilters, SubscriptionFiltersUpdate,
            SubscriptionOrders, SubscriptionPayload, SubscriptionRow,
        },
    },
    error::AppResult,
    middleware::auth::AdminSession,
    models::{CleaningSubscription, CleaningSubscriptionStats, SubscriptionOrder, SubscriptionStatus},
    queries::{
        self,
        subscriptions::{ASSIGN, CREATE, DELETE, UPDATE, UPDATE_STATUS},
    },
    response::{ApiResponse, ListView, Meta},
    routes::params::{PageQuery, is_filtered},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionView {
    pub subscription: CleaningSubscription,
    pub orders: Vec<SubscriptionOrder>,
    pub actions: Vec<SubscriptionAction>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusChange {
    pub status: SubscriptionStatus,
    pub actions: Vec<SubscriptionAction>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subscriptions).post(create_subscription))
        .route("/filters", patch(update_filters))
        .route("/stats", get(subscription_stats))
        .route(
            "/{id}",
            get(get_subscription)
                .put(update_subscription)
                .delete(delete_subscription),
        )
        .route("/{id}/orders", get(subscription_orders))
        .route("/{id}/status", post(change_status))
        .route("/{id}/assign-worker", post(assign_worker))
}

#[utoipa::path(
    get,
    path = "/api/cleaning-subscriptions",
    params(PageQuery),
    responses(
        (status = 200, description = "Subscriptions page", body = ApiResponse<ListView<SubscriptionRow, SubscriptionFilters>>)
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<ListView<SubscriptionRow, SubscriptionFilters>>>> {
    let filters = {
        let mut filters = state.views.subscriptions();
        if let Some(page) = query.page {
            go_to_page(&mut *filters, page);
        }
        filters.clone()
    };
    render(&state, filters).await
}

#[utoipa::path(
    patch,
    path = "/api/cleaning-subscriptions/filters",
    request_body = SubscriptionFiltersUpdate,
    responses(
        (status = 200, description = "Subscriptions page for the new filters", body = ApiResponse<ListView<SubscriptionRow, SubscriptionFilters>>)
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn update_filters(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(update): Json<SubscriptionFiltersUpdate>,
) -> AppResult<Json<ApiResponse<ListView<SubscriptionRow, SubscriptionFilters>>>> {
    let filters = {
        let mut filters = state.views.subscriptions();
        apply_update(&mut *filters, update);
        filters.clone()
    };
    render(&state, filters).await
}

async fn render(
    state: &AppState,
    filters: SubscriptionFilters,
) -> AppResult<Json<ApiResponse<ListView<SubscriptionRow, SubscriptionFilters>>>> {
    let page = queries::subscriptions::list(state, &filters).await?;
    let meta = Meta::from_pagination(&page.pagination);
    let rows = page.subscriptions.into_iter().map(SubscriptionRow::from).collect();
    let filtered = is_filtered(&filters);
    let pending = [ASSIGN, UPDATE_STATUS, CREATE, UPDATE, DELETE]
        .iter()
        .any(|name| state.queries.is_pending(name));
    let view = ListView::new(rows, filters, meta.clone(), filtered, "subscriptions").pending(pending);
    Ok(Json(ApiResponse::success("Ok", view, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/cleaning-subscriptions/stats",
    responses(
        (status = 200, description = "Subscription totals", body = ApiResponse<CleaningSubscriptionStats>)
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn subscription_stats(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> AppResult<Json<ApiResponse<CleaningSubscriptionStats>>> {
    let stats = queries::subscriptions::stats(&state).await?;
    Ok(Json(ApiResponse::success("Ok", stats, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/api/cleaning-subscriptions",
    request_body = SubscriptionPayload,
    responses(
        (status = 200, description = "Subscription created", body = ApiResponse<CleaningSubscription>)
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn create_subscription(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(payload): Json<SubscriptionPayload>,
) -> AppResult<Json<ApiResponse<CleaningSubscription>>> {
    let subscription = queries::subscriptions::create(&state, &payload).await?;
    Ok(Json(ApiResponse::success(
        "Subscription created successfully",
        subscription,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/cleaning-subscriptions/{id}",
    params(("id" = String, Path, description = "Subscription id")),
    responses(
        (status = 200, description = "Subscription with its orders", body = ApiResponse<SubscriptionView>)
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn get_subscription(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SubscriptionView>>> {
    let details = queries::subscriptions::details(&state, &id).await?;
    let data = SubscriptionView {
        actions: subscription_actions(details.subscription.status),
        subscription: details.subscription,
        orders: details.orders,
    };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}

#[utoipa::path(
    put,
    path = "/api/cleaning-subscriptions/{id}",
    params(("id" = String, Path, description = "Subscription id")),
    request_body = SubscriptionPayload,
    responses(
        (status = 200, description = "Subscription updated", body = ApiResponse<CleaningSubscription>)
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn update_subscription(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<SubscriptionPayload>,
) -> AppResult<Json<ApiResponse<CleaningSubscription>>> {
    let subscription = queries::subscriptions::update(&state, &id, &payload).await?;
    Ok(Json(ApiResponse::success(
        "Subscription updated successfully",
        subscription,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cleaning-subscriptions/{id}",
    params(("id" = String, Path, description = "Subscription id")),
    responses(
        (status = 200, description = "Subscription deleted")
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn delete_subscription(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<String>>> {
    let Ack { message } = queries::subscriptions::delete(&state, &id).await?;
    Ok(Json(ApiResponse::success(
        "Subscription deleted successfully",
        message,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/cleaning-subscriptions/{id}/orders",
    params(("id" = String, Path, description = "Subscription id"), OrdersQuery),
    responses(
        (status = 200, description = "Orders generated by the subscription", body = ApiResponse<SubscriptionOrders>)
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn subscription_orders(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Query(query): Query<OrdersQuery>,
) -> AppResult<Json<ApiResponse<SubscriptionOrders>>> {
    let orders = queries::subscriptions::orders(&state, &id, &query).await?;
    Ok(Json(ApiResponse::success("Ok", orders, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/api/cleaning-subscriptions/{id}/status",
    params(("id" = String, Path, description = "Subscription id")),
    request_body = SubscriptionActionBody,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<StatusChange>),
        (status = 400, description = "Action not allowed from the current status")
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn change_status(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(body): Json<SubscriptionActionBody>,
) -> AppResult<Json<ApiResponse<StatusChange>>> {
    let status = queries::subscriptions::apply_action(&state, &id, body.action).await?;
    let data = StatusChange {
        status,
        actions: subscription_actions(status),
    };
    Ok(Json(ApiResponse::success(
        format!("Subscription {}", status.as_str()),
        data,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/cleaning-subscriptions/{id}/assign-worker",
    params(("id" = String, Path, description = "Subscription id")),
    request_body = AssignWorkerBody,
    responses(
        (status = 200, description = "Worker assigned"),
        (status = 400, description = "Please fill in all required fields")
    ),
    tag = "Cleaning Subscriptions"
)]
pub async fn assign_worker(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(body): Json<AssignWorkerBody>,
) -> AppResult<Json<ApiResponse<String>>> {
    let Ack { message } = queries::subscriptions::assign_worker(&state, &id, &body.worker_id).await?;
    Ok(Json(ApiResponse::success(
        "Worker assigned successfully",
        message,
        Some(Meta::empty()),
    )))
}
