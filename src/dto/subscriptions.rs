use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::{
        filters::{PageFilters, Selection, de_selection, set_selection},
        transitions::{SubscriptionAction, subscription_actions},
    },
    models::{
        CleaningSubscription, Pagination, SubscriptionOrder, SubscriptionOrderStatus,
        SubscriptionStatus, WeeklySlot,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionFilters {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
}

impl Default for SubscriptionFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: super::DEFAULT_PAGE_SIZE,
            status: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SubscriptionFiltersUpdate {
    #[serde(default, deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub status: Option<Selection<SubscriptionStatus>>,
}

impl PageFilters for SubscriptionFilters {
    type Update = SubscriptionFiltersUpdate;

    fn page(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    fn merge(&mut self, update: SubscriptionFiltersUpdate) -> bool {
        set_selection(&mut self.status, update.status)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionsPage {
    #[serde(default)]
    pub subscriptions: Vec<CleaningSubscription>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionDetails {
    pub subscription: CleaningSubscription,
    #[serde(default)]
    pub orders: Vec<SubscriptionOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionOrders {
    #[serde(default)]
    pub orders: Vec<SubscriptionOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct OrdersQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionOrderStatus>,
}

/// Body of `POST .../{id}/assign-worker`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignSubscriptionWorkerRequest {
    pub worker_id: String,
    pub order_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateSubscriptionStatusRequest {
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubscriptionActionBody {
    pub action: SubscriptionAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_schedule: Option<Vec<WeeklySlot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubscriptionRow {
    pub id: String,
    pub customer: String,
    pub frequency: String,
    pub status: SubscriptionStatus,
    pub total_price: f64,
    pub orders_completed: u64,
    pub total_orders_generated: u64,
    pub next_service_date: Option<String>,
    pub actions: Vec<SubscriptionAction>,
}

impl From<CleaningSubscription> for SubscriptionRow {
    fn from(sub: CleaningSubscription) -> Self {
        Self {
            customer: sub
                .user
                .as_ref()
                .map(|u| u.full_name())
                .unwrap_or_else(|| "Unknown customer".to_string()),
            actions: subscription_actions(sub.status),
            id: sub.id.into(),
            frequency: sub.frequency,
            status: sub.status,
            total_price: sub.total_price,
            orders_completed: sub.orders_completed,
            total_orders_generated: sub.total_orders_generated,
            next_service_date: sub.next_service_date,
        }
    }
}
