use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::filters::{PageFilters, Selection, de_selection, replace, set_search, set_selection},
    models::{Booking, BookingStatus, BookingType, CleaningAddress, Pagination, TimeWindow},
};

/// Query sent to `GET /admin/bookings`. `booking_type` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingFilters {
    pub booking_type: BookingType,
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_status: Option<BookingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_order: Option<bool>,
}

impl Default for BookingFilters {
    fn default() -> Self {
        Self {
            booking_type: BookingType::default(),
            page: 1,
            limit: super::DEFAULT_PAGE_SIZE,
            search: None,
            booking_status: None,
            frequency: None,
            subscription_order: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookingFiltersUpdate {
    pub booking_type: Option<BookingType>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub booking_status: Option<Selection<BookingStatus>>,
    #[serde(default, deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub frequency: Option<Selection<String>>,
    #[serde(default, deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub subscription_order: Option<Selection<bool>>,
}

impl PageFilters for BookingFilters {
    type Update = BookingFiltersUpdate;

    fn page(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    fn merge(&mut self, update: BookingFiltersUpdate) -> bool {
        let booking_type = match update.booking_type {
            Some(next) => replace(&mut self.booking_type, next),
            None => false,
        };
        let changes = [
            booking_type,
            set_search(&mut self.search, update.search),
            set_selection(&mut self.booking_status, update.booking_status),
            set_selection(&mut self.frequency, update.frequency),
            set_selection(&mut self.subscription_order, update.subscription_order),
        ];
        changes.contains(&true)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingsPage {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub booking_type: Option<String>,
    pub pagination: Pagination,
}

/// Create/update body. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BookingPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_status: Option<BookingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_time: Option<Vec<TimeWindow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_address: Option<CleaningAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_order: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_gift: Option<bool>,
}

/// What the admin picks in the assignment dialog.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignWorkerBody {
    #[serde(default)]
    pub worker_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CandidateQuery {
    pub search: Option<String>,
    /// A skill, or `all`.
    pub skill: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingRow {
    pub id: String,
    pub customer: String,
    pub email: Option<String>,
    pub frequency: String,
    pub status: BookingStatus,
    pub scheduled_date: Option<String>,
    pub time_window: Option<String>,
    pub total_amount: f64,
    pub subscription_order: bool,
    pub agent_assigned: bool,
    /// The assign action is offered only while no worker is attached.
    pub can_assign: bool,
}

impl From<Booking> for BookingRow {
    fn from(booking: Booking) -> Self {
        let (customer, email) = match &booking.user {
            Some(user) => (user.full_name(), Some(user.email.clone())),
            None => ("Unknown customer".to_string(), None),
        };
        let time_window = booking
            .cleaning_time
            .first()
            .map(|w| format!("{} - {}", w.opening_time, w.closing_time));
        Self {
            id: booking.id.into(),
            customer,
            email,
            frequency: booking.frequency,
            status: booking.booking_status,
            scheduled_date: booking.scheduled_date,
            time_window,
            total_amount: booking.total_amount,
            subscription_order: booking.subscription_order,
            agent_assigned: booking.agent_assigned,
            can_assign: !booking.agent_assigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::apply_update;

    #[test]
    fn switching_service_type_resets_page() {
        let mut filters = BookingFilters {
            page: 3,
            ..BookingFilters::default()
        };
        let update: BookingFiltersUpdate =
            serde_json::from_str(r#"{"booking_type":"repair"}"#).unwrap();
        assert!(apply_update(&mut filters, update));
        assert_eq!(filters.page, 1);
        assert_eq!(filters.booking_type, BookingType::Repair);
    }

    #[test]
    fn same_values_keep_the_page() {
        let mut filters = BookingFilters {
            page: 3,
            booking_status: Some(BookingStatus::Paid),
            ..BookingFilters::default()
        };
        let update: BookingFiltersUpdate =
            serde_json::from_str(r#"{"booking_type":"cleaning","booking_status":"PAID"}"#).unwrap();
        assert!(!apply_update(&mut filters, update));
        assert_eq!(filters.page, 3);
    }

    #[test]
    fn explicit_null_clears_the_filter_and_resets_page() {
        let mut filters = BookingFilters {
            page: 3,
            booking_status: Some(BookingStatus::Pending),
            ..BookingFilters::default()
        };
        let update: BookingFiltersUpdate =
            serde_json::from_str(r#"{"booking_status":null}"#).unwrap();
        assert!(apply_update(&mut filters, update));
        assert_eq!(filters.booking_status, None);
        assert_eq!(filters.page, 1);

        let untouched: BookingFiltersUpdate = serde_json::from_str("{}").unwrap();
        assert!(untouched.booking_status.is_none());
    }
}
