use std::{fmt, ops::Deref};

use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;

/// Identifier of an API record. Mongo-backed endpoints send `_id`, newer ones
/// `id`, and some send both; `id` wins when they disagree. Flattened into each
/// record so it serializes as a plain `id` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct RecordId {
    id: String,
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            id: Option<String>,
            #[serde(default, rename = "_id")]
            mongo_id: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .or(raw.mongo_id)
            .unwrap_or_default();
        Ok(Self { id })
    }
}

impl Deref for RecordId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.id
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.id == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.id == *other
    }
}

/// Accepts a JSON number, a numeric string or null; the API is not consistent
/// about which one it sends for prices, ratings and earnings.
pub(crate) fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(0.0),
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("number out of range")),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(0.0),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid numeric string {s:?}"))),
        other => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

pub(crate) fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = de_number(deserializer)?;
    if value < 0.0 {
        return Err(de::Error::custom("count cannot be negative"));
    }
    Ok(value as u64)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Admin {
    #[serde(flatten)]
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default, rename = "isVerified")]
    pub is_verified: bool,
    #[serde(default)]
    pub role: String,
    #[serde(default, rename = "isActive")]
    pub is_active: bool,
}

impl Admin {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AuthData {
    pub admin: Admin,
    pub token: String,
    #[serde(default, rename = "tokenExpTime")]
    pub token_exp_time: Option<String>,
    #[serde(default, rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    #[serde(default = "first_page", rename = "currentPage")]
    pub current_page: u32,
    #[serde(default, rename = "totalPages")]
    pub total_pages: u32,
    #[serde(default, rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(default, rename = "hasPrevPage")]
    pub has_prev_page: bool,
    #[serde(default, alias = "itemsPerPage")]
    pub limit: u32,
    #[serde(default, alias = "totalItems", alias = "totalWorkers")]
    pub total: Option<u64>,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default, rename = "isVerified")]
    pub is_verified: bool,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Paid,
    Assigned,
    Ongoing,
    Done,
    Cancelled,
}

/// Service line of a booking. Selects the REST sub-resource and the
/// assignment endpoint; it is never stored on the booking itself.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    #[default]
    Cleaning,
    Laundry,
    Repair,
}

impl BookingType {
    pub const ALL: [BookingType; 3] = [BookingType::Cleaning, BookingType::Laundry, BookingType::Repair];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Cleaning => "cleaning",
            BookingType::Laundry => "laundry",
            BookingType::Repair => "repair",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeWindow {
    #[serde(flatten)]
    pub id: RecordId,
    pub opening_time: String,
    pub closing_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CleaningAddress {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub user: Option<Customer>,
    #[serde(default)]
    pub worker_id: Option<String>,
    #[serde(default)]
    pub frequency: String,
    pub booking_status: BookingStatus,
    #[serde(default)]
    pub cleaning_time: Vec<TimeWindow>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub cleaning_address: Option<CleaningAddress>,
    #[serde(default, deserialize_with = "de_number")]
    pub total_amount: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub subscription_order: bool,
    #[serde(default)]
    pub agent_assigned: bool,
    #[serde(default)]
    pub is_gift: bool,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Worker {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub skill: String,
    #[serde(default, rename = "isAvailable")]
    pub is_available: bool,
    #[serde(default, rename = "isAssigned")]
    pub is_assigned: bool,
    #[serde(default, rename = "isActive")]
    pub is_active: bool,
    #[serde(default, rename = "isVerified")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "de_number")]
    pub rating: f64,
    #[serde(default, rename = "totalJobs", deserialize_with = "de_count")]
    pub total_jobs: u64,
    #[serde(default, rename = "completedJobs", deserialize_with = "de_count")]
    pub completed_jobs: u64,
    #[serde(default, rename = "lifetimeEarnings", deserialize_with = "de_number")]
    pub lifetime_earnings: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkerJob {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub booking_status: String,
    #[serde(default, deserialize_with = "de_number")]
    pub total_amount: f64,
    #[serde(default)]
    pub assignment_date: Option<serde_json::Value>,
    #[serde(default)]
    pub assignment_time: Option<serde_json::Value>,
    #[serde(default)]
    pub customer_details: Option<serde_json::Value>,
    #[serde(default)]
    pub job_address: Option<serde_json::Value>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
    Completed,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeSlot {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklySlot {
    pub day: String,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CleaningSubscription {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub user: Option<Customer>,
    #[serde(default)]
    pub frequency: String,
    #[serde(alias = "subscription_status")]
    pub status: SubscriptionStatus,
    #[serde(default, alias = "basePrice", deserialize_with = "de_number")]
    pub base_price: f64,
    #[serde(default, alias = "totalPrice", alias = "total_amount", deserialize_with = "de_number")]
    pub total_price: f64,
    #[serde(default, deserialize_with = "de_count")]
    pub total_orders_generated: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub orders_completed: u64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub next_service_date: Option<String>,
    #[serde(default)]
    pub weekly_schedule: Vec<WeeklySlot>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionOrderStatus {
    Pending,
    Paid,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionOrder {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub worker_id: Option<String>,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub service_date: Option<String>,
    pub status: SubscriptionOrderStatus,
    #[serde(default, deserialize_with = "de_number")]
    pub amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CleaningSubscriptionStats {
    #[serde(default, deserialize_with = "de_count")]
    pub total_subscriptions: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub active_subscriptions: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub paused_subscriptions: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub cancelled_subscriptions: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub completed_subscriptions: u64,
    #[serde(default, deserialize_with = "de_number")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub pending_revenue: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub monthly_growth: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
    Processed,
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Approved => "approved",
            WithdrawalStatus::Rejected => "rejected",
            WithdrawalStatus::Processed => "processed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BankDetails {
    pub account_number: String,
    pub bank_name: String,
    pub account_holder_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
}

impl BankDetails {
    /// Account number with everything but the last four digits hidden.
    pub fn masked_account(&self) -> String {
        let digits: Vec<char> = self.account_number.chars().collect();
        if digits.len() <= 4 {
            return self.account_number.clone();
        }
        let tail: String = digits[digits.len() - 4..].iter().collect();
        format!("****{tail}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WithdrawalRequest {
    #[serde(flatten)]
    pub id: RecordId,
    pub worker_id: String,
    #[serde(default)]
    pub worker_name: Option<String>,
    #[serde(default)]
    pub worker_email: Option<String>,
    #[serde(deserialize_with = "de_number")]
    pub amount: f64,
    pub status: WithdrawalStatus,
    #[serde(default)]
    pub request_date: Option<String>,
    #[serde(default)]
    pub processed_date: Option<String>,
    #[serde(default)]
    pub processed_by: Option<String>,
    pub bank_details: BankDetails,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WithdrawalStats {
    #[serde(default, deserialize_with = "de_count")]
    pub total_pending: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub total_approved: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub total_processed: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub total_rejected: u64,
    #[serde(default, deserialize_with = "de_number")]
    pub pending_amount: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub processed_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HouseType {
    #[serde(flatten)]
    pub id: RecordId,
    pub house_type: String,
    #[serde(default)]
    pub house_title: String,
    #[serde(default)]
    pub rooms: u32,
    #[serde(default)]
    pub toilets: u32,
    #[serde(default)]
    pub living_rooms: u32,
    #[serde(default, deserialize_with = "de_number")]
    pub monthly_price: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub onetime_price: f64,
    #[serde(default, rename = "isDuplex")]
    pub is_duplex: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdsBanner {
    #[serde(flatten)]
    pub id: RecordId,
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_accepts_mongo_ids_and_string_amounts() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "_id": "b1",
            "frequency": "weekly",
            "booking_status": "PENDING",
            "cleaning_time": [{ "_id": "t1", "opening_time": "09:00", "closing_time": "12:00" }],
            "total_amount": "15000",
            "subscription_order": false
        }))
        .unwrap();

        assert_eq!(booking.id, "b1");
        assert_eq!(booking.total_amount, 15000.0);
        assert_eq!(booking.booking_status, BookingStatus::Pending);
        assert!(!booking.agent_assigned);
    }

    #[test]
    fn record_carrying_both_ids_still_decodes() {
        let worker: Worker = serde_json::from_value(serde_json::json!({
            "_id": "w1",
            "id": "w1",
            "full_name": "Bola Ade"
        }))
        .unwrap();
        assert_eq!(worker.id, "w1");

        let legacy: Worker = serde_json::from_value(serde_json::json!({ "_id": "w2" })).unwrap();
        assert_eq!(legacy.id, "w2");

        let encoded = serde_json::to_value(&legacy).unwrap();
        assert_eq!(encoded["id"], "w2");
        assert!(encoded.get("_id").is_none());
    }

    #[test]
    fn subscription_accepts_either_status_field() {
        let sub: CleaningSubscription = serde_json::from_value(serde_json::json!({
            "_id": "s1",
            "frequency": "weekly",
            "subscription_status": "paused",
            "totalPrice": 42000
        }))
        .unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Paused);
        assert_eq!(sub.total_price, 42000.0);
    }

    #[test]
    fn masks_all_but_last_four_digits() {
        let bank = BankDetails {
            account_number: "0123456789".into(),
            bank_name: "GTB".into(),
            account_holder_name: "Ada".into(),
            routing_number: None,
        };
        assert_eq!(bank.masked_account(), "****6789");
    }
}
