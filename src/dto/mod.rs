use serde::Deserialize;

pub mod ads_banners;
pub mod analytics;
pub mod auth;
pub mod bookings;
pub mod house_types;
pub mod subscriptions;
pub mod users;
pub mod withdrawals;
pub mod workers;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// `{ "message": ..., "data": ... }`, the wrapper most endpoints answer with.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Acknowledgement with no payload, e.g. after a delete.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

pub(crate) fn first_page() -> u32 {
    1
}

pub(crate) fn page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
