pub mod ads_banner_service;
pub mod analytics_service;
pub mod auth_service;
pub mod booking_service;
pub mod house_type_service;
pub mod subscription_service;
pub mod user_service;
pub mod withdrawal_service;
pub mod worker_service;
