//! Cached reads and invalidating writes, one module per resource.
//!
//! Every read goes through [`QueryClient::fetch`](crate::query::QueryClient::fetch)
//! under a key rooted at one of the names below; every write goes through
//! `mutate` with the roots it makes stale.

use std::time::Duration;

use crate::query::QueryKey;

pub mod ads_banners;
pub mod analytics;
pub mod auth;
pub mod bookings;
pub mod house_types;
pub mod subscriptions;
pub mod users;
pub mod withdrawals;
pub mod workers;

pub const STATS_STALE_TIME: Duration = Duration::from_secs(2 * 60);
pub const ASSIGNED_JOBS_STALE_TIME: Duration = Duration::from_secs(2 * 60);
pub const CURRENT_JOB_STALE_TIME: Duration = Duration::from_secs(60);

pub mod keys {
    use super::QueryKey;

    pub fn auth() -> QueryKey {
        QueryKey::new("auth")
    }

    pub fn users() -> QueryKey {
        QueryKey::new("users")
    }

    pub fn workers() -> QueryKey {
        QueryKey::new("workers")
    }

    pub fn worker(id: &str) -> QueryKey {
        QueryKey::new("worker").with(id)
    }

    pub fn assigned_jobs() -> QueryKey {
        QueryKey::new("assigned-jobs")
    }

    pub fn current_job() -> QueryKey {
        QueryKey::new("current-job")
    }

    pub fn job_history() -> QueryKey {
        QueryKey::new("job-history")
    }

    pub fn bookings() -> QueryKey {
        QueryKey::new("bookings")
    }

    pub fn booking(id: &str) -> QueryKey {
        QueryKey::new("booking").with(id)
    }

    pub fn subscriptions() -> QueryKey {
        QueryKey::new("cleaning-subscriptions")
    }

    pub fn subscription_stats() -> QueryKey {
        QueryKey::new("cleaning-subscription-stats")
    }

    pub fn subscription_details() -> QueryKey {
        QueryKey::new("subscription-details")
    }

    pub fn subscription(id: &str) -> QueryKey {
        subscription_details().with(id)
    }

    pub fn subscription_orders() -> QueryKey {
        QueryKey::new("subscription-orders")
    }

    pub fn withdrawals() -> QueryKey {
        QueryKey::new("withdrawal-requests")
    }

    pub fn withdrawal(id: &str) -> QueryKey {
        QueryKey::new("withdrawal-request").with(id)
    }

    pub fn withdrawal_stats() -> QueryKey {
        QueryKey::new("withdrawal-stats")
    }

    pub fn house_types() -> QueryKey {
        QueryKey::new("house-types")
    }

    pub fn ads_banners() -> QueryKey {
        QueryKey::new("ads-banners")
    }

    pub fn worker_tasks() -> QueryKey {
        QueryKey::new("worker-tasks-analytics")
    }

    pub fn monthly_tasks() -> QueryKey {
        QueryKey::new("monthly-tasks-analytics")
    }

    pub fn periodic_tasks() -> QueryKey {
        QueryKey::new("periodic-tasks-analytics")
    }
}
