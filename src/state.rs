use std::sync::{Arc, Mutex, MutexGuard};

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};

use crate::{
    client::ApiClient,
    config::AppConfig,
    dto::{
        analytics::WorkerTaskFilters, bookings::BookingFilters, subscriptions::SubscriptionFilters,
        users::UserFilters, withdrawals::WithdrawalFilters, workers::WorkerFilters,
    },
    error::AppResult,
    query::{QueryClient, RetryPolicy},
    session::{SessionEvent, SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: Arc<SessionStore>,
    pub client: ApiClient,
    pub queries: Arc<QueryClient>,
    pub views: Arc<ViewState>,
}

impl AppState {
    pub fn new(config: AppConfig, session: Arc<SessionStore>) -> AppResult<Self> {
        let client = ApiClient::new(&config, session.clone())?;
        let retry = RetryPolicy::with_base_delay(config.retry_base_delay);
        let queries = Arc::new(QueryClient::new(retry, config.gc_time));
        Ok(Self {
            config: Arc::new(config),
            session,
            client,
            queries,
            views: Arc::new(ViewState::default()),
        })
    }
}

/// Follow session changes for the life of the process. An expired session
/// drops every cached query and resets the list pages, same as a logout.
pub fn spawn_session_listener(state: &AppState) -> JoinHandle<()> {
    let mut events = state.session.subscribe();
    let queries = state.queries.clone();
    let views = state.views.clone();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::Expired) => {
                    tracing::warn!("session expired, clearing cached data");
                    queries.clear();
                    views.reset();
                }
                Ok(event) => tracing::debug!(?event, "session changed"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "session listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Filter and pagination state of each list page. Survives between requests
/// the way a page's local state survives between renders.
#[derive(Default)]
pub struct ViewState {
    users: Mutex<UserFilters>,
    workers: Mutex<WorkerFilters>,
    bookings: Mutex<BookingFilters>,
    subscriptions: Mutex<SubscriptionFilters>,
    withdrawals: Mutex<WithdrawalFilters>,
    worker_tasks: Mutex<WorkerTaskFilters>,
}

impl ViewState {
    pub fn users(&self) -> MutexGuard<'_, UserFilters> {
        lock(&self.users)
    }

    pub fn workers(&self) -> MutexGuard<'_, WorkerFilters> {
        lock(&self.workers)
    }

    pub fn bookings(&self) -> MutexGuard<'_, BookingFilters> {
        lock(&self.bookings)
    }

    pub fn subscriptions(&self) -> MutexGuard<'_, SubscriptionFilters> {
        lock(&self.subscriptions)
    }

    pub fn withdrawals(&self) -> MutexGuard<'_, WithdrawalFilters> {
        lock(&self.withdrawals)
    }

    pub fn worker_tasks(&self) -> MutexGuard<'_, WorkerTaskFilters> {
        lock(&self.worker_tasks)
    }

    /// Back to defaults, e.g. after sign-out.
    pub fn reset(&self) {
        *self.users() = UserFilters::default();
        *self.workers() = WorkerFilters::default();
        *self.bookings() = BookingFilters::default();
        *self.subscriptions() = SubscriptionFilters::default();
        *self.withdrawals() = WithdrawalFilters::default();
        *self.worker_tasks() = WorkerTaskFilters::default();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
