//! Client-side query cache.
//!
//! Reads are cached per [`QueryKey`] for a staleness window and deduplicated
//! while in flight. Mutations run under the same retry policy and, once they
//! succeed, invalidate every cached key under the prefixes they name.

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    future::Future,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use serde::Serialize;

use crate::client::{ClientError, ClientResult};

pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(root: &str) -> Self {
        Self(vec![root.to_string()])
    }

    pub fn with(mut self, part: impl ToString) -> Self {
        self.0.push(part.to_string());
        self
    }

    /// Append serialized filter params. Each distinct filter set becomes its
    /// own cache entry.
    pub fn with_params<P: Serialize>(self, params: &P) -> Self {
        let encoded = serde_json::to_string(params).unwrap_or_default();
        self.with(encoded)
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn with_base_delay(base_delay: Duration) -> Self {
        Self {
            base_delay,
            ..Self::default()
        }
    }

    /// `failure_count` is the number of failures seen before this one.
    pub fn should_retry(&self, failure_count: u32, err: &ClientError) -> bool {
        err.is_retryable() && failure_count < self.max_retries
    }

    pub fn delay(&self, failure_count: u32) -> Duration {
        let factor = 2u32.saturating_pow(failure_count);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> ClientResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let mut failures = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if self.should_retry(failures, &err) => {
                    let delay = self.delay(failures);
                    tracing::debug!(label, attempt = failures + 1, ?delay, error = %err, "retrying");
                    failures += 1;
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

type CachedValue = Arc<dyn Any + Send + Sync>;

struct CacheEntry {
    value: CachedValue,
    fetched_at: Instant,
    invalidated: bool,
}

impl CacheEntry {
    fn is_fresh(&self, stale_time: Duration) -> bool {
        !self.invalidated && self.fetched_at.elapsed() < stale_time
    }
}

/// Invalidation history, so a fetch that was in flight across an
/// invalidation stores its result already stale.
#[derive(Default)]
struct Epochs {
    current: u64,
    by_prefix: HashMap<QueryKey, u64>,
    cleared_at: u64,
}

impl Epochs {
    fn bump(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    fn invalidated_since(&self, key: &QueryKey, started: u64) -> bool {
        self.cleared_at > started
            || self
                .by_prefix
                .iter()
                .any(|(prefix, at)| *at > started && key.starts_with(prefix))
    }
}

pub struct QueryClient {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    locks: Mutex<HashMap<QueryKey, Arc<tokio::sync::Mutex<()>>>>,
    epochs: Mutex<Epochs>,
    pending: Mutex<HashMap<&'static str, usize>>,
    retry: RetryPolicy,
    gc_time: Duration,
}

impl QueryClient {
    pub fn new(retry: RetryPolicy, gc_time: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
            epochs: Mutex::new(Epochs::default()),
            pending: Mutex::new(HashMap::new()),
            retry,
            gc_time,
        }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Return the cached value for `key` if it is younger than `stale_time`,
    /// otherwise run `fetcher` (with retries) and cache its result.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, stale_time: Duration, fetcher: F) -> ClientResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(hit) = self.fresh::<T>(&key, stale_time) {
            return Ok(hit);
        }

        let key_lock = self.key_lock(&key);
        let _guard = key_lock.lock().await;

        // Another caller may have filled the entry while we waited.
        if let Some(hit) = self.fresh::<T>(&key, stale_time) {
            return Ok(hit);
        }

        let started = lock(&self.epochs).current;
        let label = key.to_string();
        let value = self.retry.run(&label, fetcher).await?;
        let stale = lock(&self.epochs).invalidated_since(&key, started);
        if stale {
            tracing::debug!(key = %key, "result invalidated while in flight");
        }
        self.store(key, value.clone(), stale);
        Ok(value)
    }

    /// Cached value regardless of freshness.
    pub fn peek<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.entries()
            .get(key)
            .and_then(|entry| entry.value.downcast_ref::<T>().cloned())
    }

    /// Run a mutation. `name` is the in-flight flag; on success every key
    /// under `invalidates` is marked stale.
    pub async fn mutate<T, F, Fut>(&self, name: &'static str, invalidates: &[QueryKey], op: F) -> ClientResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let _pending = PendingGuard::enter(&self.pending, name);
        let value = self.retry.run(name, op).await?;
        for prefix in invalidates {
            self.invalidate(prefix);
        }
        Ok(value)
    }

    pub fn is_pending(&self, name: &str) -> bool {
        lock(&self.pending).get(name).is_some_and(|count| *count > 0)
    }

    /// Mark every entry under `prefix` stale. Returns how many matched.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        {
            let mut epochs = lock(&self.epochs);
            let at = epochs.bump();
            epochs.by_prefix.insert(prefix.clone(), at);
        }
        let mut entries = self.entries();
        let mut matched = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                matched += 1;
            }
        }
        tracing::debug!(prefix = %prefix, matched, "invalidated queries");
        matched
    }

    pub fn clear(&self) {
        {
            let mut epochs = lock(&self.epochs);
            let at = epochs.bump();
            epochs.by_prefix.clear();
            epochs.cleared_at = at;
        }
        self.entries().clear();
        lock(&self.locks).clear();
        tracing::debug!("query cache cleared");
    }

    fn fresh<T: Clone + 'static>(&self, key: &QueryKey, stale_time: Duration) -> Option<T> {
        self.entries()
            .get(key)
            .filter(|entry| entry.is_fresh(stale_time))
            .and_then(|entry| entry.value.downcast_ref::<T>().cloned())
    }

    fn store<T: Send + Sync + 'static>(&self, key: QueryKey, value: T, invalidated: bool) {
        let gc_time = self.gc_time;
        let mut entries = self.entries();
        entries.retain(|_, entry| entry.fetched_at.elapsed() < gc_time);
        entries.insert(
            key,
            CacheEntry {
                value: Arc::new(value),
                fetched_at: Instant::now(),
                invalidated,
            },
        );
        // Keep locks for live entries and for fetches still holding theirs.
        lock(&self.locks)
            .retain(|key, key_lock| entries.contains_key(key) || Arc::strong_count(key_lock) > 1);
    }

    fn key_lock(&self, key: &QueryKey) -> Arc<tokio::sync::Mutex<()>> {
        lock(&self.locks)
            .entry(key.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        lock(&self.entries)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct PendingGuard<'a> {
    pending: &'a Mutex<HashMap<&'static str, usize>>,
    name: &'static str,
}

impl<'a> PendingGuard<'a> {
    fn enter(pending: &'a Mutex<HashMap<&'static str, usize>>, name: &'static str) -> Self {
        *lock(pending).entry(name).or_insert(0) += 1;
        Self { pending, name }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut pending = lock(self.pending);
        if let Some(count) = pending.get_mut(self.name) {
            *count = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching_is_segment_wise() {
        let list = QueryKey::new("withdrawal-requests").with("{\"page\":1}");
        assert!(list.starts_with(&QueryKey::new("withdrawal-requests")));
        assert!(!list.starts_with(&QueryKey::new("withdrawal-request")));
        assert!(!QueryKey::new("withdrawal-request").with("W1").starts_with(&list));
    }

    #[tokio::test]
    async fn pruning_drops_locks_of_collected_entries() {
        let client = QueryClient::new(RetryPolicy::with_base_delay(Duration::ZERO), Duration::ZERO);
        for page in 0..5 {
            let key = QueryKey::new("users").with(page);
            let value = client
                .fetch(key, DEFAULT_STALE_TIME, move || async move { Ok::<_, ClientError>(page) })
                .await
                .unwrap();
            assert_eq!(value, page);
        }
        assert_eq!(lock(&client.locks).len(), 1);
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(10), Duration::from_secs(30));
    }
}
