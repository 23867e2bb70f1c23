//! In-process query cache.
//!
//! [`QueryClient`] stores the result of every fetched query under its
//! [`QueryKey`] and coordinates concurrent readers:
//!
//! - a fresh entry is served from memory;
//! - readers of the same key share one in-flight request;
//! - [`QueryClient::invalidate`] marks every entry under a prefix stale so the
//!   next read refetches.
//!
//! Each entry carries a generation number. Invalidation bumps it, and a
//! response that lands for an older generation is discarded and the fetch is
//! run again. A list request that was already in flight when a delete
//! succeeded can therefore never repopulate the cache with the deleted row.
//!
//! Failed fetches leave cached data untouched and are never retried.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use metrics::counter;
use tracing::{debug, instrument, warn};
use unirecords_config::QueryCacheConfig;
use unirecords_core::ApiError;

use crate::keys::QueryKey;
use crate::lock::mutex_lock;

type CachedValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<CachedValue, ApiError>>>;

struct InFlight {
    id: u64,
    generation: u64,
    future: SharedFetch,
}

#[derive(Default)]
struct Entry {
    data: Option<CachedValue>,
    updated_at: Option<Instant>,
    invalidated: bool,
    generation: u64,
    in_flight: Option<InFlight>,
    touched: u64,
}

impl Entry {
    fn is_fresh(&self, config: &QueryCacheConfig) -> bool {
        !self.invalidated
            && self.data.is_some()
            && self
                .updated_at
                .is_some_and(|at| at.elapsed() < config.stale_time)
    }

    fn is_stale(&self, config: &QueryCacheConfig) -> bool {
        !self.is_fresh(config)
    }

    /// Whether a request for the current generation is running.
    fn is_fetching(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|f| f.generation == self.generation)
    }
}

enum Lookup<T> {
    Hit(Arc<T>),
    Wait {
        id: u64,
        generation: u64,
        future: SharedFetch,
    },
}

enum Settled<T> {
    Done(Result<Arc<T>, ApiError>),
    Superseded,
}

/// Snapshot of one cached query.
#[derive(Debug)]
pub struct QueryState<T> {
    pub data: Option<Arc<T>>,
    /// Invalidated, or older than the configured stale time.
    pub is_stale: bool,
    pub is_fetching: bool,
    pub updated_at: Option<Instant>,
}

struct Inner {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    config: QueryCacheConfig,
    clock: AtomicU64,
}

/// Handle to a query cache. Clones share the same cache.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryClient")
            .field("config", &self.inner.config)
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(QueryCacheConfig::default())
    }
}

impl QueryClient {
    pub fn new(config: QueryCacheConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
                config,
                clock: AtomicU64::new(1),
            }),
        }
    }

    pub fn config(&self) -> &QueryCacheConfig {
        &self.inner.config
    }

    /// Returns the query's data, fetching it with `fetcher` unless a fresh
    /// copy is cached.
    ///
    /// Concurrent callers for the same key and generation share a single
    /// call to `fetcher`. `fetcher` only builds the request future; it must
    /// not use this client synchronously.
    #[instrument(skip(self, fetcher), fields(cache.key = %key))]
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Arc<T>, ApiError>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        loop {
            let (id, generation, future) = match self.lookup(&key, &fetcher) {
                Lookup::Hit(data) => return Ok(data),
                Lookup::Wait {
                    id,
                    generation,
                    future,
                } => (id, generation, future),
            };

            let outcome = future.await;

            match self.settle::<T>(&key, id, generation, outcome) {
                Settled::Done(result) => return result,
                Settled::Superseded => {
                    counter!("query_cache_superseded_total").increment(1);
                    debug!(cache.key = %key, generation, "Discarding superseded response; refetching");
                }
            }
        }
    }

    fn lookup<T, F, Fut>(&self, key: &QueryKey, fetcher: &F) -> Lookup<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let mut entries = mutex_lock(&self.inner.entries, "fetch");
        let tick = self.tick();
        let entry = entries.entry(key.clone()).or_default();
        entry.touched = tick;

        if entry.is_fresh(&self.inner.config) {
            if let Some(data) = entry.data.clone().and_then(|d| d.downcast::<T>().ok()) {
                counter!("query_cache_hits_total").increment(1);
                debug!(cache.key = %key, "Query cache hit");
                return Lookup::Hit(data);
            }
        }

        if let Some(in_flight) = entry
            .in_flight
            .as_ref()
            .filter(|f| f.generation == entry.generation)
        {
            counter!("query_cache_joins_total").increment(1);
            debug!(cache.key = %key, generation = in_flight.generation, "Joining in-flight query");
            return Lookup::Wait {
                id: in_flight.id,
                generation: in_flight.generation,
                future: in_flight.future.clone(),
            };
        }

        counter!("query_cache_misses_total").increment(1);
        debug!(cache.key = %key, generation = entry.generation, "Query cache miss; fetching");

        let request = fetcher();
        let future = async move { request.await.map(|value| Arc::new(value) as CachedValue) }
            .boxed()
            .shared();
        let generation = entry.generation;
        entry.in_flight = Some(InFlight {
            id: tick,
            generation,
            future: future.clone(),
        });

        self.evict_over_capacity(&mut entries, key);

        Lookup::Wait {
            id: tick,
            generation,
            future,
        }
    }

    fn settle<T>(
        &self,
        key: &QueryKey,
        id: u64,
        generation: u64,
        outcome: Result<CachedValue, ApiError>,
    ) -> Settled<T>
    where
        T: Send + Sync + 'static,
    {
        let mut entries = mutex_lock(&self.inner.entries, "settle");

        let Some(entry) = entries.get_mut(key) else {
            debug!(cache.key = %key, "Query removed while in flight; result not cached");
            return Settled::Done(downcast(outcome));
        };

        let owns_request = entry.in_flight.as_ref().is_some_and(|f| f.id == id);

        if entry.generation != generation {
            if owns_request {
                entry.in_flight = None;
            }
            return Settled::Superseded;
        }

        if owns_request {
            entry.in_flight = None;

            match &outcome {
                Ok(value) => {
                    entry.data = Some(value.clone());
                    entry.updated_at = Some(Instant::now());
                    entry.invalidated = false;
                    entry.touched = self.tick();
                }
                Err(e) => {
                    counter!("query_cache_errors_total").increment(1);
                    warn!(cache.key = %key, error = %e, "Query failed; cached data left untouched");
                    if entry.data.is_none() {
                        entries.remove(key);
                    }
                }
            }
        }

        Settled::Done(downcast(outcome))
    }

    /// Marks every cached query under `prefix` stale.
    ///
    /// Queries with a request in flight have that response discarded when it
    /// lands. Nothing is fetched here; the next read refetches. Entries that
    /// are already stale with nothing in flight are left alone, so repeated
    /// invalidation never causes more than one refetch.
    ///
    /// Returns the number of entries newly marked.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = mutex_lock(&self.inner.entries, "invalidate");
        let mut marked = 0;

        for (key, entry) in entries.iter_mut().filter(|(k, _)| k.starts_with(prefix)) {
            let fetching = entry.is_fetching();

            if entry.data.is_none() && !fetching {
                continue;
            }
            if entry.invalidated && !fetching {
                continue;
            }

            entry.invalidated = true;
            entry.generation += 1;
            marked += 1;
            debug!(cache.key = %key, generation = entry.generation, "Query invalidated");
        }

        counter!("query_cache_invalidations_total").increment(marked as u64);
        debug!(cache.prefix = %prefix, cache.invalidated = marked, "Invalidation complete");

        marked
    }

    /// Invalidates several prefixes; returns the total number of entries
    /// marked.
    pub fn invalidate_all<'a, I>(&self, prefixes: I) -> usize
    where
        I: IntoIterator<Item = &'a QueryKey>,
    {
        prefixes.into_iter().map(|prefix| self.invalidate(prefix)).sum()
    }

    /// Cached data for `key`, stale or not.
    pub fn get_query_data<T>(&self, key: &QueryKey) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let entries = mutex_lock(&self.inner.entries, "get_query_data");
        entries
            .get(key)
            .and_then(|e| e.data.clone())
            .and_then(|d| d.downcast::<T>().ok())
    }

    /// Stores `value` as fresh data for `key`.
    ///
    /// A request already in flight for `key` is superseded.
    pub fn set_query_data<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        let mut entries = mutex_lock(&self.inner.entries, "set_query_data");
        let tick = self.tick();
        let entry = entries.entry(key.clone()).or_default();

        entry.data = Some(Arc::new(value));
        entry.updated_at = Some(Instant::now());
        entry.invalidated = false;
        entry.touched = tick;
        if entry.in_flight.is_some() {
            entry.generation += 1;
        }

        debug!(cache.key = %key, "Query data set");
        self.evict_over_capacity(&mut entries, &key);
    }

    pub fn state<T>(&self, key: &QueryKey) -> Option<QueryState<T>>
    where
        T: Send + Sync + 'static,
    {
        let entries = mutex_lock(&self.inner.entries, "state");
        entries.get(key).map(|entry| QueryState {
            data: entry.data.clone().and_then(|d| d.downcast::<T>().ok()),
            is_stale: entry.is_stale(&self.inner.config),
            is_fetching: entry.is_fetching(),
            updated_at: entry.updated_at,
        })
    }

    /// Whether the cached query for `key` would be refetched on the next
    /// read. `None` when nothing is cached.
    pub fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        let entries = mutex_lock(&self.inner.entries, "is_stale");
        entries
            .get(key)
            .filter(|e| e.data.is_some())
            .map(|e| e.is_stale(&self.inner.config))
    }

    /// Whether `key` has been invalidated since its last successful fetch.
    /// Unlike [`Self::is_stale`] this ignores the stale time.
    pub fn is_invalidated(&self, key: &QueryKey) -> Option<bool> {
        let entries = mutex_lock(&self.inner.entries, "is_invalidated");
        entries
            .get(key)
            .filter(|e| e.data.is_some())
            .map(|e| e.invalidated)
    }

    /// Drops every query under `prefix`. Requests in flight for them still
    /// complete for their callers but are not cached.
    pub fn remove(&self, prefix: &QueryKey) -> usize {
        let mut entries = mutex_lock(&self.inner.entries, "remove");
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        debug!(cache.prefix = %prefix, cache.removed = removed, "Queries removed");
        removed
    }

    pub fn clear(&self) {
        let mut entries = mutex_lock(&self.inner.entries, "clear");
        entries.clear();
        debug!("Query cache cleared");
    }

    pub fn len(&self) -> usize {
        mutex_lock(&self.inner.entries, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached keys in sorted order.
    pub fn keys(&self) -> Vec<QueryKey> {
        let entries = mutex_lock(&self.inner.entries, "keys");
        let mut keys: Vec<QueryKey> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn tick(&self) -> u64 {
        self.inner.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Evicts the least recently used idle entries until the table fits.
    /// `keep` is never evicted.
    fn evict_over_capacity(&self, entries: &mut HashMap<QueryKey, Entry>, keep: &QueryKey) {
        while entries.len() > self.inner.config.max_entries {
            let victim = entries
                .iter()
                .filter(|(key, entry)| *key != keep && entry.in_flight.is_none())
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(key, _)| key.clone());

            let Some(victim) = victim else { break };
            entries.remove(&victim);
            counter!("query_cache_evictions_total").increment(1);
            debug!(cache.key = %victim, "Query evicted");
        }
    }
}

fn downcast<T>(outcome: Result<CachedValue, ApiError>) -> Result<Arc<T>, ApiError>
where
    T: Send + Sync + 'static,
{
    outcome.and_then(|value| {
        value
            .downcast::<T>()
            .map_err(|_| ApiError::decode("cached query data has an unexpected type"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{departments, faculties};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::Notify;
    use unirecords_models::{DepartmentId, DepartmentListParams, FacultyId, FacultyListParams};

    fn long_lived() -> QueryClient {
        QueryClient::new(QueryCacheConfig::default().with_stale_time(Duration::from_secs(300)))
    }

    fn counting(
        calls: &Arc<AtomicUsize>,
        value: &'static str,
    ) -> impl Fn() -> BoxFuture<'static, Result<&'static str, ApiError>> + Send + Sync {
        let calls = calls.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(value) }.boxed()
        }
    }

    fn list_key() -> QueryKey {
        faculties::list(&FacultyListParams::default())
    }

    #[tokio::test]
    async fn test_fresh_data_is_served_from_cache() {
        let client = long_lived();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = client.fetch(list_key(), counting(&calls, "a")).await.unwrap();
        let second = client.fetch(list_key(), counting(&calls, "b")).await.unwrap();

        assert_eq!(*first, "a");
        assert_eq!(*second, "a");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_stale_time_refetches() {
        let client = QueryClient::default();
        let calls = Arc::new(AtomicUsize::new(0));

        client.fetch(list_key(), counting(&calls, "a")).await.unwrap();
        client.fetch(list_key(), counting(&calls, "a")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(client.is_stale(&list_key()), Some(true));
        assert_eq!(client.is_invalidated(&list_key()), Some(false));
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_request() {
        let client = long_lived();
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = {
            let calls = calls.clone();
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok::<_, ApiError>(vec![1, 2, 3])
                }
            }
        };

        let (a, b) = tokio::join!(
            client.fetch(list_key(), fetcher.clone()),
            client.fetch(list_key(), fetcher)
        );

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidating_lists_keeps_details() {
        let client = long_lived();
        let detail = faculties::detail(&FacultyId::new("fac_1"));
        client.set_query_data(list_key(), "list");
        client.set_query_data(detail.clone(), "detail");

        assert_eq!(client.invalidate(&faculties::lists()), 1);

        assert_eq!(client.is_stale(&list_key()), Some(true));
        assert_eq!(client.is_stale(&detail), Some(false));
        assert_eq!(client.get_query_data::<&str>(&detail).as_deref(), Some(&"detail"));
    }

    #[tokio::test]
    async fn test_invalidating_one_detail_keeps_others() {
        let client = long_lived();
        let one = departments::detail(&DepartmentId::new("dep_1"));
        let two = departments::detail(&DepartmentId::new("dep_2"));
        client.set_query_data(one.clone(), 1_u32);
        client.set_query_data(two.clone(), 2_u32);

        client.invalidate(&one);

        assert_eq!(client.is_stale(&one), Some(true));
        assert_eq!(client.is_stale(&two), Some(false));
        assert_eq!(client.get_query_data::<u32>(&two).as_deref(), Some(&2));
    }

    #[tokio::test]
    async fn test_invalidating_family_root_reaches_everything() {
        let client = long_lived();
        let list = departments::list(&DepartmentListParams::for_faculty(FacultyId::new("fac_1")));
        let detail = departments::detail(&DepartmentId::new("dep_1"));
        let by_code = departments::by_code("CSC");
        let other_family = faculties::detail(&FacultyId::new("fac_1"));
        for key in [&list, &detail, &by_code, &other_family] {
            client.set_query_data(key.clone(), ());
        }

        assert_eq!(client.invalidate(&departments::all()), 3);

        assert_eq!(client.is_stale(&list), Some(true));
        assert_eq!(client.is_stale(&detail), Some(true));
        assert_eq!(client.is_stale(&by_code), Some(true));
        assert_eq!(client.is_stale(&other_family), Some(false));
    }

    #[tokio::test]
    async fn test_repeated_invalidation_is_a_noop() {
        let client = long_lived();
        let calls = Arc::new(AtomicUsize::new(0));

        client.fetch(list_key(), counting(&calls, "a")).await.unwrap();
        assert_eq!(client.invalidate(&faculties::all()), 1);
        assert_eq!(client.invalidate(&faculties::all()), 0);
        assert_eq!(client.invalidate(&list_key()), 0);

        client.fetch(list_key(), counting(&calls, "a")).await.unwrap();
        client.fetch(list_key(), counting(&calls, "a")).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_never_fetches() {
        let client = long_lived();
        client.set_query_data(list_key(), "a");
        client.invalidate(&faculties::all());
        assert!(!client.state::<&str>(&list_key()).unwrap().is_fetching);
    }

    #[tokio::test]
    async fn test_invalidation_wins_over_in_flight_response() {
        let client = long_lived();
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());

        let fetcher = {
            let calls = calls.clone();
            let gate = gate.clone();
            move || {
                let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
                let gate = gate.clone();
                async move {
                    if call == 1 {
                        gate.notified().await;
                        Ok::<_, ApiError>("before delete")
                    } else {
                        Ok("after delete")
                    }
                }
            }
        };

        let reader = tokio::spawn({
            let client = client.clone();
            async move { client.fetch(list_key(), fetcher).await }
        });

        while calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(client.invalidate(&faculties::lists()), 1);
        gate.notify_one();

        let data = reader.await.unwrap().unwrap();
        assert_eq!(*data, "after delete");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(client.get_query_data::<&str>(&list_key()).as_deref(), Some(&"after delete"));
        assert_eq!(client.is_stale(&list_key()), Some(false));
    }

    #[tokio::test]
    async fn test_failure_leaves_cached_data_and_is_not_retried() {
        let client = long_lived();
        let calls = Arc::new(AtomicUsize::new(0));
        client.set_query_data(list_key(), "cached");
        client.invalidate(&list_key());

        let failing = {
            let calls = calls.clone();
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<&str, _>(ApiError::transport("connection refused")) }
            }
        };

        let err = client.fetch(list_key(), failing).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.get_query_data::<&str>(&list_key()).as_deref(), Some(&"cached"));
        assert_eq!(client.is_invalidated(&list_key()), Some(true));
    }

    #[tokio::test]
    async fn test_failed_first_fetch_caches_nothing() {
        let client = long_lived();
        let result = client
            .fetch(list_key(), || async { Err::<(), _>(ApiError::not_found("Faculty not found")) })
            .await;

        assert!(result.unwrap_err().is_not_found());
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let client = QueryClient::new(
            QueryCacheConfig::default()
                .with_stale_time(Duration::from_secs(300))
                .with_max_entries(2),
        );
        let a = faculties::detail(&FacultyId::new("a"));
        let b = faculties::detail(&FacultyId::new("b"));
        let c = faculties::detail(&FacultyId::new("c"));

        client.set_query_data(a.clone(), 1);
        client.set_query_data(b.clone(), 2);
        client.set_query_data(c.clone(), 3);

        assert_eq!(client.len(), 2);
        assert!(client.get_query_data::<i32>(&a).is_none());
        assert_eq!(client.keys(), vec![b, c]);
    }

    #[tokio::test]
    async fn test_remove_by_prefix() {
        let client = long_lived();
        client.set_query_data(list_key(), 1);
        client.set_query_data(faculties::detail(&FacultyId::new("fac_1")), 2);
        client.set_query_data(departments::lists(), 3);

        assert_eq!(client.remove(&faculties::all()), 2);
        assert_eq!(client.len(), 1);

        client.clear();
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn test_type_mismatch_is_a_miss() {
        let client = long_lived();
        client.set_query_data(list_key(), 7_u64);

        let value = client
            .fetch(list_key(), || async { Ok::<_, ApiError>("text") })
            .await
            .unwrap();
        assert_eq!(*value, "text");
    }
}
