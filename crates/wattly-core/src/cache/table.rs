// ── Explicit query cache table ──
//
// One slot per `QueryKey`, each holding the last fetched value with its
// fetch and access times. The cache is an explicitly constructed object
// owned by the store; there is no ambient global instance.
//
// Ordering guarantee: within a single key at most one fetch is in flight
// at a time. All fetches for a key serialize on a per-key async lock and
// re-check the slot after acquiring it, so a second trigger joins the
// first fetch's result instead of issuing a duplicate request.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::key::{QueryKey, QueryPolicy};
use crate::error::CoreError;

/// Base delay between automatic retries; grows linearly per attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(200);

struct Slot {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
    last_access: Instant,
    invalidated: bool,
}

enum SlotState<T> {
    Fresh(Arc<T>),
    Stale(Arc<T>),
    Empty,
}

/// Process-wide cache table shared by all read operations.
pub struct QueryCache {
    slots: DashMap<QueryKey, Slot>,
    locks: DashMap<QueryKey, Arc<Mutex<()>>>,
    in_flight: DashMap<QueryKey, ()>,
    /// Per-key invalidation counter. A fetch snapshots it before going
    /// to the network; a mismatch on completion means an invalidation
    /// landed mid-flight and the fetched value must not be served fresh.
    epochs: DashMap<QueryKey, u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            locks: DashMap::new(),
            in_flight: DashMap::new(),
            epochs: DashMap::new(),
        }
    }

    // ── Read path ────────────────────────────────────────────────────

    /// Resolve `key` through the cache.
    ///
    /// - fresh cached value: returned as-is, no network;
    /// - stale cached value: returned as-is, with a silent background
    ///   re-fetch scheduled;
    /// - missing, expired, or invalidated: fetched in the foreground with
    ///   the key's retry budget.
    pub async fn query<T, F, Fut>(
        self: &Arc<Self>,
        key: QueryKey,
        fetch: F,
    ) -> Result<Arc<T>, CoreError>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, wattly_api::Error>> + Send + 'static,
    {
        self.evict_expired();
        let policy = key.policy();

        match self.slot_state::<T>(&key, policy) {
            SlotState::Fresh(value) => Ok(value),
            SlotState::Stale(value) => {
                self.spawn_revalidate(key, policy, fetch);
                Ok(value)
            }
            SlotState::Empty => self.fetch_locked(&key, policy, &fetch).await,
        }
    }

    /// Non-blocking look at whatever is cached for `key` right now.
    ///
    /// Does not count as an access for retention purposes and never
    /// triggers a fetch.
    pub fn peek<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let slot = self.slots.get(key)?;
        if slot.invalidated {
            return None;
        }
        Arc::downcast::<T>(Arc::clone(&slot.value)).ok()
    }

    // ── Invalidation ─────────────────────────────────────────────────

    /// Mark exactly the named slots stale, regardless of their staleness
    /// window. The next read for each key re-fetches in the foreground.
    /// No other key is affected. The epoch bump also covers a fetch
    /// currently in flight for the key: its result lands already stale.
    pub fn invalidate(&self, keys: &[QueryKey]) {
        for key in keys {
            *self.epochs.entry(key.clone()).or_insert(0) += 1;
            if let Some(mut slot) = self.slots.get_mut(key) {
                slot.invalidated = true;
                debug!(key = key.name(), "cache slot invalidated");
            }
        }
    }

    /// Drop every cached value and in-flight marker (reset/teardown).
    pub fn clear(&self) {
        self.slots.clear();
        self.locks.clear();
        self.in_flight.clear();
        self.epochs.clear();
    }

    // ── In-flight state ──────────────────────────────────────────────

    /// `true` while a fetch (foreground or background) runs for `key`.
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.in_flight.contains_key(key)
    }

    /// `true` while any fetch is running.
    pub fn any_fetching(&self) -> bool {
        !self.in_flight.is_empty()
    }

    // ── Internals ────────────────────────────────────────────────────

    fn slot_state<T: Send + Sync + 'static>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
    ) -> SlotState<T> {
        let Some(mut slot) = self.slots.get_mut(key) else {
            return SlotState::Empty;
        };
        slot.last_access = Instant::now();
        if slot.invalidated {
            return SlotState::Empty;
        }
        let Ok(value) = Arc::downcast::<T>(Arc::clone(&slot.value)) else {
            return SlotState::Empty;
        };
        if slot.fetched_at.elapsed() < policy.stale_after {
            SlotState::Fresh(value)
        } else {
            SlotState::Stale(value)
        }
    }

    /// Fresh-only variant used to re-check after acquiring the fetch lock.
    fn peek_fresh<T: Send + Sync + 'static>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
    ) -> Option<Arc<T>> {
        match self.slot_state::<T>(key, policy) {
            SlotState::Fresh(value) => Some(value),
            _ => None,
        }
    }

    fn lock_for(&self, key: &QueryKey) -> Arc<Mutex<()>> {
        Arc::clone(
            &self
                .locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    fn epoch(&self, key: &QueryKey) -> u64 {
        self.epochs.get(key).map_or(0, |e| *e)
    }

    fn store_value(&self, key: QueryKey, value: Arc<dyn Any + Send + Sync>, invalidated: bool) {
        let now = Instant::now();
        self.slots.insert(
            key,
            Slot {
                value,
                fetched_at: now,
                last_access: now,
                invalidated,
            },
        );
    }

    fn evict_expired(&self) {
        self.slots
            .retain(|key, slot| slot.last_access.elapsed() <= key.policy().expire_after);
    }

    async fn fetch_locked<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
        fetch: &F,
    ) -> Result<Arc<T>, CoreError>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, wattly_api::Error>> + Send,
    {
        let lock = self.lock_for(key);
        let _guard = lock.lock().await;

        // A concurrent caller may have completed the fetch while we waited.
        if let Some(value) = self.peek_fresh::<T>(key, policy) {
            return Ok(value);
        }

        let started_epoch = self.epoch(key);
        self.in_flight.insert(key.clone(), ());
        let result = fetch_with_retry(key, policy, fetch).await;
        self.in_flight.remove(key);

        match result {
            Ok(value) => {
                let value = Arc::new(value);
                // An invalidation that landed while the request was in
                // flight must not be masked by its response.
                let stale = self.epoch(key) != started_epoch;
                self.store_value(
                    key.clone(),
                    Arc::clone(&value) as Arc<dyn Any + Send + Sync>,
                    stale,
                );
                Ok(value)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Schedule a silent background re-fetch for a stale slot. Skipped
    /// when a fetch for the key is already running.
    fn spawn_revalidate<T, F, Fut>(self: &Arc<Self>, key: QueryKey, policy: QueryPolicy, fetch: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, wattly_api::Error>> + Send + 'static,
    {
        if self.in_flight.insert(key.clone(), ()).is_some() {
            return;
        }

        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let lock = cache.lock_for(&key);
            let guard = lock.lock().await;

            if cache.peek_fresh::<T>(&key, policy).is_none() {
                let started_epoch = cache.epoch(&key);
                match fetch_with_retry(&key, policy, &fetch).await {
                    Ok(value) => {
                        let stale = cache.epoch(&key) != started_epoch;
                        cache.store_value(key.clone(), Arc::new(value), stale);
                    }
                    Err(err) => {
                        // The stale value stays served until retention runs out.
                        debug!(key = key.name(), error = %err, "background revalidation failed");
                    }
                }
            }

            drop(guard);
            cache.in_flight.remove(&key);
        });
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_with_retry<T, F, Fut>(
    key: &QueryKey,
    policy: QueryPolicy,
    fetch: &F,
) -> Result<T, wattly_api::Error>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, wattly_api::Error>> + Send,
{
    let mut attempt: u32 = 0;
    loop {
        match fetch().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.retries => {
                attempt += 1;
                warn!(key = key.name(), error = %err, attempt, "read failed, retrying");
                tokio::time::sleep(RETRY_BASE_DELAY * attempt).await;
            }
            Err(err) => {
                warn!(key = key.name(), error = %err, "read failed, retry budget exhausted");
                return Err(err);
            }
        }
    }
}
