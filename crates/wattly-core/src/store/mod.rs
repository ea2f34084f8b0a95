// ── Energy data store ──
//
// The facade consumers talk to: binds every API read to a cache slot
// with its freshness policy, and every mutation to its invalidation set.

mod dashboard;
mod mutations;
mod reads;

use std::sync::Arc;

use wattly_api::ApiClient;

use crate::cache::{QueryCache, QueryKey};
use crate::config::ClientConfig;
use crate::error::CoreError;

pub use dashboard::{DashboardSnapshot, DashboardView};

/// Cached, auto-revalidating view of the energy backend.
///
/// Owns the API client and the query cache; explicitly constructed and
/// passed around rather than living in ambient global state. Cheap to
/// share behind an `Arc`.
pub struct EnergyStore {
    api: ApiClient,
    cache: Arc<QueryCache>,
}

impl EnergyStore {
    /// Build a store for the backend described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        Ok(Self::from_api(config.api_client()?))
    }

    /// Wrap an existing API client (tests inject a mock-server client here).
    pub fn from_api(api: ApiClient) -> Self {
        Self {
            api,
            cache: Arc::new(QueryCache::new()),
        }
    }

    /// The underlying API client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Drop all cached data (logout/reset).
    pub fn reset(&self) {
        self.cache.clear();
    }

    /// `true` while a fetch for `key` is in flight.
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.cache.is_fetching(key)
    }

    pub(crate) fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }
}
