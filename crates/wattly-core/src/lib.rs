// wattly-core: Cached data layer between wattly-api and consumers.
//
// Reads go through an explicit query cache with per-operation staleness,
// retention, and retry budgets; writes are one-shot mutations that
// invalidate a fixed set of cache keys on success.

pub mod cache;
pub mod config;
pub mod error;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{QueryCache, QueryKey, QueryPolicy};
pub use config::ClientConfig;
pub use error::CoreError;
pub use store::{DashboardSnapshot, DashboardView, EnergyStore};

// Re-export wire types at the crate root for ergonomics.
pub use wattly_api::{
    Alert, AlertKind, AlertUpdate, ConsumptionRecord, CurrentConsumption, DailyConsumption,
    EnergyKind, EnergyValue, MonthlyConsumption, NewAlert, NewConsumptionRecord,
    NewDailyConsumption, NewMonthlyConsumption,
};
