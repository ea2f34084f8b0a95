// wattly-api: Typed async client for the energy-consumption backend.
//
// One method per backend endpoint, a shared transport with a hard
// per-request timeout, and wire types matching the JSON contract.
// Freshness, retries, and cache invalidation live in wattly-core.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::Error;
pub use types::{
    Alert, AlertKind, AlertUpdate, ConsumptionRecord, CurrentConsumption, DailyConsumption,
    EnergyKind, EnergyValue, MonthlyConsumption, NewAlert, NewConsumptionRecord,
    NewDailyConsumption, NewMonthlyConsumption,
};
