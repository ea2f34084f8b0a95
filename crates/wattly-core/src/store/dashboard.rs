// ── Aggregate dashboard view ──
//
// The landing page needs four independent reads. They are fired
// concurrently and resolve independently: one constituent failing never
// blocks the others, and partial data stays visible.

use std::sync::Arc;

use wattly_api::{Alert, CurrentConsumption, DailyConsumption, MonthlyConsumption};

use super::EnergyStore;
use crate::cache::QueryKey;
use crate::error::CoreError;

/// Result of one concurrent dashboard refresh.
///
/// Constituents are exposed independently; a failed one is `None` with
/// its error collected in `errors`.
#[derive(Debug, Default)]
pub struct DashboardView {
    pub current_consumption: Option<Arc<CurrentConsumption>>,
    pub monthly_data: Option<Arc<Vec<MonthlyConsumption>>>,
    pub weekly_data: Option<Arc<Vec<DailyConsumption>>>,
    pub alerts: Option<Arc<Vec<Alert>>>,
    pub errors: Vec<CoreError>,
}

impl DashboardView {
    /// `true` if any constituent failed.
    pub fn is_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Non-blocking view of whatever the cache holds right now, for
/// progressive rendering while fetches are still in flight.
#[derive(Debug, Default)]
pub struct DashboardSnapshot {
    pub current_consumption: Option<Arc<CurrentConsumption>>,
    pub monthly_data: Option<Arc<Vec<MonthlyConsumption>>>,
    pub weekly_data: Option<Arc<Vec<DailyConsumption>>>,
    pub alerts: Option<Arc<Vec<Alert>>>,
    /// Some constituent has never resolved.
    pub is_loading: bool,
    /// Some constituent has a request in flight (including background
    /// refresh of a stale value).
    pub is_fetching: bool,
}

const DASHBOARD_KEYS: [QueryKey; 4] = [
    QueryKey::CurrentConsumption,
    QueryKey::MonthlyData,
    QueryKey::WeeklyData,
    QueryKey::Alerts,
];

impl EnergyStore {
    /// Fetch all four dashboard constituents concurrently.
    pub async fn dashboard(&self) -> DashboardView {
        let (current, monthly, weekly, alerts) = tokio::join!(
            self.current_consumption(),
            self.monthly_data(),
            self.weekly_data(),
            self.alerts(),
        );

        let mut view = DashboardView::default();
        match current {
            Ok(value) => view.current_consumption = Some(value),
            Err(err) => view.errors.push(err),
        }
        match monthly {
            Ok(value) => view.monthly_data = Some(value),
            Err(err) => view.errors.push(err),
        }
        match weekly {
            Ok(value) => view.weekly_data = Some(value),
            Err(err) => view.errors.push(err),
        }
        match alerts {
            Ok(value) => view.alerts = Some(value),
            Err(err) => view.errors.push(err),
        }
        view
    }

    /// Current cached dashboard state without touching the network.
    pub fn dashboard_snapshot(&self) -> DashboardSnapshot {
        let cache = self.cache();
        let current_consumption = cache.peek::<CurrentConsumption>(&QueryKey::CurrentConsumption);
        let monthly_data = cache.peek::<Vec<MonthlyConsumption>>(&QueryKey::MonthlyData);
        let weekly_data = cache.peek::<Vec<DailyConsumption>>(&QueryKey::WeeklyData);
        let alerts = cache.peek::<Vec<Alert>>(&QueryKey::Alerts);

        let is_loading = current_consumption.is_none()
            || monthly_data.is_none()
            || weekly_data.is_none()
            || alerts.is_none();
        let is_fetching = DASHBOARD_KEYS.iter().any(|key| cache.is_fetching(key));

        DashboardSnapshot {
            current_consumption,
            monthly_data,
            weekly_data,
            alerts,
            is_loading,
            is_fetching,
        }
    }
}
