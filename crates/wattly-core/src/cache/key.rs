// ── Cache keys and freshness policy ──
//
// A `QueryKey` is the operation name plus its parameters; two reads with
// the same key share one cache slot. Invalidation is exact-key: the
// parameterized lookups (`DailyByDate`, `AlertsByKind`, ...) are distinct
// roots from the dashboard lists and are never invalidated alongside them.

use std::time::Duration;

use chrono::NaiveDate;
use wattly_api::{AlertKind, EnergyKind};

/// Identity of one cached read operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    CurrentConsumption,
    MonthlyData,
    WeeklyData,
    DailyData,
    Alerts,
    RecordsByKind(EnergyKind),
    RecordsByDateRange(NaiveDate, NaiveDate),
    TotalConsumption(EnergyKind, NaiveDate, NaiveDate),
    DailyByDate(NaiveDate),
    DailyByDateRange(NaiveDate, NaiveDate),
    MonthlyByMonth(i32, u32),
    MonthlyByYear(i32),
    MonthlyAll,
    AlertsByKind(AlertKind),
}

/// Freshness and retry budget for one cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    /// After this, a cached value is still served but triggers a silent
    /// background re-fetch on access.
    pub stale_after: Duration,

    /// After this long without access, the slot is evicted entirely.
    /// Always >= `stale_after`.
    pub expire_after: Duration,

    /// Automatic retries on a failed fetch before the error surfaces.
    pub retries: u32,
}

impl QueryPolicy {
    const fn new(stale_secs: u64, expire_secs: u64, retries: u32) -> Self {
        Self {
            stale_after: Duration::from_secs(stale_secs),
            expire_after: Duration::from_secs(expire_secs),
            retries,
        }
    }
}

/// Frequently changing data: 1 min fresh, kept 5 min.
const LIVE: QueryPolicy = QueryPolicy::new(60, 300, 2);
/// Slow-moving aggregates: 5 min fresh, kept 10 min.
const AGGREGATE: QueryPolicy = QueryPolicy::new(300, 600, 2);
/// Alerts: 30 s fresh, kept 2 min, a single retry.
const ALERTS: QueryPolicy = QueryPolicy::new(30, 120, 1);

impl QueryKey {
    /// The freshness policy attached to this operation.
    pub const fn policy(&self) -> QueryPolicy {
        match self {
            Self::CurrentConsumption
            | Self::RecordsByKind(_)
            | Self::RecordsByDateRange(..)
            | Self::TotalConsumption(..)
            | Self::DailyByDate(_)
            | Self::DailyByDateRange(..) => LIVE,

            Self::MonthlyData
            | Self::WeeklyData
            | Self::DailyData
            | Self::MonthlyByMonth(..)
            | Self::MonthlyByYear(_)
            | Self::MonthlyAll => AGGREGATE,

            Self::Alerts | Self::AlertsByKind(_) => ALERTS,
        }
    }

    /// Short operation name for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CurrentConsumption => "currentConsumption",
            Self::MonthlyData => "monthlyData",
            Self::WeeklyData => "weeklyData",
            Self::DailyData => "dailyData",
            Self::Alerts => "alerts",
            Self::RecordsByKind(_) => "recordsByType",
            Self::RecordsByDateRange(..) => "recordsByDateRange",
            Self::TotalConsumption(..) => "totalConsumption",
            Self::DailyByDate(_) => "dailyByDate",
            Self::DailyByDateRange(..) => "dailyByDateRange",
            Self::MonthlyByMonth(..) => "monthlyConsumption",
            Self::MonthlyByYear(_) => "monthlyConsumptionByYear",
            Self::MonthlyAll => "allMonthlyConsumption",
            Self::AlertsByKind(_) => "alertsByType",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_always_covers_staleness() {
        let keys = [
            QueryKey::CurrentConsumption,
            QueryKey::MonthlyData,
            QueryKey::WeeklyData,
            QueryKey::DailyData,
            QueryKey::Alerts,
            QueryKey::RecordsByKind(EnergyKind::Gas),
            QueryKey::MonthlyByYear(2024),
            QueryKey::MonthlyAll,
            QueryKey::AlertsByKind(AlertKind::Danger),
        ];
        for key in keys {
            let policy = key.policy();
            assert!(
                policy.expire_after >= policy.stale_after,
                "{} retention shorter than staleness",
                key.name()
            );
        }
    }

    #[test]
    fn alert_reads_get_a_single_retry() {
        assert_eq!(QueryKey::Alerts.policy().retries, 1);
        assert_eq!(QueryKey::AlertsByKind(AlertKind::Warning).policy().retries, 1);
        assert_eq!(QueryKey::CurrentConsumption.policy().retries, 2);
    }

    #[test]
    fn parameterized_keys_are_distinct() {
        let a = QueryKey::RecordsByKind(EnergyKind::Gas);
        let b = QueryKey::RecordsByKind(EnergyKind::Water);
        assert_ne!(a, b);

        let d1: NaiveDate = "2024-01-01".parse().unwrap();
        let d2: NaiveDate = "2024-01-31".parse().unwrap();
        assert_ne!(
            QueryKey::RecordsByDateRange(d1, d2),
            QueryKey::RecordsByDateRange(d2, d1)
        );
    }
}
