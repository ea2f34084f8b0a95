// ── Read operations ──
//
// One method per backend read, resolved through the query cache with the
// key's staleness window and retry budget.
//
// Parameterized reads take `Option` parameters and are *disabled* while
// any required parameter is `None`: they return `Ok(None)` without a
// network call and without reporting an error.

use std::sync::Arc;

use chrono::NaiveDate;

use wattly_api::{
    Alert, AlertKind, ConsumptionRecord, CurrentConsumption, DailyConsumption, EnergyKind,
    MonthlyConsumption,
};

use super::EnergyStore;
use crate::cache::QueryKey;
use crate::error::CoreError;

impl EnergyStore {
    // ── Dashboard reads ──────────────────────────────────────────────

    /// Current-month consumption snapshot.
    pub async fn current_consumption(&self) -> Result<Arc<CurrentConsumption>, CoreError> {
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::CurrentConsumption, move || {
                let api = api.clone();
                async move { api.get_current_consumption().await }
            })
            .await
    }

    /// Trailing 12-month series.
    pub async fn monthly_data(&self) -> Result<Arc<Vec<MonthlyConsumption>>, CoreError> {
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::MonthlyData, move || {
                let api = api.clone();
                async move { api.get_monthly_data().await }
            })
            .await
    }

    /// Current week, day by day.
    pub async fn weekly_data(&self) -> Result<Arc<Vec<DailyConsumption>>, CoreError> {
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::WeeklyData, move || {
                let api = api.clone();
                async move { api.get_weekly_data().await }
            })
            .await
    }

    /// All daily records.
    pub async fn daily_data(&self) -> Result<Arc<Vec<DailyConsumption>>, CoreError> {
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::DailyData, move || {
                let api = api.clone();
                async move { api.get_daily_data().await }
            })
            .await
    }

    /// Currently active alerts.
    pub async fn alerts(&self) -> Result<Arc<Vec<Alert>>, CoreError> {
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::Alerts, move || {
                let api = api.clone();
                async move { api.get_alerts().await }
            })
            .await
    }

    // ── Consumption-record reads ─────────────────────────────────────

    /// Submitted readings for one energy kind.
    pub async fn records_by_kind(
        &self,
        kind: EnergyKind,
    ) -> Result<Arc<Vec<ConsumptionRecord>>, CoreError> {
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::RecordsByKind(kind), move || {
                let api = api.clone();
                async move { api.get_records_by_kind(kind).await }
            })
            .await
    }

    /// Submitted readings inside a date range. Disabled until both dates
    /// are present.
    pub async fn records_by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Arc<Vec<ConsumptionRecord>>>, CoreError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(None);
        };
        ensure_ordered(start, end)?;
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::RecordsByDateRange(start, end), move || {
                let api = api.clone();
                async move { api.get_records_by_date_range(start, end).await }
            })
            .await
            .map(Some)
    }

    /// Scalar total for one kind inside a date range. Disabled until both
    /// dates are present.
    pub async fn total_consumption(
        &self,
        kind: EnergyKind,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<f64>, CoreError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(None);
        };
        ensure_ordered(start, end)?;
        let api = self.api().clone();
        let total = self
            .cache()
            .query(QueryKey::TotalConsumption(kind, start, end), move || {
                let api = api.clone();
                async move { api.get_total_consumption(kind, start, end).await }
            })
            .await?;
        Ok(Some(*total))
    }

    // ── Daily-consumption reads ──────────────────────────────────────

    /// One day's aggregate. Disabled until the date is present; also
    /// `None` when the backend has no record for that day.
    pub async fn daily_by_date(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Option<Arc<DailyConsumption>>, CoreError> {
        let Some(date) = date else {
            return Ok(None);
        };
        let api = self.api().clone();
        let cached: Arc<Option<DailyConsumption>> = self
            .cache()
            .query(QueryKey::DailyByDate(date), move || {
                let api = api.clone();
                async move { api.get_daily_by_date(date).await }
            })
            .await?;
        Ok((*cached).clone().map(Arc::new))
    }

    /// Daily aggregates inside a date range. Disabled until both dates
    /// are present.
    pub async fn daily_by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Arc<Vec<DailyConsumption>>>, CoreError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(None);
        };
        ensure_ordered(start, end)?;
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::DailyByDateRange(start, end), move || {
                let api = api.clone();
                async move { api.get_daily_by_date_range(start, end).await }
            })
            .await
            .map(Some)
    }

    // ── Monthly-consumption reads ────────────────────────────────────

    /// One month's aggregate. Disabled until both year and month are
    /// present.
    pub async fn monthly_consumption(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Option<Arc<MonthlyConsumption>>, CoreError> {
        let (Some(year), Some(month)) = (year, month) else {
            return Ok(None);
        };
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::MonthlyByMonth(year, month), move || {
                let api = api.clone();
                async move { api.get_monthly_consumption(year, month).await }
            })
            .await
            .map(Some)
    }

    /// Every recorded monthly aggregate, oldest first.
    pub async fn monthly_all(&self) -> Result<Arc<Vec<MonthlyConsumption>>, CoreError> {
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::MonthlyAll, move || {
                let api = api.clone();
                async move { api.get_all_monthly_consumption().await }
            })
            .await
    }

    /// A full year of monthly aggregates. Disabled until the year is
    /// present.
    pub async fn monthly_by_year(
        &self,
        year: Option<i32>,
    ) -> Result<Option<Arc<Vec<MonthlyConsumption>>>, CoreError> {
        let Some(year) = year else {
            return Ok(None);
        };
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::MonthlyByYear(year), move || {
                let api = api.clone();
                async move { api.get_monthly_by_year(year).await }
            })
            .await
            .map(Some)
    }

    // ── Alert reads ──────────────────────────────────────────────────

    /// Alerts of one severity class.
    pub async fn alerts_by_kind(&self, kind: AlertKind) -> Result<Arc<Vec<Alert>>, CoreError> {
        let api = self.api().clone();
        self.cache()
            .query(QueryKey::AlertsByKind(kind), move || {
                let api = api.clone();
                async move { api.get_alerts_by_kind(kind).await }
            })
            .await
    }
}

fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::validation(format!(
            "end date {end} is before start date {start}"
        )));
    }
    Ok(())
}
