// ── Write operations ──
//
// One-shot mutations: no automatic retry. Caller input is validated
// locally before any network call; a rejected payload never reaches the
// backend. On success each mutation invalidates exactly its documented
// set of cache keys; on failure nothing is invalidated.

use tracing::debug;

use wattly_api::{
    Alert, AlertUpdate, ConsumptionRecord, DailyConsumption, MonthlyConsumption, NewAlert,
    NewConsumptionRecord, NewDailyConsumption, NewMonthlyConsumption,
};

use super::EnergyStore;
use crate::cache::QueryKey;
use crate::error::CoreError;

impl EnergyStore {
    /// Submit a new meter reading.
    ///
    /// Invalidates: current consumption, daily data, weekly data.
    pub async fn create_consumption_record(
        &self,
        record: NewConsumptionRecord,
    ) -> Result<ConsumptionRecord, CoreError> {
        ensure_positive(record.value, "reading value")?;

        let created = self.api().create_consumption_record(&record).await?;
        self.cache().invalidate(&[
            QueryKey::CurrentConsumption,
            QueryKey::DailyData,
            QueryKey::WeeklyData,
        ]);
        debug!(id = created.id, kind = %created.kind, "consumption record created");
        Ok(created)
    }

    /// Record one day's aggregate.
    ///
    /// Invalidates: daily data, weekly data.
    pub async fn create_daily_consumption(
        &self,
        daily: NewDailyConsumption,
    ) -> Result<DailyConsumption, CoreError> {
        ensure_non_negative(daily.electricity_value, "electricity value")?;
        ensure_non_negative(daily.water_value, "water value")?;
        ensure_non_negative(daily.gas_value, "gas value")?;
        ensure_non_negative(daily.total_value, "total value")?;

        let created = self.api().create_daily_consumption(&daily).await?;
        self.cache()
            .invalidate(&[QueryKey::DailyData, QueryKey::WeeklyData]);
        debug!(date = %created.date, "daily consumption created");
        Ok(created)
    }

    /// Record one month's aggregate.
    ///
    /// Invalidates: monthly data.
    pub async fn create_monthly_consumption(
        &self,
        monthly: NewMonthlyConsumption,
    ) -> Result<MonthlyConsumption, CoreError> {
        if !(1..=12).contains(&monthly.month) {
            return Err(CoreError::validation(format!(
                "month must be between 1 and 12, got {}",
                monthly.month
            )));
        }
        ensure_non_negative(monthly.electricity_value, "electricity value")?;
        ensure_non_negative(monthly.water_value, "water value")?;
        ensure_non_negative(monthly.gas_value, "gas value")?;
        ensure_non_negative(monthly.total_value, "total value")?;

        let created = self.api().create_monthly_consumption(&monthly).await?;
        self.cache().invalidate(&[QueryKey::MonthlyData]);
        debug!(year = created.year, month = created.month, "monthly consumption created");
        Ok(created)
    }

    /// Create a new alert.
    ///
    /// Invalidates: alerts.
    pub async fn create_alert(&self, alert: NewAlert) -> Result<Alert, CoreError> {
        ensure_not_blank(&alert.title, "alert title")?;
        ensure_not_blank(&alert.message, "alert message")?;

        let created = self.api().create_alert(&alert).await?;
        self.cache().invalidate(&[QueryKey::Alerts]);
        debug!(id = created.id, "alert created");
        Ok(created)
    }

    /// Partially update an alert. The whole active-alert set is refetched
    /// on the next read rather than patching the single changed entry.
    ///
    /// Invalidates: alerts.
    pub async fn update_alert(&self, id: i64, update: AlertUpdate) -> Result<Alert, CoreError> {
        if update.kind.is_none()
            && update.title.is_none()
            && update.message.is_none()
            && update.is_active.is_none()
        {
            return Err(CoreError::validation("alert update has no fields to change"));
        }
        if let Some(ref title) = update.title {
            ensure_not_blank(title, "alert title")?;
        }
        if let Some(ref message) = update.message {
            ensure_not_blank(message, "alert message")?;
        }

        let updated = self.api().update_alert(id, &update).await?;
        self.cache().invalidate(&[QueryKey::Alerts]);
        debug!(id, "alert updated");
        Ok(updated)
    }

    /// Delete an alert.
    ///
    /// Invalidates: alerts.
    pub async fn delete_alert(&self, id: i64) -> Result<(), CoreError> {
        self.api().delete_alert(id).await?;
        self.cache().invalidate(&[QueryKey::Alerts]);
        debug!(id, "alert deleted");
        Ok(())
    }
}

// ── Validation helpers ───────────────────────────────────────────────

fn ensure_positive(value: f64, what: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::validation(format!(
            "{what} must be a positive number, got {value}"
        )));
    }
    Ok(())
}

fn ensure_non_negative(value: f64, what: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::validation(format!(
            "{what} must not be negative, got {value}"
        )));
    }
    Ok(())
}

fn ensure_not_blank(text: &str, what: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::validation(format!("{what} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_nan_and_negatives() {
        assert!(ensure_positive(0.1, "v").is_ok());
        assert!(ensure_positive(0.0, "v").is_err());
        assert!(ensure_positive(-3.0, "v").is_err());
        assert!(ensure_positive(f64::NAN, "v").is_err());
        assert!(ensure_positive(f64::INFINITY, "v").is_err());
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(ensure_non_negative(0.0, "v").is_ok());
        assert!(ensure_non_negative(-0.1, "v").is_err());
    }

    #[test]
    fn blank_titles_are_rejected() {
        assert!(ensure_not_blank("High usage", "title").is_ok());
        assert!(ensure_not_blank("   ", "title").is_err());
        assert!(ensure_not_blank("", "title").is_err());
    }
}
