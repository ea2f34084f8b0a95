// Hand-crafted async HTTP client for the energy-consumption backend.
//
// Base path: /api/ (configurable)
// All request/response bodies are JSON; no authentication.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use crate::Error;
use crate::types::{
    Alert, AlertKind, AlertUpdate, ConsumptionRecord, CurrentConsumption, DailyConsumption,
    EnergyKind, MonthlyConsumption, NewAlert, NewConsumptionRecord, NewDailyConsumption,
    NewMonthlyConsumption,
};

/// Default request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the energy-consumption REST backend.
///
/// Cheap to clone: shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` with a hard per-request timeout.
    ///
    /// The timeout aborts the underlying transport, independent of any
    /// caller-side cancellation.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wattly/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages transport config).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ensure the base URL ends with a slash so relative joins append
    /// instead of replacing the last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"dashboard/alerts"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        let result = async {
            let resp = self.http.get(url).send().await?;
            handle_response(resp).await
        }
        .await;
        log_failure(path, result)
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let result = async {
            let resp = self.http.get(url).query(params).send().await?;
            handle_response(resp).await
        }
        .await;
        log_failure(path, result)
    }

    /// GET that tolerates an empty 204 response.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, Error> {
        let url = self.url(path)?;
        let result = async {
            let resp = self.http.get(url).send().await?;
            handle_optional(resp).await
        }
        .await;
        log_failure(path, result)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let result = async {
            let resp = self.http.post(url).json(body).send().await?;
            handle_response(resp).await
        }
        .await;
        log_failure(path, result)
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let result = async {
            let resp = self.http.put(url).json(body).send().await?;
            handle_response(resp).await
        }
        .await;
        log_failure(path, result)
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        let result = async {
            let resp = self.http.delete(url).send().await?;
            handle_empty(resp).await
        }
        .await;
        log_failure(path, result)
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Dashboard ────────────────────────────────────────────────────

    /// `GET /dashboard/current-consumption` — current-month snapshot.
    pub async fn get_current_consumption(&self) -> Result<CurrentConsumption, Error> {
        self.get("dashboard/current-consumption").await
    }

    /// `GET /dashboard/monthly-data` — the trailing 12-month series.
    pub async fn get_monthly_data(&self) -> Result<Vec<MonthlyConsumption>, Error> {
        self.get("dashboard/monthly-data").await
    }

    /// `GET /dashboard/weekly-data` — the current week, day by day.
    pub async fn get_weekly_data(&self) -> Result<Vec<DailyConsumption>, Error> {
        self.get("dashboard/weekly-data").await
    }

    /// `GET /dashboard/daily-data` — all daily records.
    pub async fn get_daily_data(&self) -> Result<Vec<DailyConsumption>, Error> {
        self.get("dashboard/daily-data").await
    }

    /// `GET /dashboard/alerts` — currently active alerts.
    pub async fn get_alerts(&self) -> Result<Vec<Alert>, Error> {
        self.get("dashboard/alerts").await
    }

    // ── Consumption records ──────────────────────────────────────────

    /// `POST /consumption-records` — submit a meter reading.
    pub async fn create_consumption_record(
        &self,
        record: &NewConsumptionRecord,
    ) -> Result<ConsumptionRecord, Error> {
        self.post("consumption-records", record).await
    }

    /// `GET /consumption-records/type/{type}`
    pub async fn get_records_by_kind(
        &self,
        kind: EnergyKind,
    ) -> Result<Vec<ConsumptionRecord>, Error> {
        self.get(&format!("consumption-records/type/{kind}")).await
    }

    /// `GET /consumption-records/date-range?startDate&endDate`
    pub async fn get_records_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ConsumptionRecord>, Error> {
        self.get_with_params(
            "consumption-records/date-range",
            &[
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ],
        )
        .await
    }

    /// `GET /consumption-records/total?type&startDate&endDate` — scalar sum.
    pub async fn get_total_consumption(
        &self,
        kind: EnergyKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, Error> {
        self.get_with_params(
            "consumption-records/total",
            &[
                ("type", kind.to_string()),
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ],
        )
        .await
    }

    // ── Daily consumption ────────────────────────────────────────────

    /// `POST /daily-consumption`
    pub async fn create_daily_consumption(
        &self,
        daily: &NewDailyConsumption,
    ) -> Result<DailyConsumption, Error> {
        self.post("daily-consumption", daily).await
    }

    /// `GET /daily-consumption/{date}` — `None` when the backend has no
    /// record for that day (204).
    pub async fn get_daily_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<DailyConsumption>, Error> {
        self.get_optional(&format!("daily-consumption/{date}")).await
    }

    /// `GET /daily-consumption/range?startDate&endDate`
    pub async fn get_daily_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyConsumption>, Error> {
        self.get_with_params(
            "daily-consumption/range",
            &[
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ],
        )
        .await
    }

    /// `GET /daily-consumption/all`
    pub async fn get_all_daily_consumption(&self) -> Result<Vec<DailyConsumption>, Error> {
        self.get("daily-consumption/all").await
    }

    // ── Monthly consumption ──────────────────────────────────────────

    /// `POST /monthly-consumption`
    pub async fn create_monthly_consumption(
        &self,
        monthly: &NewMonthlyConsumption,
    ) -> Result<MonthlyConsumption, Error> {
        self.post("monthly-consumption", monthly).await
    }

    /// `GET /monthly-consumption/{year}/{month}`
    pub async fn get_monthly_consumption(
        &self,
        year: i32,
        month: u32,
    ) -> Result<MonthlyConsumption, Error> {
        self.get(&format!("monthly-consumption/{year}/{month}")).await
    }

    /// `GET /monthly-consumption/year/{year}` — the full year.
    pub async fn get_monthly_by_year(&self, year: i32) -> Result<Vec<MonthlyConsumption>, Error> {
        self.get(&format!("monthly-consumption/year/{year}")).await
    }

    /// `GET /monthly-consumption/all`
    pub async fn get_all_monthly_consumption(&self) -> Result<Vec<MonthlyConsumption>, Error> {
        self.get("monthly-consumption/all").await
    }

    // ── Alerts ───────────────────────────────────────────────────────

    /// `POST /alerts`
    pub async fn create_alert(&self, alert: &NewAlert) -> Result<Alert, Error> {
        self.post("alerts", alert).await
    }

    /// `GET /alerts/active`
    pub async fn get_active_alerts(&self) -> Result<Vec<Alert>, Error> {
        self.get("alerts/active").await
    }

    /// `GET /alerts/type/{type}`
    pub async fn get_alerts_by_kind(&self, kind: AlertKind) -> Result<Vec<Alert>, Error> {
        self.get(&format!("alerts/type/{kind}")).await
    }

    /// `PUT /alerts/{id}` — partial update, absent fields untouched.
    pub async fn update_alert(&self, id: i64, update: &AlertUpdate) -> Result<Alert, Error> {
        self.put(&format!("alerts/{id}"), update).await
    }

    /// `DELETE /alerts/{id}` — no response body.
    pub async fn delete_alert(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("alerts/{id}")).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(status_error(status));
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

async fn handle_optional<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Option<T>, Error> {
    if resp.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    handle_response(resp).await.map(Some)
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(status_error(status))
    }
}

/// Build a `Status` error without touching the response body.
fn status_error(status: StatusCode) -> Error {
    Error::Status {
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_owned(),
    }
}

/// Diagnostics happen on failure paths only; successes stay quiet.
fn log_failure<T>(path: &str, result: Result<T, Error>) -> Result<T, Error> {
    if let Err(ref err) = result {
        warn!(%path, error = %err, "request failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = ApiClient::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");

        let joined = client.url("dashboard/alerts").unwrap();
        assert_eq!(joined.as_str(), "http://localhost:8080/api/dashboard/alerts");
    }

    #[test]
    fn base_url_trailing_slash_is_idempotent() {
        let client = ApiClient::new("http://example.test/api/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url().as_str(), "http://example.test/api/");
    }
}
