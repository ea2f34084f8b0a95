// Integration tests for `EnergyStore` against a wiremock backend:
// disabled reads, cache hits, invalidation sets, retry budgets, and the
// aggregate dashboard.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wattly_core::{
    CoreError, EnergyKind, EnergyStore, NewConsumptionRecord,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, EnergyStore) {
    let server = MockServer::start().await;
    let api =
        wattly_api::ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, EnergyStore::from_api(api))
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn current_consumption_body() -> serde_json::Value {
    json!({
        "electricity": { "value": 245.0, "unit": "kWh", "trend": -5.2 },
        "water":       { "value": 12.3,  "unit": "m3",  "trend": 1.1 },
        "gas":         { "value": 89.0,  "unit": "m3",  "trend": 0.0 },
        "total":       { "value": 346.3, "unit": "kWh", "trend": -2.4 }
    })
}

fn daily_body(id: i64, day: &str) -> serde_json::Value {
    json!({
        "id": id,
        "date": day,
        "electricityValue": 8.2,
        "waterValue": 0.4,
        "gasValue": 3.1,
        "totalValue": 11.7
    })
}

fn monthly_body(id: i64, month: u32) -> serde_json::Value {
    json!({
        "id": id,
        "year": 2024,
        "month": month,
        "monthName": "January",
        "electricityValue": 240.0,
        "waterValue": 11.0,
        "gasValue": 80.0,
        "totalValue": 331.0,
        "trend": -1.5
    })
}

fn alert_body(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "type": "WARNING",
        "title": "High usage",
        "message": "Electricity usage is above average",
        "isActive": true
    })
}

// ── Disabled-until-ready ────────────────────────────────────────────

#[tokio::test]
async fn disabled_reads_make_no_network_call_and_report_no_error() {
    let (server, store) = setup().await;

    let records = store
        .records_by_date_range(None, Some(date("2024-01-31")))
        .await
        .unwrap();
    assert!(records.is_none());

    // A missing start date alone is enough to keep the query disabled.
    let total = store
        .total_consumption(EnergyKind::Gas, None, Some(date("2024-01-31")))
        .await
        .unwrap();
    assert!(total.is_none());

    let daily = store.daily_by_date(None).await.unwrap();
    assert!(daily.is_none());

    let monthly = store.monthly_consumption(Some(2024), None).await.unwrap();
    assert!(monthly.is_none());

    let year = store.monthly_by_year(None).await.unwrap();
    assert!(year.is_none());

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "disabled reads must stay off the wire");
}

// ── Cache behavior ──────────────────────────────────────────────────

#[tokio::test]
async fn repeated_read_inside_staleness_window_hits_the_cache() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/monthly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([monthly_body(1, 1)])))
        .expect(1)
        .mount(&server)
        .await;

    let first = store.monthly_data().await.unwrap();
    let second = store.monthly_data().await.unwrap();

    assert_eq!(*first, *second);
    server.verify().await;
}

#[tokio::test]
async fn monthly_all_uses_the_full_history_endpoint() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/monthly-consumption/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([monthly_body(1, 1), monthly_body(2, 2)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let first = store.monthly_all().await.unwrap();
    assert_eq!(first.len(), 2);

    // Distinct from the dashboard series and cached on its own key.
    let second = store.monthly_all().await.unwrap();
    assert_eq!(*first, *second);
    server.verify().await;
}

#[tokio::test]
async fn concurrent_cold_reads_issue_exactly_one_request() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/alerts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([alert_body(1)]))
                .set_delay(std::time::Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (a, b) = tokio::join!(store.alerts(), store.alerts());
    assert_eq!(a.unwrap().len(), 1);
    assert_eq!(b.unwrap().len(), 1);
    server.verify().await;
}

#[tokio::test]
async fn reset_drops_cached_data() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([alert_body(1)])))
        .expect(2)
        .mount(&server)
        .await;

    store.alerts().await.unwrap();
    store.reset();
    store.alerts().await.unwrap();
    server.verify().await;
}

// ── Empty-body and error translation ────────────────────────────────

#[tokio::test]
async fn missing_daily_record_is_none_not_an_error() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/daily-consumption/2024-02-01"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let daily = store.daily_by_date(Some(date("2024-02-01"))).await.unwrap();
    assert!(daily.is_none());
}

#[tokio::test]
async fn backend_failure_surfaces_status_after_retry_budget() {
    let (server, store) = setup().await;

    // Alerts carry a budget of one retry: initial call + one retry.
    Mock::given(method("GET"))
        .and(path("/dashboard/alerts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .expect(2)
        .mount(&server)
        .await;

    let err = store.alerts().await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: 500, .. }));
    server.verify().await;
}

// ── Validation ──────────────────────────────────────────────────────

#[tokio::test]
async fn non_positive_reading_is_rejected_before_the_network() {
    let (server, store) = setup().await;

    let err = store
        .create_consumption_record(NewConsumptionRecord {
            kind: EnergyKind::Electricity,
            value: -5.0,
            unit: None,
            recorded_at: None,
            notes: None,
        })
        .await
        .unwrap_err();

    assert!(err.is_validation());
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn inverted_date_range_is_rejected_before_the_network() {
    let (server, store) = setup().await;

    let err = store
        .records_by_date_range(Some(date("2024-02-01")), Some(date("2024-01-01")))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

// ── Mutation invalidation ───────────────────────────────────────────

#[tokio::test]
async fn submitting_a_record_invalidates_exactly_three_keys() {
    let (server, store) = setup().await;

    // The three invalidated reads are fetched twice; the untouched two
    // are served from cache the second time.
    Mock::given(method("GET"))
        .and(path("/dashboard/current-consumption"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_consumption_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/daily-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([daily_body(1, "2024-01-14")])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/weekly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([daily_body(2, "2024-01-15")])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/monthly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([monthly_body(1, 1)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([alert_body(1)])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/consumption-records"))
        .and(body_json(json!({
            "type": "ELECTRICITY",
            "value": 52.0,
            "recordedAt": "2024-01-14"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 99,
            "type": "ELECTRICITY",
            "value": 52.0,
            "unit": "kWh",
            "recordedAt": "2024-01-14",
            "createdAt": "2024-01-14T19:02:11"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Prime all five dashboard reads.
    store.current_consumption().await.unwrap();
    store.daily_data().await.unwrap();
    store.weekly_data().await.unwrap();
    store.monthly_data().await.unwrap();
    store.alerts().await.unwrap();

    let created = store
        .create_consumption_record(NewConsumptionRecord {
            kind: EnergyKind::Electricity,
            value: 52.0,
            unit: None,
            recorded_at: Some(date("2024-01-14")),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 99);

    // Invalidated keys refetch; monthlyData and alerts stay cached.
    store.current_consumption().await.unwrap();
    store.daily_data().await.unwrap();
    store.weekly_data().await.unwrap();
    store.monthly_data().await.unwrap();
    store.alerts().await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn failed_mutation_invalidates_nothing() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/current-consumption"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_consumption_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/consumption-records"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    store.current_consumption().await.unwrap();

    let err = store
        .create_consumption_record(NewConsumptionRecord {
            kind: EnergyKind::Water,
            value: 3.0,
            unit: None,
            recorded_at: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Api { status: 500, .. }));

    // Still served from cache: the expect(1) above proves no refetch.
    store.current_consumption().await.unwrap();
    server.verify().await;
}

#[tokio::test]
async fn deleting_an_alert_invalidates_only_alerts() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([alert_body(1)])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/monthly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([monthly_body(1, 1)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/alerts/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store.alerts().await.unwrap();
    store.monthly_data().await.unwrap();

    store.delete_alert(1).await.unwrap();

    store.alerts().await.unwrap();
    store.monthly_data().await.unwrap();
    server.verify().await;
}

// ── Aggregate dashboard ─────────────────────────────────────────────

#[tokio::test]
async fn dashboard_resolves_constituents_independently() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/current-consumption"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_consumption_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/monthly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([monthly_body(1, 1)])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/weekly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([daily_body(1, "2024-01-15")])))
        .mount(&server)
        .await;
    // Alerts fail twice (budget 1): the constituent ends up None.
    Mock::given(method("GET"))
        .and(path("/dashboard/alerts"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let view = store.dashboard().await;

    assert!(view.is_error());
    assert!(view.alerts.is_none());
    assert!(view.current_consumption.is_some());
    assert!(view.monthly_data.is_some());
    assert!(view.weekly_data.is_some());
    assert_eq!(view.errors.len(), 1);
    server.verify().await;
}

#[tokio::test]
async fn dashboard_snapshot_reports_loading_until_primed() {
    let (server, store) = setup().await;

    let before = store.dashboard_snapshot();
    assert!(before.is_loading);
    assert!(before.current_consumption.is_none());

    Mock::given(method("GET"))
        .and(path("/dashboard/current-consumption"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_consumption_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/monthly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([monthly_body(1, 1)])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/weekly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([daily_body(1, "2024-01-15")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([alert_body(1)])))
        .mount(&server)
        .await;

    let view = store.dashboard().await;
    assert!(!view.is_error());

    let after = store.dashboard_snapshot();
    assert!(!after.is_loading);
    assert!(after.alerts.is_some());
    assert_eq!(after.alerts.unwrap().len(), 1);
}
