// Integration tests for `ApiClient` using wiremock.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wattly_api::{
    AlertKind, AlertUpdate, ApiClient, EnergyKind, Error, NewConsumptionRecord,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_get_current_consumption() {
    let (server, client) = setup().await;

    let body = json!({
        "electricity": { "value": 245.0, "unit": "kWh", "trend": -5.2 },
        "water":       { "value": 12.3,  "unit": "m3",  "trend": 1.1 },
        "gas":         { "value": 89.0,  "unit": "m3",  "trend": 0.0 },
        "total":       { "value": 346.3, "unit": "kWh", "trend": -2.4 }
    });

    Mock::given(method("GET"))
        .and(path("/dashboard/current-consumption"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let snapshot = client.get_current_consumption().await.unwrap();
    assert_eq!(snapshot.electricity.value, 245.0);
    assert_eq!(snapshot.electricity.unit, "kWh");
    assert_eq!(snapshot.total.trend, -2.4);
}

#[tokio::test]
async fn test_records_by_date_range_encodes_query_params() {
    let (server, client) = setup().await;

    let body = json!([{
        "id": 1,
        "type": "ELECTRICITY",
        "value": 52.0,
        "unit": "kWh",
        "recordedAt": "2024-01-14",
        "notes": "evening reading",
        "createdAt": "2024-01-14T19:02:11"
    }]);

    Mock::given(method("GET"))
        .and(path("/consumption-records/date-range"))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("endDate", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = client
        .get_records_by_date_range(date("2024-01-01"), date("2024-01-31"))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, EnergyKind::Electricity);
    assert_eq!(records[0].notes.as_deref(), Some("evening reading"));
}

#[tokio::test]
async fn test_total_consumption_is_a_bare_scalar() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/consumption-records/total"))
        .and(query_param("type", "GAS"))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("endDate", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(412.7)))
        .mount(&server)
        .await;

    let total = client
        .get_total_consumption(EnergyKind::Gas, date("2024-01-01"), date("2024-01-31"))
        .await
        .unwrap();
    assert_eq!(total, 412.7);
}

#[tokio::test]
async fn test_create_consumption_record_posts_exact_body() {
    let (server, client) = setup().await;

    let expected_body = json!({
        "type": "ELECTRICITY",
        "value": 52.0,
        "recordedAt": "2024-01-14"
    });

    let response = json!({
        "id": 99,
        "type": "ELECTRICITY",
        "value": 52.0,
        "unit": "kWh",
        "recordedAt": "2024-01-14",
        "createdAt": "2024-01-14T19:02:11"
    });

    Mock::given(method("POST"))
        .and(path("/consumption-records"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;

    let created = client
        .create_consumption_record(&NewConsumptionRecord {
            kind: EnergyKind::Electricity,
            value: 52.0,
            unit: None,
            recorded_at: Some(date("2024-01-14")),
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(created.id, 99);
    assert_eq!(created.unit, "kWh");
}

#[tokio::test]
async fn test_update_alert_puts_partial_body() {
    let (server, client) = setup().await;

    let response = json!({
        "id": 3,
        "type": "WARNING",
        "title": "High usage",
        "message": "Electricity usage is above average",
        "isActive": false
    });

    Mock::given(method("PUT"))
        .and(path("/alerts/3"))
        .and(body_json(json!({"isActive": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;

    let updated = client
        .update_alert(
            3,
            &AlertUpdate {
                is_active: Some(false),
                ..AlertUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.kind, AlertKind::Warning);
    assert!(!updated.is_active);
}

// ── Empty-body handling ─────────────────────────────────────────────

#[tokio::test]
async fn test_204_resolves_to_none_not_parse_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/daily-consumption/2024-02-01"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let daily = client.get_daily_by_date(date("2024-02-01")).await.unwrap();
    assert!(daily.is_none());
}

#[tokio::test]
async fn test_delete_alert_accepts_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/alerts/12"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_alert(12).await.unwrap();
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_non_2xx_carries_status_and_skips_body() {
    let (server, client) = setup().await;

    // Body is deliberately not JSON: the client must not try to parse it.
    Mock::given(method("GET"))
        .and(path("/dashboard/alerts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let err = client.get_alerts().await.unwrap_err();
    match err {
        Error::Status { status, ref reason } => {
            assert_eq!(status, 500);
            assert_eq!(reason, "Internal Server Error");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_malformed_success_body_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/monthly-data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get_monthly_data().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

#[tokio::test]
async fn test_connection_failure_is_transient() {
    // Port 1 is essentially guaranteed to refuse connections.
    let client = ApiClient::from_reqwest("http://127.0.0.1:1/api", reqwest::Client::new()).unwrap();
    let err = client.get_alerts().await.unwrap_err();
    assert!(err.is_transient());
}
