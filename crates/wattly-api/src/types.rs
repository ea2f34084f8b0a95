// Wire types for the energy-consumption backend.
//
// Field names follow the backend's camelCase JSON contract; enum tokens
// are the backend's uppercase vocabulary (ELECTRICITY, DANGER, ...).
// Dates on the wire are ISO-8601 date strings (YYYY-MM-DD).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ── Enumerations ─────────────────────────────────────────────────────

/// The kind of energy a consumption reading refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergyKind {
    Electricity,
    Water,
    Gas,
}

impl EnergyKind {
    /// The uppercase wire token, also used in URL path segments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Electricity => "ELECTRICITY",
            Self::Water => "WATER",
            Self::Gas => "GAS",
        }
    }
}

impl fmt::Display for EnergyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ELECTRICITY" => Ok(Self::Electricity),
            "WATER" => Ok(Self::Water),
            "GAS" => Ok(Self::Gas),
            other => Err(format!("unknown energy kind: {other}")),
        }
    }
}

/// Severity class of a dashboard alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    Danger,
    Warning,
    Success,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "DANGER",
            Self::Warning => "WARNING",
            Self::Success => "SUCCESS",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DANGER" => Ok(Self::Danger),
            "WARNING" => Ok(Self::Warning),
            "SUCCESS" => Ok(Self::Success),
            other => Err(format!("unknown alert kind: {other}")),
        }
    }
}

// ── Dashboard snapshot types ─────────────────────────────────────────

/// A single measured value with its unit and month-over-month trend
/// (percentage, negative means consumption went down).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyValue {
    pub value: f64,
    pub unit: String,
    pub trend: f64,
}

/// Point-in-time snapshot of current consumption per energy kind.
///
/// Replaced wholesale on every refetch, never partially patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConsumption {
    pub electricity: EnergyValue,
    pub water: EnergyValue,
    pub gas: EnergyValue,
    pub total: EnergyValue,
}

// ── Consumption records ──────────────────────────────────────────────

/// A single submitted meter reading. Created server-side; immutable
/// from the client's perspective once the backend has assigned its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: EnergyKind,
    pub value: f64,
    pub unit: String,
    pub recorded_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload for `POST /consumption-records`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConsumptionRecord {
    #[serde(rename = "type")]
    pub kind: EnergyKind,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ── Daily / monthly aggregates ───────────────────────────────────────

/// Aggregated consumption for one calendar day. Keyed uniquely by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyConsumption {
    pub id: i64,
    pub date: NaiveDate,
    pub electricity_value: f64,
    pub water_value: f64,
    pub gas_value: f64,
    pub total_value: f64,
}

/// Payload for `POST /daily-consumption`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDailyConsumption {
    pub date: NaiveDate,
    pub electricity_value: f64,
    pub water_value: f64,
    pub gas_value: f64,
    pub total_value: f64,
}

/// Aggregated consumption for one calendar month. Keyed by (year, month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyConsumption {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub electricity_value: f64,
    pub water_value: f64,
    pub gas_value: f64,
    pub total_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<f64>,
}

/// Payload for `POST /monthly-consumption`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMonthlyConsumption {
    pub year: i32,
    pub month: u32,
    pub electricity_value: f64,
    pub water_value: f64,
    pub gas_value: f64,
    pub total_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<f64>,
}

// ── Alerts ───────────────────────────────────────────────────────────

/// A dashboard alert. Mutable: may be updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub is_active: bool,
}

/// Payload for `POST /alerts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial-update payload for `PUT /alerts/{id}`. Absent fields are
/// left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AlertKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_kind_round_trips_wire_tokens() {
        let json = serde_json::to_string(&EnergyKind::Electricity).unwrap();
        assert_eq!(json, "\"ELECTRICITY\"");
        let back: EnergyKind = serde_json::from_str("\"GAS\"").unwrap();
        assert_eq!(back, EnergyKind::Gas);
    }

    #[test]
    fn consumption_record_parses_camel_case() {
        let body = r#"{
            "id": 7,
            "type": "WATER",
            "value": 12.5,
            "unit": "m3",
            "recordedAt": "2024-01-14",
            "createdAt": "2024-01-14T10:30:00"
        }"#;
        let record: ConsumptionRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.kind, EnergyKind::Water);
        assert_eq!(record.recorded_at, NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
        assert!(record.notes.is_none());
    }

    #[test]
    fn new_record_omits_absent_optionals() {
        let payload = NewConsumptionRecord {
            kind: EnergyKind::Electricity,
            value: 52.0,
            unit: None,
            recorded_at: None,
            notes: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"type": "ELECTRICITY", "value": 52.0}));
    }

    #[test]
    fn alert_update_serializes_only_set_fields() {
        let update = AlertUpdate {
            is_active: Some(false),
            ..AlertUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"isActive": false}));
    }
}
