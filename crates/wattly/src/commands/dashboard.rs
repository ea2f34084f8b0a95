//! `wattly dashboard` — combined overview.

use serde::Serialize;
use tabled::Tabled;

use wattly_core::{Alert, CurrentConsumption, DailyConsumption, EnergyStore, MonthlyConsumption};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, format_trend, print_output};

#[derive(Tabled)]
struct CurrentRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Trend")]
    trend: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Electricity")]
    electricity: String,
    #[tabled(rename = "Water")]
    water: String,
    #[tabled(rename = "Gas")]
    gas: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Trend")]
    trend: String,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Electricity")]
    electricity: String,
    #[tabled(rename = "Water")]
    water: String,
    #[tabled(rename = "Gas")]
    gas: String,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// JSON projection of the dashboard for `--output json`.
#[derive(Serialize)]
struct DashboardJson<'a> {
    current_consumption: Option<&'a CurrentConsumption>,
    monthly_data: Option<&'a [MonthlyConsumption]>,
    weekly_data: Option<&'a [DailyConsumption]>,
    alerts: Option<&'a [Alert]>,
}

pub async fn handle(store: &EnergyStore, global: &GlobalOpts) -> Result<(), CliError> {
    let mut view = store.dashboard().await;
    let errors = std::mem::take(&mut view.errors);

    // Nothing resolved at all: surface the first failure instead of an
    // empty dashboard.
    let all_empty = view.current_consumption.is_none()
        && view.monthly_data.is_none()
        && view.weekly_data.is_none()
        && view.alerts.is_none();
    if all_empty {
        if let Some(err) = errors.into_iter().next() {
            return Err(err.into());
        }
        return Ok(());
    }

    for err in &errors {
        tracing::warn!("dashboard section unavailable: {err}");
        if !global.quiet {
            eprintln!("warning: a dashboard section is unavailable: {err}");
        }
    }

    match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact => {
            let json = DashboardJson {
                current_consumption: view.current_consumption.as_deref(),
                monthly_data: view.monthly_data.as_deref().map(Vec::as_slice),
                weekly_data: view.weekly_data.as_deref().map(Vec::as_slice),
                alerts: view.alerts.as_deref().map(Vec::as_slice),
            };
            let rendered = output::render_single(
                &global.output,
                &json,
                |_| String::new(),
                |_| String::new(),
            );
            print_output(&rendered, global.quiet);
        }
        OutputFormat::Table | OutputFormat::Plain => {
            let mut sections: Vec<String> = Vec::new();

            if let Some(current) = &view.current_consumption {
                let rows = vec![
                    current_row("Electricity", &current.electricity),
                    current_row("Water", &current.water),
                    current_row("Gas", &current.gas),
                    current_row("Total", &current.total),
                ];
                sections.push(format!(
                    "Current consumption\n{}",
                    output::render_table(&rows)
                ));
            }

            if let Some(monthly) = &view.monthly_data {
                let rows: Vec<MonthRow> = monthly.iter().map(month_row).collect();
                sections.push(format!("Monthly trend\n{}", output::render_table(&rows)));
            }

            if let Some(weekly) = &view.weekly_data {
                let rows: Vec<DayRow> = weekly.iter().map(day_row).collect();
                sections.push(format!("This week\n{}", output::render_table(&rows)));
            }

            if let Some(alerts) = &view.alerts {
                let rows: Vec<AlertRow> = alerts.iter().map(alert_row).collect();
                sections.push(format!("Alerts\n{}", output::render_table(&rows)));
            }

            print_output(&sections.join("\n\n"), global.quiet);
        }
    }

    Ok(())
}

fn current_row(kind: &str, value: &wattly_core::EnergyValue) -> CurrentRow {
    CurrentRow {
        kind: kind.to_owned(),
        value: format!("{:.1} {}", value.value, value.unit),
        trend: format_trend(value.trend),
    }
}

fn month_row(month: &MonthlyConsumption) -> MonthRow {
    MonthRow {
        month: format!("{} {}", month.month_name, month.year),
        electricity: format!("{:.1}", month.electricity_value),
        water: format!("{:.1}", month.water_value),
        gas: format!("{:.1}", month.gas_value),
        total: format!("{:.1}", month.total_value),
        trend: month.trend.map(format_trend).unwrap_or_default(),
    }
}

fn day_row(day: &DailyConsumption) -> DayRow {
    DayRow {
        date: day.date.to_string(),
        electricity: format!("{:.1}", day.electricity_value),
        water: format!("{:.1}", day.water_value),
        gas: format!("{:.1}", day.gas_value),
        total: format!("{:.1}", day.total_value),
    }
}

fn alert_row(alert: &Alert) -> AlertRow {
    AlertRow {
        id: alert.id,
        kind: alert.kind.to_string(),
        title: alert.title.clone(),
        message: alert.message.clone(),
    }
}
