//! `wattly monthly` — monthly consumption aggregates.

use tabled::Tabled;

use wattly_core::{EnergyStore, MonthlyConsumption, NewMonthlyConsumption};

use crate::cli::{GlobalOpts, MonthlyArgs, MonthlyCommand};
use crate::error::CliError;
use crate::output::{self, format_trend, print_output};

#[derive(Tabled)]
struct MonthlyRow {
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

impl From<&MonthlyConsumption> for MonthlyRow {
    fn from(month: &MonthlyConsumption) -> Self {
        Self {
            month: format!("{} {}", month.month_name, month.year),
            electricity: format!("{:.1}", month.electricity_value),
            water: format!("{:.1}", month.water_value),
            gas: format!("{:.1}", month.gas_value),
            total: format!("{:.1}", month.total_value),
            trend: month.trend.map(format_trend).unwrap_or_default(),
        }
    }
}

pub async fn handle(
    store: &EnergyStore,
    args: MonthlyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MonthlyCommand::Show { year, month } => {
            match store.monthly_consumption(Some(year), Some(month)).await? {
                Some(aggregate) => {
                    let rendered = output::render_single(
                        &global.output,
                        aggregate.as_ref(),
                        |m| output::render_table(&[MonthlyRow::from(m)]),
                        |m| format!("{}-{:02}", m.year, m.month),
                    );
                    print_output(&rendered, global.quiet);
                }
                None => print_output(&format!("No record for {year}-{month:02}"), global.quiet),
            }
        }
        MonthlyCommand::Year { year } => {
            let months = store.monthly_by_year(Some(year)).await?.unwrap_or_default();
            render_months(&months, global);
        }
        MonthlyCommand::List => {
            let months = store.monthly_all().await?;
            render_months(&months, global);
        }
        MonthlyCommand::Add {
            year,
            month,
            electricity,
            water,
            gas,
            total,
            trend,
        } => {
            let created = store
                .create_monthly_consumption(NewMonthlyConsumption {
                    year,
                    month,
                    electricity_value: electricity,
                    water_value: water,
                    gas_value: gas,
                    total_value: total.unwrap_or(electricity + water + gas),
                    trend,
                })
                .await?;
            if !global.quiet {
                eprintln!(
                    "Recorded monthly aggregate for {}-{:02}",
                    created.year, created.month
                );
            }
            let rendered = output::render_single(
                &global.output,
                &created,
                |m| output::render_table(&[MonthlyRow::from(m)]),
                |m| format!("{}-{:02}", m.year, m.month),
            );
            print_output(&rendered, global.quiet);
        }
    }
    Ok(())
}

fn render_months(months: &[MonthlyConsumption], global: &GlobalOpts) {
    let rendered = output::render_list(&global.output, months, |m| MonthlyRow::from(m), |m| {
        format!("{}-{:02}", m.year, m.month)
    });
    print_output(&rendered, global.quiet);
}
