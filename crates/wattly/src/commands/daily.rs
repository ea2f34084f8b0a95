//! `wattly daily` — daily consumption aggregates.

use tabled::Tabled;

use wattly_core::{DailyConsumption, EnergyStore, NewDailyConsumption};

use crate::cli::{DailyArgs, DailyCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, print_output};

#[derive(Tabled)]
struct DailyRow {
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

impl From<&DailyConsumption> for DailyRow {
    fn from(day: &DailyConsumption) -> Self {
        Self {
            date: day.date.to_string(),
            electricity: format!("{:.1}", day.electricity_value),
            water: format!("{:.1}", day.water_value),
            gas: format!("{:.1}", day.gas_value),
            total: format!("{:.1}", day.total_value),
        }
    }
}

pub async fn handle(
    store: &EnergyStore,
    args: DailyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DailyCommand::Show { date } => match store.daily_by_date(Some(date)).await? {
            Some(day) => {
                let rendered = output::render_single(
                    &global.output,
                    day.as_ref(),
                    |d| output::render_table(&[DailyRow::from(d)]),
                    |d| d.date.to_string(),
                );
                print_output(&rendered, global.quiet);
            }
            None => print_output(&format!("No record for {date}"), global.quiet),
        },
        DailyCommand::Range { start, end } => {
            let days = store
                .daily_by_date_range(Some(start), Some(end))
                .await?
                .unwrap_or_default();
            render_days(&days, global);
        }
        DailyCommand::List => {
            let days = store.daily_data().await?;
            render_days(&days, global);
        }
        DailyCommand::Add {
            date,
            electricity,
            water,
            gas,
            total,
        } => {
            let created = store
                .create_daily_consumption(NewDailyConsumption {
                    date,
                    electricity_value: electricity,
                    water_value: water,
                    gas_value: gas,
                    total_value: total.unwrap_or(electricity + water + gas),
                })
                .await?;
            if !global.quiet {
                eprintln!("Recorded daily aggregate for {}", created.date);
            }
            let rendered = output::render_single(
                &global.output,
                &created,
                |d| output::render_table(&[DailyRow::from(d)]),
                |d| d.date.to_string(),
            );
            print_output(&rendered, global.quiet);
        }
    }
    Ok(())
}

fn render_days(days: &[DailyConsumption], global: &GlobalOpts) {
    let rendered = output::render_list(&global.output, days, |d| DailyRow::from(d), |d| {
        d.date.to_string()
    });
    print_output(&rendered, global.quiet);
}
