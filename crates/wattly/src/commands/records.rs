//! `wattly records` — submitted meter readings.

use tabled::Tabled;

use wattly_core::{ConsumptionRecord, EnergyStore, NewConsumptionRecord};

use crate::cli::{GlobalOpts, OutputFormat, RecordsArgs, RecordsCommand};
use crate::error::CliError;
use crate::output::{self, print_output};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Date")]
    recorded_at: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&ConsumptionRecord> for RecordRow {
    fn from(record: &ConsumptionRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind.to_string(),
            value: format!("{:.1} {}", record.value, record.unit),
            recorded_at: record.recorded_at.to_string(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    store: &EnergyStore,
    args: RecordsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RecordsCommand::List { kind } => {
            let records = store.records_by_kind(kind.into()).await?;
            render_records(&records, global);
        }
        RecordsCommand::Range { start, end } => {
            let records = store
                .records_by_date_range(Some(start), Some(end))
                .await?
                .unwrap_or_default();
            render_records(&records, global);
        }
        RecordsCommand::Total { kind, start, end } => {
            let total = store
                .total_consumption(kind.into(), Some(start), Some(end))
                .await?
                .unwrap_or(0.0);
            match global.output {
                OutputFormat::Json | OutputFormat::JsonCompact => {
                    let rendered = output::render_single(
                        &global.output,
                        &serde_json::json!({ "total": total }),
                        |_| String::new(),
                        |_| String::new(),
                    );
                    print_output(&rendered, global.quiet);
                }
                OutputFormat::Plain => print_output(&format!("{total}"), global.quiet),
                OutputFormat::Table => print_output(
                    &format!("Total {} from {start} to {end}: {total:.1}", kind_label(kind)),
                    global.quiet,
                ),
            }
        }
        RecordsCommand::Add {
            kind,
            value,
            unit,
            date,
            notes,
        } => {
            let created = store
                .create_consumption_record(NewConsumptionRecord {
                    kind: kind.into(),
                    value,
                    unit,
                    recorded_at: date,
                    notes,
                })
                .await?;
            if !global.quiet {
                eprintln!("Recorded {} reading (id {})", created.kind, created.id);
            }
            let rendered = output::render_single(
                &global.output,
                &created,
                |r| output::render_table(&[RecordRow::from(r)]),
                |r| r.id.to_string(),
            );
            print_output(&rendered, global.quiet);
        }
    }
    Ok(())
}

fn render_records(records: &[ConsumptionRecord], global: &GlobalOpts) {
    let rendered = output::render_list(&global.output, records, |r| RecordRow::from(r), |r| {
        r.id.to_string()
    });
    print_output(&rendered, global.quiet);
}

fn kind_label(kind: crate::cli::KindArg) -> &'static str {
    wattly_core::EnergyKind::from(kind).as_str()
}
