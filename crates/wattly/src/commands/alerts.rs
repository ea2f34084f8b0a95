//! `wattly alerts` — consumption alerts.

use tabled::Tabled;

use wattly_core::{Alert, AlertUpdate, EnergyStore, NewAlert};

use crate::cli::{AlertsArgs, AlertsCommand, GlobalOpts};
use crate::commands::confirm;
use crate::error::CliError;
use crate::output::{self, print_output};

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
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id,
            kind: alert.kind.to_string(),
            title: alert.title.clone(),
            message: alert.message.clone(),
            active: if alert.is_active { "yes" } else { "no" }.to_owned(),
        }
    }
}

pub async fn handle(
    store: &EnergyStore,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AlertsCommand::List => {
            let alerts = store.alerts().await?;
            render_alerts(&alerts, global);
        }
        AlertsCommand::ByType { kind } => {
            let alerts = store.alerts_by_kind(kind.into()).await?;
            render_alerts(&alerts, global);
        }
        AlertsCommand::Add {
            kind,
            title,
            message,
            inactive,
        } => {
            let created = store
                .create_alert(NewAlert {
                    kind: kind.into(),
                    title,
                    message,
                    is_active: inactive.then_some(false),
                })
                .await?;
            if !global.quiet {
                eprintln!("Created alert {} ({})", created.id, created.kind);
            }
            render_alert(&created, global);
        }
        AlertsCommand::Update {
            id,
            kind,
            title,
            message,
            active,
        } => {
            let updated = store
                .update_alert(
                    id,
                    AlertUpdate {
                        kind: kind.map(Into::into),
                        title,
                        message,
                        is_active: active,
                    },
                )
                .await?;
            if !global.quiet {
                eprintln!("Updated alert {}", updated.id);
            }
            render_alert(&updated, global);
        }
        AlertsCommand::Delete { id } => {
            if !confirm(&format!("Delete alert {id}?"), global.yes)? {
                return Ok(());
            }
            store.delete_alert(id).await?;
            if !global.quiet {
                eprintln!("Deleted alert {id}");
            }
        }
    }
    Ok(())
}

fn render_alerts(alerts: &[Alert], global: &GlobalOpts) {
    let rendered = output::render_list(&global.output, alerts, |a| AlertRow::from(a), |a| {
        a.id.to_string()
    });
    print_output(&rendered, global.quiet);
}

fn render_alert(alert: &Alert, global: &GlobalOpts) {
    let rendered = output::render_single(
        &global.output,
        alert,
        |a| output::render_table(&[AlertRow::from(a)]),
        |a| a.id.to_string(),
    );
    print_output(&rendered, global.quiet);
}
