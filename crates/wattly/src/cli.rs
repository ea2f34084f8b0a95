//! Clap derive structures for the `wattly` CLI.
//!
//! Defines the complete command tree, global flags, and shared argument
//! types.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use wattly_core::{AlertKind, EnergyKind};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wattly -- energy-consumption dashboard from the command line
#[derive(Debug, Parser)]
#[command(
    name = "wattly",
    version,
    about = "Track electricity, water, and gas consumption from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides config file)
    #[arg(long, env = "WATTLY_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, env = "WATTLY_TIMEOUT_MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Path to an alternate config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', env = "WATTLY_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Shared argument enums ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Electricity,
    Water,
    Gas,
}

impl From<KindArg> for EnergyKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Electricity => Self::Electricity,
            KindArg::Water => Self::Water,
            KindArg::Gas => Self::Gas,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AlertKindArg {
    Danger,
    Warning,
    Success,
}

impl From<AlertKindArg> for AlertKind {
    fn from(kind: AlertKindArg) -> Self {
        match kind {
            AlertKindArg::Danger => Self::Danger,
            AlertKindArg::Warning => Self::Warning,
            AlertKindArg::Success => Self::Success,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Combined dashboard: current consumption, monthly trend, alerts
    #[command(alias = "dash")]
    Dashboard,

    /// Submitted meter readings
    #[command(alias = "rec")]
    Records(RecordsArgs),

    /// Daily consumption aggregates
    Daily(DailyArgs),

    /// Monthly consumption aggregates
    Monthly(MonthlyArgs),

    /// Consumption alerts
    Alerts(AlertsArgs),
}

// ── Records ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub command: RecordsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecordsCommand {
    /// List readings of one energy kind
    List {
        /// Energy kind to filter by
        #[arg(value_enum)]
        kind: KindArg,
    },

    /// List readings inside a date range
    Range {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },

    /// Total consumption for one kind inside a date range
    Total {
        #[arg(value_enum)]
        kind: KindArg,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },

    /// Submit a new meter reading
    Add {
        #[arg(value_enum)]
        kind: KindArg,
        /// Measured value (must be positive)
        #[arg(long)]
        value: f64,
        /// Unit override (defaults to the backend's unit for the kind)
        #[arg(long)]
        unit: Option<String>,
        /// Reading date (defaults to today on the backend)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Free-form note
        #[arg(long)]
        notes: Option<String>,
    },
}

// ── Daily ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DailyArgs {
    #[command(subcommand)]
    pub command: DailyCommand,
}

#[derive(Debug, Subcommand)]
pub enum DailyCommand {
    /// One day's aggregate
    Show {
        /// Date (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Aggregates inside a date range
    Range {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },

    /// All daily aggregates
    List,

    /// Record one day's aggregate
    Add {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        electricity: f64,
        #[arg(long)]
        water: f64,
        #[arg(long)]
        gas: f64,
        /// Total (defaults to the sum of the three components)
        #[arg(long)]
        total: Option<f64>,
    },
}

// ── Monthly ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MonthlyArgs {
    #[command(subcommand)]
    pub command: MonthlyCommand,
}

#[derive(Debug, Subcommand)]
pub enum MonthlyCommand {
    /// One month's aggregate
    Show {
        year: i32,
        month: u32,
    },

    /// A full year of aggregates
    Year {
        year: i32,
    },

    /// All monthly aggregates
    List,

    /// Record one month's aggregate
    Add {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        electricity: f64,
        #[arg(long)]
        water: f64,
        #[arg(long)]
        gas: f64,
        /// Total (defaults to the sum of the three components)
        #[arg(long)]
        total: Option<f64>,
        /// Month-over-month trend percentage
        #[arg(long)]
        trend: Option<f64>,
    },
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// Active alerts
    List,

    /// Alerts of one severity
    ByType {
        #[arg(value_enum)]
        kind: AlertKindArg,
    },

    /// Create an alert
    Add {
        #[arg(value_enum)]
        kind: AlertKindArg,
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
        /// Create the alert in the inactive state
        #[arg(long)]
        inactive: bool,
    },

    /// Update fields of an alert
    Update {
        id: i64,
        #[arg(long, value_enum)]
        kind: Option<AlertKindArg>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        message: Option<String>,
        /// Set the active flag
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete an alert
    Delete {
        id: i64,
    },
}
