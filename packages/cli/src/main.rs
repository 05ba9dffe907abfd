#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for housing registry reports.
//!
//! Reads a JSON payload exported from the backend report-data endpoint
//! (`{"households": [...], "infrastructure": [...], "areas": [...]}`) and
//! prints dashboard aggregates or report tables.

mod render;

use std::io::Read as _;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use housing_registry_models::ReportPayload;
use housing_registry_report::parsing::parse_day;
use housing_registry_report::{
    DashboardWindows, RawWindow, RecordFilter, ReportConfig, build_daily_series, build_dashboard,
    normalize_with_lookback, project, retain_in_window, summarize_demographics,
    summarize_habitability, summarize_infrastructure,
};
use housing_registry_report_models::{NormalizedWindow, ReportType};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "housing_registry", about = "Housing registry report tool")]
struct Cli {
    /// Path to a report config TOML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// JSON payload file (`-` for stdin)
    #[arg(long)]
    payload: PathBuf,
    /// Window start date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Window end date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// Date to treat as today (defaults to the local date)
    #[arg(long)]
    today: Option<String>,
    /// Only households surveyed in this year
    #[arg(long)]
    year: Option<i32>,
    /// Only households and areas in this district
    #[arg(long)]
    district: Option<String>,
    /// Only households and areas in this village
    #[arg(long)]
    village: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Households per day over the window
    Series {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Habitable (RLH) / not habitable (RTLH) tallies over the window
    Habitability {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Male / female / member totals over the window
    Demographics {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Infrastructure (PSU) items retained by the window
    Infrastructure {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Report table(s) for a report type, limited to records created in
    /// the window
    Table {
        /// household, infrastructure, area or combined
        #[arg(long = "type", default_value = "combined", value_parser = parse_report_type)]
        report_type: ReportType,
        /// Print JSON instead of aligned text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Every dashboard chart; `--from`/`--to` apply to all charts
    Dashboard {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Windowed command output: the resolved window, what was adjusted, and
/// the result.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Windowed<T> {
    #[serde(flatten)]
    window: NormalizedWindow,
    result: T,
}

struct Input {
    payload: ReportPayload,
    today: NaiveDate,
}

impl InputArgs {
    fn filter(&self) -> RecordFilter {
        RecordFilter {
            year: self.year,
            district: self.district.clone(),
            village: self.village.clone(),
        }
    }

    fn load(&self) -> Result<Input, Box<dyn std::error::Error>> {
        let today = match self.today.as_deref() {
            Some(raw) => parse_day(raw).ok_or_else(|| format!("Invalid --today date: {raw}"))?,
            None => Local::now().date_naive(),
        };

        let payload = read_payload(&self.payload)?;
        log::info!(
            "Loaded {} household(s), {} infrastructure item(s), {} area(s)",
            payload.households.len(),
            payload.infrastructure.len(),
            payload.areas.len()
        );

        Ok(Input {
            payload: self.filter().apply(&payload),
            today,
        })
    }

    fn window(&self, today: NaiveDate, config: &ReportConfig) -> NormalizedWindow {
        normalize_with_lookback(
            self.from.as_deref(),
            self.to.as_deref(),
            today,
            config.window.default_days,
        )
    }
}

fn parse_report_type(raw: &str) -> Result<ReportType, String> {
    raw.parse().map_err(|_| {
        format!("Unknown report type '{raw}' (household, infrastructure, area, combined)")
    })
}

fn read_payload(path: &Path) -> Result<ReportPayload, Box<dyn std::error::Error>> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read payload {}: {e}", path.display()))?
    };
    Ok(serde_json::from_str(&contents)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    match cli.command {
        Commands::Series { input } => {
            let Input { payload, today } = input.load()?;
            let window = input.window(today, &config);
            let result = build_daily_series(&payload.households, &window.window)?;
            print_json(&Windowed { window, result })?;
        }
        Commands::Habitability { input } => {
            let Input { payload, today } = input.load()?;
            let window = input.window(today, &config);
            let result = summarize_habitability(&payload.households, &window.window);
            print_json(&Windowed { window, result })?;
        }
        Commands::Demographics { input } => {
            let Input { payload, today } = input.load()?;
            let window = input.window(today, &config);
            let result = summarize_demographics(&payload.households, &window.window);
            print_json(&Windowed { window, result })?;
        }
        Commands::Infrastructure { input } => {
            let Input { payload, today } = input.load()?;
            let window = input.window(today, &config);
            let result = summarize_infrastructure(&payload.infrastructure, &window.window);
            print_json(&Windowed { window, result })?;
        }
        Commands::Table {
            report_type,
            json,
            input,
        } => {
            let Input { payload, today } = input.load()?;
            let window = input.window(today, &config);
            let payload = retain_in_window(&payload, &window.window);
            let result = project(report_type, &payload, &config);
            if json {
                print_json(&Windowed { window, result })?;
            } else {
                log::info!("{} report over {}", result.report_type(), window.window);
                print!("{}", render::render_projection(&result));
            }
        }
        Commands::Dashboard { input } => {
            let Input { payload, today } = input.load()?;
            let windows = DashboardWindows::uniform(&RawWindow::new(
                input.from.as_deref(),
                input.to.as_deref(),
            ));
            let dashboard = build_dashboard(&payload, &windows, today, &config)?;
            print_json(&dashboard)?;
        }
    }

    Ok(())
}
