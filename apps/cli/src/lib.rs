//! # agri CLI Library
//!
//! Command-line front end for the subsidy engine. Everything except argument
//! parsing entry lives here so it can be tested without spawning a process.
//!
//! ## Module Organization
//! ```text
//! agri_cli/
//! ├── lib.rs          ◄─── You are here (logging, config, dispatch)
//! ├── cli.rs          ◄─── clap command tree
//! ├── config.rs       ◄─── AppConfig, farm/rate file loading
//! ├── error.rs        ◄─── AppError for the binary boundary
//! ├── report.rs       ◄─── Text summary, CSV export, JSON
//! └── state/
//!     ├── mod.rs      ◄─── State type exports
//!     └── session.rs  ◄─── CalculatorSession (input + currency)
//! ```
//!
//! ## Output Streams
//! Reports go to stdout (or `--output`); logs go to stderr, so
//! `agri calculate --format json | jq` always sees clean JSON.

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod state;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use agri_core::{convert, format_amount, Currency, FarmInput, RateSchedule};

use cli::{CalculateArgs, Cli, Command, FarmArgs, OutputFormat, TableFormat};
use config::{load_farm_input, AppConfig};
use error::{AppError, AppResult};
use report::{CalendarView, RatesTable, Summary};
use state::CalculatorSession;

/// Runs the CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  1. Parse arguments (clap)                                              │
/// │  2. Initialize logging (stderr, RUST_LOG or info,agri=debug)            │
/// │  3. Load AppConfig: defaults → agri.toml → AGRI_* env                   │
/// │  4. --schedule flag overrides the configured rate table                 │
/// │  5. Load + validate the RateSchedule, share it behind an Arc            │
/// │  6. Dispatch the subcommand                                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    info!("Starting agri {}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load_or_default(cli.config.clone());
    if let Some(path) = cli.schedule.clone() {
        debug!(?path, "Overriding schedule path from command line");
        config.schedule.path = Some(path);
    }

    let schedule = Arc::new(
        config
            .load_schedule()
            .context("Could not load the rate schedule")?,
    );

    let output = execute(cli.command, &config, schedule, Local::now().date_naive())?;
    if let Some(text) = output {
        println!("{}", text);
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=agri=trace` - Trace for agri crates only
/// - Default: INFO, DEBUG for agri
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,agri=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Executes one command and returns what should be printed to stdout.
///
/// `today` is injected so calendar lookups and export dates are testable.
/// `None` means the output was written to a file.
pub fn execute(
    command: Command,
    config: &AppConfig,
    schedule: Arc<RateSchedule>,
    today: NaiveDate,
) -> AppResult<Option<String>> {
    match command {
        Command::Calculate(args) => calculate(args, config, schedule, today),

        Command::Validate(farm_args) => {
            let session = build_session(&farm_args, config.display.currency, schedule)?;
            let warnings = session.validation_errors();
            if warnings.is_empty() {
                Ok(Some("No issues found".to_string()))
            } else {
                warn!(count = warnings.len(), "Farm input has validation issues");
                Ok(Some(
                    warnings
                        .iter()
                        .map(|w| format!("! {}", w))
                        .collect::<Vec<_>>()
                        .join("\n"),
                ))
            }
        }

        Command::Convert { amount, currency } => {
            let target = currency.unwrap_or(config.display.currency);
            let converted = convert(amount, target, &schedule);
            Ok(Some(format!(
                "{} = {}",
                format_amount(amount, schedule.base_currency),
                format_amount(converted, target)
            )))
        }

        Command::Rates { currency, format } => match format {
            TableFormat::Json => Ok(Some(report::render_json(schedule.as_ref())?)),
            TableFormat::Text => Ok(Some(
                RatesTable {
                    schedule: &schedule,
                    currency: currency.unwrap_or(schedule.base_currency),
                }
                .to_string(),
            )),
        },

        Command::Calendar { date } => match schedule.calendar {
            Some(ref calendar) => Ok(Some(
                CalendarView {
                    program_year: schedule.program_year,
                    calendar,
                    today: date.unwrap_or(today),
                }
                .to_string(),
            )),
            None => Ok(Some(format!(
                "No calendar published for program year {}",
                schedule.program_year
            ))),
        },
    }
}

fn calculate(
    args: CalculateArgs,
    config: &AppConfig,
    schedule: Arc<RateSchedule>,
    today: NaiveDate,
) -> AppResult<Option<String>> {
    let currency = args.currency.unwrap_or(config.display.currency);
    let session = build_session(&args.farm, currency, schedule)?;

    let result = session.results();
    let warnings = session.validation_errors();
    info!(
        grand_total = result.grand_total,
        currency = %result.currency,
        converted = result.grand_total_converted,
        warnings = warnings.len(),
        "Calculation complete"
    );
    for warning in &warnings {
        warn!("{}", warning);
    }

    let rendered = match args.format {
        OutputFormat::Text => Summary {
            farm: session.input(),
            result: &result,
            schedule: session.schedule(),
            warnings: &warnings,
        }
        .to_string(),
        OutputFormat::Json => report::render_json(&result)?,
        OutputFormat::Csv => report::render_csv(&result, session.schedule(), today),
    };

    match args.output {
        Some(path) => {
            let path = if args.format == OutputFormat::Csv && path.is_dir() {
                path.join(report::export_file_name(today))
            } else {
                path
            };
            write_output(&path, &rendered)?;
            Ok(None)
        }
        None => Ok(Some(rendered)),
    }
}

/// Builds a session from an optional farm file plus `--set` edits.
fn build_session(
    args: &FarmArgs,
    currency: Currency,
    schedule: Arc<RateSchedule>,
) -> AppResult<CalculatorSession> {
    let input = match args.farm {
        Some(ref path) => {
            info!(?path, "Loading farm input");
            load_farm_input(path)?
        }
        None => FarmInput::default(),
    };

    let mut session = CalculatorSession::new(schedule, currency).with_input(input);
    session.apply_assignments(&args.assignments)?;
    Ok(session)
}

fn write_output(path: &Path, contents: &str) -> AppResult<()> {
    std::fs::write(path, contents).map_err(|source| AppError::Write {
        path: PathBuf::from(path),
        source,
    })?;
    info!(?path, bytes = contents.len(), "Report written");
    Ok(())
}
