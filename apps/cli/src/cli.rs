//! # Command Line
//!
//! ```text
//! agri [--config FILE] [--schedule FILE] <COMMAND>
//!
//!   calculate  [--farm FILE] [--set FIELD=VALUE]... [--currency C]
//!              [--format text|json|csv] [--output PATH]
//!   validate   [--farm FILE] [--set FIELD=VALUE]...
//!   convert    <AMOUNT> [--currency C]
//!   rates      [--currency C] [--format text|json]
//!   calendar   [--date YYYY-MM-DD]
//! ```

use std::path::PathBuf;

use agri_core::Currency;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "agri",
    version,
    about = "Agricultural subsidy calculator (direct, crop, animal and ecoscheme payments)"
)]
pub struct Cli {
    /// Configuration file (default: platform config dir, agri.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rate table (.toml or .json) replacing the built-in 2025 rates
    #[arg(long, global = true, value_name = "FILE")]
    pub schedule: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the itemized entitlement for a farm
    Calculate(CalculateArgs),

    /// Report out-of-policy input without calculating
    Validate(FarmArgs),

    /// Convert a base-currency amount into a display currency
    Convert {
        amount: f64,

        #[arg(long, short = 'c')]
        currency: Option<Currency>,
    },

    /// Print the rate table
    Rates {
        #[arg(long, short = 'c')]
        currency: Option<Currency>,

        #[arg(long, value_enum, default_value_t = TableFormat::Text)]
        format: TableFormat,
    },

    /// Show program deadlines and the current campaign phase
    Calendar {
        /// Date to check instead of today
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
}

/// Where the farm input comes from.
#[derive(Args, Debug, Default)]
pub struct FarmArgs {
    /// Farm file (.json or .toml) with camelCase field names
    #[arg(long, short = 'f', value_name = "FILE")]
    pub farm: Option<PathBuf>,

    /// Set one field, e.g. --set totalArea=25.5 --set isYoungFarmer=true
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub assignments: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub farm: FarmArgs,

    /// Display currency (default from config, PLN)
    #[arg(long, short = 'c')]
    pub currency: Option<Currency>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write to a file (or a directory, for CSV) instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calculate() {
        let cli = Cli::try_parse_from([
            "agri",
            "calculate",
            "--farm",
            "farm.json",
            "--set",
            "totalArea=10",
            "--set",
            "isSmallFarm=true",
            "--currency",
            "eur",
            "--format",
            "csv",
        ])
        .unwrap();

        match cli.command {
            Command::Calculate(args) => {
                assert_eq!(args.farm.farm, Some(PathBuf::from("farm.json")));
                assert_eq!(args.farm.assignments, vec!["totalArea=10", "isSmallFarm=true"]);
                assert_eq!(args.currency, Some(Currency::Eur));
                assert_eq!(args.format, OutputFormat::Csv);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["agri", "rates", "--schedule", "rates.toml"]).unwrap();
        assert_eq!(cli.schedule, Some(PathBuf::from("rates.toml")));
    }

    #[test]
    fn test_rejects_unknown_currency() {
        assert!(Cli::try_parse_from(["agri", "convert", "100", "--currency", "USD"]).is_err());
    }

    #[test]
    fn test_parse_calendar_date() {
        let cli = Cli::try_parse_from(["agri", "calendar", "--date", "2025-06-20"]).unwrap();
        match cli.command {
            Command::Calendar { date } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 20));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
