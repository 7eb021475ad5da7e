//! `kennel_books_cli` argument parsing and dispatch.

pub mod commands;
pub mod output;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use chrono::NaiveDate;
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand, ValueEnum};

use kennel_config::ConfigManager;
use kennel_core::SaleCategory;
use kennel_domain::{lenient, AggregateField, DashboardView, Granularity};

use crate::errors::Result;

#[derive(Debug, Parser)]
#[command(name = "kennel_books_cli")]
#[command(about = "Profit, sales and transport reports for a kennel's books")]
#[command(
    after_help = "Environment:\n  KENNEL_BOOKS_HOME   Config directory override\n  RUST_LOG            Log filter directives"
)]
pub struct Cli {
    /// Emit JSON instead of formatted tables.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[arg(long = "no-color", global = true, default_value_t = false)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Revenue, profit and refunds per period of a year.
    Report {
        snapshot: PathBuf,
        #[arg(value_parser = year_parser())]
        year: i32,
        /// day, week, month, quarter or year (defaults to the configured granularity).
        granularity: Option<Granularity>,
    },
    /// One aggregate per period of a year, as JSON.
    Series {
        snapshot: PathBuf,
        #[arg(value_parser = year_parser())]
        year: i32,
        field: AggregateField,
        granularity: Option<Granularity>,
    },
    /// Signed percentage change between two amounts.
    Trend {
        #[arg(allow_negative_numbers = true)]
        current: String,
        #[arg(allow_negative_numbers = true)]
        prior: String,
    },
    /// Current month against last month and the same month last year.
    Dashboard {
        snapshot: PathBuf,
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_as_of)]
        as_of: Option<NaiveDate>,
    },
    /// Per-category totals and revenue share for a year.
    Breakdown {
        snapshot: PathBuf,
        #[arg(value_parser = year_parser())]
        year: i32,
        #[arg(value_enum, default_value_t = BreakdownBy::Platform)]
        by: BreakdownBy,
    },
    /// Trips, miles and cost from the transport log.
    Transport {
        snapshot: PathBuf,
        #[arg(value_parser = year_parser())]
        year: i32,
    },
    /// Geocodes transport destinations and measures driving miles from the origin.
    Map {
        snapshot: PathBuf,
        /// Starting point (defaults to `geo.origin` in the config).
        #[arg(num_args = 0..)]
        origin: Vec<String>,
    },
    /// Explains a legacy `tab_subtab` dashboard key.
    View { key: DashboardView },
    /// Prints the config path and the effective config.
    Config,
    /// Prints build metadata.
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BreakdownBy {
    Platform,
    #[value(alias = "sale_type", alias = "type")]
    SaleType,
}

impl From<BreakdownBy> for SaleCategory {
    fn from(by: BreakdownBy) -> Self {
        match by {
            BreakdownBy::Platform => SaleCategory::Platform,
            BreakdownBy::SaleType => SaleCategory::SaleType,
        }
    }
}

/// Entry point used by the binary: parses `env::args`, loads config, writes to stdout.
pub fn run_cli() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => return Err(err.into()),
        },
    };
    if cli.no_color {
        colored::control::set_override(false);
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let Some(command) = &cli.command else {
        writeln!(out, "{}", Cli::command().render_help())?;
        return Ok(());
    };
    let manager = ConfigManager::from_env()?;
    let config = manager.load()?;
    commands::execute(command, cli.json, &config, &manager, &mut out)
}

fn year_parser() -> clap::builder::RangedI64ValueParser<i32> {
    clap::value_parser!(i32).range(1900..=9999)
}

fn parse_as_of(text: &str) -> std::result::Result<NaiveDate, String> {
    lenient::parse_date(text).ok_or_else(|| format!("`{text}` is not a YYYY-MM-DD date"))
}
