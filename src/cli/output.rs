use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use kennel_config::Config;
use kennel_core::{format_currency, format_percent, NegativeStyle, NumberLocale};
use kennel_domain::TrendResult;

/// Formatting preferences resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Formatter {
    pub currency: String,
    pub locale: NumberLocale,
}

impl Formatter {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            locale: NumberLocale {
                decimal_separator: config.decimal_separator,
                grouping_separator: config.grouping_separator,
                precision: config.number_precision,
            },
        }
    }

    pub fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.currency, &self.locale, NegativeStyle::Parentheses)
    }

    /// Percentage change, green when up and red when down.
    pub fn trend(&self, trend: &TrendResult) -> ColoredString {
        let text = format_percent(trend.percent_change);
        if trend.percent_change > 0.0 {
            text.green()
        } else if trend.percent_change < 0.0 {
            text.red()
        } else {
            text.normal()
        }
    }
}

pub fn section(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title.bold())?;
    writeln!(out, "{}", "-".repeat(title.chars().count()).dimmed())
}

pub fn row(out: &mut dyn Write, label: &str, values: &[String]) -> io::Result<()> {
    write!(out, "{label:<12}")?;
    for value in values {
        write!(out, "{value:>16}")?;
    }
    writeln!(out)
}

pub fn header(out: &mut dyn Write, label: &str, columns: &[&str]) -> io::Result<()> {
    let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let mut line = Vec::new();
    row(&mut line, label, &columns)?;
    write!(out, "{}", String::from_utf8_lossy(&line).underline())
}

pub fn notice(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "[!]".yellow().bold(), message.yellow())
}

pub fn json<T: serde::Serialize>(out: &mut dyn Write, value: &T) -> crate::errors::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
