use std::{io::Write, path::Path};

use chrono::NaiveDate;

use kennel_config::{Config, ConfigManager};
use kennel_core::{
    buckets_for_year, build_series, format_date, parse_number, trend_values, window_for,
    FixedClock, RecordQuery, RecordSource, ReportService, SaleCategory, SystemClock,
};
use kennel_domain::{AggregateResult, Granularity, RecordKind, TimeWindow};
use kennel_geo::{DeliveryMap, LocationCache, NominatimGeocoder, OsrmRouter};

use super::{
    output::{self, Formatter},
    Command,
};
use crate::{
    errors::{AppError, Result},
    storage::JsonRecordSource,
    utils::build_info::BuildMetadata,
};

pub fn execute(
    command: &Command,
    json: bool,
    config: &Config,
    manager: &ConfigManager,
    out: &mut dyn Write,
) -> Result<()> {
    let fmt = Formatter::from_config(config);
    match command {
        Command::Report {
            snapshot,
            year,
            granularity,
        } => {
            let granularity = granularity.unwrap_or(config.report_granularity);
            report(out, &fmt, json, snapshot, *year, granularity)
        }
        Command::Series {
            snapshot,
            year,
            field,
            granularity,
        } => {
            let granularity = granularity.unwrap_or(config.report_granularity);
            let source = JsonRecordSource::new(snapshot);
            let buckets = buckets_for_year(*year, granularity);
            let query = RecordQuery::all().within(year_window(*year)?);
            let (records, notice) = ReportService::load_or_empty(&source, &query);
            if let Some(message) = notice {
                tracing::warn!(%message, "series built without records");
            }
            output::json(out, &build_series(&records, &buckets, *field))
        }
        Command::Trend { current, prior } => {
            let current = parse_amount(current, &fmt)?;
            let prior = parse_amount(prior, &fmt)?;
            let result = trend_values(current, prior);
            if json {
                return output::json(out, &result);
            }
            writeln!(
                out,
                "{} ({} -> {})",
                fmt.trend(&result),
                fmt.money(prior),
                fmt.money(current)
            )?;
            Ok(())
        }
        Command::Dashboard { snapshot, as_of } => dashboard(out, &fmt, json, snapshot, *as_of),
        Command::Breakdown { snapshot, year, by } => {
            breakdown(out, &fmt, json, snapshot, *year, (*by).into())
        }
        Command::Transport { snapshot, year } => {
            let window = year_window(*year)?;
            let rows = JsonRecordSource::new(snapshot).fetch_transport(Some(window))?;
            let summary = ReportService::transport_summary(&rows, &window);
            if json {
                return output::json(out, &summary);
            }
            output::section(out, &format!("Transport {year}"))?;
            writeln!(out, "Trips            : {}", summary.trips)?;
            writeln!(out, "Total miles      : {:.1}", summary.total_miles)?;
            writeln!(out, "Total cost       : {}", fmt.money(summary.total_cost))?;
            if summary.trips_without_miles > 0 {
                output::notice(
                    out,
                    &format!("{} trip(s) have no mileage", summary.trips_without_miles),
                )?;
            }
            Ok(())
        }
        Command::Map { snapshot, origin } => {
            let origin = (!origin.is_empty()).then(|| origin.join(" "));
            let origin = origin.as_deref().or(config.geo.origin.as_deref());
            delivery_map(out, config, json, snapshot, origin)
        }
        Command::View { key: view } => {
            if json {
                return output::json(out, &view);
            }
            writeln!(out, "Key      : {view}")?;
            writeln!(out, "Tab      : {}", view.tab())?;
            writeln!(out, "Sub-tab  : {}", view.sub_tab().unwrap_or("-"))?;
            writeln!(
                out,
                "Restricted: {}",
                if view.requires_authorization() { "yes" } else { "no" }
            )?;
            Ok(())
        }
        Command::Config => {
            if !json {
                writeln!(out, "# {}", manager.config_path().display())?;
            }
            output::json(out, config)
        }
        Command::Version => {
            let meta = BuildMetadata::current();
            if json {
                return output::json(out, &meta);
            }
            output::section(out, &format!("Kennel Books {}", meta.version))?;
            writeln!(out, "{meta}")?;
            Ok(())
        }
    }
}

fn report(
    out: &mut dyn Write,
    fmt: &Formatter,
    json: bool,
    snapshot: &Path,
    year: i32,
    granularity: Granularity,
) -> Result<()> {
    let source = JsonRecordSource::new(snapshot);
    let report = ReportService::profit_report(&source, &RecordQuery::all(), year, granularity);
    if json {
        return output::json(out, &report);
    }
    output::section(out, &format!("Profit report {year} ({})", granularity.label()))?;
    if let Some(message) = &report.notice {
        output::notice(out, message)?;
    }
    output::header(out, "Period", &["Revenue", "Profit", "Refunds"])?;
    let rows = report
        .revenue
        .iter()
        .zip(&report.profit)
        .zip(&report.refunds);
    for ((revenue, profit), refunds) in rows {
        output::row(
            out,
            revenue.label(),
            &[
                fmt.money(revenue.value()),
                fmt.money(profit.value()),
                fmt.money(refunds.value()),
            ],
        )?;
    }
    let totals = &report.totals;
    output::row(
        out,
        "Total",
        &[
            fmt.money(totals.total_revenue),
            fmt.money(totals.profit()),
            fmt.money(totals.refunds),
        ],
    )?;
    writeln!(out)?;
    totals_block(out, fmt, totals)
}

fn totals_block(out: &mut dyn Write, fmt: &Formatter, totals: &AggregateResult) -> Result<()> {
    writeln!(out, "Cost of goods    : {}", fmt.money(totals.cost_of_goods))?;
    writeln!(out, "Shipping         : {}", fmt.money(totals.shipping))?;
    writeln!(out, "Platform fees    : {}", fmt.money(totals.fees))?;
    writeln!(out, "Payouts          : {}", fmt.money(totals.payouts))?;
    writeln!(out, "Bills            : {}", fmt.money(totals.bills))?;
    writeln!(out, "Records          : {}", totals.count)?;
    Ok(())
}

fn dashboard(
    out: &mut dyn Write,
    fmt: &Formatter,
    json: bool,
    snapshot: &Path,
    as_of: Option<NaiveDate>,
) -> Result<()> {
    let source = JsonRecordSource::new(snapshot);
    let summary = match as_of {
        Some(date) => {
            ReportService::dashboard_summary(&source, &FixedClock::on(date), &RecordQuery::all())
        }
        None => ReportService::dashboard_summary(&source, &SystemClock, &RecordQuery::all()),
    };
    if json {
        return output::json(out, &summary);
    }
    output::section(out, &format!("Dashboard as of {}", format_date(summary.as_of)))?;
    if let Some(message) = &summary.notice {
        output::notice(out, message)?;
    }
    output::header(out, "", &["This month", "Last month", "Last year"])?;
    output::row(
        out,
        "Revenue",
        &[
            fmt.money(summary.current.total_revenue),
            fmt.money(summary.previous.total_revenue),
            fmt.money(summary.last_year.total_revenue),
        ],
    )?;
    output::row(
        out,
        "Profit",
        &[
            fmt.money(summary.current.profit()),
            fmt.money(summary.previous.profit()),
            fmt.money(summary.last_year.profit()),
        ],
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Revenue  MoM {}  YoY {}",
        fmt.trend(&summary.revenue_month_over_month),
        fmt.trend(&summary.revenue_year_over_year)
    )?;
    writeln!(
        out,
        "Profit   MoM {}  YoY {}",
        fmt.trend(&summary.profit_month_over_month),
        fmt.trend(&summary.profit_year_over_year)
    )?;
    Ok(())
}

fn breakdown(
    out: &mut dyn Write,
    fmt: &Formatter,
    json: bool,
    snapshot: &Path,
    year: i32,
    by: SaleCategory,
) -> Result<()> {
    let window = year_window(year)?;
    let kinds: &[RecordKind] = match by {
        SaleCategory::Platform => &[RecordKind::Sale, RecordKind::PuppySale, RecordKind::Refund],
        SaleCategory::SaleType => &[RecordKind::Sale],
    };
    let source = JsonRecordSource::new(snapshot).with_sale_category(by);
    let query = RecordQuery::all().within(window).with_kinds(kinds);
    let (records, notice) = ReportService::load_or_empty(&source, &query);
    let rows = ReportService::platform_breakdown(&records, &window);
    if json {
        return output::json(out, &rows);
    }
    let title = match by {
        SaleCategory::Platform => "Sales by platform",
        SaleCategory::SaleType => "Sales by type",
    };
    output::section(out, &format!("{title} {year}"))?;
    if let Some(message) = notice {
        output::notice(out, &message)?;
    }
    output::header(out, "Category", &["Revenue", "Profit", "Share"])?;
    for entry in &rows {
        output::row(
            out,
            &entry.category,
            &[
                fmt.money(entry.totals.total_revenue),
                fmt.money(entry.totals.profit()),
                format!("{:.1}%", entry.share_of_revenue),
            ],
        )?;
    }
    Ok(())
}

fn delivery_map(
    out: &mut dyn Write,
    config: &Config,
    json: bool,
    snapshot: &Path,
    origin: Option<&str>,
) -> Result<()> {
    let rows = JsonRecordSource::new(snapshot).fetch_transport(None)?;
    let geocoder = NominatimGeocoder::from_settings(&config.geo)?;
    let router = OsrmRouter::from_settings(&config.geo)?;
    let mut cache = LocationCache::bounded(config.geo.cache_capacity);
    let map = DeliveryMap::from_transport(&rows, origin, &mut cache, &geocoder, &router);
    if json {
        return output::json(out, &map);
    }
    output::section(out, "Delivery map")?;
    for point in &map.points {
        let miles = point
            .miles_from_origin
            .map(|miles| format!("{miles:.1} mi"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<24} {:<32} {:>22} {:>10}",
            point.label,
            point.location,
            point.coordinates.to_string(),
            miles
        )?;
    }
    for location in &map.unresolved {
        output::notice(out, &format!("could not locate `{location}`"))?;
    }
    writeln!(out, "Total miles      : {:.1}", map.total_miles)?;
    Ok(())
}

fn year_window(year: i32) -> Result<TimeWindow> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| AppError::usage(format!("invalid year `{year}`")))?;
    Ok(window_for(start, Granularity::Year))
}

fn parse_amount(text: &str, fmt: &Formatter) -> Result<f64> {
    let cleaned = text.trim().trim_start_matches(['$', '€', '£']);
    parse_number(cleaned, &fmt.locale)
        .ok_or_else(|| AppError::usage(format!("`{text}` is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn execute_line(line: &str) -> Result<String> {
        colored::control::set_override(false);
        let args = std::iter::once("kennel_books_cli").chain(line.split_whitespace());
        let cli = Cli::try_parse_from(args).unwrap();
        let command = cli.command.expect("command");
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut buf = Vec::new();
        execute(&command, cli.json, &Config::default(), &manager, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn run(line: &str) -> String {
        execute_line(line).unwrap()
    }

    #[test]
    fn trend_prints_signed_percent() {
        let text = run("trend 150 100");
        assert!(text.starts_with("+50.0%"), "{text}");
        assert!(text.contains("$100.00 -> $150.00"));
        assert!(run("trend 50 0").starts_with("+100.0%"));
        assert!(run("trend $1,000 2,000").starts_with("-50.0%"));
    }

    #[test]
    fn view_reports_authorization() {
        let text = run("view admin_credentials");
        assert!(text.contains("Tab      : admin"));
        assert!(text.contains("Restricted: yes"));
        assert!(run("view reports").contains("Restricted: no"));
    }

    #[test]
    fn missing_snapshot_report_is_non_fatal() {
        let text = run("report /nonexistent/kennel/books.json 2024 quarter");
        assert!(text.contains("Could not load records"));
        assert!(text.contains("Q4"));
    }

    #[test]
    fn non_numeric_trend_is_usage_error() {
        let err = execute_line("trend lots 1").unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }
}
