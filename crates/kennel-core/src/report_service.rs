//! Report composition over a [`RecordSource`].

use chrono::NaiveDate;
use serde::Serialize;

use kennel_domain::{
    AggregateField, AggregateResult, Granularity, SaleRow, SeriesPoint, TimeWindow,
    TransactionRecord, TransportRow, TrendResult,
};

use crate::{
    adapters::{from_sale, SaleCategory},
    aggregate::{aggregate, aggregate_by_category},
    bucketing::{buckets_for_year, previous_window, same_window_last_year, window_for},
    filter::in_window,
    series::build_series,
    source::{RecordQuery, RecordSource},
    time::Clock,
    trend::trend,
};

/// Totals and chart series for one calendar year.
#[derive(Debug, Clone, Serialize)]
pub struct ProfitReport {
    pub year: i32,
    pub granularity: Granularity,
    pub totals: AggregateResult,
    pub revenue: Vec<SeriesPoint>,
    pub profit: Vec<SeriesPoint>,
    pub refunds: Vec<SeriesPoint>,
    /// Non-fatal notice shown when the data store could not be read.
    pub notice: Option<String>,
}

/// Headline figures for the overview tab.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub as_of: NaiveDate,
    pub window: TimeWindow,
    pub current: AggregateResult,
    pub previous: AggregateResult,
    pub last_year: AggregateResult,
    pub revenue_month_over_month: TrendResult,
    pub profit_month_over_month: TrendResult,
    pub revenue_year_over_year: TrendResult,
    pub profit_year_over_year: TrendResult,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub totals: AggregateResult,
    /// Share of the window's revenue, in percent.
    pub share_of_revenue: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransportSummary {
    pub window: TimeWindow,
    pub trips: usize,
    pub total_miles: f64,
    pub total_cost: f64,
    /// Trips logged without a mileage figure.
    pub trips_without_miles: usize,
}

pub struct ReportService;

impl ReportService {
    /// Fetches records, turning a failed fetch into an empty set plus a notice.
    pub fn load_or_empty(
        source: &dyn RecordSource,
        query: &RecordQuery,
    ) -> (Vec<TransactionRecord>, Option<String>) {
        match source.fetch(query) {
            Ok(records) => (records, None),
            Err(err) => {
                tracing::warn!(error = %err, "record fetch failed; reporting on empty data");
                (Vec::new(), Some(format!("Could not load records: {err}")))
            }
        }
    }

    pub fn profit_report(
        source: &dyn RecordSource,
        base: &RecordQuery,
        year: i32,
        granularity: Granularity,
    ) -> ProfitReport {
        let buckets = buckets_for_year(year, granularity);
        let year_span = match (buckets.first(), buckets.last()) {
            (Some(first), Some(last)) => {
                Some(TimeWindow::spanning(first.window.start(), last.window.end()))
            }
            _ => None,
        };
        let query = match year_span {
            Some(window) => base.clone().within(window),
            None => base.clone(),
        };
        let (records, notice) = Self::load_or_empty(source, &query);
        let in_year: Vec<&TransactionRecord> = records
            .iter()
            .filter(|record| year_span.as_ref().is_some_and(|w| in_window(*record, w)))
            .collect();
        let totals = aggregate(in_year);
        tracing::info!(
            year,
            %granularity,
            records = records.len(),
            buckets = buckets.len(),
            "built profit report"
        );
        ProfitReport {
            year,
            granularity,
            totals,
            revenue: build_series(&records, &buckets, AggregateField::Revenue),
            profit: build_series(&records, &buckets, AggregateField::Profit),
            refunds: build_series(&records, &buckets, AggregateField::Refunds),
            notice,
        }
    }

    /// Current month against the previous month and the same month last year.
    pub fn dashboard_summary(
        source: &dyn RecordSource,
        clock: &dyn Clock,
        base: &RecordQuery,
    ) -> DashboardSummary {
        let as_of = clock.today();
        let window = window_for(as_of, Granularity::Month);
        let prior_window = previous_window(window, Granularity::Month);
        let last_year_window = same_window_last_year(window);
        let query = base
            .clone()
            .within(TimeWindow::spanning(last_year_window.start(), window.end()));
        let (records, notice) = Self::load_or_empty(source, &query);

        let totals_in = |w: &TimeWindow| {
            aggregate(records.iter().filter(|record| in_window(*record, w)))
        };
        let current = totals_in(&window);
        let previous = totals_in(&prior_window);
        let last_year = totals_in(&last_year_window);
        tracing::info!(%as_of, records = records.len(), "built dashboard summary");

        DashboardSummary {
            as_of,
            window,
            current,
            previous,
            last_year,
            revenue_month_over_month: trend(&current, &previous, AggregateField::Revenue),
            profit_month_over_month: trend(&current, &previous, AggregateField::Profit),
            revenue_year_over_year: trend(&current, &last_year, AggregateField::Revenue),
            profit_year_over_year: trend(&current, &last_year, AggregateField::Profit),
            notice,
        }
    }

    /// Per-category totals inside `window`, highest revenue first.
    pub fn platform_breakdown(
        records: &[TransactionRecord],
        window: &TimeWindow,
    ) -> Vec<CategoryBreakdown> {
        let in_range = records.iter().filter(|record| in_window(*record, window));
        let grouped = aggregate_by_category(in_range);
        let total_revenue: f64 = grouped.iter().map(|(_, totals)| totals.total_revenue).sum();
        grouped
            .into_iter()
            .map(|(category, totals)| CategoryBreakdown {
                share_of_revenue: if total_revenue > 0.0 {
                    totals.total_revenue / total_revenue * 100.0
                } else {
                    0.0
                },
                category,
                totals,
            })
            .collect()
    }

    /// Sales grouped by their `sale_type` column instead of the platform.
    pub fn sale_type_breakdown(sales: &[SaleRow], window: &TimeWindow) -> Vec<CategoryBreakdown> {
        let records: Vec<TransactionRecord> = sales
            .iter()
            .map(|row| from_sale(row, SaleCategory::SaleType))
            .collect();
        Self::platform_breakdown(&records, window)
    }

    pub fn transport_summary(rows: &[TransportRow], window: &TimeWindow) -> TransportSummary {
        let trips: Vec<&TransportRow> = rows.iter().filter(|row| in_window(*row, window)).collect();
        TransportSummary {
            window: *window,
            trips: trips.len(),
            total_miles: trips.iter().filter_map(|row| row.miles).sum(),
            total_cost: trips.iter().filter_map(|row| row.cost).sum(),
            trips_without_miles: trips.iter().filter(|row| row.miles.is_none()).count(),
        }
    }
}
