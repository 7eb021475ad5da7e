use chrono::{Duration, NaiveDate};

use crate::{
    aggregate::aggregate, bucketing::buckets_for_year, filter::in_window, series::build_series,
    trend::trend,
};
use kennel_domain::{
    AggregateField, AggregateResult, Granularity, RecordKind, SeriesPoint, TransactionRecord,
};

/// Deterministic mixed-kind records spread across 2024, a few of them undated.
fn sample_year(count: usize) -> Vec<TransactionRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let kinds = [
        RecordKind::Sale,
        RecordKind::PuppySale,
        RecordKind::Refund,
        RecordKind::Payout,
        RecordKind::Bill,
    ];
    (0..count)
        .map(|idx| {
            let date = if idx % 17 == 0 {
                None
            } else {
                Some(start + Duration::days((idx * 37 % 366) as i64))
            };
            // Quarter-dollar amounts keep the float sums exact.
            TransactionRecord::new(kinds[idx % kinds.len()], date, (idx % 400) as f64 * 0.25)
                .with_cost_of_goods((idx % 7) as f64)
                .with_shipping((idx % 5) as f64 * 0.5)
                .with_fees((idx % 3) as f64 * 0.25)
        })
        .collect()
}

#[test]
fn aggregation_is_additive_over_every_partition() {
    let records = sample_year(2_000);
    let whole = aggregate(&records);
    for granularity in Granularity::ALL {
        let buckets = buckets_for_year(2024, granularity);
        let merged = buckets
            .iter()
            .map(|bucket| {
                aggregate(
                    records
                        .iter()
                        .filter(|record| in_window(*record, &bucket.window)),
                )
            })
            .fold(AggregateResult::default(), AggregateResult::merge);
        assert_eq!(merged, whole, "granularity {granularity}");
    }
}

#[test]
fn profit_is_always_derived() {
    for size in [0, 1, 5, 250] {
        let totals = aggregate(&sample_year(size));
        assert_eq!(
            totals.profit(),
            totals.total_revenue - totals.cost_of_goods - totals.shipping - totals.fees
                - totals.refunds
        );
    }
}

#[test]
fn series_sums_match_totals() {
    let records = sample_year(500);
    let whole = aggregate(&records);
    let series = build_series(
        &records,
        &buckets_for_year(2024, Granularity::Month),
        AggregateField::Revenue,
    );
    let summed: f64 = series.iter().map(SeriesPoint::value).sum();
    assert_eq!(summed, whole.total_revenue);
}

#[test]
fn year_over_year_revenue_trend() {
    let this_year = vec![TransactionRecord::sale(
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
        50.0,
    )];
    let current = aggregate(&this_year);
    let prior = aggregate(&Vec::<TransactionRecord>::new());
    assert_eq!(trend(&current, &prior, AggregateField::Revenue).percent_change, 100.0);
    assert_eq!(trend(&prior, &prior, AggregateField::Revenue).percent_change, 0.0);
}
