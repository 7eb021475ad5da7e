//! Dense per-bucket series for charts.

use kennel_domain::{AggregateField, Bucket, SeriesPoint, TransactionRecord};

use crate::{aggregate::aggregate, filter::in_window};

/// Builds one point per bucket, in bucket order.
///
/// Each bucket aggregates only the records dated inside its window, then
/// projects `field`. Empty buckets yield `0.0` so the series has no gaps.
pub fn build_series(
    records: &[TransactionRecord],
    buckets: &[Bucket],
    field: AggregateField,
) -> Vec<SeriesPoint> {
    buckets
        .iter()
        .map(|bucket| {
            let totals = aggregate(
                records
                    .iter()
                    .filter(|record| in_window(*record, &bucket.window)),
            );
            SeriesPoint::new(bucket.label.clone(), totals.value(field))
        })
        .collect()
}

/// Running total of a series, point by point.
pub fn cumulative(series: &[SeriesPoint]) -> Vec<SeriesPoint> {
    series
        .iter()
        .scan(0.0, |running, point| {
            *running += point.value();
            Some(SeriesPoint::new(point.label(), *running))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucketing::month_buckets_of;
    use chrono::NaiveDate;
    use kennel_domain::RecordKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_series_is_dense() {
        let records = vec![
            TransactionRecord::sale(date(2024, 1, 15), 100.0).with_cost_of_goods(40.0),
            TransactionRecord::sale(date(2024, 2, 10), 200.0).with_cost_of_goods(50.0),
        ];
        let series = build_series(&records, &month_buckets_of(2024), AggregateField::Revenue);
        let values: Vec<f64> = series.iter().map(SeriesPoint::value).collect();
        let mut expected = vec![0.0; 12];
        expected[0] = 100.0;
        expected[1] = 200.0;
        assert_eq!(values, expected);
        assert_eq!(series[0].label(), "Jan");
        assert_eq!(series[1].label(), "Feb");
    }

    #[test]
    fn profit_series_uses_derived_profit() {
        let records = vec![
            TransactionRecord::sale(date(2024, 3, 1), 80.0).with_fees(5.0),
            TransactionRecord::refund(date(2024, 3, 20), 20.0),
        ];
        let series = build_series(&records, &month_buckets_of(2024), AggregateField::Profit);
        assert_eq!(series[2].value(), 55.0);
    }

    #[test]
    fn records_outside_buckets_and_undated_are_ignored() {
        let records = vec![
            TransactionRecord::sale(date(2023, 12, 31), 10.0),
            TransactionRecord::new(RecordKind::Sale, None, 10.0),
        ];
        let series = build_series(&records, &month_buckets_of(2024), AggregateField::Count);
        assert!(series.iter().all(|point| point.value() == 0.0));
    }

    #[test]
    fn cumulative_accumulates_in_order() {
        let series = vec![
            SeriesPoint::new("Jan", 10.0),
            SeriesPoint::new("Feb", 0.0),
            SeriesPoint::new("Mar", 5.0),
        ];
        let running: Vec<f64> = cumulative(&series).iter().map(SeriesPoint::value).collect();
        assert_eq!(running, [10.0, 10.0, 15.0]);
    }
}
