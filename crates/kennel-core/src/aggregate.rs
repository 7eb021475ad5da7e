use std::{cmp::Ordering, collections::BTreeMap};

use kennel_domain::{AggregateResult, Amounted, RecordKind, TransactionRecord};

/// Label used for records without a category in grouped results.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Reduces records into named sums in a single pass.
///
/// Undated records are skipped entirely, including from `count`. Missing
/// numeric fields contribute zero. Profit is derived by [`AggregateResult::profit`].
pub fn aggregate<'a, I>(records: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter(|record| record.date.is_some())
        .fold(AggregateResult::default(), |mut totals, record| {
            accumulate(&mut totals, record);
            totals
        })
}

fn accumulate(totals: &mut AggregateResult, record: &TransactionRecord) {
    let amount = record.amount();
    match record.kind {
        RecordKind::Sale | RecordKind::PuppySale => totals.total_revenue += amount,
        RecordKind::Refund => totals.refunds += amount,
        RecordKind::Payout => totals.payouts += amount,
        RecordKind::Bill => totals.bills += amount,
    }
    totals.cost_of_goods += record.cost_of_goods();
    totals.shipping += record.shipping();
    totals.fees += record.fees();
    totals.count += 1;
}

/// Aggregates per category, sorted by revenue (highest first), then by name.
pub fn aggregate_by_category<'a, I>(records: I) -> Vec<(String, AggregateResult)>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut groups: BTreeMap<String, Vec<&TransactionRecord>> = BTreeMap::new();
    for record in records {
        let key = record
            .category
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNCATEGORIZED)
            .to_string();
        groups.entry(key).or_default().push(record);
    }
    let mut grouped: Vec<_> = groups
        .into_iter()
        .map(|(name, members)| (name, aggregate(members)))
        .collect();
    grouped.sort_by(|(a_name, a), (b_name, b)| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a_name.cmp(b_name))
    });
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_input_is_all_zero() {
        let result = aggregate(&Vec::<TransactionRecord>::new());
        assert_eq!(result, AggregateResult::default());
        assert_eq!(result.profit(), 0.0);
        assert_eq!(result.count, 0);
    }

    #[test]
    fn routes_amounts_by_kind() {
        let records = vec![
            TransactionRecord::sale(date(2024, 1, 5), 100.0)
                .with_cost_of_goods(40.0)
                .with_shipping(8.0)
                .with_fees(12.0),
            TransactionRecord::new(RecordKind::PuppySale, Some(date(2024, 1, 9)), 2500.0),
            TransactionRecord::refund(date(2024, 1, 10), 25.0),
            TransactionRecord::new(RecordKind::Payout, Some(date(2024, 1, 11)), 300.0),
            TransactionRecord::new(RecordKind::Bill, Some(date(2024, 1, 12)), 90.0),
        ];
        let result = aggregate(&records);
        assert_eq!(result.total_revenue, 2600.0);
        assert_eq!(result.refunds, 25.0);
        assert_eq!(result.payouts, 300.0);
        assert_eq!(result.bills, 90.0);
        assert_eq!(result.count, 5);
        assert_eq!(result.profit(), 2600.0 - 40.0 - 8.0 - 12.0 - 25.0);
    }

    #[test]
    fn undated_records_are_not_counted() {
        let records = vec![
            TransactionRecord::sale(date(2024, 1, 5), 100.0),
            TransactionRecord::new(RecordKind::Sale, None, 999.0),
        ];
        let result = aggregate(&records);
        assert_eq!(result.count, 1);
        assert_eq!(result.total_revenue, 100.0);
    }

    #[test]
    fn order_does_not_matter() {
        let mut records = vec![
            TransactionRecord::sale(date(2024, 1, 5), 10.25).with_fees(1.5),
            TransactionRecord::refund(date(2024, 2, 5), 3.0),
            TransactionRecord::sale(date(2024, 3, 5), 7.75).with_cost_of_goods(2.0),
        ];
        let forward = aggregate(&records);
        records.reverse();
        assert_eq!(aggregate(&records), forward);
    }

    #[test]
    fn groups_by_category_sorted_by_revenue() {
        let records = vec![
            TransactionRecord::sale(date(2024, 1, 5), 10.0).with_category("Etsy"),
            TransactionRecord::sale(date(2024, 1, 6), 50.0).with_category("eBay"),
            TransactionRecord::sale(date(2024, 1, 7), 5.0),
            TransactionRecord::sale(date(2024, 1, 8), 15.0).with_category("Etsy"),
        ];
        let grouped = aggregate_by_category(&records);
        let names: Vec<_> = grouped.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["eBay", "Etsy", UNCATEGORIZED]);
        assert_eq!(grouped[1].1.total_revenue, 25.0);
        assert_eq!(grouped[1].1.count, 2);
    }
}
