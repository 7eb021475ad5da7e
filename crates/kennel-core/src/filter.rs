//! Record selection predicates.

use kennel_domain::{Dated, RecordKind, TimeWindow, TransactionRecord};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// True when the item has a date and it falls inside the closed window.
pub fn in_window<T: Dated>(item: &T, window: &TimeWindow) -> bool {
    item.date().is_some_and(|date| window.contains(date))
}

/// Items dated inside `window`, in their original order.
pub fn in_window_all<'a, T: Dated>(items: &'a [T], window: &TimeWindow) -> Vec<&'a T> {
    items.iter().filter(|item| in_window(*item, window)).collect()
}

/// Records matching `category`. `None` or [`ALL_CATEGORIES`] returns the input unfiltered.
pub fn by_category<'a>(
    records: &'a [TransactionRecord],
    category: Option<&str>,
) -> Vec<&'a TransactionRecord> {
    match category.map(str::trim) {
        None => records.iter().collect(),
        Some(wanted) if wanted.eq_ignore_ascii_case(ALL_CATEGORIES) => records.iter().collect(),
        Some(wanted) => records
            .iter()
            .filter(|record| {
                record
                    .category
                    .as_deref()
                    .is_some_and(|category| category.trim().eq_ignore_ascii_case(wanted))
            })
            .collect(),
    }
}

/// Records whose kind is one of `kinds`. An empty slice selects every kind.
pub fn by_kind<'a>(
    records: &'a [TransactionRecord],
    kinds: &[RecordKind],
) -> Vec<&'a TransactionRecord> {
    records
        .iter()
        .filter(|record| kinds.is_empty() || kinds.contains(&record.kind))
        .collect()
}
