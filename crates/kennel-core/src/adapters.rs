//! Normalizes raw source-table rows into [`TransactionRecord`]s.
//!
//! Adapters never fail: a missing date leaves the record undated (so every
//! window excludes it) and a missing amount reads as zero.

use kennel_domain::{
    Amounted, BillRow, PayoutRow, PuppyRow, RecordKind, RecordSnapshot, RefundRow, SaleRow,
    TransactionRecord,
};

/// Category assigned to puppy sales from the breeding registry.
pub const PUPPY_CATEGORY: &str = "Puppies";

/// Which sales column feeds the record category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaleCategory {
    #[default]
    Platform,
    SaleType,
}

pub fn from_sale(row: &SaleRow, category: SaleCategory) -> TransactionRecord {
    note_if_undated("sales", row.id.as_deref(), row.sale_date.is_some());
    let mut record = TransactionRecord::new(
        RecordKind::Sale,
        row.sale_date,
        row.sale_price.unwrap_or(0.0),
    )
    .with_cost_of_goods(row.cost_of_goods.unwrap_or(0.0))
    .with_shipping(row.shipping_cost.unwrap_or(0.0))
    .with_fees(row.platform_fees.unwrap_or(0.0));
    let label = match category {
        SaleCategory::Platform => row.platform.clone(),
        SaleCategory::SaleType => row.sale_type.clone(),
    };
    record.category = label;
    if let Some(stored) = row.profit {
        let derived = record_profit(&record);
        if (stored - derived).abs() > 0.005 {
            tracing::debug!(
                id = ?row.id,
                stored,
                derived,
                "stored sale profit differs from derived profit; using derived"
            );
        }
    }
    record
}

pub fn from_refund(row: &RefundRow) -> TransactionRecord {
    note_if_undated("refunds", row.id.as_deref(), row.refund_date.is_some());
    let mut record = TransactionRecord::new(
        RecordKind::Refund,
        row.refund_date,
        row.amount.unwrap_or(0.0),
    )
    .with_shipping(row.shipping_cost.unwrap_or(0.0));
    record.category = row.platform.clone();
    record
}

pub fn from_payout(row: &PayoutRow) -> TransactionRecord {
    note_if_undated("payouts", row.id.as_deref(), row.payout_date.is_some());
    let mut record = TransactionRecord::new(
        RecordKind::Payout,
        row.payout_date,
        row.amount.unwrap_or(0.0),
    );
    record.category = row.platform.clone();
    record
}

pub fn from_bill(row: &BillRow) -> TransactionRecord {
    note_if_undated("bills", row.id.as_deref(), row.bill_date.is_some());
    let mut record =
        TransactionRecord::new(RecordKind::Bill, row.bill_date, row.amount.unwrap_or(0.0));
    record.category = row.category.clone().or_else(|| row.vendor.clone());
    record
}

/// Sold puppies become revenue records; unsold puppies yield `None`.
pub fn from_puppy(row: &PuppyRow) -> Option<TransactionRecord> {
    if !row.is_sold() {
        return None;
    }
    note_if_undated("puppies", row.id.as_deref(), row.sale_date.is_some());
    Some(
        TransactionRecord::new(
            RecordKind::PuppySale,
            row.sale_date,
            row.sale_price.unwrap_or(0.0),
        )
        .with_category(PUPPY_CATEGORY),
    )
}

/// Normalizes every financial table of a snapshot into one record list.
pub fn normalize_snapshot(
    snapshot: &RecordSnapshot,
    sale_category: SaleCategory,
) -> Vec<TransactionRecord> {
    let mut records = Vec::with_capacity(
        snapshot.sales.len()
            + snapshot.refunds.len()
            + snapshot.payouts.len()
            + snapshot.bills.len()
            + snapshot.puppies.len(),
    );
    records.extend(snapshot.sales.iter().map(|row| from_sale(row, sale_category)));
    records.extend(snapshot.refunds.iter().map(from_refund));
    records.extend(snapshot.payouts.iter().map(from_payout));
    records.extend(snapshot.bills.iter().map(from_bill));
    records.extend(snapshot.puppies.iter().filter_map(from_puppy));
    records
}

fn record_profit(record: &TransactionRecord) -> f64 {
    record.amount() - record.cost_of_goods() - record.shipping() - record.fees()
}

fn note_if_undated(table: &str, id: Option<&str>, has_date: bool) {
    if !has_date {
        tracing::debug!(table, id = ?id, "row has no usable date; excluded from reports");
    }
}
