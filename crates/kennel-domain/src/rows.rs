//! Raw rows as the hosted data store returns them, one struct per table.
//!
//! Every field is optional and parsed leniently; normalization into
//! [`TransactionRecord`](crate::TransactionRecord) happens in kennel-core.
//! Older exports name the date columns `date` (or `due_date` for bills);
//! [`RecordSnapshot`] folds those into the current column.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{common::Dated, lenient};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SaleRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub sale_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sale_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub sale_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub cost_of_goods: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub shipping_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub platform_fees: Option<f64>,
    /// Profit as persisted by the data-entry form. Reports derive their own.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub profit: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RefundRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub refund_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub shipping_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PayoutRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub payout_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BillRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub bill_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
/// A puppy from the breeding registry. Only sold puppies carry a sale date.
pub struct PuppyRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub litter_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub buyer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub sale_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub sale_price: Option<f64>,
}

impl PuppyRow {
    pub fn is_sold(&self) -> bool {
        self.sale_date.is_some()
            || self
                .status
                .as_deref()
                .is_some_and(|status| status.trim().eq_ignore_ascii_case("sold"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
/// One logged trip (puppy delivery, vet run, supply pickup).
pub struct TransportRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub trip_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub purpose: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub miles: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub cost: Option<f64>,
}

impl Dated for TransportRow {
    fn date(&self) -> Option<NaiveDate> {
        self.trip_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
/// A point-in-time export of the tables the reports read.
pub struct RecordSnapshot {
    #[serde(default, deserialize_with = "sales")]
    pub sales: Vec<SaleRow>,
    #[serde(default, deserialize_with = "refunds")]
    pub refunds: Vec<RefundRow>,
    #[serde(default, deserialize_with = "payouts")]
    pub payouts: Vec<PayoutRow>,
    #[serde(default, deserialize_with = "bills")]
    pub bills: Vec<BillRow>,
    #[serde(default, deserialize_with = "puppies")]
    pub puppies: Vec<PuppyRow>,
    #[serde(default, deserialize_with = "transport")]
    pub transport: Vec<TransportRow>,
}

fn sales<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<SaleRow>, D::Error> {
    lenient::rows(d, "sales", Some(("sale_date", "date")))
}

fn refunds<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RefundRow>, D::Error> {
    lenient::rows(d, "refunds", Some(("refund_date", "date")))
}

fn payouts<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<PayoutRow>, D::Error> {
    lenient::rows(d, "payouts", Some(("payout_date", "date")))
}

fn bills<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<BillRow>, D::Error> {
    lenient::rows(d, "bills", Some(("bill_date", "due_date")))
}

fn puppies<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<PuppyRow>, D::Error> {
    lenient::rows(d, "puppies", None)
}

fn transport<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<TransportRow>, D::Error> {
    lenient::rows(d, "transport", Some(("trip_date", "date")))
}
