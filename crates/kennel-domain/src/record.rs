use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::*, lenient};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
/// Identifies which source table a normalized record came from.
pub enum RecordKind {
    #[default]
    Sale,
    PuppySale,
    Refund,
    Payout,
    Bill,
}

impl RecordKind {
    /// Kinds whose `amount` counts as revenue.
    pub fn is_revenue(self) -> bool {
        matches!(self, RecordKind::Sale | RecordKind::PuppySale)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
/// The common shape every source row is normalized into before aggregation.
pub struct TransactionRecord {
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::amount")]
    amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    cost_of_goods: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    shipping: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    fees: Option<f64>,
    #[serde(default)]
    pub kind: RecordKind,
}

impl TransactionRecord {
    pub fn new(kind: RecordKind, date: Option<NaiveDate>, amount: f64) -> Self {
        Self {
            date,
            amount: Some(amount),
            kind,
            ..Self::default()
        }
    }

    pub fn sale(date: NaiveDate, amount: f64) -> Self {
        Self::new(RecordKind::Sale, Some(date), amount)
    }

    pub fn refund(date: NaiveDate, amount: f64) -> Self {
        Self::new(RecordKind::Refund, Some(date), amount)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_cost_of_goods(mut self, value: f64) -> Self {
        self.cost_of_goods = Some(value);
        self
    }

    pub fn with_shipping(mut self, value: f64) -> Self {
        self.shipping = Some(value);
        self
    }

    pub fn with_fees(mut self, value: f64) -> Self {
        self.fees = Some(value);
        self
    }

    pub fn cost_of_goods(&self) -> f64 {
        finite_or_zero(self.cost_of_goods)
    }

    pub fn shipping(&self) -> f64 {
        finite_or_zero(self.shipping)
    }

    pub fn fees(&self) -> f64 {
        finite_or_zero(self.fees)
    }
}

impl Dated for TransactionRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Amounted for TransactionRecord {
    fn amount(&self) -> f64 {
        finite_or_zero(self.amount)
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
