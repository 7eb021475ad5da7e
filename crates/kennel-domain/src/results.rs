//! Aggregation outputs shared by reports, series and trends.

use std::{fmt, str::FromStr};

use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

use crate::common::Granularity;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Named sums over a record set. Profit is derived on demand and never stored.
pub struct AggregateResult {
    pub total_revenue: f64,
    pub cost_of_goods: f64,
    pub shipping: f64,
    pub fees: f64,
    pub refunds: f64,
    pub payouts: f64,
    pub bills: f64,
    pub count: usize,
}

impl AggregateResult {
    pub fn profit(&self) -> f64 {
        self.total_revenue - self.cost_of_goods - self.shipping - self.fees - self.refunds
    }

    /// Projects a single field as a plain number.
    pub fn value(&self, field: AggregateField) -> f64 {
        match field {
            AggregateField::Revenue => self.total_revenue,
            AggregateField::CostOfGoods => self.cost_of_goods,
            AggregateField::Shipping => self.shipping,
            AggregateField::Fees => self.fees,
            AggregateField::Refunds => self.refunds,
            AggregateField::Payouts => self.payouts,
            AggregateField::Bills => self.bills,
            AggregateField::Profit => self.profit(),
            AggregateField::Count => self.count as f64,
        }
    }

    /// Field-wise sum of two results. Profit of the merge equals the sum of profits.
    pub fn merge(self, other: AggregateResult) -> AggregateResult {
        AggregateResult {
            total_revenue: self.total_revenue + other.total_revenue,
            cost_of_goods: self.cost_of_goods + other.cost_of_goods,
            shipping: self.shipping + other.shipping,
            fees: self.fees + other.fees,
            refunds: self.refunds + other.refunds,
            payouts: self.payouts + other.payouts,
            bills: self.bills + other.bills,
            count: self.count + other.count,
        }
    }
}

impl Serialize for AggregateResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AggregateResult", 9)?;
        state.serialize_field("total_revenue", &self.total_revenue)?;
        state.serialize_field("cost_of_goods", &self.cost_of_goods)?;
        state.serialize_field("shipping", &self.shipping)?;
        state.serialize_field("fees", &self.fees)?;
        state.serialize_field("refunds", &self.refunds)?;
        state.serialize_field("payouts", &self.payouts)?;
        state.serialize_field("bills", &self.bills)?;
        state.serialize_field("profit", &self.profit())?;
        state.serialize_field("count", &self.count)?;
        state.end()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// Selects which aggregate a series or trend projects.
pub enum AggregateField {
    Revenue,
    CostOfGoods,
    Shipping,
    Fees,
    Refunds,
    Payouts,
    Bills,
    Profit,
    Count,
}

impl fmt::Display for AggregateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AggregateField::Revenue => "revenue",
            AggregateField::CostOfGoods => "cost_of_goods",
            AggregateField::Shipping => "shipping",
            AggregateField::Fees => "fees",
            AggregateField::Refunds => "refunds",
            AggregateField::Payouts => "payouts",
            AggregateField::Bills => "bills",
            AggregateField::Profit => "profit",
            AggregateField::Count => "count",
        };
        f.write_str(label)
    }
}

impl FromStr for AggregateField {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let field = match normalized.as_str() {
            "amount" | "revenue" | "total_revenue" | "sales" => AggregateField::Revenue,
            "cost_of_goods" | "cogs" | "cost" => AggregateField::CostOfGoods,
            "shipping" | "shipping_cost" => AggregateField::Shipping,
            "fees" | "platform_fees" => AggregateField::Fees,
            "refunds" | "refund" => AggregateField::Refunds,
            "payouts" | "payout" => AggregateField::Payouts,
            "bills" | "bill" | "expenses" => AggregateField::Bills,
            "profit" | "net" => AggregateField::Profit,
            "count" => AggregateField::Count,
            _ => return Err(ParseError::new(ParseTarget::Field, input)),
        };
        Ok(field)
    }
}

impl FromStr for Granularity {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "quarter" | "quarterly" => Ok(Granularity::Quarter),
            "year" | "yearly" | "annual" => Ok(Granularity::Year),
            _ => Err(ParseError::new(ParseTarget::Granularity, input)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTarget {
    Field,
    Granularity,
    View,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when user-supplied text does not name a known field, granularity or view.
pub struct ParseError {
    pub target: ParseTarget,
    pub input: String,
}

impl ParseError {
    pub fn new(target: ParseTarget, input: &str) -> Self {
        Self {
            target,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.target {
            ParseTarget::Field => "aggregate field",
            ParseTarget::Granularity => "granularity",
            ParseTarget::View => "dashboard view",
        };
        write!(f, "unknown {what} `{}`", self.input)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One chart point. Fields are private so points stay immutable once built.
pub struct SeriesPoint {
    label: String,
    value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Period-over-period comparison of one aggregate field.
pub struct TrendResult {
    pub current_value: f64,
    pub prior_value: f64,
    pub percent_change: f64,
}

impl TrendResult {
    pub fn is_increase(&self) -> bool {
        self.percent_change > 0.0
    }
}
