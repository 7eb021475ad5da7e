use kennel_domain::{AggregateField, AggregateResult, TrendResult};

/// Compares `field` between two caller-chosen periods.
///
/// With a non-zero prior the change is relative to the prior's magnitude, so a
/// loss shrinking toward zero reads as an improvement. With a zero prior the
/// change is `100` when the current value is positive and `0` otherwise.
pub fn trend(
    current: &AggregateResult,
    prior: &AggregateResult,
    field: AggregateField,
) -> TrendResult {
    trend_values(current.value(field), prior.value(field))
}

/// [`trend`] over plain values.
pub fn trend_values(current_value: f64, prior_value: f64) -> TrendResult {
    let percent_change = if prior_value == 0.0 {
        if current_value > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current_value - prior_value) / prior_value.abs() * 100.0
    };
    TrendResult {
        current_value,
        prior_value,
        percent_change,
    }
}
