//! Forgiving field parsers for rows coming out of the hosted data store.
//!
//! A single malformed cell must never fail a whole table, so every helper here
//! maps unusable input to `None` instead of returning a deserialization error.

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Parses a numeric cell. Accepts JSON numbers and numeric strings such as
/// `"1,200.50"` or `"$35"`. Non-finite results are discarded.
pub fn parse_amount(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|ch| !matches!(ch, ',' | '$' | ' '))
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|amount| amount.is_finite())
}

/// Parses a calendar date as written in the row. Timestamps keep their
/// wall-clock date (`2024-01-15T23:10:00Z` is the 15th).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    let head = trimmed.get(..10)?;
    match trimmed.as_bytes().get(10) {
        Some(b'T') | Some(b' ') => NaiveDate::parse_from_str(head, "%Y-%m-%d").ok(),
        _ => None,
    }
}

pub fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_amount))
}

pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => parse_date(&text),
        _ => None,
    })
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => flag,
        Some(Value::String(text)) => {
            let text = text.trim();
            ["true", "yes", "y", "1"]
                .iter()
                .any(|truthy| text.eq_ignore_ascii_case(truthy))
        }
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

/// A table column plus the legacy column name older exports used for it.
pub type ColumnFallback = (&'static str, &'static str);

/// Reads a whole table row by row. Rows that still fail (`null`, scalars,
/// wrongly typed objects) are skipped so one bad row never drops the table.
/// A non-array table reads as empty.
pub fn rows<'de, D, T>(
    deserializer: D,
    table: &'static str,
    date_column: Option<ColumnFallback>,
) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(other) => {
            tracing::debug!(
                table,
                kind = value_kind(&other),
                "table is not an array, reading it as empty"
            );
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let item = match date_column {
                Some((column, legacy)) => with_date_fallback(item, column, legacy),
                None => item,
            };
            match serde_json::from_value::<T>(item) {
                Ok(row) => Some(row),
                Err(err) => {
                    tracing::debug!(table, index, error = %err, "skipping malformed row");
                    None
                }
            }
        })
        .collect())
}

/// Keeps `column` when it holds a usable date, otherwise takes `legacy`.
fn with_date_fallback(item: Value, column: &str, legacy: &str) -> Value {
    let mut map = match item {
        Value::Object(map) => map,
        other => return other,
    };
    if let Some(legacy_value) = map.remove(legacy) {
        if !has_date(&map, column) {
            map.insert(column.to_string(), legacy_value);
        }
    }
    Value::Object(map)
}

fn has_date(map: &Map<String, Value>, column: &str) -> bool {
    map.get(column)
        .and_then(Value::as_str)
        .and_then(parse_date)
        .is_some()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amounts_accept_numbers_and_numeric_text() {
        assert_eq!(parse_amount(&json!(12.5)), Some(12.5));
        assert_eq!(parse_amount(&json!("1,200.50")), Some(1200.5));
        assert_eq!(parse_amount(&json!("$35")), Some(35.0));
        assert_eq!(parse_amount(&json!("n/a")), None);
        assert_eq!(parse_amount(&json!(true)), None);
        assert_eq!(parse_amount(&Value::Null), None);
    }

    #[test]
    fn dates_keep_wall_clock_day() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_date("2024-01-15"), expected);
        assert_eq!(parse_date("2024-01-15T23:10:00+00:00"), expected);
        assert_eq!(parse_date("2024-01-15 08:00:00"), expected);
        assert_eq!(parse_date("15/01/2024"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[derive(Debug, Deserialize)]
    struct Flagged {
        #[serde(deserialize_with = "flag")]
        paid: bool,
    }

    #[test]
    fn flags_ignore_case() {
        for text in ["True", "YES", "y", " 1 ", "true"] {
            let row: Flagged = serde_json::from_value(json!({ "paid": text })).unwrap();
            assert!(row.paid, "{text}");
        }
        for text in ["no", "false", "", "paid?"] {
            let row: Flagged = serde_json::from_value(json!({ "paid": text })).unwrap();
            assert!(!row.paid, "{text}");
        }
    }

    #[test]
    fn date_fallback_prefers_primary_column() {
        let both = with_date_fallback(
            json!({"sale_date": "2024-01-16", "date": "2023-12-31"}),
            "sale_date",
            "date",
        );
        assert_eq!(both, json!({"sale_date": "2024-01-16"}));

        let legacy_only = with_date_fallback(
            json!({"sale_date": null, "date": "2024-01-16"}),
            "sale_date",
            "date",
        );
        assert_eq!(legacy_only, json!({"sale_date": "2024-01-16"}));
        assert_eq!(with_date_fallback(Value::Null, "sale_date", "date"), Value::Null);
    }
}
