//! Locale-aware number and money formatting for report output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use kennel_domain::month_label;

/// Default number of fraction digits shown in reports.
pub const DEFAULT_PRECISION: u8 = 2;

/// Separator and precision preferences for rendering numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumberLocale {
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub precision: u8,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
            precision: DEFAULT_PRECISION,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

/// Renders `value` with fixed precision and digit grouping.
pub fn format_number(value: f64, locale: &NumberLocale) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let body = format!("{:.*}", locale.precision as usize, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let mut rendered = group_digits(int_part, locale.grouping_separator);
    if let Some(frac) = frac_part {
        rendered.push(locale.decimal_separator);
        rendered.push_str(frac);
    }
    if value < 0.0 && rendered.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        rendered.insert(0, '-');
    }
    rendered
}

/// Inverse of [`format_number`]. Returns `None` for text that is not a number.
pub fn parse_number(text: &str, locale: &NumberLocale) -> Option<f64> {
    let trimmed = text.trim();
    let (negative, body) = if let Some(inner) = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        (true, inner)
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else {
        (false, trimmed)
    };
    let normalized: String = body
        .chars()
        .filter(|ch| *ch != locale.grouping_separator)
        .map(|ch| if ch == locale.decimal_separator { '.' } else { ch })
        .collect();
    if normalized.is_empty() || !normalized.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return None;
    }
    let value = normalized.parse::<f64>().ok()?;
    Some(if negative { -value } else { value })
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "CAD" => "CA$".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

/// Renders a money amount with the currency symbol, e.g. `$1,234.50` or `($12.00)`.
pub fn format_currency(
    amount: f64,
    currency: &str,
    locale: &NumberLocale,
    negative_style: NegativeStyle,
) -> String {
    let symbol = symbol_for(&currency.to_uppercase());
    let body = format!("{}{}", symbol, format_number(amount.abs(), locale));
    let is_negative = format_number(amount, locale).starts_with('-');
    match (is_negative, negative_style) {
        (false, _) => body,
        (true, NegativeStyle::Sign) => format!("-{body}"),
        (true, NegativeStyle::Parentheses) => format!("({body})"),
    }
}

/// Renders a percentage change with an explicit sign, e.g. `+12.5%`.
pub fn format_percent(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

/// Medium date style used in report headers, e.g. `05 Mar 2024`.
pub fn format_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!(
        "{:02} {} {}",
        date.day(),
        month_label(date.month()),
        date.year()
    )
}
