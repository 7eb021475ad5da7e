//! Calendar windows for report aggregation.
//!
//! All windows are closed on both ends and expressed in the reporting
//! calendar (plain dates, no time zone). Weeks start on Monday.

use chrono::{Datelike, Duration, Months, NaiveDate};

use kennel_domain::{month_label, Bucket, Granularity, TimeWindow};

/// Returns the window of `granularity` that contains `reference`.
pub fn window_for(reference: NaiveDate, granularity: Granularity) -> TimeWindow {
    match granularity {
        Granularity::Day => TimeWindow::single_day(reference),
        Granularity::Week => {
            let delta = reference.weekday().num_days_from_monday() as i64;
            let start = reference - Duration::days(delta);
            TimeWindow::spanning(start, start + Duration::days(6))
        }
        Granularity::Month => {
            let start = month_start(reference);
            TimeWindow::spanning(start, month_end(start))
        }
        Granularity::Quarter => {
            let first_month = (reference.month0() / 3) * 3 + 1;
            let start = month_start(reference)
                .with_month(first_month)
                .unwrap_or(reference);
            let last = start.with_month(first_month + 2).unwrap_or(start);
            TimeWindow::spanning(start, month_end(last))
        }
        Granularity::Year => {
            let start = reference.with_ordinal(1).unwrap_or(reference);
            let end = NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap_or(reference);
            TimeWindow::spanning(start, end)
        }
    }
}

/// The twelve month buckets of `year`, January first, labelled `"Jan"`..`"Dec"`.
pub fn month_buckets_of(year: i32) -> Vec<Bucket> {
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|start| {
            Bucket::new(
                month_label(start.month()),
                window_for(start, Granularity::Month),
            )
        })
        .collect()
}

/// The four quarter buckets of `year`, labelled `"Q1"`..`"Q4"`.
pub fn quarter_buckets_of(year: i32) -> Vec<Bucket> {
    [1, 4, 7, 10]
        .into_iter()
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .enumerate()
        .map(|(idx, start)| {
            Bucket::new(
                format!("Q{}", idx + 1),
                window_for(start, Granularity::Quarter),
            )
        })
        .collect()
}

/// Monday-based weeks of `year`, clipped to the year so the buckets partition it.
pub fn week_buckets_of(year: i32) -> Vec<Bucket> {
    let Some(year_window) = year_window(year) else {
        return Vec::new();
    };
    let mut buckets = Vec::new();
    let mut start = year_window.start();
    while start <= year_window.end() {
        let week = window_for(start, Granularity::Week);
        let end = week.end().min(year_window.end());
        buckets.push(Bucket::new(
            format!("W{:02}", buckets.len() + 1),
            TimeWindow::spanning(start, end),
        ));
        start = end + Duration::days(1);
    }
    buckets
}

/// One bucket per day of `window`, labelled with the ISO date.
pub fn day_buckets_of(window: TimeWindow) -> Vec<Bucket> {
    window
        .start()
        .iter_days()
        .take_while(|day| *day <= window.end())
        .map(|day| Bucket::new(day.format("%Y-%m-%d").to_string(), TimeWindow::single_day(day)))
        .collect()
}

/// One bucket per calendar year from `first` to `last` inclusive.
pub fn year_buckets(first: i32, last: i32) -> Vec<Bucket> {
    (first.min(last)..=first.max(last))
        .filter_map(|year| year_window(year).map(|window| Bucket::new(year.to_string(), window)))
        .collect()
}

/// Buckets that partition `year` at the requested granularity.
pub fn buckets_for_year(year: i32, granularity: Granularity) -> Vec<Bucket> {
    match granularity {
        Granularity::Day => year_window(year).map(day_buckets_of).unwrap_or_default(),
        Granularity::Week => week_buckets_of(year),
        Granularity::Month => month_buckets_of(year),
        Granularity::Quarter => quarter_buckets_of(year),
        Granularity::Year => year_buckets(year, year),
    }
}

/// The `granularity` window immediately preceding `window`.
pub fn previous_window(window: TimeWindow, granularity: Granularity) -> TimeWindow {
    let before = window.start().pred_opt().unwrap_or(window.start());
    window_for(before, granularity)
}

/// `window` shifted back one year. Feb 29 clamps to Feb 28.
pub fn same_window_last_year(window: TimeWindow) -> TimeWindow {
    let shift = |date: NaiveDate| date.checked_sub_months(Months::new(12)).unwrap_or(date);
    TimeWindow::spanning(shift(window.start()), shift(window.end()))
}

fn year_window(year: i32) -> Option<TimeWindow> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some(TimeWindow::spanning(start, end))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    (28..=31)
        .rev()
        .find_map(|day| date.with_day(day))
        .unwrap_or(date)
}
