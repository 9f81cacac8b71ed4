//! Age Calculator - birthdate text to elapsed years.
//!
//! Parsing never panics: anything that is not a real calendar date in the
//! accepted shape yields `None`. Elapsed time is measured in calendar years,
//! so the exact anniversary of a birthdate is always a whole number of years
//! regardless of the leap days in between.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// How strictly birthdate text is matched against the `DD/MM/YYYY` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateInputPolicy {
    /// Exactly `DD/MM/YYYY`: two-digit day, two-digit month, four-digit year.
    #[default]
    Strict,
    /// Also accepts `-` or `.` as separator and one-digit day or month.
    Lenient,
}

impl DateInputPolicy {
    /// The format shown to applicants in prompts and corrective replies.
    pub fn expected_format(&self) -> &'static str {
        "DD/MM/YYYY"
    }
}

/// Real-valued age in years. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgeInYears(f64);

impl AgeInYears {
    /// Wraps a raw year count, taking its absolute value.
    pub fn new(years: f64) -> Self {
        Self(years.abs())
    }

    /// The unfloored value used for threshold comparisons.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whole years, as reported to applicants and auditors.
    pub fn whole_years(&self) -> u32 {
        self.0.floor() as u32
    }
}

/// Parses birthdate text into a calendar date.
pub fn parse_birthdate(raw: &str, policy: DateInputPolicy) -> Option<NaiveDate> {
    let raw = raw.trim();
    let parts: Vec<&str> = match policy {
        DateInputPolicy::Strict => raw.split('/').collect(),
        DateInputPolicy::Lenient => {
            let separator = raw.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
            raw.split(separator).collect()
        }
    };

    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let (day_digits, month_digits) = match policy {
        DateInputPolicy::Strict => (2..=2, 2..=2),
        DateInputPolicy::Lenient => (1..=2, 1..=2),
    };

    let day = numeric_field(day, day_digits)?;
    let month = numeric_field(month, month_digits)?;
    let year = numeric_field(year, 4..=4)?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn numeric_field(text: &str, digits: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !digits.contains(&text.len()) || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Computes the age of someone born on `raw` at the instant `now`.
///
/// Returns `None` when the text is not a valid date; this is the only failure
/// signal. A birthdate after `now` yields the absolute distance.
pub fn calculate_age(raw: &str, now: DateTime<Utc>, policy: DateInputPolicy) -> Option<AgeInYears> {
    let birth = parse_birthdate(raw, policy)?.and_hms_opt(0, 0, 0)?;
    let now = now.naive_utc();

    let years = if birth <= now {
        years_between(birth, now)?
    } else {
        years_between(now, birth)?
    };

    Some(AgeInYears::new(years))
}

/// Calendar-aware elapsed years from `start` to `end` (`start <= end`).
///
/// Whole years count completed anniversaries; the fraction is the share of
/// the current anniversary year that has elapsed.
fn years_between(start: NaiveDateTime, end: NaiveDateTime) -> Option<f64> {
    let mut whole = end.year() - start.year();
    let mut anniversary = add_years(start, whole)?;
    if anniversary > end {
        whole -= 1;
        anniversary = add_years(start, whole)?;
    }
    let next = add_years(start, whole + 1)?;

    let elapsed = (end - anniversary).num_seconds() as f64;
    let span = (next - anniversary).num_seconds() as f64;
    if span <= 0.0 {
        return None;
    }

    Some(whole as f64 + elapsed / span)
}

fn add_years(start: NaiveDateTime, years: i32) -> Option<NaiveDateTime> {
    let months = u32::try_from(years).ok()?.checked_mul(12)?;
    start.checked_add_months(Months::new(months))
}
