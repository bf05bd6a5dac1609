//! Spreadsheet date normalization.
//!
//! Import files arrive from many sources: spreadsheet programs store dates as
//! serial numbers, users type `15/3/2015`, `15.3.2015` or ISO strings, and CSV
//! exports mangle delimiters. This module turns any of those into a
//! [`NaiveDate`] or reports that it cannot.
//!
//! # Resolution order
//!
//! 1. Direct ISO 8601 parse (`YYYY-MM-DD`, date-times, RFC 3339)
//! 2. The fixed delimiter patterns in [`DatePattern::ORDER`]
//! 3. Purely numeric strings as spreadsheet serials
//! 4. Last resort: delimiter normalization and a day/month swap for
//!    year-first forms
//!
//! The first pattern that yields a real calendar date wins. `03/04/2020` is
//! therefore 3 April 2020 (day-first), never 4 March; no locale detection is
//! attempted.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use relief_model::CellValue;

/// Example shown to users when a date cannot be read.
pub const ACCEPTED_FORMAT_EXAMPLE: &str = "2015-03-15 or 15/03/2015";

/// Delimited date layouts, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePattern {
    /// `2015-03-15`
    YearMonthDayDash,
    /// `15/3/2015`
    DayMonthYearSlash,
    /// `3/15/2015`
    MonthDayYearSlash,
    /// `2015/03/15`
    YearMonthDaySlash,
    /// `15.3.2015`
    DayMonthYearDot,
    /// `2015.03.15`
    YearMonthDayDot,
}

#[derive(Clone, Copy)]
enum FieldOrder {
    Ymd,
    Dmy,
    Mdy,
}

impl DatePattern {
    /// Patterns in tie-break order.
    pub const ORDER: [DatePattern; 6] = [
        DatePattern::YearMonthDayDash,
        DatePattern::DayMonthYearSlash,
        DatePattern::MonthDayYearSlash,
        DatePattern::YearMonthDaySlash,
        DatePattern::DayMonthYearDot,
        DatePattern::YearMonthDayDot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatePattern::YearMonthDayDash => "Y-M-D",
            DatePattern::DayMonthYearSlash => "D/M/Y",
            DatePattern::MonthDayYearSlash => "M/D/Y",
            DatePattern::YearMonthDaySlash => "Y/M/D",
            DatePattern::DayMonthYearDot => "D.M.Y",
            DatePattern::YearMonthDayDot => "Y.M.D",
        }
    }

    /// Render a date in this layout, without zero padding on day and month.
    pub fn format(&self, date: NaiveDate) -> String {
        use chrono::Datelike;
        let (y, m, d) = (date.year(), date.month(), date.day());
        match self {
            DatePattern::YearMonthDayDash => format!("{y:04}-{m}-{d}"),
            DatePattern::DayMonthYearSlash => format!("{d}/{m}/{y:04}"),
            DatePattern::MonthDayYearSlash => format!("{m}/{d}/{y:04}"),
            DatePattern::YearMonthDaySlash => format!("{y:04}/{m}/{d}"),
            DatePattern::DayMonthYearDot => format!("{d}.{m}.{y:04}"),
            DatePattern::YearMonthDayDot => format!("{y:04}.{m}.{d}"),
        }
    }

    fn order(&self) -> FieldOrder {
        match self {
            DatePattern::YearMonthDayDash
            | DatePattern::YearMonthDaySlash
            | DatePattern::YearMonthDayDot => FieldOrder::Ymd,
            DatePattern::DayMonthYearSlash | DatePattern::DayMonthYearDot => FieldOrder::Dmy,
            DatePattern::MonthDayYearSlash => FieldOrder::Mdy,
        }
    }

    fn regex(&self) -> &'static Regex {
        static YMD_DASH: OnceLock<Regex> = OnceLock::new();
        static XXY_SLASH: OnceLock<Regex> = OnceLock::new();
        static YMD_SLASH: OnceLock<Regex> = OnceLock::new();
        static DMY_DOT: OnceLock<Regex> = OnceLock::new();
        static YMD_DOT: OnceLock<Regex> = OnceLock::new();

        let (cell, pattern) = match self {
            DatePattern::YearMonthDayDash => (&YMD_DASH, r"^(\d{4})-(\d{1,2})-(\d{1,2})$"),
            DatePattern::DayMonthYearSlash | DatePattern::MonthDayYearSlash => {
                (&XXY_SLASH, r"^(\d{1,2})/(\d{1,2})/(\d{4})$")
            }
            DatePattern::YearMonthDaySlash => (&YMD_SLASH, r"^(\d{4})/(\d{1,2})/(\d{1,2})$"),
            DatePattern::DayMonthYearDot => (&DMY_DOT, r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$"),
            DatePattern::YearMonthDayDot => (&YMD_DOT, r"^(\d{4})\.(\d{1,2})\.(\d{1,2})$"),
        };
        cell.get_or_init(|| Regex::new(pattern).expect("date pattern regex is valid"))
    }

    /// Parse `value` with this pattern only.
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        let caps = self.regex().captures(value)?;
        let a: u32 = caps.get(1)?.as_str().parse().ok()?;
        let b: u32 = caps.get(2)?.as_str().parse().ok()?;
        let c: u32 = caps.get(3)?.as_str().parse().ok()?;
        let (year, month, day) = match self.order() {
            FieldOrder::Ymd => (a, b, c),
            FieldOrder::Dmy => (c, b, a),
            FieldOrder::Mdy => (c, a, b),
        };
        calendar_date(year, month, day)
    }
}

/// Accepts a triple only when month and day are in range and the date exists.
fn calendar_date(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Day zero of the spreadsheet date system.
pub fn spreadsheet_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Convert a spreadsheet serial number to a date. The fractional part (time of
/// day) is dropped.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let days = serial.floor();
    if days.abs() > 1.0e8 {
        return None;
    }
    let delta = TimeDelta::try_days(days as i64)?;
    spreadsheet_epoch().checked_add_signed(delta)
}

/// Inverse of [`serial_to_date`].
pub fn date_to_serial(date: NaiveDate) -> i64 {
    (date - spreadsheet_epoch()).num_days()
}

/// Normalize any spreadsheet cell to a calendar date.
///
/// Returns `None` for empty cells and for values no rule can read; callers
/// must check for it.
pub fn normalize_cell(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Number(serial) => serial_to_date(*serial),
        CellValue::Date(date) => Some(*date),
        CellValue::Text(text) => normalize_date_str(text),
        CellValue::Empty => None,
    }
}

/// Normalize a date typed as text.
pub fn normalize_date_str(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = parse_iso(trimmed) {
        return Some(date);
    }

    if let Some((_, date)) = match_pattern(trimmed) {
        return Some(date);
    }

    if is_numeric_literal(trimmed) {
        return trimmed.parse::<f64>().ok().and_then(serial_to_date);
    }

    last_resort(trimmed)
}

/// The first pattern in [`DatePattern::ORDER`] that reads `value`.
pub fn match_pattern(value: &str) -> Option<(DatePattern, NaiveDate)> {
    DatePattern::ORDER
        .iter()
        .find_map(|pattern| pattern.parse(value).map(|date| (*pattern, date)))
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    // chrono accepts short years for %Y; ISO input always has four digits
    let bytes = value.as_bytes();
    if bytes.len() < 5 || !bytes[..4].iter().all(u8::is_ascii_digit) || bytes[4] != b'-' {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in &datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

fn is_numeric_literal(value: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for c in value.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

fn last_resort(value: &str) -> Option<NaiveDate> {
    // "15/03/2015 10:30" and similar: drop a trailing time component
    let mut tokens = value.split_whitespace();
    if let (Some(first), Some(second), None) = (tokens.next(), tokens.next(), tokens.next())
        && second.contains(':')
    {
        if let Some(date) = parse_iso(first).or_else(|| match_pattern(first).map(|(_, d)| d)) {
            return Some(date);
        }
        return last_resort(first);
    }

    let normalized = normalize_delimiters(value);
    if normalized != value
        && let Some((_, date)) = match_pattern(&normalized)
    {
        return Some(date);
    }

    swap_year_first(&normalized)
}

/// Map `\`, `-`, `_`, `,` and whitespace runs to `/`, dropping padding
/// around delimiters.
fn normalize_delimiters(value: &str) -> String {
    let mapped: String = value
        .chars()
        .map(|c| match c {
            '\\' | '-' | '_' | ',' => '/',
            other => other,
        })
        .collect();
    let mut parts = Vec::new();
    for piece in mapped.split('/') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        parts.extend(piece.split_whitespace());
    }
    parts.join("/")
}

/// Read `Y/D/M` when `Y/M/D` failed because the middle part exceeds 12.
fn swap_year_first(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split(['/', '.']).collect();
    let [year, middle, last] = parts.as_slice() else {
        return None;
    };
    if year.len() != 4 {
        return None;
    }
    let year: u32 = year.parse().ok()?;
    let middle: u32 = middle.parse().ok()?;
    let last: u32 = last.parse().ok()?;
    calendar_date(year, last, middle)
}
