//! Numeric normalization utilities.

use std::fmt;

use relief_model::CellValue;

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Why a cell is not a valid count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountError {
    NotNumeric,
    Negative,
    Fractional,
    TooLarge,
}

impl fmt::Display for CountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNumeric => write!(f, "is not a number"),
            Self::Negative => write!(f, "cannot be negative"),
            Self::Fractional => write!(f, "must be a whole number"),
            Self::TooLarge => write!(f, "is too large (at most {MAX_COUNT})"),
        }
    }
}

/// Largest accepted count.
pub const MAX_COUNT: u64 = u32::MAX as u64;

/// Parse a non-negative whole number from a cell.
///
/// Accepts numeric cells and text such as `3`, ` 3 ` or `3.0`.
pub fn parse_count(cell: &CellValue) -> Result<u64, CountError> {
    let value = match cell {
        CellValue::Number(value) => *value,
        CellValue::Text(text) => parse_f64(text).ok_or(CountError::NotNumeric)?,
        CellValue::Date(_) | CellValue::Empty => return Err(CountError::NotNumeric),
    };
    count_from_f64(value)
}

fn count_from_f64(value: f64) -> Result<u64, CountError> {
    if !value.is_finite() {
        return Err(CountError::NotNumeric);
    }
    if value < 0.0 {
        return Err(CountError::Negative);
    }
    if value.fract() != 0.0 {
        return Err(CountError::Fractional);
    }
    if value > MAX_COUNT as f64 {
        return Err(CountError::TooLarge);
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_numbers() {
        assert_eq!(parse_count(&CellValue::text(" 3 ")), Ok(3));
        assert_eq!(parse_count(&CellValue::text("3.0")), Ok(3));
        assert_eq!(parse_count(&CellValue::Number(0.0)), Ok(0));
    }

    #[test]
    fn rejects_invalid_counts() {
        assert_eq!(
            parse_count(&CellValue::text("-1")),
            Err(CountError::Negative)
        );
        assert_eq!(
            parse_count(&CellValue::text("2.5")),
            Err(CountError::Fractional)
        );
        assert_eq!(
            parse_count(&CellValue::text("three")),
            Err(CountError::NotNumeric)
        );
        assert_eq!(
            parse_count(&CellValue::text("NaN")),
            Err(CountError::NotNumeric)
        );
    }

    #[test]
    fn oversized_counts_are_too_large_not_non_numeric() {
        assert_eq!(
            parse_count(&CellValue::text("5000000000")),
            Err(CountError::TooLarge)
        );
        assert_eq!(parse_count(&CellValue::Number(MAX_COUNT as f64)), Ok(MAX_COUNT));
        assert!(
            CountError::TooLarge
                .to_string()
                .starts_with("is too large")
        );
    }
}
