//! Cell normalization for beneficiary imports.
//!
//! - **datetime**: spreadsheet date normalization (serials, ISO, delimited forms)
//! - **numeric**: whole-number parsing for count columns

pub mod datetime;
pub mod numeric;

pub use datetime::{
    ACCEPTED_FORMAT_EXAMPLE, DatePattern, date_to_serial, match_pattern, normalize_cell,
    normalize_date_str, serial_to_date, spreadsheet_epoch,
};
pub use numeric::{CountError, MAX_COUNT, parse_count, parse_f64};
