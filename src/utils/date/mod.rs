// Date utility functions
// ISO date parsing and Sunday-first weekday helpers

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::CalendarError;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date as used in the address bar.
///
/// The year must be exactly four digits; chrono's `%Y` alone also accepts
/// signed and extended years.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = value.trim();
    if !is_iso_date_shape(trimmed) {
        return Err(CalendarError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(value.to_string()))
}

fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Column of a date in a Sunday-first week (Sunday = 0, Saturday = 6)
pub fn weekday_column(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// Friday and Saturday are shaded as the weekend
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}

pub fn is_sabbath(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sat
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// English month name for the Gregorian month label
pub fn gregorian_month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}
