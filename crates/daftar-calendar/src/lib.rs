//! Gregorian and Jalali (solar Hijri) calendar conversion
//!
//! Storage and comparison happen in Gregorian terms; the Jalali calendar
//! is a display and input layer on top of it.

pub mod convert;
pub mod error;
pub mod format;
pub mod types;

pub use convert::{
    instant_to_jalali, is_jalali_leap_year, jalali_days_in_month, month_bounds, to_gregorian,
    to_jalali, MAX_JALALI_YEAR,
};
pub use error::{CalendarError, CalendarResult};
pub use format::{format_jalali, format_jalali_long, parse_jalali};
pub use types::{Calendar, CalendarDate, JalaliMonth, Locale, MonthWindow};

/// Parse a Jalali date string straight to the UTC instant at its midnight
pub fn jalali_to_instant(input: &str) -> CalendarResult<chrono::DateTime<chrono::Utc>> {
    parse_jalali(input)?.start_instant()
}

/// Canonical Jalali string for a UTC instant
pub fn instant_to_jalali_string(instant: chrono::DateTime<chrono::Utc>) -> CalendarResult<String> {
    format_jalali(&instant_to_jalali(instant)?)
}
