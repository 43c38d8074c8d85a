//! Canonical `YYYY/MM/DD` Jalali text form

use once_cell::sync::Lazy;
use regex::Regex;

use crate::convert::to_jalali;
use crate::error::{CalendarError, CalendarResult};
use crate::types::{CalendarDate, Locale};

static JALALI_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)/([0-9]+)/([0-9]+)$").expect("date pattern compiles"));

/// Format as `YYYY/MM/DD` in the Jalali calendar.
///
/// Gregorian input is converted first, which fails only before the Jalali epoch.
pub fn format_jalali(date: &CalendarDate) -> CalendarResult<String> {
    Ok(to_jalali(date)?.to_string())
}

/// Parse a `YYYY/MM/DD` Jalali date.
///
/// Persian and Arabic-Indic digits are accepted. Anything not shaped like
/// three slash-separated numbers is `InvalidDate`; numbers that do not name
/// a real day are `OutOfRange`.
pub fn parse_jalali(input: &str) -> CalendarResult<CalendarDate> {
    let normalized = daftar_utils::to_latin_digits(input.trim());

    let caps = match JALALI_DATE.captures(&normalized) {
        Some(caps) => caps,
        None => {
            let fields = normalized.split('/').count();
            let reason = if fields != 3 {
                format!("expected 3 '/'-separated fields, found {}", fields)
            } else {
                "fields must be numeric".to_string()
            };
            return Err(CalendarError::invalid(input, &reason));
        }
    };

    let year = caps[1]
        .parse::<i32>()
        .map_err(|_| CalendarError::out_of_range(format!("year {} too large", &caps[1])))?;
    let month = caps[2]
        .parse::<u32>()
        .map_err(|_| CalendarError::out_of_range(format!("month {} too large", &caps[2])))?;
    let day = caps[3]
        .parse::<u32>()
        .map_err(|_| CalendarError::out_of_range(format!("day {} too large", &caps[3])))?;

    CalendarDate::jalali(year, month, day)
}

/// Long display form, e.g. "۱۵ آبان ۱۴۰۳" or "15 Aban 1403"
pub fn format_jalali_long(date: &CalendarDate, locale: Locale) -> CalendarResult<String> {
    let jalali = to_jalali(date)?;
    let name = locale.month_name(jalali.month()).unwrap_or_default();
    Ok(format!(
        "{} {} {}",
        locale.digits(&jalali.day().to_string()),
        name,
        locale.digits(&jalali.year().to_string())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::jalali_days_in_month;
    use proptest::prelude::*;

    #[test]
    fn test_format_pads_fields() {
        let date = CalendarDate::jalali(1403, 1, 5).unwrap();
        assert_eq!(format_jalali(&date).unwrap(), "1403/01/05");

        let early = CalendarDate::jalali(99, 12, 1).unwrap();
        assert_eq!(format_jalali(&early).unwrap(), "0099/12/01");
    }

    #[test]
    fn test_format_converts_gregorian() {
        let date = CalendarDate::gregorian(2024, 11, 5).unwrap();
        assert_eq!(format_jalali(&date).unwrap(), "1403/08/15");
    }

    #[test]
    fn test_parse_valid() {
        let date = parse_jalali("1403/08/15").unwrap();
        assert_eq!(date, CalendarDate::jalali(1403, 8, 15).unwrap());
        assert_eq!(parse_jalali(" 1403/8/5 ").unwrap(), CalendarDate::jalali(1403, 8, 5).unwrap());
    }

    #[test]
    fn test_parse_persian_digits() {
        let date = parse_jalali("۱۴۰۳/۰۸/۱۵").unwrap();
        assert_eq!(date, CalendarDate::jalali(1403, 8, 15).unwrap());
    }

    #[test]
    fn test_parse_malformed_is_invalid_date() {
        for input in ["1403-08-15", "1403/08", "1403/08/15/01", "14o3/08/15", "", "1403//15", "/08/15"] {
            assert!(
                matches!(parse_jalali(input), Err(CalendarError::InvalidDate { .. })),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_parse_impossible_is_out_of_range() {
        for input in ["1403/07/31", "1404/12/30", "1403/13/01", "1403/00/10", "0/01/01", "99999999999/01/01"] {
            assert!(
                matches!(parse_jalali(input), Err(CalendarError::OutOfRange { .. })),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_leap_day_parse() {
        assert!(parse_jalali("1403/12/30").is_ok());
        assert!(matches!(parse_jalali("1404/12/30"), Err(CalendarError::OutOfRange { .. })));
    }

    #[test]
    fn test_format_long() {
        let date = CalendarDate::jalali(1403, 8, 15).unwrap();
        assert_eq!(format_jalali_long(&date, Locale::Fa).unwrap(), "۱۵ آبان ۱۴۰۳");
        assert_eq!(format_jalali_long(&date, Locale::En).unwrap(), "15 Aban 1403");
    }

    proptest! {
        #[test]
        fn format_parse_round_trip(year in 1i32..=9999, month in 1u32..=12, day in 1u32..=31) {
            prop_assume!(day <= jalali_days_in_month(year, month).unwrap());
            let date = CalendarDate::jalali(year, month, day).unwrap();
            let text = format_jalali(&date).unwrap();
            prop_assert_eq!(parse_jalali(&text).unwrap(), date);
        }
    }
}
