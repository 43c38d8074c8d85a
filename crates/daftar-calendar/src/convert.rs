//! Day-count conversion between the Gregorian and Jalali calendars
//!
//! Both calendars are mapped onto chrono's day numbering (0001-01-01
//! Gregorian is day 1). The Jalali side uses the 33-year arithmetic cycle:
//! a year is leap when `year mod 33` is one of [`LEAP_RESIDUES`], which
//! gives the same day counts as jdatetime.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{CalendarError, CalendarResult};
use crate::types::{Calendar, CalendarDate, MonthWindow};

/// Day number of 1/01/01 Jalali (0622-03-21 proleptic Gregorian)
const JALALI_EPOCH: i64 = 226_895;

const CYCLE_YEARS: i32 = 33;
const CYCLE_DAYS: i64 = 12_053;
const LEAP_RESIDUES: [i32; 8] = [1, 5, 9, 13, 17, 22, 26, 30];

/// Largest Jalali year accepted anywhere in the crate
pub const MAX_JALALI_YEAR: i32 = 9999;

pub fn is_jalali_leap_year(year: i32) -> bool {
    LEAP_RESIDUES.contains(&year.rem_euclid(CYCLE_YEARS))
}

/// Days in a Jalali month, `None` when the month is not 1..=12
pub fn jalali_days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 if is_jalali_leap_year(year) => Some(30),
        12 => Some(29),
        _ => None,
    }
}

fn jalali_year_length(year: i32) -> i64 {
    if is_jalali_leap_year(year) {
        366
    } else {
        365
    }
}

/// Leap years in `1..=years`
fn leap_years_through(years: i32) -> i64 {
    let full_cycles = (years / CYCLE_YEARS) as i64;
    let rest = years % CYCLE_YEARS;
    full_cycles * LEAP_RESIDUES.len() as i64
        + LEAP_RESIDUES.iter().filter(|&&r| r <= rest).count() as i64
}

fn days_before_year(year: i32) -> i64 {
    365 * (year as i64 - 1) + leap_years_through(year - 1)
}

fn days_before_month(month: u32) -> i64 {
    let month = month as i64;
    if month <= 7 {
        (month - 1) * 31
    } else {
        186 + (month - 7) * 30
    }
}

pub(crate) fn jalali_day_number(year: i32, month: u32, day: u32) -> i64 {
    JALALI_EPOCH + days_before_year(year) + days_before_month(month) + day as i64 - 1
}

fn jalali_from_day_number(day_number: i64) -> CalendarResult<CalendarDate> {
    let offset = day_number - JALALI_EPOCH;
    if offset < 0 {
        return Err(CalendarError::out_of_range(
            "dates before 1/01/01 Jalali (0622-03-21) are not supported",
        ));
    }

    let cycles = offset / CYCLE_DAYS;
    let mut rest = offset % CYCLE_DAYS;
    let cycles = i32::try_from(cycles)
        .map_err(|_| CalendarError::out_of_range("day number too large"))?;
    let mut year = cycles * CYCLE_YEARS + 1;
    while rest >= jalali_year_length(year) {
        rest -= jalali_year_length(year);
        year += 1;
    }

    let (month, day) = if rest < 186 {
        (rest / 31 + 1, rest % 31 + 1)
    } else {
        let rest = rest - 186;
        (rest / 30 + 7, rest % 30 + 1)
    };

    CalendarDate::jalali(year, month as u32, day as u32)
}

pub(crate) fn naive_from_day_number(day_number: i64) -> CalendarResult<NaiveDate> {
    i32::try_from(day_number)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| CalendarError::out_of_range(format!("day number {} outside chrono range", day_number)))
}

pub(crate) fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Convert to the Jalali calendar; Jalali input is returned as is
pub fn to_jalali(date: &CalendarDate) -> CalendarResult<CalendarDate> {
    match date.calendar() {
        Calendar::Jalali => Ok(*date),
        Calendar::Gregorian => jalali_from_day_number(date.day_number()),
    }
}

/// Convert to the Gregorian calendar; Gregorian input is returned as is
pub fn to_gregorian(date: &CalendarDate) -> CalendarResult<CalendarDate> {
    match date.calendar() {
        Calendar::Gregorian => Ok(*date),
        Calendar::Jalali => Ok(CalendarDate::from_naive(date.to_naive()?)),
    }
}

/// Jalali date of a UTC instant
pub fn instant_to_jalali(instant: DateTime<Utc>) -> CalendarResult<CalendarDate> {
    to_jalali(&CalendarDate::from_naive(instant.date_naive()))
}

/// Gregorian UTC instant range `[start, end)` covering one Jalali month.
///
/// The end of month 12 is the start of month 1 of the next year, so
/// consecutive windows always meet exactly.
pub fn month_bounds(year: i32, month: u32) -> CalendarResult<MonthWindow> {
    let first = CalendarDate::jalali(year, month, 1)?;
    let days = jalali_days_in_month(year, month).unwrap_or_default() as i64;
    let start = naive_from_day_number(first.day_number())?;
    let end = naive_from_day_number(first.day_number() + days)?;
    Ok(MonthWindow {
        start: midnight_utc(start),
        end: midnight_utc(end),
    })
}
