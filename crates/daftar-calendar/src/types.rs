//! Basic types for the calendar module

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::convert::{self, jalali_days_in_month, MAX_JALALI_YEAR};
use crate::error::{CalendarError, CalendarResult};

/// Calendar system enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    /// Proleptic Gregorian calendar, used for storage and ordering
    Gregorian,
    /// Solar Hijri calendar, used for everything shown to the user
    Jalali,
}

impl std::fmt::Display for Calendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Calendar::Gregorian => write!(f, "gregorian"),
            Calendar::Jalali => write!(f, "jalali"),
        }
    }
}

/// A validated (year, month, day) triple in one calendar system.
///
/// Fields are private so an impossible date can never be constructed;
/// use [`CalendarDate::gregorian`] or [`CalendarDate::jalali`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    calendar: Calendar,
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Create a Gregorian date
    pub fn gregorian(year: i32, month: u32, day: u32) -> CalendarResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from_naive)
            .ok_or_else(|| {
                CalendarError::out_of_range(format!(
                    "{:04}-{:02}-{:02} is not a Gregorian date",
                    year, month, day
                ))
            })
    }

    /// Create a Jalali date
    pub fn jalali(year: i32, month: u32, day: u32) -> CalendarResult<Self> {
        if !(1..=MAX_JALALI_YEAR).contains(&year) {
            return Err(CalendarError::out_of_range(format!(
                "Jalali year {} outside 1..={}",
                year, MAX_JALALI_YEAR
            )));
        }
        let days = jalali_days_in_month(year, month).ok_or_else(|| {
            CalendarError::out_of_range(format!("Jalali month {} outside 1..=12", month))
        })?;
        if day == 0 || day > days {
            return Err(CalendarError::out_of_range(format!(
                "{:04}/{:02} has {} days, got day {}",
                year, month, days, day
            )));
        }
        Ok(Self {
            calendar: Calendar::Jalali,
            year,
            month,
            day,
        })
    }

    /// Wrap a chrono date as a Gregorian calendar date
    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            calendar: Calendar::Gregorian,
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Absolute day number, counted like chrono's `num_days_from_ce`
    /// (0001-01-01 Gregorian is day 1), so dates of both calendars compare.
    pub fn day_number(&self) -> i64 {
        match self.calendar {
            Calendar::Gregorian => {
                // Constructed through chrono, so the triple is always valid
                NaiveDate::from_ymd_opt(self.year, self.month, self.day)
                    .map(|d| d.num_days_from_ce() as i64)
                    .unwrap_or_default()
            }
            Calendar::Jalali => convert::jalali_day_number(self.year, self.month, self.day),
        }
    }

    /// The same day as a chrono date
    pub fn to_naive(&self) -> CalendarResult<NaiveDate> {
        convert::naive_from_day_number(self.day_number())
    }

    /// Midnight UTC at the start of this day
    pub fn start_instant(&self) -> CalendarResult<DateTime<Utc>> {
        Ok(convert::midnight_utc(self.to_naive()?))
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.calendar {
            Calendar::Jalali => write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day),
            Calendar::Gregorian => write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day),
        }
    }
}

/// Target locale for month names and digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Persian month names and digits
    Fa,
    /// Transliterated month names, ASCII digits
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Fa
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Fa => write!(f, "fa"),
            Locale::En => write!(f, "en"),
        }
    }
}

const MONTH_NAMES_FA: [&str; 12] = [
    "فروردین", "اردیبهشت", "خرداد", "تیر", "مرداد", "شهریور",
    "مهر", "آبان", "آذر", "دی", "بهمن", "اسفند",
];

const MONTH_NAMES_EN: [&str; 12] = [
    "Farvardin", "Ordibehesht", "Khordad", "Tir", "Mordad", "Shahrivar",
    "Mehr", "Aban", "Azar", "Dey", "Bahman", "Esfand",
];

impl Locale {
    /// Jalali month name, `None` outside 1..=12
    pub fn month_name(&self, month: u32) -> Option<&'static str> {
        let names = match self {
            Locale::Fa => &MONTH_NAMES_FA,
            Locale::En => &MONTH_NAMES_EN,
        };
        month.checked_sub(1).and_then(|i| names.get(i as usize)).copied()
    }

    /// Render digits the way this locale writes them
    pub fn digits(&self, s: &str) -> String {
        match self {
            Locale::Fa => daftar_utils::to_persian_digits(s),
            Locale::En => s.to_string(),
        }
    }
}

/// A Jalali calendar month, always within 1..=12 of a supported year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliMonth {
    year: i32,
    month: u32,
}

impl JalaliMonth {
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        CalendarDate::jalali(year, month, 1)?;
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month containing a Jalali (or Gregorian) date
    pub fn of(date: &CalendarDate) -> CalendarResult<Self> {
        let jalali = convert::to_jalali(date)?;
        Ok(Self {
            year: jalali.year(),
            month: jalali.month(),
        })
    }

    /// The month containing a UTC instant
    pub fn containing(instant: DateTime<Utc>) -> CalendarResult<Self> {
        Self::of(&convert::instant_to_jalali(instant)?)
    }

    /// Move by `delta` months, rolling the year in either direction
    pub fn shift(&self, delta: i32) -> CalendarResult<Self> {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + delta as i64;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        let year = i32::try_from(year)
            .map_err(|_| CalendarError::out_of_range(format!("Jalali year {} overflows", year)))?;
        Self::new(year, month)
    }

    pub fn succ(&self) -> CalendarResult<Self> {
        self.shift(1)
    }

    pub fn pred(&self) -> CalendarResult<Self> {
        self.shift(-1)
    }

    pub fn days(&self) -> u32 {
        jalali_days_in_month(self.year, self.month).unwrap_or_default()
    }

    /// The Gregorian instant range covering this month
    pub fn bounds(&self) -> CalendarResult<MonthWindow> {
        convert::month_bounds(self.year, self.month)
    }

    /// Month name alone, e.g. "آبان"
    pub fn name(&self, locale: Locale) -> &'static str {
        locale.month_name(self.month).unwrap_or_default()
    }

    /// Month name and year, e.g. "آبان ۱۴۰۳" or "Aban 1403"
    pub fn label(&self, locale: Locale) -> String {
        format!("{} {}", self.name(locale), locale.digits(&self.year.to_string()))
    }
}

impl std::fmt::Display for JalaliMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

/// Half-open range `[start, end)` of UTC instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthWindow {
    /// Check if an instant falls in the window; `end` belongs to the next one
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }

    /// Window covering both, valid only for adjacent or overlapping windows
    pub fn span(&self, other: &MonthWindow) -> MonthWindow {
        MonthWindow {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
