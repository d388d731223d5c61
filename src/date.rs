use crate::consts::{DATE_LEN, LAST_DAY, MAX_YEAR, PENULTIMATE_DAY};
use crate::error::RepeatError;
use crate::prelude::*;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A naive calendar date with no time-of-day component.
///
/// Parses from and displays as `YYYYMMDD`, the only date layout rules work with.
/// Arithmetic never produces a year past `MAX_YEAR`, so the display stays eight digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}{:02}{:02}", "_0.year()", "_0.month()", "_0.day()")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from its components
    ///
    /// # Errors
    /// Returns `RepeatError::InvalidDateFormat` if the components do not form a real date in
    /// years `0..=MAX_YEAR`.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, RepeatError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .filter(|_| (0..=MAX_YEAR).contains(&year))
            .map(Self)
            .ok_or_else(|| RepeatError::InvalidDateFormat(format!("{year:04}{month:02}{day:02}")))
    }

    /// Wraps a chrono date
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying chrono date
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// The following calendar day
    ///
    /// # Errors
    /// Returns `RepeatError::DateOutOfRange` past the last supported date.
    pub fn succ(self) -> Result<Self, RepeatError> {
        Self::checked(self.0.succ_opt())
    }

    /// Adds a number of days
    ///
    /// # Errors
    /// Returns `RepeatError::DateOutOfRange` past the last supported date.
    pub fn add_days(self, days: u32) -> Result<Self, RepeatError> {
        Self::checked(self.0.checked_add_days(Days::new(u64::from(days))))
    }

    /// Adds a number of years.
    ///
    /// A day that does not exist in the target month rolls forward into the next month,
    /// so Feb 29 plus one year is Mar 1.
    ///
    /// # Errors
    /// Returns `RepeatError::DateOutOfRange` past the last supported date.
    pub fn add_years(self, years: u32) -> Result<Self, RepeatError> {
        let year = i32::try_from(years)
            .ok()
            .and_then(|years| self.0.year().checked_add(years))
            .ok_or(RepeatError::DateOutOfRange)?;
        let first = NaiveDate::from_ymd_opt(year, self.0.month(), 1)
            .ok_or(RepeatError::DateOutOfRange)?;
        Self::checked(first.checked_add_days(Days::new(u64::from(self.0.day() - 1))))
    }

    /// Keeps arithmetic results within `MAX_YEAR`
    fn checked(date: Option<NaiveDate>) -> Result<Self, RepeatError> {
        date.filter(|d| d.year() <= MAX_YEAR)
            .map(Self)
            .ok_or(RepeatError::DateOutOfRange)
    }

    /// Parses two or four ASCII digits; callers have already checked the digits
    fn parse_component<T: FromStr>(digits: &str, input: &str) -> Result<T, RepeatError> {
        digits
            .parse::<T>()
            .map_err(|_| RepeatError::InvalidDateFormat(input.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = RepeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DATE_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RepeatError::InvalidDateFormat(s.to_owned()));
        }

        let year: i32 = Self::parse_component(&s[0..4], s)?;
        let month: u32 = Self::parse_component(&s[4..6], s)?;
        let day: u32 = Self::parse_component(&s[6..8], s)?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| RepeatError::InvalidDateFormat(s.to_owned()))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Number of days in the month containing `date`, found as day 0 of the following month.
pub fn days_in_month(date: CalendarDate) -> u32 {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next_first| next_first.pred_opt())
        // only December of the last supported year has no following month
        .map_or(31, |last| last.day())
}

/// Whether `date` matches a day-of-month specifier set.
///
/// Literal days match their own number, `-1` matches the last day of the month and `-2` the
/// day before it.
pub fn is_matching_day(date: CalendarDate, days: &BTreeSet<i32>) -> bool {
    let last = days_in_month(date);
    let day = date.day();
    let contains = |value: u32| i32::try_from(value).is_ok_and(|v| days.contains(&v));

    contains(day)
        || (day == last && days.contains(&LAST_DAY))
        || (day + 1 == last && days.contains(&PENULTIMATE_DAY))
}
