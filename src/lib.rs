mod consts;
mod date;
mod error;
mod prelude;
mod rule;
mod strategy;

pub use consts::*;
pub use date::{CalendarDate, days_in_month, is_matching_day};
pub use error::RepeatError;
pub use rule::{DaySet, MonthSet, ParsedRule, Period, Rule, WeekdaySet, parse};
pub use strategy::{next_daily, next_monthly, next_weekly, next_yearly};

/// Computes the next occurrence of a repeating task.
///
/// `date` is the task's base date in `YYYYMMDD` form and `repeat` its repetition rule:
///
/// - `d <n>`: every `n` days (1..=400)
/// - `w <days>`: on the listed weekdays, 1 = Monday ... 7 = Sunday
/// - `m <days> [<months>]`: on the listed days of month (1..=31, -1 last, -2 second-to-last),
///   optionally only in the listed months (1..=12)
/// - `y`: every year on the base date
///
/// The result is formatted as `YYYYMMDD`. `now` is always supplied by the caller.
///
/// # Errors
/// - `RepeatError::RepeatNotSpecified` if `repeat` is empty
/// - `RepeatError::InvalidDateFormat` if `date` is not a `YYYYMMDD` calendar date
/// - `RepeatError::InvalidRule` if `repeat` does not parse or its parameters are out of range
/// - `RepeatError::NoOccurrence` if a monthly rule can never match
/// - `RepeatError::DateOutOfRange` if the result would exceed the supported calendar
pub fn next_date(now: CalendarDate, date: &str, repeat: &str) -> Result<String, RepeatError> {
    if repeat.is_empty() {
        return Err(RepeatError::RepeatNotSpecified);
    }
    let base = date.parse::<CalendarDate>()?;
    let rule = Rule::try_from(parse(repeat)?)?;

    rule.next_occurrence(now, base).map(|next| next.to_string())
}

/// [`next_date`] with `now` also given as `YYYYMMDD` text.
///
/// # Errors
/// As [`next_date`], plus `RepeatError::InvalidDateFormat` for a malformed `now`.
pub fn next_date_str(now: &str, date: &str, repeat: &str) -> Result<String, RepeatError> {
    if repeat.is_empty() {
        return Err(RepeatError::RepeatNotSpecified);
    }
    next_date(now.parse()?, date, repeat)
}
