//! Next-date strategies, one per period.
//!
//! Every strategy is a forward search from the base date: compute a candidate, test it, and
//! advance until the first candidate is accepted. Daily and yearly rules accept a candidate
//! that is not before `now`; weekly and monthly rules require one strictly after `now`.

use crate::consts::SEARCH_HORIZON_YEARS;
use crate::date::CalendarDate;
use crate::error::RepeatError;
use crate::rule::{DaySet, MonthSet, Rule, WeekdaySet};
use chrono::NaiveDate;

/// Every `interval` days after `base`, first one not before `now`.
///
/// # Errors
/// Returns `RepeatError::DateOutOfRange` if the search runs past the last supported date.
pub fn next_daily(
    now: CalendarDate,
    base: CalendarDate,
    interval: u32,
) -> Result<CalendarDate, RepeatError> {
    let mut next = base.add_days(interval)?;
    while next < now {
        next = next.add_days(interval)?;
    }
    Ok(next)
}

/// First day after `base` that falls on one of `weekdays` and is after `now`.
///
/// # Errors
/// Returns `RepeatError::DateOutOfRange` if the search runs past the last supported date.
pub fn next_weekly(
    now: CalendarDate,
    base: CalendarDate,
    weekdays: &WeekdaySet,
) -> Result<CalendarDate, RepeatError> {
    let accept =
        |candidate: CalendarDate| weekdays.contains(candidate.weekday()) && candidate > now;
    search_forward(now, base, accept)
}

/// First day after `base` that matches `days`, is after `now`, and, when `months` is given,
/// falls in one of those months.
///
/// # Errors
/// Returns `RepeatError::NoOccurrence` if no day within the search horizon qualifies, which
/// happens for day and month combinations that never exist (such as the 31st of April).
pub fn next_monthly(
    now: CalendarDate,
    base: CalendarDate,
    days: &DaySet,
    months: Option<&MonthSet>,
) -> Result<CalendarDate, RepeatError> {
    search_forward(now, base, |candidate| {
        days.matches(candidate)
            && candidate > now
            && months.is_none_or(|months| months.contains(candidate.month()))
    })
}

/// Same day and month every year after `base`, first one not before `now`.
///
/// # Errors
/// Returns `RepeatError::DateOutOfRange` if the search runs past the last supported date.
pub fn next_yearly(now: CalendarDate, base: CalendarDate) -> Result<CalendarDate, RepeatError> {
    let mut next = base.add_years(1)?;
    while next < now {
        next = next.add_years(1)?;
    }
    Ok(next)
}

/// Day-by-day search starting the day after `base`, bounded by the search horizon.
fn search_forward<F>(
    now: CalendarDate,
    base: CalendarDate,
    accept: F,
) -> Result<CalendarDate, RepeatError>
where
    F: Fn(CalendarDate) -> bool,
{
    let limit = base
        .max(now)
        .add_years(SEARCH_HORIZON_YEARS)
        .unwrap_or(CalendarDate::from_naive(NaiveDate::MAX));

    let mut candidate = base.succ()?;
    while !accept(candidate) {
        if candidate >= limit {
            return Err(RepeatError::NoOccurrence {
                horizon_years: SEARCH_HORIZON_YEARS,
            });
        }
        candidate = candidate.succ()?;
    }
    Ok(candidate)
}

impl Rule {
    /// Next occurrence of this rule for a task dated `base`, as seen on `now`.
    ///
    /// # Errors
    /// See the period strategies: [`next_daily`], [`next_weekly`], [`next_monthly`] and
    /// [`next_yearly`].
    pub fn next_occurrence(
        &self,
        now: CalendarDate,
        base: CalendarDate,
    ) -> Result<CalendarDate, RepeatError> {
        match self {
            Self::Daily { interval } => next_daily(now, base, *interval),
            Self::Weekly { weekdays } => next_weekly(now, base, weekdays),
            Self::Monthly { days, months } => next_monthly(now, base, days, months.as_ref()),
            Self::Yearly => next_yearly(now, base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn next(rule: &str, base: &str, now: &str) -> Result<CalendarDate, RepeatError> {
        rule.parse::<Rule>()?.next_occurrence(date(now), date(base))
    }

    fn assert_next(rule: &str, base: &str, now: &str, expected: &str) {
        let result = next(rule, base, now).unwrap();
        assert_eq!(result, date(expected), "{rule:?} from {base} as of {now}");
    }

    #[test]
    fn test_daily() {
        assert_next("d 7", "20240213", "20240213", "20240220");
        assert_next("d 10", "20240101", "20240215", "20240220");
        assert_next("d 1", "20240228", "20240101", "20240229");
        assert_next("d 400", "20240213", "20240101", "20250319");
    }

    #[test]
    fn test_daily_accepts_now() {
        assert_next("d 5", "20240101", "20240111", "20240111");
    }

    #[test]
    fn test_weekly() {
        // 2024-01-01 is a Monday
        assert_next("w 1,3", "20240101", "20240103", "20240108");
        assert_next("w 7", "20240101", "20240101", "20240107");
        assert_next("w 3", "20240110", "20240101", "20240117");
        assert_next("w 1,2,3,4,5,6,7", "20240101", "20231201", "20240102");
    }

    #[test]
    fn test_weekly_rejects_now() {
        // Wednesday matches the set but is not after now
        assert_next("w 3,4", "20240101", "20240103", "20240104");
    }

    #[test]
    fn test_monthly_literal_days() {
        assert_next("m 1,15", "20240101", "20240110", "20240115");
        assert_next("m 31", "20240131", "20240101", "20240331");
        assert_next("m 25,26 7", "20240126", "20240126", "20240725");
    }

    #[test]
    fn test_monthly_anchors() {
        assert_next("m -1", "20240131", "20240201", "20240229");
        assert_next("m -1", "20230131", "20230201", "20230228");
        assert_next("m -2", "20240101", "20240101", "20240130");
        assert_next("m -1,-2", "20240227", "20240227", "20240228");
    }

    #[test]
    fn test_monthly_month_filter() {
        assert_next("m 1 1,7", "20240201", "20240201", "20240701");
        assert_next("m -1 2", "20240301", "20240301", "20250228");
        assert_next("m 29 2", "20240301", "20240301", "20280229");
    }

    #[test]
    fn test_monthly_strictly_after_now() {
        assert_next("m 15", "20240101", "20240115", "20240215");
    }

    #[test]
    fn test_monthly_impossible_combination() {
        assert_eq!(
            next("m 31 4,6,9,11", "20240101", "20240101"),
            Err(RepeatError::NoOccurrence {
                horizon_years: SEARCH_HORIZON_YEARS
            })
        );
        assert!(matches!(
            next("m 30 2", "20240101", "20240101"),
            Err(RepeatError::NoOccurrence { .. })
        ));
    }

    #[test]
    fn test_yearly() {
        assert_next("y", "20240213", "20240101", "20250213");
        assert_next("y", "20200501", "20230501", "20230501");
        assert_next("y", "20200501", "20230502", "20240501");
    }

    #[test]
    fn test_yearly_leap_day_rolls_forward() {
        assert_next("y", "20240229", "20240101", "20250301");
        assert_next("y", "20200229", "20240101", "20240301");
    }

    #[test]
    fn test_result_ordering_against_now() {
        let now = date("20240615");
        let base = date("20230101");
        for rule in ["d 1", "d 3", "d 400", "y"] {
            let result = next(rule, "20230101", "20240615").unwrap();
            assert!(result >= now, "{rule}: {result} is before {now}");
        }
        for rule in ["w 1", "w 6,7", "m 15", "m -1", "m -2 6", "m 15 6"] {
            let parsed: Rule = rule.parse().unwrap();
            let result = parsed.next_occurrence(now, base).unwrap();
            assert!(result > now, "{rule}: {result} is not after {now}");
        }
    }

    #[test]
    fn test_out_of_range() {
        let last = CalendarDate::from_naive(NaiveDate::MAX);
        assert_eq!(next_daily(last, last, 1), Err(RepeatError::DateOutOfRange));
        assert_eq!(next_yearly(last, last), Err(RepeatError::DateOutOfRange));
    }
}
