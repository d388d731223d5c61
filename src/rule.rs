use crate::consts::{
    DAILY_KEYWORD, DAYS_IN_WEEK, DECEMBER, JANUARY, MAX_DAY_INTERVAL, MAX_MONTH_DAY,
    MIN_DAY_INTERVAL, MONDAY, MONTHLY_KEYWORD, PENULTIMATE_DAY, SUNDAY, TOKEN_SEPARATOR,
    VALUE_SEPARATOR, WEEKLY_KEYWORD, YEARLY_KEYWORD,
};
use crate::date::{CalendarDate, is_matching_day};
use crate::error::RepeatError;
use crate::prelude::*;
use chrono::Weekday;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Recurrence granularity, written as the first token of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Period {
    #[display(fmt = "d")]
    Day,
    #[display(fmt = "w")]
    Week,
    #[display(fmt = "m")]
    Month,
    #[display(fmt = "y")]
    Year,
}

impl FromStr for Period {
    type Err = RepeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DAILY_KEYWORD => Ok(Self::Day),
            WEEKLY_KEYWORD => Ok(Self::Week),
            MONTHLY_KEYWORD => Ok(Self::Month),
            YEARLY_KEYWORD => Ok(Self::Year),
            other => Err(RepeatError::invalid_rule(format!("unknown period {other:?}"))),
        }
    }
}

/// Rule text split into its period and raw integer lists.
///
/// The lists are not range-checked here; see [`Rule`] for the validated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    pub period: Period,
    pub first_set: Vec<i32>,
    pub second_set: Vec<i32>,
}

/// Splits rule text on single spaces into a period and up to two comma-separated integer lists.
/// Tokens after the third are ignored.
///
/// # Errors
/// Returns `RepeatError::InvalidRule` for an unknown period or a non-integer list value.
pub fn parse(rule: &str) -> Result<ParsedRule, RepeatError> {
    let mut tokens = rule.split(TOKEN_SEPARATOR);
    let period = tokens.next().unwrap_or_default().parse::<Period>()?;
    let first_set = tokens.next().map(parse_values).transpose()?;
    let second_set = tokens.next().map(parse_values).transpose()?;

    Ok(ParsedRule {
        period,
        first_set: first_set.unwrap_or_default(),
        second_set: second_set.unwrap_or_default(),
    })
}

fn parse_values(token: &str) -> Result<Vec<i32>, RepeatError> {
    token
        .split(VALUE_SEPARATOR)
        .map(|value| {
            value
                .parse::<i32>()
                .map_err(|_| RepeatError::invalid_rule(format!("{value:?} is not an integer")))
        })
        .collect()
}

/// Weekdays a weekly rule fires on, numbered 1 (Monday) to 7 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdaySet([bool; DAYS_IN_WEEK]);

impl WeekdaySet {
    /// # Errors
    /// Returns `RepeatError::InvalidRule` for an empty list, more than seven entries or a value
    /// outside 1..=7.
    pub fn new(values: &[i32]) -> Result<Self, RepeatError> {
        if values.is_empty() || values.len() > DAYS_IN_WEEK {
            return Err(RepeatError::invalid_rule(format!(
                "weekly rule needs 1 to {DAYS_IN_WEEK} weekdays, got {}",
                values.len()
            )));
        }

        let mut days = [false; DAYS_IN_WEEK];
        for &value in values {
            if !(MONDAY..=SUNDAY).contains(&value) {
                return Err(RepeatError::invalid_rule(format!(
                    "weekday {value} outside {MONDAY}..={SUNDAY}"
                )));
            }
            days[(value - MONDAY).unsigned_abs() as usize] = true;
        }
        Ok(Self(days))
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0[weekday.num_days_from_monday() as usize]
    }

    fn values(&self) -> impl Iterator<Item = i32> + '_ {
        (MONDAY..=SUNDAY)
            .zip(self.0)
            .filter_map(|(n, set)| set.then_some(n))
    }
}

/// Day-of-month specifiers for a monthly rule: 1..=31, or the anchors -1 and -2.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DaySet(BTreeSet<i32>);

impl DaySet {
    /// # Errors
    /// Returns `RepeatError::InvalidRule` for an empty list or a value outside -2..=31, or 0.
    pub fn new(values: &[i32]) -> Result<Self, RepeatError> {
        if values.is_empty() {
            return Err(RepeatError::invalid_rule("monthly rule needs at least one day"));
        }
        if let Some(bad) = values
            .iter()
            .find(|&&v| !(PENULTIMATE_DAY..=MAX_MONTH_DAY).contains(&v) || v == 0)
        {
            return Err(RepeatError::invalid_rule(format!(
                "day of month {bad} outside {PENULTIMATE_DAY}..={MAX_MONTH_DAY}"
            )));
        }
        Ok(Self(values.iter().copied().collect()))
    }

    pub fn matches(&self, date: CalendarDate) -> bool {
        is_matching_day(date, &self.0)
    }
}

/// Months a monthly rule is restricted to, 1..=12.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonthSet(BTreeSet<u32>);

impl MonthSet {
    /// # Errors
    /// Returns `RepeatError::InvalidRule` for a value outside 1..=12.
    pub fn new(values: &[i32]) -> Result<Self, RepeatError> {
        values
            .iter()
            .map(|&v| {
                u32::try_from(v)
                    .ok()
                    .filter(|_| (JANUARY..=DECEMBER).contains(&v))
                    .ok_or_else(|| {
                        RepeatError::invalid_rule(format!(
                            "month {v} outside {JANUARY}..={DECEMBER}"
                        ))
                    })
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    pub fn contains(&self, month: u32) -> bool {
        self.0.contains(&month)
    }
}

/// A validated repetition rule. Each variant carries only the parameters its period uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Every `interval` days
    Daily { interval: u32 },
    /// On the listed weekdays
    Weekly { weekdays: WeekdaySet },
    /// On the listed days of month, optionally only in the listed months
    Monthly {
        days: DaySet,
        months: Option<MonthSet>,
    },
    /// Once a year on the base date's day and month
    Yearly,
}

impl Rule {
    pub const fn period(&self) -> Period {
        match self {
            Self::Daily { .. } => Period::Day,
            Self::Weekly { .. } => Period::Week,
            Self::Monthly { .. } => Period::Month,
            Self::Yearly => Period::Year,
        }
    }

    fn daily(first_set: &[i32]) -> Result<Self, RepeatError> {
        let [interval] = first_set else {
            return Err(RepeatError::invalid_rule(format!(
                "daily rule needs exactly one interval, got {}",
                first_set.len()
            )));
        };
        if !(MIN_DAY_INTERVAL..=MAX_DAY_INTERVAL).contains(interval) {
            return Err(RepeatError::invalid_rule(format!(
                "day interval {interval} outside {MIN_DAY_INTERVAL}..={MAX_DAY_INTERVAL}"
            )));
        }
        Ok(Self::Daily {
            interval: interval.unsigned_abs(),
        })
    }

    fn weekly(first_set: &[i32]) -> Result<Self, RepeatError> {
        let weekdays = WeekdaySet::new(first_set)?;
        Ok(Self::Weekly { weekdays })
    }

    fn monthly(first_set: &[i32], second_set: &[i32]) -> Result<Self, RepeatError> {
        let days = DaySet::new(first_set)?;
        let months = if second_set.is_empty() {
            None
        } else {
            Some(MonthSet::new(second_set)?)
        };
        Ok(Self::Monthly { days, months })
    }

    fn yearly(first_set: &[i32], second_set: &[i32]) -> Result<Self, RepeatError> {
        if !first_set.is_empty() || !second_set.is_empty() {
            return Err(RepeatError::invalid_rule("yearly rule takes no parameters"));
        }
        Ok(Self::Yearly)
    }
}

impl TryFrom<ParsedRule> for Rule {
    type Error = RepeatError;

    fn try_from(parsed: ParsedRule) -> Result<Self, Self::Error> {
        let ParsedRule {
            period,
            first_set,
            second_set,
        } = parsed;

        // daily and weekly rules ignore a second list
        match period {
            Period::Day => Self::daily(&first_set),
            Period::Week => Self::weekly(&first_set),
            Period::Month => Self::monthly(&first_set, &second_set),
            Period::Year => Self::yearly(&first_set, &second_set),
        }
    }
}

impl FromStr for Rule {
    type Err = RepeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(RepeatError::RepeatNotSpecified);
        }
        parse(s)?.try_into()
    }
}

fn write_list<I>(f: &mut fmt::Formatter<'_>, values: I) -> fmt::Result
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            write!(f, "{VALUE_SEPARATOR}")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.period())?;
        match self {
            Self::Daily { interval } => write!(f, "{TOKEN_SEPARATOR}{interval}"),
            Self::Weekly { weekdays } => {
                write!(f, "{TOKEN_SEPARATOR}")?;
                write_list(f, weekdays.values())
            }
            Self::Monthly { days, months } => {
                write!(f, "{TOKEN_SEPARATOR}")?;
                write_list(f, &days.0)?;
                if let Some(months) = months {
                    write!(f, "{TOKEN_SEPARATOR}")?;
                    write_list(f, &months.0)?;
                }
                Ok(())
            }
            Self::Yearly => Ok(()),
        }
    }
}

impl serde::Serialize for Rule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
