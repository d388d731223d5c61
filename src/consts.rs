/// Number of characters in a `YYYYMMDD` date
pub const DATE_LEN: usize = 8;

/// Maximum valid year (inclusive), the last one that fits four digits
pub const MAX_YEAR: i32 = 9999;

/// Separator between rule tokens
pub const TOKEN_SEPARATOR: char = ' ';
/// Separator between values inside a rule token
pub const VALUE_SEPARATOR: char = ',';

/// Period keyword for daily rules
pub const DAILY_KEYWORD: &str = "d";
/// Period keyword for weekly rules
pub const WEEKLY_KEYWORD: &str = "w";
/// Period keyword for monthly rules
pub const MONTHLY_KEYWORD: &str = "m";
/// Period keyword for yearly rules
pub const YEARLY_KEYWORD: &str = "y";

/// Smallest allowed daily interval
pub const MIN_DAY_INTERVAL: i32 = 1;
/// Largest allowed daily interval
pub const MAX_DAY_INTERVAL: i32 = 400;

/// Monday in rule numbering
pub const MONDAY: i32 = 1;
/// Sunday in rule numbering
pub const SUNDAY: i32 = 7;
/// Days in a week, also the maximum number of weekday entries
pub const DAYS_IN_WEEK: usize = 7;

/// Day-of-month anchor for the last day of a month
pub const LAST_DAY: i32 = -1;
/// Day-of-month anchor for the second-to-last day of a month
pub const PENULTIMATE_DAY: i32 = -2;
/// Largest literal day of month
pub const MAX_MONTH_DAY: i32 = 31;

/// Month number for January
pub const JANUARY: i32 = 1;
/// Month number for December
pub const DECEMBER: i32 = 12;

/// How far past the later of base date and now a day-by-day search may run.
/// Feb 29 recurs at most 8 years apart, so any satisfiable rule matches within this window.
pub const SEARCH_HORIZON_YEARS: u32 = 9;
