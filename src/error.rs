/// Error type for computing the next occurrence of a rule.
///
/// Every variant is terminal for the call. Retrying with the same inputs yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepeatError {
    /// The rule string is empty.
    #[error("Repeat rule not specified")]
    RepeatNotSpecified,

    /// A date does not match the `YYYYMMDD` layout or is not a real calendar date.
    #[error("Invalid date format: {0:?} (expected YYYYMMDD)")]
    InvalidDateFormat(String),

    /// Unrecognized period, bad parameter count or out-of-range parameter value.
    #[error("Invalid repeat rule: {0}")]
    InvalidRule(String),

    /// No candidate satisfied the rule within the search horizon.
    #[error("No occurrence within {horizon_years} years")]
    NoOccurrence { horizon_years: u32 },

    /// Date arithmetic left the supported calendar range.
    #[error("Date out of supported range")]
    DateOutOfRange,
}

impl RepeatError {
    pub(crate) fn invalid_rule(reason: impl Into<String>) -> Self {
        Self::InvalidRule(reason.into())
    }
}
