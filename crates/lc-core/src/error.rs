//! Error types for the generation engine.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the generation engine.
///
/// Generation itself never fails — lookup misses degrade to "no encounter"
/// or default weather. These errors cover malformed inputs, invalid user
/// actions, and misuse of the calendar.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A weight mapping had no strictly-positive entry to select from.
    #[error("empty distribution: no entry with positive weight")]
    EmptyDistribution,

    /// A percentage string could not be parsed as a number.
    #[error("cannot parse \"{0}\" as a percentage")]
    InvalidPercentage(String),

    /// A weight grid was built with mismatched label/cell dimensions.
    #[error("grid shape mismatch: {0}")]
    GridShape(String),

    /// A timer index was outside the current timer list.
    #[error("no timer at index {0}")]
    TimerIndex(usize),

    /// A lunar phase index was outside 0-7.
    #[error("invalid moon phase index {0} (expected 0-7)")]
    PhaseIndex(usize),

    /// A calendar operation needs a current date but none is set.
    #[error("no current date set")]
    NoCurrentDate,

    /// A date was outside the calendar's months or a month's day count.
    #[error("invalid date: month {month}, day {day}")]
    InvalidDate {
        /// 1-based month index.
        month: u32,
        /// 1-based day of month.
        day: u32,
    },

    /// A lunar operation was requested but the calendar tracks no moon.
    #[error("lunar tracking is not enabled for this calendar")]
    LunarDisabled,
}
