//! Error types for the time-grid engine.
//!
//! Only configuration problems are errors here. Layout and gesture code
//! recovers locally (zero widths, ignored stale events) and never returns one.

use thiserror::Error;

/// Configuration errors raised while building time-grid inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeGridError {
    /// A day range whose start is not before its end
    #[error("Day range start {start} must be before end {end}")]
    InvalidRange { start: String, end: String },

    /// Snapping granularity that does not split a day into whole slots
    #[error("Granularity of {0} minutes does not evenly divide a day")]
    InvalidGranularity(u32),

    /// Granularity longer than the range it should split into slots
    #[error("Granularity of {granularity} minutes does not fit in a {minutes} minute range")]
    GranularityExceedsRange { granularity: u32, minutes: i64 },

    /// Visible hour window outside 0..=24 or empty
    #[error("Hour window {start}..{end} is invalid")]
    InvalidHourWindow { start: u32, end: u32 },

    /// First day of week outside 0 (Sunday) ..= 6 (Saturday)
    #[error("First day of week must be 0-6, got {0}")]
    InvalidWeekday(u8),

    /// IANA zone name that chrono-tz does not know
    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    /// UTC offset outside +/- 24 hours
    #[error("Timezone offset of {0} minutes is out of range")]
    InvalidOffset(i32),
}

pub type Result<T> = std::result::Result<T, TimeGridError>;
