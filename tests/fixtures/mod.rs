// Test fixtures - reusable test data
// Provides consistent instants, columns and timezones across test files

#![allow(dead_code)]

use calendar_timegrid::models::day_range::ColumnSpec;
use calendar_timegrid::models::timezone::TimezoneSpec;
use calendar_timegrid::services::column_layout::{week_columns, WeekOptions};
use calendar_timegrid::utils::date::TimePoint;
use chrono::{Duration, FixedOffset, TimeZone};

/// Sample instants for testing
pub mod dates {
    use super::*;

    pub fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    /// Returns an instant in January 2025 (UTC); the 5th is a Sunday
    pub fn jan_2025(day: u32, hour: u32, minute: u32, second: u32) -> TimePoint {
        utc().with_ymd_and_hms(2025, 1, day, hour, minute, second).unwrap()
    }

    /// Tuesday Jan 7, 2025 at 12:00:45
    pub fn tuesday_noon_45s() -> TimePoint {
        jan_2025(7, 12, 0, 45)
    }

    /// Returns Feb 29, 2024 (leap year) at midnight
    pub fn leap_day_2024() -> TimePoint {
        utc().with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()
    }

    pub fn plus_seconds(point: TimePoint, seconds: i64) -> TimePoint {
        point + Duration::seconds(seconds)
    }
}

/// Sample column sets for testing
pub mod columns {
    use super::*;

    /// Seven full days starting Sunday Jan 5, 2025, 30 minute granularity
    pub fn sunday_week() -> Vec<ColumnSpec> {
        week_columns(dates::jan_2025(5, 0, 0, 0), &WeekOptions::default()).unwrap()
    }

    /// The week after [`sunday_week`]
    pub fn following_week() -> Vec<ColumnSpec> {
        week_columns(dates::jan_2025(12, 0, 0, 0), &WeekOptions::default()).unwrap()
    }
}

/// Sample timezone lists for testing
pub mod timezones {
    use super::*;

    pub fn utc_only() -> Vec<TimezoneSpec> {
        vec![TimezoneSpec::from_offset_minutes(0).unwrap()]
    }

    /// UTC primary, then Seoul and New York
    pub fn three_zones() -> Vec<TimezoneSpec> {
        vec![
            TimezoneSpec::from_offset_minutes(0).unwrap().with_label("UTC"),
            TimezoneSpec::from_offset_minutes(540).unwrap().with_label("KST"),
            TimezoneSpec::from_offset_minutes(-300).unwrap().with_label("EST"),
        ]
    }
}
