// Day range module
// One rendered column's time span plus its snapping granularity

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeGridError};
use crate::utils::date::{start_of_day, start_of_next_day, TimePoint};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Default snapping unit for drag gestures, in minutes.
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 30;

/// The time span covered by one column.
///
/// Containment is half-open (`start <= instant < end`) so an instant at
/// midnight belongs to exactly one of two adjacent day columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub start: TimePoint,
    pub end: TimePoint,
    pub granularity_minutes: u32,
}

impl DayRange {
    /// Create a validated day range
    ///
    /// # Examples
    /// ```
    /// use calendar_timegrid::models::day_range::DayRange;
    /// use chrono::{FixedOffset, TimeZone};
    ///
    /// let utc = FixedOffset::east_opt(0).unwrap();
    /// let start = utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
    /// let end = utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap();
    /// let range = DayRange::new(start, end, 30).unwrap();
    /// assert!(range.contains(start));
    /// assert!(!range.contains(end));
    /// ```
    pub fn new(start: TimePoint, end: TimePoint, granularity_minutes: u32) -> Result<Self> {
        if start >= end {
            return Err(TimeGridError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        validate_granularity(granularity_minutes)?;
        let minutes = (end - start).num_minutes();
        if minutes < granularity_minutes as i64 {
            return Err(TimeGridError::GranularityExceedsRange {
                granularity: granularity_minutes,
                minutes,
            });
        }

        Ok(Self {
            start,
            end,
            granularity_minutes,
        })
    }

    /// The whole civil day containing `date`: `[00:00, next 00:00)`.
    pub fn full_day(date: TimePoint, granularity_minutes: u32) -> Result<Self> {
        Self::new(start_of_day(date), start_of_next_day(date), granularity_minutes)
    }

    /// Part of the civil day containing `date`, from `hour_start` up to `hour_end`.
    pub fn hour_window(
        date: TimePoint,
        hour_start: u32,
        hour_end: u32,
        granularity_minutes: u32,
    ) -> Result<Self> {
        validate_hour_window(hour_start, hour_end)?;
        let day = start_of_day(date);
        Self::new(
            day + Duration::hours(hour_start as i64),
            day + Duration::hours(hour_end as i64),
            granularity_minutes,
        )
    }

    pub fn contains(&self, instant: TimePoint) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Civil date of the column, taken from its start.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn granularity(&self) -> Duration {
        Duration::minutes(self.granularity_minutes as i64)
    }

    /// Number of whole slots that fit in the range. A trailing partial slot is not counted.
    pub fn slot_count(&self) -> i64 {
        let granularity_ms = self.granularity().num_milliseconds().max(1);
        (self.end - self.start).num_milliseconds() / granularity_ms
    }

    /// Start of the last whole slot, i.e. the latest slot that still ends inside the range.
    pub fn last_slot_start(&self) -> TimePoint {
        self.start + self.granularity() * (self.slot_count() - 1).max(0) as i32
    }

    /// Floor `instant` to the slot grid that starts at `start`.
    ///
    /// Instants before the range snap to its first slot, instants at or after
    /// the last whole slot snap to that slot.
    pub fn snap(&self, instant: TimePoint) -> TimePoint {
        let granularity_ms = self.granularity().num_milliseconds().max(1);
        let offset_ms = (instant - self.start).num_milliseconds().max(0);
        let snapped = self.start + Duration::milliseconds(offset_ms - offset_ms % granularity_ms);
        snapped.min(self.last_slot_start())
    }
}

/// A column of the grid; `index` is its render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub index: usize,
    pub range: DayRange,
}

impl ColumnSpec {
    pub fn new(index: usize, range: DayRange) -> Self {
        Self { index, range }
    }
}

/// A raw pair of instants taken from a pointer gesture.
///
/// Unlike [`DayRange`], `start` may come after `end` when the drag went upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: TimePoint,
    pub end: TimePoint,
}

impl TimeSpan {
    pub fn new(start: TimePoint, end: TimePoint) -> Self {
        Self { start, end }
    }

    /// A zero-length span, as produced by a pointer press.
    pub fn at(point: TimePoint) -> Self {
        Self::new(point, point)
    }

    /// Returns the span with `start <= end`.
    pub fn normalized(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self::new(self.end, self.start)
        }
    }
}

pub fn validate_granularity(granularity_minutes: u32) -> Result<()> {
    if granularity_minutes == 0
        || granularity_minutes > MINUTES_PER_DAY
        || MINUTES_PER_DAY % granularity_minutes != 0
    {
        return Err(TimeGridError::InvalidGranularity(granularity_minutes));
    }
    Ok(())
}

pub fn validate_hour_window(hour_start: u32, hour_end: u32) -> Result<()> {
    if hour_start >= hour_end || hour_end > 24 {
        return Err(TimeGridError::InvalidHourWindow {
            start: hour_start,
            end: hour_end,
        });
    }
    Ok(())
}
