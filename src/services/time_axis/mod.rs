//! Conversions between instants and vertical positions on the time axis.
//!
//! All functions are pure: the caller passes `now` or any other instant
//! explicitly, so they can be tested with fixed values.

use chrono::Duration;

use crate::utils::date::{start_of_day, TimePoint};

/// Vertical position of `point` within `[range_start, range_end]`, in percent.
///
/// Instants outside the range are clamped to 0 or 100. An empty or inverted
/// range yields 0.
pub fn percent_of(point: TimePoint, range_start: TimePoint, range_end: TimePoint) -> f64 {
    let total = (range_end - range_start).num_milliseconds();
    if total <= 0 {
        return 0.0;
    }
    let elapsed = (point - range_start).num_milliseconds();
    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// The instant at `percent` of `[range_start, range_end]`, clamped to the range.
///
/// Millisecond precision; used to turn a pointer's vertical offset into a time.
pub fn time_at_percent(percent: f64, range_start: TimePoint, range_end: TimePoint) -> TimePoint {
    let total = (range_end - range_start).num_milliseconds().max(0);
    let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    let offset = (total as f64 * percent / 100.0).round() as i64;
    range_start + Duration::milliseconds(offset)
}

/// Top and height (both percent) of an event `[start, end)` drawn in a column.
pub fn vertical_span(
    start: TimePoint,
    end: TimePoint,
    range_start: TimePoint,
    range_end: TimePoint,
) -> (f64, f64) {
    let top = percent_of(start, range_start, range_end);
    let bottom = percent_of(end, range_start, range_end);
    (top, (bottom - top).max(0.0))
}

/// The 25 hour boundaries `00:00 ..= 24:00` of the civil day of `day_start`.
///
/// The 24th mark is midnight of the following day. The iterator is cheap to
/// clone, so the sequence can be walked again.
pub fn hour_marks(day_start: TimePoint) -> impl Iterator<Item = TimePoint> + Clone {
    hour_marks_between(day_start, 0, 24)
}

/// Hour boundaries `hour_start ..= hour_end` of the civil day of `day_start`.
pub fn hour_marks_between(
    day_start: TimePoint,
    hour_start: u32,
    hour_end: u32,
) -> impl Iterator<Item = TimePoint> + Clone {
    let midnight = start_of_day(day_start);
    (hour_start..=hour_end.min(24)).map(move |hour| midnight + Duration::hours(hour as i64))
}
