//! Column geometry for week and day time grids.
//!
//! Turns an ordered list of [`ColumnSpec`]s into width/left percentages and
//! answers hit-testing questions: which column holds an instant, which
//! column lies under a horizontal pointer position.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeGridError};
use crate::models::day_range::{ColumnSpec, DayRange, DEFAULT_GRANULARITY_MINUTES};
use crate::models::settings::TimeGridSettings;
use crate::utils::date::{start_of_day, TimePoint};

const DAYS_PER_WEEK: i64 = 7;
const WEEKEND_WEIGHT: f64 = 0.5;

/// Options shaping the default week of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOptions {
    /// 0 = Sunday, 1 = Monday, etc.
    pub start_day_of_week: u8,
    pub workweek: bool,
    pub narrow_weekend: bool,
    pub hour_start: u32,
    pub hour_end: u32,
    pub granularity_minutes: u32,
}

impl Default for WeekOptions {
    fn default() -> Self {
        Self {
            start_day_of_week: 0,
            workweek: false,
            narrow_weekend: false,
            hour_start: 0,
            hour_end: 24,
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
        }
    }
}

impl From<&TimeGridSettings> for WeekOptions {
    fn from(settings: &TimeGridSettings) -> Self {
        Self {
            start_day_of_week: settings.start_day_of_week,
            workweek: settings.workweek,
            narrow_weekend: settings.narrow_weekend,
            hour_start: settings.hour_start,
            hour_end: settings.hour_end,
            granularity_minutes: settings.granularity_minutes,
        }
    }
}

/// Width of one column in percent when `column_count` columns share the area.
///
/// Zero columns is a configuration problem (e.g. during initial load); it is
/// logged and yields 0 instead of an infinite width.
pub fn width_fraction(column_count: usize) -> f64 {
    if column_count == 0 {
        log::warn!("Cannot lay out a time grid without columns; using zero width");
        return 0.0;
    }
    100.0 / column_count as f64
}

/// Index of the first column whose range contains `instant` (`start <= instant < end`).
pub fn column_for_instant(columns: &[ColumnSpec], instant: TimePoint) -> Option<usize> {
    columns
        .iter()
        .find(|column| column.range.contains(instant))
        .map(|column| column.index)
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + DAYS_PER_WEEK) % DAYS_PER_WEEK;
    date - Duration::days(offset)
}

/// The columns of the week containing `render_date`, in `render_date`'s offset.
pub fn week_columns(render_date: TimePoint, options: &WeekOptions) -> Result<Vec<ColumnSpec>> {
    if options.start_day_of_week > 6 {
        return Err(TimeGridError::InvalidWeekday(options.start_day_of_week));
    }

    let date = render_date.date_naive();
    let back = (date - get_week_start(date, options.start_day_of_week)).num_days();
    let week_start = start_of_day(render_date) - Duration::days(back);

    let mut columns = Vec::with_capacity(DAYS_PER_WEEK as usize);
    for day in 0..DAYS_PER_WEEK {
        let day_start = week_start + Duration::days(day);
        if options.workweek && is_weekend(day_start.weekday()) {
            continue;
        }
        let range = DayRange::hour_window(
            day_start,
            options.hour_start,
            options.hour_end,
            options.granularity_minutes,
        )?;
        columns.push(ColumnSpec::new(columns.len(), range));
    }

    Ok(columns)
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Resolved geometry of an ordered set of columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnLayout {
    columns: Vec<ColumnSpec>,
    widths: Vec<f64>,
    lefts: Vec<f64>,
}

impl ColumnLayout {
    /// Lay out `columns` in `index` order. With `narrow_weekend`, Saturday
    /// and Sunday columns get half the width of the other days.
    pub fn new(mut columns: Vec<ColumnSpec>, narrow_weekend: bool) -> Self {
        columns.sort_by_key(|column| column.index);

        let weights: Vec<f64> = columns
            .iter()
            .map(|column| {
                if narrow_weekend && is_weekend(column.range.date().weekday()) {
                    WEEKEND_WEIGHT
                } else {
                    1.0
                }
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let widths: Vec<f64> = if total > 0.0 {
            weights.iter().map(|weight| weight / total * 100.0).collect()
        } else {
            log::warn!("Cannot lay out a time grid without columns; using zero width");
            Vec::new()
        };

        let lefts = widths
            .iter()
            .scan(0.0, |left, width| {
                let current = *left;
                *left += width;
                Some(current)
            })
            .collect();

        Self {
            columns,
            widths,
            lefts,
        }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.index == index)
    }

    /// Uniform column width, ignoring narrow weekends.
    pub fn width_fraction(&self) -> f64 {
        width_fraction(self.columns.len())
    }

    /// Per-column widths in percent, summing to 100.
    pub fn column_widths(&self) -> &[f64] {
        &self.widths
    }

    /// Per-column left offsets in percent.
    pub fn column_lefts(&self) -> &[f64] {
        &self.lefts
    }

    pub fn column_for_instant(&self, instant: TimePoint) -> Option<usize> {
        column_for_instant(&self.columns, instant)
    }

    /// Column index under a horizontal position given in percent of the column area.
    pub fn column_at(&self, x_percent: f64) -> Option<usize> {
        if !(0.0..=100.0).contains(&x_percent) {
            return None;
        }
        let position = self
            .lefts
            .iter()
            .zip(&self.widths)
            .position(|(left, width)| x_percent >= *left && x_percent < left + width)
            // exactly 100% belongs to the last column
            .or_else(|| self.columns.len().checked_sub(1))?;
        self.columns.get(position).map(|column| column.index)
    }

    /// Whether any column shows the civil day `date`.
    pub fn displays_date(&self, date: NaiveDate) -> bool {
        self.columns.iter().any(|column| column.range.date() == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use test_case::test_case;

    fn at(day: u32, hour: u32) -> TimePoint {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 1, day, hour, 0, 0)
            .unwrap()
    }

    // 2025-01-05 is a Sunday
    fn sunday_week() -> Vec<ColumnSpec> {
        week_columns(at(8, 12), &WeekOptions::default()).unwrap()
    }

    #[test_case(1, 100.0 ; "single day")]
    #[test_case(4, 25.0 ; "four days")]
    #[test_case(5, 20.0 ; "work week")]
    fn test_width_fraction(count: usize, expected: f64) {
        assert_eq!(width_fraction(count), expected);
    }

    #[test]
    fn test_width_fraction_zero_columns() {
        assert_eq!(width_fraction(0), 0.0);
        let layout = ColumnLayout::new(Vec::new(), false);
        assert_eq!(layout.width_fraction(), 0.0);
        assert!(layout.column_widths().is_empty());
        assert_eq!(layout.column_at(50.0), None);
    }

    #[test]
    fn test_get_week_start() {
        let wednesday = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        assert_eq!(get_week_start(wednesday, 0), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(get_week_start(wednesday, 1), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(get_week_start(wednesday, 3), wednesday);
    }

    #[test]
    fn test_week_columns_start_on_sunday() {
        let columns = sunday_week();
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0].range.start, at(5, 0));
        assert_eq!(columns[6].range.end, at(12, 0));
        assert!(columns.iter().enumerate().all(|(idx, column)| column.index == idx));
        assert!(columns.iter().all(|column| column.range.granularity_minutes == 30));
    }

    #[test]
    fn test_week_columns_workweek_skips_weekend() {
        let options = WeekOptions {
            workweek: true,
            start_day_of_week: 1,
            ..WeekOptions::default()
        };
        let columns = week_columns(at(8, 12), &options).unwrap();
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[0].range.start, at(6, 0));
        assert_eq!(columns[4].range.start, at(10, 0));
    }

    #[test]
    fn test_week_columns_rejects_bad_weekday() {
        let options = WeekOptions {
            start_day_of_week: 9,
            ..WeekOptions::default()
        };
        assert_eq!(week_columns(at(8, 12), &options), Err(TimeGridError::InvalidWeekday(9)));
    }

    #[test]
    fn test_column_for_instant_half_open_at_midnight() {
        let columns = sunday_week();
        assert_eq!(column_for_instant(&columns, at(6, 0)), Some(1));
        assert_eq!(column_for_instant(&columns, at(5, 23)), Some(0));
        assert_eq!(column_for_instant(&columns, at(12, 0)), None);
        assert_eq!(column_for_instant(&columns, at(4, 23)), None);
    }

    #[test]
    fn test_narrow_weekend_widths() {
        let layout = ColumnLayout::new(sunday_week(), true);
        let widths = layout.column_widths();

        // 5 weekdays + 2 half-width weekend days = 6 units
        assert!((widths[0] - 100.0 / 12.0).abs() < 1e-9);
        assert!((widths[1] - 100.0 / 6.0).abs() < 1e-9);
        assert!((widths.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert!((layout.column_lefts()[1] - 100.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_column_at_hit_testing() {
        let layout = ColumnLayout::new(sunday_week(), false);
        assert_eq!(layout.column_at(0.0), Some(0));
        assert_eq!(layout.column_at(50.0), Some(3));
        assert_eq!(layout.column_at(100.0), Some(6));
        assert_eq!(layout.column_at(-1.0), None);
        assert_eq!(layout.column_at(100.5), None);
    }

    #[test]
    fn test_layout_sorts_by_index_and_displays_date() {
        let mut columns = sunday_week();
        columns.reverse();
        let layout = ColumnLayout::new(columns, false);

        assert_eq!(layout.columns()[0].index, 0);
        assert_eq!(layout.column(2).map(|c| c.range.start), Some(at(7, 0)));
        assert!(layout.displays_date(NaiveDate::from_ymd_opt(2025, 1, 11).unwrap()));
        assert!(!layout.displays_date(NaiveDate::from_ymd_opt(2025, 1, 12).unwrap()));
    }
}
