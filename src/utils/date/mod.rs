// Date utility functions
// Civil-day helpers for TimePoint values

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, Utc};

/// An instant carrying its civil calendar representation and UTC offset.
pub type TimePoint = DateTime<FixedOffset>;

pub fn is_same_day(date1: TimePoint, date2: TimePoint) -> bool {
    date1.date_naive() == date2.date_naive()
}

/// Midnight at the start of the civil day containing `date`, in the same offset.
pub fn start_of_day(date: TimePoint) -> TimePoint {
    at_time(date, NaiveTime::MIN)
}

/// The last millisecond (23:59:59.999) of the civil day containing `date`.
pub fn end_of_day(date: TimePoint) -> TimePoint {
    start_of_next_day(date) - Duration::milliseconds(1)
}

/// Midnight of the following civil day.
pub fn start_of_next_day(date: TimePoint) -> TimePoint {
    start_of_day(date) + Duration::days(1)
}

pub fn add_days(date: TimePoint, days: i64) -> TimePoint {
    date + Duration::days(days)
}

/// Replaces the time of day of `date`, keeping its civil date and offset.
pub fn at_time(date: TimePoint, time: NaiveTime) -> TimePoint {
    // A fixed offset has no gaps or folds, so the civil time always maps to one instant.
    let naive = date.date_naive().and_time(time);
    let offset = *date.offset();
    DateTime::from_naive_utc_and_offset(naive - offset, offset)
}

/// The current wall-clock time expressed in `offset`.
pub fn now_in(offset: FixedOffset) -> TimePoint {
    Utc::now().with_timezone(&offset)
}

/// The current wall-clock time in the machine's local offset.
pub fn local_now() -> TimePoint {
    Local::now().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn test_start_and_end_of_day_keep_offset() {
        let date = kst().with_ymd_and_hms(2025, 3, 14, 15, 42, 7).unwrap();

        let start = start_of_day(date);
        let end = end_of_day(date);

        assert_eq!(start, kst().with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap());
        assert_eq!(end.hour(), 23);
        assert_eq!(end.minute(), 59);
        assert_eq!(end.second(), 59);
        assert_eq!(end.timestamp_subsec_millis(), 999);
        assert_eq!(*end.offset(), kst());
    }

    #[test]
    fn test_start_of_next_day_rolls_month() {
        let date = kst().with_ymd_and_hms(2025, 1, 31, 23, 0, 0).unwrap();
        assert_eq!(
            start_of_next_day(date),
            kst().with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_is_same_day_uses_civil_date() {
        let morning = kst().with_ymd_and_hms(2025, 3, 14, 0, 30, 0).unwrap();
        let evening = kst().with_ymd_and_hms(2025, 3, 14, 23, 30, 0).unwrap();
        let next = kst().with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap();

        assert!(is_same_day(morning, evening));
        assert!(!is_same_day(evening, next));
    }
}
