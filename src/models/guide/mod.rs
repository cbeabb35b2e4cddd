// Creation guide module
// Time-range preview of an in-progress drag-to-create gesture

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::utils::date::TimePoint;

/// The column and time range selected by a drag-to-create gesture.
///
/// Once finalized, `start_time` and `end_time` are slot starts: the guide
/// covers `[start_time, end_time + granularity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationGuide {
    pub column_index: usize,
    pub start_time: TimePoint,
    pub end_time: TimePoint,
}

impl CreationGuide {
    pub fn new(column_index: usize, start_time: TimePoint, end_time: TimePoint) -> Self {
        Self {
            column_index,
            start_time,
            end_time,
        }
    }

    /// Number of `granularity_minutes` slots covered, counting the slot at `end_time`.
    pub fn slot_count(&self, granularity_minutes: u32) -> i64 {
        if granularity_minutes == 0 {
            return 0;
        }
        (self.end_time - self.start_time).num_minutes() / granularity_minutes as i64 + 1
    }

    /// End of the last covered slot, i.e. the end an event created from this guide gets.
    pub fn covered_end(&self, granularity_minutes: u32) -> TimePoint {
        self.end_time + Duration::minutes(granularity_minutes as i64)
    }
}
