//! Drag-to-create gesture tracking.
//!
//! ```text
//! Idle --start--> Dragging --change--> Dragging --end/cancel--> Idle
//! ```
//!
//! Finalized guides are normalized (`start_time <= end_time`) and both ends
//! are floored to the column's slot grid, which starts at the column's own
//! start: `end_time` names the slot the pointer was released in, not the
//! instant it was released at. Both ends stay on whole slots inside the
//! column, so `covered_end` never passes the column's end.

use crate::models::day_range::{ColumnSpec, DayRange, TimeSpan};
use crate::models::guide::CreationGuide;
use crate::utils::date::TimePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragState {
    guide: CreationGuide,
    anchor: TimePoint,
    range: DayRange,
}

/// Tracks at most one in-progress creation gesture.
#[derive(Debug, Clone, Default)]
pub struct CreationGuideTracker {
    drag: Option<DragState>,
}

impl CreationGuideTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The guide as last reported by the pointer, unsnapped.
    pub fn active(&self) -> Option<&CreationGuide> {
        self.drag.as_ref().map(|drag| &drag.guide)
    }

    /// The guide as it would be finalized right now.
    pub fn preview(&self) -> Option<CreationGuide> {
        self.drag
            .as_ref()
            .map(|drag| finalize(drag.guide, &drag.range))
    }

    /// Where the gesture started.
    pub fn anchor(&self) -> Option<TimePoint> {
        self.drag.as_ref().map(|drag| drag.anchor)
    }

    /// Begin a gesture in `column`. A gesture already in progress is replaced.
    pub fn on_guide_start(&mut self, column: &ColumnSpec, initial: TimeSpan) {
        if self.drag.is_some() {
            log::debug!("Creation guide restarted in column {}", column.index);
        }
        self.drag = Some(DragState {
            guide: CreationGuide::new(column.index, initial.start, initial.end),
            anchor: initial.start,
            range: column.range,
        });
    }

    /// Update the range, moving the guide to `column` if the pointer crossed
    /// into it. Ignored while idle; returns whether the guide was updated.
    pub fn on_guide_change(&mut self, column: &ColumnSpec, updated: TimeSpan) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            log::debug!("Ignoring stale guide change for column {}", column.index);
            return false;
        };
        drag.guide = CreationGuide::new(column.index, updated.start, updated.end);
        drag.range = column.range;
        true
    }

    /// Finish the gesture and hand back the finalized guide for event creation.
    ///
    /// Returns `None` if no gesture was in progress.
    pub fn on_guide_end(&mut self) -> Option<CreationGuide> {
        let Some(drag) = self.drag.take() else {
            log::debug!("Ignoring stale guide end");
            return None;
        };
        let finalized = finalize(drag.guide, &drag.range);
        log::debug!(
            "Creation guide finalized in column {}: {} - {}",
            finalized.column_index,
            finalized.start_time,
            finalized.end_time
        );
        Some(finalized)
    }

    /// Abandon the gesture without emitting anything. Returns whether one was active.
    pub fn on_guide_cancel(&mut self) -> bool {
        let was_dragging = self.drag.take().is_some();
        if was_dragging {
            log::debug!("Creation guide cancelled");
        }
        was_dragging
    }
}

/// Floor `time` to a slot boundary of `range`, clamped to the range's whole slots.
pub fn snap_to_granularity(time: TimePoint, range: &DayRange) -> TimePoint {
    range.snap(time)
}

/// Normalize the direction of `guide` and snap both ends into `range`.
pub fn finalize(guide: CreationGuide, range: &DayRange) -> CreationGuide {
    let span = TimeSpan::new(guide.start_time, guide.end_time).normalized();
    CreationGuide::new(
        guide.column_index,
        snap_to_granularity(span.start, range),
        snap_to_granularity(span.end, range),
    )
}
