// Render state module
// Snapshot of everything the presentation layer needs to draw the grid

use serde::Serialize;

use super::guide::CreationGuide;

/// Derived snapshot, recomputed whenever an input of the controller changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RenderState {
    /// Pixels taken by the timezone rulers left of the first column
    pub column_left_offset: f64,
    /// Width of one column in percent of the column area
    pub column_width: f64,
    /// Vertical position of the current time line in percent
    pub current_time_top: f64,
    /// Column containing the current instant, if any
    pub current_column_index: Option<usize>,
    pub show_current_time: bool,
    pub show_timezone_labels: bool,
    /// Snapped preview of the gesture in progress
    pub active_guide: Option<CreationGuide>,
}

impl RenderState {
    /// The guide to draw in `column_index`, if the active gesture is there.
    pub fn guide_for_column(&self, column_index: usize) -> Option<&CreationGuide> {
        self.active_guide
            .as_ref()
            .filter(|guide| guide.column_index == column_index)
    }
}
