//! Horizontal space taken by the hour-label rulers of displayed timezones.
//!
//! Each timezone gets one ruler of `base_width` pixels. Collapsing the
//! rulers keeps only the primary one visible.

use crate::models::timezone::TimezoneSpec;
use crate::services::time_axis::hour_marks;
use crate::utils::date::TimePoint;

/// Collapse state and label width of the timezone rulers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimezoneRuler {
    base_width: f64,
    collapsed: bool,
}

/// One visible ruler: where it starts and the hour labels it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerColumn {
    pub label: String,
    pub tooltip: Option<String>,
    /// Left edge in pixels from the start of the ruler area
    pub left: f64,
    pub width: f64,
    /// Hour boundaries of the primary day, in this timezone's civil time
    pub hours: Vec<TimePoint>,
}

impl TimezoneRuler {
    pub fn new(base_width: f64, collapsed: bool) -> Self {
        Self {
            base_width: base_width.max(0.0),
            collapsed,
        }
    }

    pub fn base_width(&self) -> f64 {
        self.base_width
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Flip the collapse state and return the new one.
    pub fn toggle(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        log::debug!("Timezone rulers {}", if self.collapsed { "collapsed" } else { "expanded" });
        self.collapsed
    }

    /// Returns true if the state changed.
    pub fn set_collapsed(&mut self, collapsed: bool) -> bool {
        if self.collapsed == collapsed {
            return false;
        }
        self.collapsed = collapsed;
        true
    }

    /// Pixels taken by all rulers: one `base_width` per timezone, or a
    /// single one while collapsed.
    pub fn total_label_width(&self, timezone_count: usize) -> f64 {
        if self.collapsed {
            self.base_width
        } else {
            self.base_width * timezone_count as f64
        }
    }

    /// Timezone labels are only worth showing when there is more than one ruler.
    pub fn show_labels(timezone_count: usize) -> bool {
        timezone_count > 1
    }

    pub fn visible_timezones<'a>(&self, timezones: &'a [TimezoneSpec]) -> &'a [TimezoneSpec] {
        if self.collapsed {
            &timezones[..timezones.len().min(1)]
        } else {
            timezones
        }
    }

    /// Layout of every visible ruler for the day of `day_start`.
    ///
    /// Hour boundaries are computed in the primary timezone and then
    /// re-expressed in each ruler's timezone, so all rulers line up.
    pub fn ruler_columns(&self, timezones: &[TimezoneSpec], day_start: TimePoint) -> Vec<RulerColumn> {
        let Some(primary) = timezones.first() else {
            return Vec::new();
        };
        let primary_marks: Vec<TimePoint> = hour_marks(primary.localize(day_start)).collect();

        self.visible_timezones(timezones)
            .iter()
            .enumerate()
            .map(|(idx, timezone)| RulerColumn {
                label: timezone.label(),
                tooltip: timezone.tooltip.clone(),
                left: idx as f64 * self.base_width,
                width: self.base_width,
                hours: primary_marks.iter().map(|mark| timezone.localize(*mark)).collect(),
            })
            .collect()
    }
}

impl Default for TimezoneRuler {
    fn default() -> Self {
        Self::new(crate::models::settings::DEFAULT_TIMES_WIDTH, false)
    }
}
