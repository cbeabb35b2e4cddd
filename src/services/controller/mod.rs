//! The time-grid controller.
//!
//! Owns every piece of mutable time-grid state (column layout, ruler
//! collapse flag, creation gesture, live clock) and folds them into one
//! [`RenderState`] snapshot after each input. Inputs are processed one at a
//! time; every entry point returns whether the snapshot changed.

use crate::error::Result;
use crate::models::day_range::{ColumnSpec, TimeSpan};
use crate::models::guide::CreationGuide;
use crate::models::render_state::RenderState;
use crate::models::settings::TimeGridSettings;
use crate::models::timezone::TimezoneSpec;
use crate::services::column_layout::{week_columns, ColumnLayout, WeekOptions};
use crate::services::creation_guide::CreationGuideTracker;
use crate::services::live_clock::{LiveClock, SubscriptionId, TimerDriver, TimerId};
use crate::services::time_axis::percent_of;
use crate::services::timezone_ruler::{RulerColumn, TimezoneRuler};
use crate::utils::date::{at_time, end_of_day, start_of_day, start_of_next_day, TimePoint};

/// Pointer input from the presentation layer, already mapped to columns and times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Start { column_index: usize, point: TimePoint },
    Move { column_index: usize, point: TimePoint },
    End { point: TimePoint },
    Cancel,
}

pub struct TimeGridController<D: TimerDriver> {
    layout: ColumnLayout,
    narrow_weekend: bool,
    timezones: Vec<TimezoneSpec>,
    ruler: TimezoneRuler,
    guides: CreationGuideTracker,
    clock: LiveClock<D>,
    subscription: Option<SubscriptionId>,
    now: TimePoint,
    state: RenderState,
}

impl<D: TimerDriver> TimeGridController<D> {
    pub fn new(
        settings: &TimeGridSettings,
        columns: Vec<ColumnSpec>,
        timezones: Vec<TimezoneSpec>,
        driver: D,
        now: TimePoint,
    ) -> Self {
        let mut controller = Self {
            layout: ColumnLayout::new(columns, settings.narrow_weekend),
            narrow_weekend: settings.narrow_weekend,
            timezones,
            ruler: TimezoneRuler::new(settings.times_width, settings.timezones_collapsed),
            guides: CreationGuideTracker::new(),
            clock: LiveClock::new(driver),
            subscription: None,
            now,
            state: RenderState::default(),
        };
        controller.now = controller.in_primary(now);
        controller.recompute();
        controller
    }

    /// Build the week containing `now` with the configured timezones.
    pub fn from_settings(settings: &TimeGridSettings, driver: D, now: TimePoint) -> Result<Self> {
        let timezones = settings.resolve_timezones(now);
        let primary_now = timezones
            .first()
            .map(|primary| primary.localize(now))
            .unwrap_or(now);
        let columns = week_columns(primary_now, &WeekOptions::from(settings))?;
        Ok(Self::new(settings, columns, timezones, driver, now))
    }

    pub fn render_state(&self) -> &RenderState {
        &self.state
    }

    pub fn now(&self) -> TimePoint {
        self.now
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn timezones(&self) -> &[TimezoneSpec] {
        &self.timezones
    }

    pub fn ruler(&self) -> &TimezoneRuler {
        &self.ruler
    }

    pub fn clock(&self) -> &LiveClock<D> {
        &self.clock
    }

    pub fn driver_mut(&mut self) -> &mut D {
        self.clock.driver_mut()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Layout of the visible timezone rulers for today.
    pub fn ruler_columns(&self) -> Vec<RulerColumn> {
        self.ruler.ruler_columns(&self.timezones, self.now)
    }

    /// Recompute against a new wall-clock reading.
    pub fn refresh(&mut self, now: TimePoint) -> bool {
        self.now = self.in_primary(now);
        self.recompute()
    }

    /// Feed a fired timer id from the clock's driver.
    ///
    /// `now` is read at handling time, so a late timer still shows the
    /// correct time.
    pub fn handle_timer(&mut self, id: TimerId, now: TimePoint) -> bool {
        let Some(tick) = self.clock.handle_timer(id, now) else {
            return false;
        };
        self.now = self.in_primary(tick.now);
        self.recompute()
    }

    pub fn set_columns(&mut self, columns: Vec<ColumnSpec>) -> bool {
        self.layout = ColumnLayout::new(columns, self.narrow_weekend);

        let guide_column = self.guides.active().map(|guide| guide.column_index);
        if let Some(index) = guide_column {
            if self.layout.column(index).is_none() {
                log::debug!("Column {} disappeared; cancelling creation guide", index);
                self.guides.on_guide_cancel();
            }
        }
        self.recompute()
    }

    /// Show the week containing today again once the displayed columns no
    /// longer include it (e.g. after midnight at the end of the week).
    ///
    /// Returns whether the columns were rebuilt.
    pub fn follow_today(&mut self, options: &WeekOptions) -> Result<bool> {
        if self.layout.displays_date(self.now.date_naive()) {
            return Ok(false);
        }
        let columns = week_columns(self.now, options)?;
        log::info!("Today left the displayed columns; showing the week of {}", self.now.date_naive());
        self.set_columns(columns);
        Ok(true)
    }

    pub fn set_timezones(&mut self, timezones: Vec<TimezoneSpec>) -> bool {
        self.timezones = timezones;
        self.now = self.in_primary(self.now);
        self.recompute()
    }

    pub fn toggle_collapsed(&mut self) -> bool {
        self.ruler.toggle();
        self.recompute()
    }

    pub fn set_collapsed(&mut self, collapsed: bool) -> bool {
        if !self.ruler.set_collapsed(collapsed) {
            return false;
        }
        self.recompute()
    }

    /// Apply a pointer event to the creation gesture.
    ///
    /// Returns the finalized guide when the gesture ends, for the
    /// event-creation collaborator to persist.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<CreationGuide> {
        let finalized = match event {
            PointerEvent::Start { column_index, point } => {
                if let Some(column) = self.column(column_index) {
                    self.guides.on_guide_start(&column, TimeSpan::at(point));
                }
                None
            }
            PointerEvent::Move { column_index, point } => {
                self.drag_to(column_index, point);
                None
            }
            PointerEvent::End { point } => {
                if let Some(column_index) = self.guides.active().map(|guide| guide.column_index) {
                    self.drag_to(column_index, point);
                }
                self.guides.on_guide_end()
            }
            PointerEvent::Cancel => {
                self.guides.on_guide_cancel();
                None
            }
        };
        self.recompute();
        finalized
    }

    fn drag_to(&mut self, column_index: usize, point: TimePoint) {
        let Some(anchor) = self.guides.anchor() else {
            log::debug!("Ignoring pointer move without an active gesture");
            return;
        };
        let Some(column) = self.column(column_index) else {
            return;
        };
        let anchor = rebase_to_column(anchor, &column);
        self.guides.on_guide_change(&column, TimeSpan::new(anchor, point));
    }

    fn column(&self, column_index: usize) -> Option<ColumnSpec> {
        let column = self.layout.column(column_index).copied();
        if column.is_none() {
            log::warn!("Pointer event for unknown column {}", column_index);
        }
        column
    }

    fn in_primary(&self, instant: TimePoint) -> TimePoint {
        match self.timezones.first() {
            Some(primary) => primary.localize(instant),
            None => instant,
        }
    }

    /// Measured against the window of the column showing today, or the whole
    /// civil day when no column does.
    fn current_time_top(&self) -> f64 {
        let now = self.now;
        let today = now.date_naive();
        let window = self
            .layout
            .columns()
            .iter()
            .find(|column| column.range.date() == today)
            .map(|column| column.range)
            .filter(|range| range.start != start_of_day(now) || range.end != start_of_next_day(now));

        match window {
            Some(range) => percent_of(now, range.start, range.end),
            None => percent_of(now, start_of_day(now), end_of_day(now)),
        }
    }

    fn recompute(&mut self) -> bool {
        let today_displayed = self.layout.displays_date(self.now.date_naive());
        let current_column_index = self.layout.column_for_instant(self.now);

        let next = RenderState {
            column_left_offset: self.ruler.total_label_width(self.timezones.len()),
            column_width: self.layout.width_fraction(),
            current_time_top: self.current_time_top(),
            current_column_index,
            show_current_time: current_column_index.is_some() && today_displayed,
            show_timezone_labels: TimezoneRuler::show_labels(self.timezones.len()),
            active_guide: self.guides.preview(),
        };

        // today on screen means the indicator is, or may soon be, visible
        self.sync_clock(today_displayed);

        let changed = next != self.state;
        self.state = next;
        changed
    }

    fn sync_clock(&mut self, wants_ticks: bool) {
        match (wants_ticks, self.subscription) {
            (true, None) => {
                self.subscription = Some(self.clock.subscribe(self.now));
            }
            (true, Some(_)) => {
                self.clock.arm(self.now);
            }
            (false, Some(id)) => {
                self.clock.unsubscribe(id);
                self.subscription = None;
            }
            (false, None) => {}
        }
    }
}

/// Move `anchor` onto the civil day of `column`, keeping its time of day.
fn rebase_to_column(anchor: TimePoint, column: &ColumnSpec) -> TimePoint {
    let column_start = column.range.start;
    let local = anchor.with_timezone(column_start.offset());
    at_time(column_start, local.time())
}
