use std::collections::BTreeMap;
use std::time::Duration as StdDuration;

use super::driver::{TimerDriver, TimerId};

#[derive(Debug, Clone, Copy)]
struct ManualTimer {
    due: StdDuration,
    period: Option<StdDuration>,
}

/// Timer driver running on virtual time.
///
/// Nothing fires on its own: the owner advances the virtual clock and feeds
/// the fired ids back into the clock. Deterministic, used for simulations
/// and tests.
#[derive(Debug, Default)]
pub struct ManualTimerDriver {
    elapsed: StdDuration,
    next_id: u64,
    timers: BTreeMap<TimerId, ManualTimer>,
}

impl ManualTimerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time since the driver was created.
    pub fn elapsed(&self) -> StdDuration {
        self.elapsed
    }

    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Time left until `id` fires.
    pub fn due_in(&self, id: TimerId) -> Option<StdDuration> {
        self.timers
            .get(&id)
            .map(|timer| timer.due.saturating_sub(self.elapsed))
    }

    /// Jump to the earliest armed timer and fire it.
    ///
    /// Returns the fired id and the virtual time it fired at.
    pub fn fire_next(&mut self) -> Option<(TimerId, StdDuration)> {
        let (id, timer) = self
            .timers
            .iter()
            .min_by_key(|(id, timer)| (timer.due, **id))
            .map(|(id, timer)| (*id, *timer))?;

        self.elapsed = self.elapsed.max(timer.due);
        match timer.period {
            Some(period) => {
                if let Some(entry) = self.timers.get_mut(&id) {
                    entry.due += period;
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some((id, self.elapsed))
    }

    /// Advance virtual time by `by`, firing everything that falls due on the way.
    pub fn advance(&mut self, by: StdDuration) -> Vec<(TimerId, StdDuration)> {
        let target = self.elapsed + by;
        let mut fired = Vec::new();
        while self.timers.values().any(|timer| timer.due <= target) {
            if let Some(entry) = self.fire_next() {
                fired.push(entry);
            }
        }
        self.elapsed = target;
        fired
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }
}

impl TimerDriver for ManualTimerDriver {
    fn arm_once(&mut self, delay: StdDuration) -> TimerId {
        let id = self.allocate();
        self.timers.insert(
            id,
            ManualTimer {
                due: self.elapsed + delay,
                period: None,
            },
        );
        id
    }

    fn arm_interval(&mut self, period: StdDuration) -> TimerId {
        let id = self.allocate();
        self.timers.insert(
            id,
            ManualTimer {
                due: self.elapsed + period,
                period: Some(period.max(StdDuration::from_millis(1))),
            },
        );
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}
