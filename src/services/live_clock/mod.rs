//! Minute-aligned clock for the current-time indicator.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --subscribe--> Armed --one-shot fires--> Ticking --last unsubscribe--> Idle
//!                       ^                          |
//!                       +------ drift detected ----+
//! ```
//!
//! The first subscription arms a one-shot timer that fires on the next
//! minute boundary; from then on a one-minute interval keeps ticking. Every
//! tick carries the actual wall-clock time supplied by the caller, so a late
//! or early timer never shifts what is displayed.

mod driver;
mod manual;
mod tokio_driver;

use std::collections::BTreeSet;
use std::time::Duration as StdDuration;

use chrono::Timelike;

pub use driver::{TimerDriver, TimerId};
pub use manual::ManualTimerDriver;
pub use tokio_driver::TokioTimerDriver;

#[cfg(test)]
pub use driver::MockTimerDriver;

use crate::utils::date::TimePoint;

/// Period of the recurring timer.
pub const REFRESH_INTERVAL: StdDuration = StdDuration::from_secs(60);

/// How far from a minute boundary a tick may land before the clock realigns.
pub const DRIFT_TOLERANCE: StdDuration = StdDuration::from_secs(2);

const MILLIS_PER_MINUTE: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// No subscribers, no timers
    Idle,
    /// Waiting for the one-shot timer aligned to the next minute
    Armed,
    /// The recurring one-minute timer is running
    Ticking,
}

/// Notification produced when an armed timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    /// Wall-clock time at which the timer was handled
    pub now: TimePoint,
    /// The tick was off the minute boundary and the clock re-armed itself
    pub realigned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Self-scheduling minute clock. Owns its timers; dropping it cancels them.
pub struct LiveClock<D: TimerDriver> {
    driver: D,
    state: ClockState,
    timeout: Option<TimerId>,
    interval: Option<TimerId>,
    subscribers: BTreeSet<SubscriptionId>,
    next_subscription: u64,
}

impl<D: TimerDriver> LiveClock<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            state: ClockState::Idle,
            timeout: None,
            interval: None,
            subscribers: BTreeSet::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn subscribers(&self) -> impl Iterator<Item = SubscriptionId> + '_ {
        self.subscribers.iter().copied()
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers.contains(&id)
    }

    /// Register interest in minute ticks, arming the clock if needed.
    pub fn subscribe(&mut self, now: TimePoint) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.insert(id);
        self.arm(now);
        id
    }

    /// Drop a subscription. The last one out cancels every timer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(&id);
        if removed && self.subscribers.is_empty() {
            self.teardown();
        }
        removed
    }

    /// Arm the one-shot timer for the next minute boundary.
    ///
    /// No-op while any timer is armed or nobody is subscribed; returns
    /// whether a timer was armed.
    pub fn arm(&mut self, now: TimePoint) -> bool {
        if self.timeout.is_some() || self.interval.is_some() {
            log::trace!("Live clock already armed");
            return false;
        }
        if self.subscribers.is_empty() {
            return false;
        }
        let delay = delay_to_next_minute(now);
        self.timeout = Some(self.driver.arm_once(delay));
        self.state = ClockState::Armed;
        log::debug!("Live clock armed, first tick in {} ms", delay.as_millis());
        true
    }

    /// React to a fired timer. Returns a tick for the subscribers, or `None`
    /// if the timer is not one this clock currently owns.
    pub fn handle_timer(&mut self, id: TimerId, now: TimePoint) -> Option<ClockTick> {
        if self.subscribers.is_empty() {
            log::debug!("Ignoring timer {:?}: no subscribers", id);
            return None;
        }

        if self.timeout == Some(id) {
            self.timeout = None;
        } else if self.interval != Some(id) {
            log::debug!("Ignoring stale timer {:?}", id);
            return None;
        }

        let realigned = is_drifted(now);
        if realigned {
            log::warn!("Live clock fired at {} off the minute boundary; realigning", now);
            if let Some(interval) = self.interval.take() {
                self.driver.cancel(interval);
            }
            self.arm(now);
        } else if self.interval.is_none() {
            self.interval = Some(self.driver.arm_interval(REFRESH_INTERVAL));
            self.state = ClockState::Ticking;
        }

        Some(ClockTick { now, realigned })
    }

    /// Cancel all timers and return to Idle. Subscriptions are kept.
    pub fn teardown(&mut self) {
        if let Some(timeout) = self.timeout.take() {
            self.driver.cancel(timeout);
        }
        if let Some(interval) = self.interval.take() {
            self.driver.cancel(interval);
        }
        if self.state != ClockState::Idle {
            log::debug!("Live clock stopped");
        }
        self.state = ClockState::Idle;
    }
}

impl<D: TimerDriver> Drop for LiveClock<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn millis_into_minute(now: TimePoint) -> u64 {
    // leap seconds report nanosecond >= 1e9
    let millis = now.second() as u64 * 1000 + (now.nanosecond() / 1_000_000) as u64;
    millis.min(MILLIS_PER_MINUTE - 1)
}

/// Time from `now` to the next whole minute; a full minute when exactly on one.
pub fn delay_to_next_minute(now: TimePoint) -> StdDuration {
    StdDuration::from_millis(MILLIS_PER_MINUTE - millis_into_minute(now))
}

/// Whether `now` is further than [`DRIFT_TOLERANCE`] from the nearest minute boundary.
pub fn is_drifted(now: TimePoint) -> bool {
    let into = millis_into_minute(now);
    let distance = into.min(MILLIS_PER_MINUTE - into);
    distance > DRIFT_TOLERANCE.as_millis() as u64
}
