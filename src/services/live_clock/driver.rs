use std::time::Duration as StdDuration;

/// Handle of a timer armed through a [`TimerDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Source of one-shot and recurring timers.
///
/// Drivers only report which timer fired; the clock decides what that means
/// and reads the actual wall-clock time itself.
#[cfg_attr(test, mockall::automock)]
pub trait TimerDriver {
    /// Fire once after `delay`.
    fn arm_once(&mut self, delay: StdDuration) -> TimerId;

    /// Fire every `period`, first after one full period.
    fn arm_interval(&mut self, period: StdDuration) -> TimerId;

    /// Stop a timer. Cancelling an unknown or finished timer is a no-op.
    fn cancel(&mut self, id: TimerId);
}
