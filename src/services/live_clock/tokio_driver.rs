use std::collections::HashMap;
use std::time::Duration as StdDuration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::driver::{TimerDriver, TimerId};

/// Timer driver backed by tokio tasks.
///
/// Fired ids are sent over an unbounded channel; the receiving task feeds
/// them to the clock, so all clock state changes happen on that one task.
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTimerDriver {
    sender: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioTimerDriver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let driver = Self {
            sender,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (driver, receiver)
    }

    /// Timers whose tasks are still alive.
    pub fn active_count(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn allocate(&mut self) -> TimerId {
        // finished one-shot tasks are never cancelled by the clock
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        TimerId(self.next_id)
    }
}

impl TimerDriver for TokioTimerDriver {
    fn arm_once(&mut self, delay: StdDuration) -> TimerId {
        let id = self.allocate();
        let sender = self.sender.clone();
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = sender.send(id);
        });
        self.tasks.insert(id, task);
        id
    }

    fn arm_interval(&mut self, period: StdDuration) -> TimerId {
        let id = self.allocate();
        let sender = self.sender.clone();
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if sender.send(id).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioTimerDriver {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
