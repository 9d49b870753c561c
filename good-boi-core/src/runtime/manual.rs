use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::Mutex;

use super::executor::{Executor, Job};

struct Timer {
    due: Duration,
    seq: u64,
    job: Job,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_seq: u64,
    ready: VecDeque<Job>,
    timers: Vec<Timer>,
}

/// Executor that only runs work when told to, on a virtual clock.
///
/// Nothing runs in the background: `run_ready` drains immediate jobs and
/// `advance` moves the clock forward, firing timers in due order. Jobs run
/// outside the internal lock, so they may schedule more work.
#[derive(Default)]
pub struct ManualExecutor {
    queue: Mutex<ManualQueue>,
}

impl ManualExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.queue.lock().now
    }

    pub fn pending_jobs(&self) -> usize {
        self.queue.lock().ready.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.queue.lock().timers.len()
    }

    /// Run immediate jobs until none are left. Returns how many ran.
    pub fn run_ready(&self) -> usize {
        let mut ran = 0;
        loop {
            let job = self.queue.lock().ready.pop_front();
            match job {
                Some(job) => {
                    job();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Move the clock forward by `by`, firing every timer that falls due.
    /// Returns how many timers fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.queue.lock().now + by;
        let mut fired = 0;
        loop {
            let job = {
                let mut queue = self.queue.lock();
                let next = queue
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(index, _)| index);
                match next {
                    Some(index) => {
                        let timer = queue.timers.swap_remove(index);
                        queue.now = timer.due;
                        Some(timer.job)
                    }
                    None => {
                        queue.now = target;
                        None
                    }
                }
            };
            match job {
                Some(job) => {
                    job();
                    fired += 1;
                }
                None => return fired,
            }
        }
    }
}

impl Executor for ManualExecutor {
    fn execute(&self, job: Job) {
        self.queue.lock().ready.push_back(job);
    }

    fn execute_after(&self, delay: Duration, job: Job) {
        let mut queue = self.queue.lock();
        let due = queue.now + delay;
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.timers.push(Timer { due, seq, job });
    }
}
