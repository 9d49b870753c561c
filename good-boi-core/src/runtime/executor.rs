use std::thread;
use std::time::Duration;

/// A unit of background work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs work off the owner thread.
///
/// Jobs never touch orchestrator state directly; they post their results to
/// the owner's event queue.
pub trait Executor: Send + Sync {
    /// Run `job` as soon as possible.
    fn execute(&self, job: Job);

    /// Run `job` once `delay` has elapsed.
    fn execute_after(&self, delay: Duration, job: Job);
}

/// Executor backed by short-lived named OS threads.
#[derive(Debug, Clone)]
pub struct ThreadExecutor {
    name: String,
}

impl ThreadExecutor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn spawn(&self, delay: Option<Duration>, job: Job) {
        let spawned = thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || {
                if let Some(delay) = delay {
                    thread::sleep(delay);
                }
                job();
            });

        if let Err(e) = spawned {
            log::error!("failed to spawn {} thread: {}", self.name, e);
        }
    }
}

impl Default for ThreadExecutor {
    fn default() -> Self {
        Self::new("good-boi-worker")
    }
}

impl Executor for ThreadExecutor {
    fn execute(&self, job: Job) {
        self.spawn(None, job);
    }

    fn execute_after(&self, delay: Duration, job: Job) {
        self.spawn(Some(delay), job);
    }
}
