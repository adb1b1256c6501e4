use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{error, info};

use crate::CHECK_INTERVAL_SECS;

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Something that can wait for an interval
pub trait Sleeper {
    fn sleep(&self, interval: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, interval: Duration) {
        thread::sleep(interval);
    }
}

/// Runs a task immediately and then once per interval
pub struct Scheduler<C: Clock, S: Sleeper> {
    clock: C,
    sleeper: S,
    interval: Duration,
}

impl Scheduler<SystemClock, ThreadSleeper> {
    /// Wall clock, real sleeps, one run every 24 hours
    pub fn daily() -> Self {
        Self::new(
            SystemClock,
            ThreadSleeper,
            Duration::from_secs(CHECK_INTERVAL_SECS),
        )
    }
}

impl<C: Clock, S: Sleeper> Scheduler<C, S> {
    pub fn new(clock: C, sleeper: S, interval: Duration) -> Self {
        Self {
            clock,
            sleeper,
            interval,
        }
    }

    /// Run `task` now, then after every interval.
    ///
    /// Stops after `max_runs` runs, or never when `None`. A panicking run is
    /// logged and does not stop the loop. Returns the number of runs made.
    pub fn run<F>(&self, mut task: F, max_runs: Option<usize>) -> usize
    where
        F: FnMut(DateTime<Utc>),
    {
        let mut runs = 0;

        loop {
            if max_runs.is_some_and(|max| runs >= max) {
                return runs;
            }
            if runs > 0 {
                self.sleeper.sleep(self.interval);
            }

            let now = self.clock.now();
            runs += 1;
            if panic::catch_unwind(AssertUnwindSafe(|| task(now))).is_err() {
                error!("Check run {} panicked; continuing with the next run", runs);
            }
        }
    }

    /// Run `task` until the process is terminated
    pub fn run_forever<F>(&self, task: F)
    where
        F: FnMut(DateTime<Utc>),
    {
        info!("Scheduler started, interval {:?}", self.interval);
        self.run(task, None);
    }
}
