pub mod check;
pub mod runner;

pub use check::{run_check, CheckOutcome};
pub use runner::{Clock, Scheduler, Sleeper, SystemClock, ThreadSleeper};
