pub mod decision;
pub mod templates;

pub use decision::{decide_and_format, partition, should_remind, threshold_instant};
pub use templates::{reminder_body, REMINDER_SUBJECT};
