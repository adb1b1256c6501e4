pub mod logging;
pub mod time;

pub use logging::{format_sensitive, initialize_logging};
pub use time::{add_calendar_days, format_expiration, from_unix_timestamp};
