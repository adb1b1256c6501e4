pub mod mailer;
mod smtp;

pub use mailer::Mailer;
pub use smtp::{build_message, SmtpMailer};
