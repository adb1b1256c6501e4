// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{certs, config, email, reminder, scheduler, utils};

// Re-export commonly used types
pub use modules::certs::{CertificateInspector, ExpirationSnapshot, TlsInspector};
pub use modules::config::{Config, MailerCredentials};
pub use modules::email::{Mailer, SmtpMailer};
pub use modules::scheduler::{run_check, Scheduler};

// Constants
pub const DEFAULT_THRESHOLD_DAYS: u32 = 30;
pub const MAX_THRESHOLD_DAYS: u32 = 36_500;
pub const HTTPS_PORT: u16 = 443;
pub const NETWORK_TIMEOUT_SECS: u64 = 10;
pub const CHECK_INTERVAL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_SMTP_HOST: &str = "smtp.sendgrid.net";
pub const DEFAULT_SMTP_PORT: u16 = 587;
