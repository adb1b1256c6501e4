//! Checks TLS certificate expiration of the configured hosts once a day and
//! mails a reminder when any of them expires within `THRESHOLD_DAYS`.
//!
//! Mandatory environment: `HOSTS`, `EMAILS`, `SENDGRID_USERNAME`,
//! `SENDGRID_PASSWORD`. Optional: `THRESHOLD_DAYS` (30), `FROM` (first of
//! `EMAILS`), `SMTP_HOST`, `SMTP_PORT`, `LOG_FILE`, `RUST_LOG`.

use std::path::PathBuf;
use std::process;

use log::{error, info};

use ssl_reminder::utils::initialize_logging;
use ssl_reminder::{run_check, Config, MailerCredentials, Scheduler, SmtpMailer, TlsInspector};

fn fatal(message: &str) -> ! {
    error!("{}", message);
    process::exit(1);
}

fn main() {
    let log_file = std::env::var_os("LOG_FILE")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    if let Err(e) = initialize_logging(log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    // Configuration errors are the only fatal ones, checked before any network use
    let config = Config::from_env().unwrap_or_else(|e| fatal(&e.to_string()));
    let credentials = MailerCredentials::from_env().unwrap_or_else(|e| fatal(&e.to_string()));

    info!(
        "Checking {} host(s) for {} recipient(s), threshold {} day(s), from {}",
        config.hosts.len(),
        config.emails.len(),
        config.threshold_days,
        config.from
    );
    info!("Mail relay: {:?}", credentials);

    let inspector = TlsInspector::new()
        .unwrap_or_else(|e| fatal(&format!("Failed to set up TLS client: {}", e)));
    let mailer = SmtpMailer::new(&credentials).unwrap_or_else(|e| fatal(&e));

    Scheduler::daily().run_forever(|now| {
        run_check(&config, &inspector, &mailer, now);
    });
}
