use chrono::{DateTime, Utc};
use log::{error, info};

use crate::certs::{collect, CertificateInspector};
use crate::config::Config;
use crate::email::Mailer;
use crate::reminder::{decide_and_format, REMINDER_SUBJECT};

/// Result of a single check cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No certificate is within the threshold, no mail was sent
    NothingToRemind,
    Sent,
    SendFailed(String),
}

/// Inspect every host, then mail a reminder if any certificate expires soon
pub fn run_check<I, M>(
    config: &Config,
    inspector: &I,
    mailer: &M,
    now: DateTime<Utc>,
) -> CheckOutcome
where
    I: CertificateInspector + ?Sized,
    M: Mailer + ?Sized,
{
    info!("Check started");

    let snapshot = collect(inspector, &config.hosts);
    let (remind, body) = decide_and_format(config, now, &snapshot);

    let outcome = if remind {
        match mailer.send(&config.emails, &config.from, REMINDER_SUBJECT, &body) {
            Ok(()) => CheckOutcome::Sent,
            Err(e) => {
                error!("Reminder to {:?} was not delivered: {}", config.emails, e);
                CheckOutcome::SendFailed(e)
            }
        }
    } else {
        CheckOutcome::NothingToRemind
    };

    info!("Check finished");
    outcome
}
