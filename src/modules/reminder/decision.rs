use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::warn;

use super::templates::reminder_body;
use crate::certs::{ExpirationRecord, ExpirationSnapshot};
use crate::config::Config;
use crate::utils::add_calendar_days;

/// Instant `threshold_days` calendar days after `now`
pub fn threshold_instant(now: DateTime<Utc>, threshold_days: u32) -> DateTime<Utc> {
    add_calendar_days(now, threshold_days)
}

/// True when any certificate expires strictly before `threshold`
pub fn should_remind(snapshot: &ExpirationSnapshot, threshold: DateTime<Utc>) -> bool {
    snapshot.values().any(|expiration| *expiration < threshold)
}

/// Split a snapshot into (expiring before threshold, the rest), each sorted by host
pub fn partition(
    snapshot: &ExpirationSnapshot,
    threshold: DateTime<Utc>,
) -> (Vec<ExpirationRecord>, Vec<ExpirationRecord>) {
    snapshot
        .iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .map(|(host, expiration)| ExpirationRecord {
            host: host.clone(),
            expiration: *expiration,
        })
        .partition(|record| record.expiration < threshold)
}

/// Decide whether a reminder is due and, if so, render its body.
///
/// The body is empty when no reminder is due.
pub fn decide_and_format(
    config: &Config,
    now: DateTime<Utc>,
    snapshot: &ExpirationSnapshot,
) -> (bool, String) {
    let threshold = threshold_instant(now, config.threshold_days);

    if !should_remind(snapshot, threshold) {
        return (false, String::new());
    }

    let (soon, others) = partition(snapshot, threshold);
    for record in &soon {
        warn!("{} will expire soon.", record.host);
    }

    (true, reminder_body(&soon, &others))
}
