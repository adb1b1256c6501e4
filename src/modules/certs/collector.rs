use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::{error, info};

use super::inspector::CertificateInspector;
use crate::utils::format_expiration;

/// Expiration of every host that could be inspected during one check cycle
pub type ExpirationSnapshot = HashMap<String, DateTime<Utc>>;

/// A single host and the instant its certificate stops being valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirationRecord {
    pub host: String,
    pub expiration: DateTime<Utc>,
}

/// Inspect every host in order and gather the expirations that could be read.
///
/// Failing hosts are logged and left out; the remaining hosts are still checked.
pub fn collect<I>(inspector: &I, hosts: &[String]) -> ExpirationSnapshot
where
    I: CertificateInspector + ?Sized,
{
    let mut snapshot = ExpirationSnapshot::with_capacity(hosts.len());

    for host in hosts {
        match inspector.inspect(host) {
            Ok(expiration) => {
                info!("Expiration of {} is {}", host, format_expiration(&expiration));
                snapshot.insert(host.clone(), expiration);
            }
            Err(e) => {
                error!("Getting expiration time of {} failed: {}", host, e);
            }
        }
    }

    snapshot
}
