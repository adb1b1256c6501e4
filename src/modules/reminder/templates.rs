use std::fmt::Write;

use crate::certs::ExpirationRecord;
use crate::utils::format_expiration;

pub const REMINDER_SUBJECT: &str = "REMINDER SSL certificate expiration";
pub const SOON_HEADER: &str = "Certificates of the following hosts expire soon:";
pub const OTHERS_HEADER: &str = "Other hosts have enough time before expiration:";

/// Render the plain-text reminder body.
///
/// `soon` is always listed; `others` gets its own section only when non-empty.
pub fn reminder_body(soon: &[ExpirationRecord], others: &[ExpirationRecord]) -> String {
    let mut body = String::new();
    body.push_str(SOON_HEADER);
    body.push('\n');
    push_records(&mut body, soon);

    if !others.is_empty() {
        body.push('\n');
        body.push_str(OTHERS_HEADER);
        body.push('\n');
        push_records(&mut body, others);
    }

    body
}

fn push_records(body: &mut String, records: &[ExpirationRecord]) {
    for record in records {
        // Writing into a String cannot fail
        let _ = writeln!(
            body,
            "{}: {}",
            record.host,
            format_expiration(&record.expiration)
        );
    }
}
