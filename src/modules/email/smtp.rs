use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::transport::smtp::PoolConfig;
use lettre::{Message, SmtpTransport, Transport};
use log::info;

use super::mailer::Mailer;
use crate::config::MailerCredentials;
use crate::NETWORK_TIMEOUT_SECS;

/// Mailer delivering through an authenticated SMTP relay (SendGrid by default)
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    /// Build the SMTP transport. No connection is opened until the first send.
    pub fn new(creds: &MailerCredentials) -> Result<Self, String> {
        // Configure TLS parameters
        let tls_parameters = TlsParameters::builder(creds.host.clone())
            .build()
            .map_err(|e| format!("Failed to build TLS parameters: {}", e))?;

        // STARTTLS is mandatory; credentials never travel in clear text
        let transport = SmtpTransport::relay(&creds.host)
            .map_err(|e| format!("Failed to create SMTP transport: {}", e))?
            .credentials(Credentials::new(
                creds.username.clone(),
                creds.password.clone(),
            ))
            .port(creds.port)
            .tls(Tls::Required(tls_parameters))
            .pool_config(PoolConfig::new().max_size(1))
            .timeout(Some(Duration::from_secs(NETWORK_TIMEOUT_SECS)))
            .build();

        Ok(Self { transport })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &[String], from: &str, subject: &str, body: &str) -> Result<(), String> {
        let email = build_message(to, from, subject, body)?;

        match self.transport.send(&email) {
            Ok(_) => {
                info!("Mail sent to {:?}", to);
                Ok(())
            }
            Err(e) => Err(format!("Failed to send email: {}", e)),
        }
    }
}

/// Assemble a plain-text message addressed to every recipient
pub fn build_message(
    to: &[String],
    from: &str,
    subject: &str,
    body: &str,
) -> Result<Message, String> {
    let from: Mailbox = from
        .parse()
        .map_err(|e| format!("Invalid from address {}: {}", from, e))?;

    let mut builder = Message::builder()
        .from(from)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN);

    for address in to {
        let mailbox: Mailbox = address
            .parse()
            .map_err(|e| format!("Invalid to address {}: {}", address, e))?;
        builder = builder.to(mailbox);
    }

    builder
        .body(body.to_string())
        .map_err(|e| format!("Failed to create email: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipients(addresses: &[&str]) -> Vec<String> {
        addresses.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_build_message_headers() {
        let message = build_message(
            &recipients(&["ops@example.com", "dev@example.com"]),
            "certs@example.com",
            "REMINDER SSL certificate expiration",
            "a.example: 2024-01-01 00:00:00 UTC\n",
        )
        .unwrap();

        let envelope = message.envelope();
        assert_eq!(envelope.to().len(), 2);
        assert_eq!(
            envelope.from().map(|a| a.to_string()),
            Some("certs@example.com".to_string())
        );

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: REMINDER SSL certificate expiration"));
        assert!(raw.contains("a.example: 2024-01-01 00:00:00 UTC"));
    }

    #[test]
    fn test_build_message_invalid_recipient() {
        let result = build_message(
            &recipients(&["ops@example.com", "not an address"]),
            "certs@example.com",
            "subject",
            "body",
        );

        let err = result.unwrap_err();
        assert!(err.contains("Invalid to address not an address"));
    }

    #[test]
    fn test_build_message_invalid_sender() {
        let result = build_message(
            &recipients(&["ops@example.com"]),
            "nobody",
            "subject",
            "body",
        );

        assert!(result.unwrap_err().starts_with("Invalid from address"));
    }

    #[test]
    fn test_smtp_mailer_construction() {
        // Building the transport does not touch the network
        let creds = MailerCredentials {
            username: "apikey".to_string(),
            password: "secret".to_string(),
            host: "smtp.example.com".to_string(),
            port: 587,
        };

        assert!(SmtpMailer::new(&creds).is_ok());
    }

    #[test]
    fn test_send_failure_is_returned_to_caller() {
        // Nothing listens on the port, so delivery fails
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let creds = MailerCredentials {
            username: "apikey".to_string(),
            password: "secret".to_string(),
            host: "127.0.0.1".to_string(),
            port,
        };
        let mailer = SmtpMailer::new(&creds).unwrap();

        let result = mailer.send(
            &recipients(&["ops@example.com"]),
            "certs@example.com",
            "subject",
            "body",
        );

        assert!(result.unwrap_err().starts_with("Failed to send email"));
    }
}
