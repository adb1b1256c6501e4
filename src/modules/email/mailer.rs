/// Narrow mail-sending capability the check routine depends on
pub trait Mailer {
    fn send(&self, to: &[String], from: &str, subject: &str, body: &str) -> Result<(), String>;
}


#[cfg(test)]
mod tests {
    use super::mock::RecordingMailer;
    use super::*;

    #[test]
    fn test_recording_mailer() {
        let mailer = RecordingMailer::new();
        let to = vec!["ops@example.com".to_string(), "dev@example.com".to_string()];

        assert!(mailer
            .send(&to, "certs@example.com", "subject", "body")
            .is_ok());

        let sent = mailer.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, to);
        assert_eq!(sent[0].1, "certs@example.com");
    }

    #[test]
    fn test_failing_mailer_still_records() {
        let mailer = RecordingMailer::failing("relay unavailable");

        let result = mailer.send(&["ops@example.com".to_string()], "a@example.com", "s", "b");

        assert_eq!(result, Err("relay unavailable".to_string()));
        assert_eq!(mailer.sent.borrow().len(), 1);
    }
}
