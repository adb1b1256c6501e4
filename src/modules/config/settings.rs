use std::fmt;

use super::env::{env_mandatory, env_optional, split_list};
use crate::utils::format_sensitive;
use crate::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, DEFAULT_THRESHOLD_DAYS, MAX_THRESHOLD_DAYS};

/// Errors raised while reading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} must contain at least one entry")]
    EmptyList(&'static str),

    #[error("failed to parse {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// What to check and whom to remind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub hosts: Vec<String>,
    pub emails: Vec<String>,
    pub threshold_days: u32,
    pub from: String,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let threshold_raw = env_optional(
            &lookup,
            "THRESHOLD_DAYS",
            &DEFAULT_THRESHOLD_DAYS.to_string(),
        );
        let threshold_days = parse_threshold(&threshold_raw)?;

        let emails = split_list("EMAILS", &env_mandatory(&lookup, "EMAILS")?)?;
        let hosts = split_list("HOSTS", &env_mandatory(&lookup, "HOSTS")?)?;

        // Sender defaults to the first recipient
        let from = env_optional(&lookup, "FROM", &emails[0]);

        Ok(Self {
            hosts,
            emails,
            threshold_days,
            from,
        })
    }
}

fn parse_threshold(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "THRESHOLD_DAYS",
        value: raw.to_string(),
        reason,
    };

    let days = raw.trim().parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    if days > MAX_THRESHOLD_DAYS {
        return Err(invalid(format!("must not exceed {}", MAX_THRESHOLD_DAYS)));
    }
    Ok(days)
}

/// Credentials and relay location for the outbound mail service
#[derive(Clone, PartialEq, Eq)]
pub struct MailerCredentials {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl MailerCredentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = env_mandatory(&lookup, "SENDGRID_USERNAME")?;
        let password = env_mandatory(&lookup, "SENDGRID_PASSWORD")?;
        let host = env_optional(&lookup, "SMTP_HOST", DEFAULT_SMTP_HOST);

        let port_raw = env_optional(&lookup, "SMTP_PORT", &DEFAULT_SMTP_PORT.to_string());
        let port = match port_raw.trim().parse::<u16>() {
            Ok(p) if p > 0 => p,
            Ok(_) => {
                return Err(ConfigError::Invalid {
                    key: "SMTP_PORT",
                    value: port_raw,
                    reason: "port must be between 1 and 65535".to_string(),
                })
            }
            Err(e) => {
                return Err(ConfigError::Invalid {
                    key: "SMTP_PORT",
                    value: port_raw,
                    reason: e.to_string(),
                })
            }
        };

        Ok(Self {
            username,
            password,
            host,
            port,
        })
    }
}

// Keep secrets out of log lines
impl fmt::Debug for MailerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerCredentials")
            .field("username", &format_sensitive(&self.username))
            .field("password", &format_sensitive(&self.password))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
