use env_logger::{Builder, Target, WriteStyle};
use log::{info, LevelFilter};
use std::fs::OpenOptions;
use std::path::Path;

/// Initialize the logging system.
///
/// Logs go to stderr unless `log_file` is given, in which case they are
/// appended to that file. `RUST_LOG` overrides the default `info` level.
pub fn initialize_logging(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::new();
    builder
        // Set default log level
        .filter_level(LevelFilter::Info)
        // Let RUST_LOG refine the default
        .parse_default_env()
        .format_timestamp_secs()
        .format_module_path(true)
        .write_style(WriteStyle::Auto);

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder.try_init()?;

    info!("Logging system initialized");
    Ok(())
}

/// Mask sensitive data (credentials) before it reaches a log line
pub fn format_sensitive(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sensitive_data_formatting() {
        assert_eq!(format_sensitive("password"), "pa***rd");
        assert_eq!(format_sensitive("key"), "***");
        assert_eq!(format_sensitive("apikey-SG.abcdef"), "ap***ef");
        assert_eq!(format_sensitive(""), "");
    }

    #[test]
    fn test_sensitive_data_formatting_multibyte() {
        // Must not split inside a UTF-8 sequence
        assert_eq!(format_sensitive("pässwörd"), "pä***rd");
    }

    #[test]
    fn test_logging_initialization() {
        let log_file = NamedTempFile::new().unwrap();

        let result = initialize_logging(Some(log_file.path()));

        // Another test may have installed a logger first
        assert!(
            result.is_ok()
                || result
                    .unwrap_err()
                    .to_string()
                    .contains("already initialized")
        );
    }
}
