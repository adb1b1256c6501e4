use super::settings::ConfigError;

/// Read a mandatory variable. An empty value counts as unset.
pub fn env_mandatory<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

/// Read an optional variable, falling back to `default` when empty or unset
pub fn env_optional<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Split a comma separated list, trimming entries and dropping empty ones
pub fn split_list(key: &'static str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(ConfigError::EmptyList(key));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_env_mandatory() {
        let lookup = lookup_from(&[("HOSTS", "example.com"), ("EMPTY", "")]);

        assert_eq!(env_mandatory(&lookup, "HOSTS").unwrap(), "example.com");
        assert!(matches!(
            env_mandatory(&lookup, "EMPTY"),
            Err(ConfigError::Missing("EMPTY"))
        ));
        assert!(matches!(
            env_mandatory(&lookup, "UNSET"),
            Err(ConfigError::Missing("UNSET"))
        ));
    }

    #[test]
    fn test_env_optional() {
        let lookup = lookup_from(&[("THRESHOLD_DAYS", "7"), ("FROM", "")]);

        assert_eq!(env_optional(&lookup, "THRESHOLD_DAYS", "30"), "7");
        assert_eq!(env_optional(&lookup, "FROM", "a@example.com"), "a@example.com");
        assert_eq!(env_optional(&lookup, "UNSET", "x"), "x");
    }

    #[test]
    fn test_split_list() {
        let hosts = split_list("HOSTS", "example.com, example.org,,example.net ").unwrap();
        assert_eq!(hosts, vec!["example.com", "example.org", "example.net"]);

        assert!(matches!(
            split_list("HOSTS", " , ,"),
            Err(ConfigError::EmptyList("HOSTS"))
        ));
    }
}
