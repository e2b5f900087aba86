//! Environment variable helpers shared by the server and mail configuration.
//!
//! Every loader returns [`ConfigError`] instead of panicking so the binary can
//! report exactly which variable is missing or malformed before exiting.

use std::str::FromStr;

/// Error raised while loading configuration from the environment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed into the expected type.
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Read an optional variable. Unset and empty values both yield `None`.
pub fn optional_var(name: &'static str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a required variable.
pub fn required_var(name: &'static str) -> Result<String, ConfigError> {
    optional_var(name).ok_or(ConfigError::Missing(name))
}

/// Read an optional variable and parse it, falling back to `default` when unset.
pub fn parsed_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_var(name) {
        None => Ok(default),
        Some(raw) => parse_value(name, &raw),
    }
}

/// Parse a raw value, attributing failures to `name`.
pub fn parse_value<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a boolean flag the way `.env` files usually spell them.
pub fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_value_reports_variable_name() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert_matches!(err, ConfigError::Invalid { name: "PORT", .. });
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("SMTP_SECURE", "TRUE"), Ok(true));
        assert_eq!(parse_flag("SMTP_SECURE", "0"), Ok(false));
        assert_eq!(parse_flag("SMTP_SECURE", "off"), Ok(false));
        assert!(parse_flag("SMTP_SECURE", "maybe").is_err());
    }

    #[test]
    fn missing_error_names_variable() {
        let err = ConfigError::Missing("DATABASE_URL");
        assert_eq!(
            err.to_string(),
            "Missing required environment variable DATABASE_URL"
        );
    }
}
