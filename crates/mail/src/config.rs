//! SMTP and recipient configuration.

use counsel_core::config::{optional_var, parse_flag, parse_value, required_var, ConfigError};
use lettre::Address;

/// Implicit-TLS SMTP port, used when `SMTP_SECURE` is on.
const DEFAULT_SECURE_PORT: u16 = 465;

/// STARTTLS SMTP port.
const DEFAULT_STARTTLS_PORT: u16 = 587;

/// Configuration for the contact mailer.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    pub smtp_port: u16,
    /// `true` for implicit TLS, `false` for STARTTLS.
    pub smtp_secure: bool,
    pub smtp_user: String,
    pub smtp_password: String,
    /// Account the server sends as. Falls back to `smtp_user`.
    pub default_from: String,
    /// Where contact requests are delivered.
    pub recipient: String,
    /// When set, replaces `recipient` (staging/test inboxes).
    pub recipient_override: Option<String>,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable            | Required | Default                      |
    /// |---------------------|----------|------------------------------|
    /// | `SMTP_HOST`         | yes      | -                            |
    /// | `SMTP_PORT`         | no       | `465` if secure, else `587`  |
    /// | `SMTP_SECURE`       | no       | `false`                      |
    /// | `SMTP_USER`         | yes      | -                            |
    /// | `SMTP_PASSWORD`     | yes      | -                            |
    /// | `EMAIL_FROM`        | no       | value of `SMTP_USER`         |
    /// | `EMAIL_TO`          | yes      | -                            |
    /// | `EMAIL_TO_OVERRIDE` | no       | -                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        let smtp_secure = match optional_var("SMTP_SECURE") {
            Some(raw) => parse_flag("SMTP_SECURE", &raw)?,
            None => false,
        };
        let smtp_port = match optional_var("SMTP_PORT") {
            Some(raw) => parse_value("SMTP_PORT", &raw)?,
            None if smtp_secure => DEFAULT_SECURE_PORT,
            None => DEFAULT_STARTTLS_PORT,
        };
        let smtp_user = required_var("SMTP_USER")?;
        let default_from = optional_var("EMAIL_FROM").unwrap_or_else(|| smtp_user.clone());

        let config = Self {
            smtp_host: required_var("SMTP_HOST")?,
            smtp_port,
            smtp_secure,
            smtp_password: required_var("SMTP_PASSWORD")?,
            default_from,
            recipient: required_var("EMAIL_TO")?,
            recipient_override: optional_var("EMAIL_TO_OVERRIDE"),
            smtp_user,
        };
        config.check_addresses()?;
        Ok(config)
    }

    /// The address contact requests are actually delivered to.
    pub fn effective_recipient(&self) -> &str {
        self.recipient_override
            .as_deref()
            .unwrap_or(&self.recipient)
    }

    /// Fail fast on addresses that could never be used in an envelope.
    pub fn check_addresses(&self) -> Result<(), ConfigError> {
        check_address("EMAIL_FROM", &self.default_from)?;
        check_address("EMAIL_TO", &self.recipient)?;
        if let Some(addr) = &self.recipient_override {
            check_address("EMAIL_TO_OVERRIDE", addr)?;
        }
        Ok(())
    }
}

fn check_address(name: &'static str, value: &str) -> Result<(), ConfigError> {
    value
        .parse::<Address>()
        .map(|_| ())
        .map_err(|e| ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            smtp_secure: false,
            smtp_user: "mailer@example.com".into(),
            smtp_password: "secret".into(),
            default_from: "mailer@example.com".into(),
            recipient: "office@example.com".into(),
            recipient_override: None,
        }
    }

    #[test]
    fn effective_recipient_prefers_override() {
        let mut cfg = config();
        assert_eq!(cfg.effective_recipient(), "office@example.com");
        cfg.recipient_override = Some("qa@example.com".into());
        assert_eq!(cfg.effective_recipient(), "qa@example.com");
    }

    #[test]
    fn malformed_recipient_is_a_config_error() {
        let mut cfg = config();
        cfg.recipient = "office-at-example".into();
        assert_matches!(
            cfg.check_addresses(),
            Err(ConfigError::Invalid { name: "EMAIL_TO", .. })
        );
    }

    #[test]
    fn smtp_user_may_not_be_an_address_when_from_is_set() {
        let mut cfg = config();
        cfg.smtp_user = "apikey".into();
        assert!(cfg.check_addresses().is_ok());
    }
}
