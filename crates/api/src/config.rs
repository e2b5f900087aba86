use std::path::PathBuf;

use counsel_core::config::{optional_var, parsed_var, required_var, ConfigError};
use counsel_mail::MailConfig;

/// Server configuration loaded from environment variables.
///
/// Optional values have defaults suitable for local development. Required
/// values (database and SMTP) have none: a missing one is reported as a
/// [`ConfigError`] and the binary refuses to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`, large video uploads
    /// need the headroom).
    pub request_timeout_secs: u64,
    /// Directory holding uploaded images and the site video.
    pub upload_dir: PathBuf,
    /// Contact mailer settings.
    pub mail: MailConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `DATABASE_URL`         | required                   |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `300`                      |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    ///
    /// SMTP variables are documented on [`MailConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = optional_var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parsed_var("PORT", 3000)?;
        let database_url = required_var("DATABASE_URL")?;

        let cors_origins = parse_origins(
            &optional_var("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = parsed_var("REQUEST_TIMEOUT_SECS", 300)?;
        let upload_dir = PathBuf::from(optional_var("UPLOAD_DIR").unwrap_or_else(|| "uploads".into()));

        let mail = MailConfig::from_env()?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            mail,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
