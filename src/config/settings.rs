//! Application settings.
//!
//! Settings are read from the environment at startup. The host launches the
//! binary as a child process, so the environment is the configuration
//! surface; there is no settings file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the OAuth client ID.
pub const CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";

/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_VAR: &str = "GOOGLE_CLIENT_SECRET";

/// Environment variable holding the OAuth refresh token.
pub const REFRESH_TOKEN_VAR: &str = "GOOGLE_REFRESH_TOKEN";

/// Errors raised while loading settings.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// One or more required environment variables were absent or empty.
    /// Every missing name is reported at once.
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),
}

/// Top-level application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Google API credentials.
    pub google: GoogleSettings,
}

/// Google OAuth credentials for the Gmail API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleSettings {
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// OAuth refresh token for the target mailbox.
    pub refresh_token: String,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// Collects every missing variable before failing, so a misconfigured
    /// launch reports the full list in one error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut read = |name: &str| match lookup(name).filter(|value| !value.is_empty()) {
            Some(value) => value,
            None => {
                missing.push(name.to_string());
                String::new()
            }
        };

        let settings = Self {
            google: GoogleSettings {
                client_id: read(CLIENT_ID_VAR),
                client_secret: read(CLIENT_SECRET_VAR),
                refresh_token: read(REFRESH_TOKEN_VAR),
            },
        };

        if missing.is_empty() {
            Ok(settings)
        } else {
            Err(ConfigError::MissingVars(missing))
        }
    }
}
