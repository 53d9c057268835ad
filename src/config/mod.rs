//! Configuration and settings management.
//!
//! This module provides application settings types and their loading from
//! the environment.

mod settings;

pub use settings::{
    ConfigError, GoogleSettings, Settings, CLIENT_ID_VAR, CLIENT_SECRET_VAR, REFRESH_TOKEN_VAR,
};
