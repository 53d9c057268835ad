//! External service provider implementations.
//!
//! This module contains provider traits and implementations for external
//! services:
//!
//! - [`mail`] - Mail providers (Gmail API)

pub mod mail;
