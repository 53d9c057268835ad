//! satchel - mailbox operations served as typed agent tools
//!
//! This crate exposes a mailbox (list, read, reply-draft, categorize) as a
//! set of schema-typed operations for an external agent runtime, backed by
//! the Gmail REST API.

pub mod agent;
pub mod config;
pub mod domain;
pub mod providers;
pub mod services;
