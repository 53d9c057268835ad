//! Business services layer.
//!
//! This module contains the mailbox operations and the pure helpers they are
//! built from, coordinating between the provider boundary and domain types.
//!
//! # Architecture
//!
//! Services sit between the agent-facing operation registry and the
//! provider layer:
//!
//! ```text
//! Agent Layer (registry, stdio transport)
//!          |
//!          v
//!    Services Layer  <-- You are here
//!          |
//!          v
//! Infrastructure (MailProvider)
//! ```
//!
//! # Services Overview
//!
//! - [`MailboxService`]: the four mailbox operations, error-collapsed
//! - [`compose`]: reply draft composition and encoding
//! - [`content`]: MIME body extraction and truncation
//! - [`labels`]: label name resolution
//! - [`summary`]: header extraction and summary construction

pub mod compose;
pub mod content;
pub mod labels;
mod mailbox_service;
pub mod summary;

pub use mailbox_service::{
    CategorizeArgs, CategorizeResult, DraftReplyResult, ListUnreadArgs, ListUnreadResult,
    MailboxService, ThreadContentArgs, ThreadContentResult, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
