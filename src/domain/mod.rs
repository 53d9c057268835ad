//! Domain layer types for the mailbox tool server.
//!
//! This module contains the core domain types used throughout the crate:
//! message summaries, thread content, draft composition, and labels.

mod draft;
mod label;
mod summary;
mod thread;
mod types;

pub use draft::{DraftRequest, RawDraft};
pub use label::{system_labels, Label};
pub use summary::EmailSummary;
pub use thread::ThreadMessage;
pub use types::{DraftId, LabelId, MessageId, ThreadId};
