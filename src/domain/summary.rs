//! Compact message summary produced by the listing operation.

use serde::{Deserialize, Serialize};

use super::{MessageId, ThreadId};

/// A compact, read-only summary of a single message.
///
/// `subject`, `from`, and `date` carry fixed placeholder values when the
/// corresponding header was absent from the provider's metadata, so every
/// field is always a plain string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSummary {
    /// Provider-assigned message identifier.
    pub id: MessageId,
    /// Thread the message belongs to.
    pub thread_id: ThreadId,
    /// Subject line, or `"(No Subject)"`.
    pub subject: String,
    /// Sender display value, or `"Unknown"`.
    pub from: String,
    /// Short preview of the message content.
    pub snippet: String,
    /// Date header value, or `""`.
    pub date: String,
}
