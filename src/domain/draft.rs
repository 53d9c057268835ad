//! Draft composition types.

use serde::{Deserialize, Serialize};

use super::ThreadId;

/// A request to draft a reply within an existing thread.
///
/// `message_id` is the RFC 822 Message-ID being replied to. When absent the
/// reply targets the thread's last message; resolving that default is the
/// caller's job, and the composed headers carry an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    /// Thread the draft belongs to.
    pub thread_id: ThreadId,
    /// Message-ID being replied to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Recipient address line.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Reply body text.
    pub body: String,
}

/// A composed RFC 822 reply and its transport encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDraft {
    /// Target thread, carried unchanged from the request.
    pub thread_id: ThreadId,
    /// The CRLF-joined header and body text.
    pub message: String,
    /// `message` encoded with the URL-safe base64 alphabet, no padding.
    pub encoded: String,
}
