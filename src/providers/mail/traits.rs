//! Mail provider trait definition.
//!
//! This module defines the [`MailProvider`] trait which abstracts over the
//! remote mailbox backend. The operations in [`crate::services`] consume this
//! trait only; everything transport-specific (credentials, tokens, HTTP)
//! lives behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DraftId, Label, LabelId, MessageId, ThreadId};

/// Result type alias for mail provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur during mail provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Authentication failed or credentials expired.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Network or connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, if known.
        retry_after_secs: Option<u64>,
    },

    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request or parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Reference to a message returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHandle {
    /// Provider-assigned message identifier.
    pub id: MessageId,
    /// Thread the message belongs to.
    pub thread_id: ThreadId,
}

/// A single message header as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name, e.g. `"Subject"`.
    pub name: String,
    /// Raw header value.
    pub value: String,
}

/// Metadata for one message: the requested headers plus a snippet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Headers in provider order. Only the requested names are present.
    pub headers: Vec<Header>,
    /// Short plain-text preview of the message content.
    pub snippet: String,
}

/// A node in a message's MIME content tree, as the provider ships it.
///
/// Inline `body.data` is base64url-encoded. Tree depth and fan-out are
/// provider-determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MimePart {
    /// Content type, e.g. `"text/plain"` or `"multipart/alternative"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Inline body, when this part carries data directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MimeBody>,
    /// Ordered child parts, for multipart containers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<MimePart>>,
}

/// Inline body data of a MIME part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeBody {
    /// base64url-encoded bytes, absent for container parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// One message of a fetched thread: its headers, content tree, and snippet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadEntry {
    /// Headers in provider order.
    pub headers: Vec<Header>,
    /// Root of the MIME content tree, when the provider supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<MimePart>,
    /// Short plain-text preview of the message content.
    pub snippet: String,
}

/// Trait for mail provider implementations.
///
/// All methods take `&self` and the trait is object-safe, so an
/// authenticated provider can be shared as `Arc<dyn MailProvider>` across
/// operations. Authentication itself happens before sharing and is not part
/// of this trait.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Lists messages matching a provider query string.
    ///
    /// # Arguments
    ///
    /// * `query` - Provider search query (e.g., `"is:unread"`)
    /// * `max_results` - Upper bound on the number of returned handles
    async fn list_messages(&self, query: &str, max_results: u32) -> Result<Vec<MessageHandle>>;

    /// Fetches metadata for one message, restricted to the named headers.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] if the message does not exist.
    async fn get_message_metadata(
        &self,
        id: &MessageId,
        header_names: &[String],
    ) -> Result<MessageMetadata>;

    /// Fetches all messages of a thread with their full content trees.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] if the thread does not exist.
    async fn get_thread(&self, thread_id: &ThreadId) -> Result<Vec<ThreadEntry>>;

    /// Saves a new draft in the given thread.
    ///
    /// `raw` is the full RFC 822 message, base64url-encoded without padding.
    ///
    /// # Returns
    ///
    /// The draft identifier assigned by the provider.
    async fn create_draft(&self, thread_id: &ThreadId, raw: &str) -> Result<DraftId>;

    /// Fetches all labels, system and user-created alike.
    async fn list_labels(&self) -> Result<Vec<Label>>;

    /// Adds the given labels to a thread.
    async fn modify_thread_labels(
        &self,
        thread_id: &ThreadId,
        add_label_ids: &[LabelId],
    ) -> Result<()>;
}
