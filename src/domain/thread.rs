//! Thread content types returned by the thread-read operation.

use serde::{Deserialize, Serialize};

/// One message within a thread, reduced to displayable text.
///
/// `body` holds at most 2000 characters of decoded text. `from` and `date`
/// are empty strings when the corresponding header was absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMessage {
    /// Sender display value.
    pub from: String,
    /// Decoded, truncated message body.
    pub body: String,
    /// Date header value.
    pub date: String,
}
