//! Header extraction and email summary construction.
//!
//! Metadata listings only need a few headers per message; this module names
//! that set and folds raw header lists into [`EmailSummary`] values with
//! stable placeholder defaults.

use crate::domain::{EmailSummary, MessageId, ThreadId};
use crate::providers::mail::Header;

/// Headers requested when fetching message metadata for a summary.
pub const METADATA_HEADERS: [&str; 3] = ["Subject", "From", "Date"];

/// Placeholder subject when a message carries none.
pub const DEFAULT_SUBJECT: &str = "(No Subject)";

/// Placeholder sender when a message carries none.
pub const DEFAULT_FROM: &str = "Unknown";

/// Finds the value of the first header with the given name.
///
/// Matching is exact and case sensitive; providers normalize header casing
/// before handing headers over, so `"Subject"` here never means `"subject"`.
pub fn header_value<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
}

/// Like [`header_value`], but treats an empty value as absent.
pub fn non_empty_header_value<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    header_value(headers, name).filter(|v| !v.is_empty())
}

/// Builds an email summary from a message's identity, headers, and snippet.
///
/// Missing or empty headers fall back to placeholders: `"(No Subject)"`,
/// `"Unknown"` for the sender, and an empty date.
pub fn build_summary(
    id: MessageId,
    thread_id: ThreadId,
    headers: &[Header],
    snippet: String,
) -> EmailSummary {
    EmailSummary {
        id,
        thread_id,
        subject: non_empty_header_value(headers, "Subject")
            .unwrap_or(DEFAULT_SUBJECT)
            .to_string(),
        from: non_empty_header_value(headers, "From")
            .unwrap_or(DEFAULT_FROM)
            .to_string(),
        date: non_empty_header_value(headers, "Date")
            .unwrap_or_default()
            .to_string(),
        snippet,
    }
}
