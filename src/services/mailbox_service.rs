//! Mailbox operations facade.
//!
//! [`MailboxService`] implements the four mailbox operations on top of a
//! [`MailProvider`]. Operations never fail: a provider error is logged once
//! at this boundary and the operation returns its empty or unsuccessful
//! result shape instead, so a calling agent always gets a well-formed answer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{DraftId, DraftRequest, EmailSummary, ThreadId, ThreadMessage};
use crate::providers::mail::{MailProvider, Result};
use crate::services::summary::METADATA_HEADERS;
use crate::services::{compose, content, labels, summary};

/// Listing size when the caller doesn't specify one.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Upper bound on listing size regardless of what the caller asks for.
pub const MAX_LIST_LIMIT: u32 = 20;

/// Provider query selecting unread messages.
const UNREAD_QUERY: &str = "is:unread";

/// Arguments for the unread listing operation.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ListUnreadArgs {
    /// Maximum number of emails to return. Defaults to
    /// [`DEFAULT_LIST_LIMIT`], capped at [`MAX_LIST_LIMIT`].
    pub limit: Option<u32>,
}

/// Result of the unread listing operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListUnreadResult {
    /// Summaries of unread emails, in provider order.
    pub emails: Vec<EmailSummary>,
}

/// Arguments for the thread content operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadContentArgs {
    /// Thread to read.
    pub thread_id: ThreadId,
}

/// Result of the thread content operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ThreadContentResult {
    /// Messages in thread order.
    pub messages: Vec<ThreadMessage>,
}

/// Result of the draft reply operation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftReplyResult {
    /// ID of the saved draft, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<DraftId>,
    /// Whether the draft was saved.
    pub success: bool,
}

/// Arguments for the thread categorization operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeArgs {
    /// Thread to label.
    pub thread_id: ThreadId,
    /// Label name as the caller knows it (matched case-insensitively).
    pub label_name: String,
}

/// Result of the thread categorization operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategorizeResult {
    /// Whether the label was applied. `false` covers both an unknown label
    /// name and a provider failure.
    pub success: bool,
}

/// Mailbox operations on top of a mail provider.
pub struct MailboxService {
    /// Underlying mail provider.
    provider: Arc<dyn MailProvider>,
}

impl MailboxService {
    /// Creates a new mailbox service.
    pub fn new(provider: Arc<dyn MailProvider>) -> Self {
        Self { provider }
    }

    /// Lists unread emails as summaries.
    ///
    /// Returns an empty listing when the provider fails.
    pub async fn list_unread(&self, args: ListUnreadArgs) -> ListUnreadResult {
        match self.try_list_unread(args).await {
            Ok(emails) => ListUnreadResult { emails },
            Err(e) => {
                tracing::error!(error = %e, "Failed to list unread emails");
                ListUnreadResult { emails: Vec::new() }
            }
        }
    }

    /// Reads a thread as plain-text messages.
    ///
    /// Returns an empty message list when the provider fails.
    pub async fn thread_content(&self, args: ThreadContentArgs) -> ThreadContentResult {
        match self.try_thread_content(args).await {
            Ok(messages) => ThreadContentResult { messages },
            Err(e) => {
                tracing::error!(error = %e, "Failed to read thread content");
                ThreadContentResult {
                    messages: Vec::new(),
                }
            }
        }
    }

    /// Composes a reply and saves it as a draft on the thread.
    ///
    /// Returns `success: false` without a draft ID when the provider fails.
    pub async fn draft_reply(&self, request: DraftRequest) -> DraftReplyResult {
        match self.try_draft_reply(request).await {
            Ok(draft_id) => DraftReplyResult {
                draft_id: Some(draft_id),
                success: true,
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to save reply draft");
                DraftReplyResult {
                    draft_id: None,
                    success: false,
                }
            }
        }
    }

    /// Applies a label to a thread by label name.
    ///
    /// An unknown label name yields `success: false` without logging; that
    /// is a normal negative answer. Provider failures are logged.
    pub async fn categorize_thread(&self, args: CategorizeArgs) -> CategorizeResult {
        match self.try_categorize(args).await {
            Ok(success) => CategorizeResult { success },
            Err(e) => {
                tracing::error!(error = %e, "Failed to categorize thread");
                CategorizeResult { success: false }
            }
        }
    }

    async fn try_list_unread(&self, args: ListUnreadArgs) -> Result<Vec<EmailSummary>> {
        let limit = args.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
        let handles = self.provider.list_messages(UNREAD_QUERY, limit).await?;

        let header_names: Vec<String> = METADATA_HEADERS.iter().map(|s| s.to_string()).collect();

        // One metadata fetch per handle, in listing order.
        let mut emails = Vec::with_capacity(handles.len());
        for handle in handles {
            let metadata = self
                .provider
                .get_message_metadata(&handle.id, &header_names)
                .await?;
            emails.push(summary::build_summary(
                handle.id,
                handle.thread_id,
                &metadata.headers,
                metadata.snippet,
            ));
        }

        Ok(emails)
    }

    async fn try_thread_content(&self, args: ThreadContentArgs) -> Result<Vec<ThreadMessage>> {
        let entries = self.provider.get_thread(&args.thread_id).await?;

        Ok(entries
            .into_iter()
            .map(|entry| ThreadMessage {
                from: summary::header_value(&entry.headers, "From")
                    .unwrap_or_default()
                    .to_string(),
                body: content::extract_text(entry.payload.as_ref(), &entry.snippet),
                date: summary::header_value(&entry.headers, "Date")
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect())
    }

    async fn try_draft_reply(&self, request: DraftRequest) -> Result<DraftId> {
        let draft = compose::compose_reply(&request);
        self.provider
            .create_draft(&draft.thread_id, &draft.encoded)
            .await
    }

    async fn try_categorize(&self, args: CategorizeArgs) -> Result<bool> {
        let label_id = match labels::resolve_label(self.provider.as_ref(), &args.label_name).await?
        {
            Some(id) => id,
            None => return Ok(false),
        };

        self.provider
            .modify_thread_labels(&args.thread_id, &[label_id])
            .await?;
        Ok(true)
    }
}
