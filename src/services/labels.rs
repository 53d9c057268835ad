//! Label name resolution.
//!
//! Turns a human-entered label name into a provider label ID. System labels
//! resolve locally without a provider round trip; everything else is matched
//! case-insensitively against the provider's label directory.

use crate::domain::{system_labels, LabelId};
use crate::providers::mail::{MailProvider, Result};

/// Resolves a label name to its provider ID.
///
/// System label names (`inbox`, `starred`, ...) short-circuit to their
/// uppercase IDs. Other names are compared against the label directory by
/// lowercased name. Returns `Ok(None)` when no label matches; that is a
/// normal outcome, not an error.
pub async fn resolve_label(provider: &dyn MailProvider, name: &str) -> Result<Option<LabelId>> {
    if let Some(id) = system_labels::resolve(name) {
        return Ok(Some(id));
    }

    let wanted = name.to_lowercase();
    let labels = provider.list_labels().await?;

    Ok(labels
        .into_iter()
        .find(|label| label.name.to_lowercase() == wanted)
        .map(|label| label.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::{DraftId, Label, MessageId, ThreadId};
    use crate::providers::mail::{
        MessageHandle, MessageMetadata, ProviderError, ThreadEntry,
    };

    /// Stub provider that serves a fixed label directory and counts lookups.
    struct StubProvider {
        labels: Vec<Label>,
        label_calls: AtomicUsize,
        fail_labels: bool,
    }

    impl StubProvider {
        fn with_labels(labels: Vec<Label>) -> Self {
            Self {
                labels,
                label_calls: AtomicUsize::new(0),
                fail_labels: false,
            }
        }

        fn failing() -> Self {
            Self {
                labels: Vec::new(),
                label_calls: AtomicUsize::new(0),
                fail_labels: true,
            }
        }
    }

    #[async_trait]
    impl MailProvider for StubProvider {
        async fn list_messages(&self, _query: &str, _max_results: u32) -> Result<Vec<MessageHandle>> {
            Ok(Vec::new())
        }

        async fn get_message_metadata(
            &self,
            _id: &MessageId,
            _header_names: &[String],
        ) -> Result<MessageMetadata> {
            Ok(MessageMetadata::default())
        }

        async fn get_thread(&self, _thread_id: &ThreadId) -> Result<Vec<ThreadEntry>> {
            Ok(Vec::new())
        }

        async fn create_draft(&self, _thread_id: &ThreadId, _raw: &str) -> Result<DraftId> {
            Ok(DraftId::from("d1"))
        }

        async fn list_labels(&self) -> Result<Vec<Label>> {
            self.label_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_labels {
                return Err(ProviderError::Connection("socket closed".to_string()));
            }
            Ok(self.labels.clone())
        }

        async fn modify_thread_labels(
            &self,
            _thread_id: &ThreadId,
            _add_label_ids: &[LabelId],
        ) -> Result<()> {
            Ok(())
        }
    }

    fn work_label() -> Label {
        Label {
            id: LabelId::from("Label_12"),
            name: "Work".to_string(),
        }
    }

    #[tokio::test]
    async fn system_labels_skip_the_directory() {
        let provider = StubProvider::with_labels(vec![work_label()]);

        let id = resolve_label(&provider, "starred").await.unwrap();

        assert_eq!(id, Some(LabelId::from("STARRED")));
        assert_eq!(provider.label_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn user_labels_match_case_insensitively() {
        let provider = StubProvider::with_labels(vec![work_label()]);

        assert_eq!(
            resolve_label(&provider, "Work").await.unwrap(),
            Some(LabelId::from("Label_12"))
        );
        assert_eq!(
            resolve_label(&provider, "work").await.unwrap(),
            Some(LabelId::from("Label_12"))
        );
        assert_eq!(
            resolve_label(&provider, "WORK").await.unwrap(),
            Some(LabelId::from("Label_12"))
        );
    }

    #[tokio::test]
    async fn unknown_labels_resolve_to_none() {
        let provider = StubProvider::with_labels(vec![work_label()]);

        let id = resolve_label(&provider, "Nonexistent").await.unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn directory_errors_propagate() {
        let provider = StubProvider::failing();

        let result = resolve_label(&provider, "Work").await;
        assert!(matches!(result, Err(ProviderError::Connection(_))));
    }
}
