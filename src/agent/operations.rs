//! Mailbox operation catalog.
//!
//! Builds the [`OperationRegistry`] the host sees: four operations over a
//! shared [`MailboxService`], each with its input and output schema. The
//! handlers deserialize arguments into the service's typed argument structs
//! and serialize the typed results back to JSON.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::registry::{DispatchError, OperationHandler, OperationRegistry, OperationSpec};
use super::schema::{Field, FieldType, Schema};
use crate::domain::DraftRequest;
use crate::services::{
    CategorizeArgs, ListUnreadArgs, MailboxService, ThreadContentArgs, DEFAULT_LIST_LIMIT,
};

/// Builds the registry of mailbox operations over a service.
pub fn mailbox_operations(service: Arc<MailboxService>) -> OperationRegistry {
    let mut registry = OperationRegistry::new();
    registry.register(list_unread_spec(service.clone()));
    registry.register(thread_content_spec(service.clone()));
    registry.register(draft_reply_spec(service.clone()));
    registry.register(categorize_spec(service));
    registry
}

/// Wraps a service call as an operation handler.
///
/// Arguments are deserialized into the call's typed input; the typed result
/// is serialized back to JSON. Deserialization failures surface as
/// [`DispatchError::InvalidArguments`].
fn operation_handler<Args, Out, Call, Fut>(
    service: Arc<MailboxService>,
    call: Call,
) -> OperationHandler
where
    Args: DeserializeOwned,
    Out: Serialize,
    Call: Fn(Arc<MailboxService>, Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Out> + Send + 'static,
{
    Arc::new(move |value| {
        let pending = serde_json::from_value::<Args>(value)
            .map_err(|e| DispatchError::InvalidArguments(e.to_string()))
            .map(|args| call(service.clone(), args));

        Box::pin(async move {
            let result = pending?.await;
            serde_json::to_value(result).map_err(|e| DispatchError::Serialization(e.to_string()))
        })
    })
}

fn list_unread_spec(service: Arc<MailboxService>) -> OperationSpec {
    OperationSpec {
        name: "listUnreadEmails",
        description: "Lists unread emails in the mailbox as short summaries.",
        input: Schema::new(vec![Field::with_default(
            "limit",
            FieldType::Number,
            json!(DEFAULT_LIST_LIMIT),
            "Maximum number of emails to return (capped at 20)",
        )]),
        output: Schema::new(vec![Field::required(
            "emails",
            FieldType::Array(Box::new(FieldType::Object(vec![
                Field::required("id", FieldType::String, "Message ID"),
                Field::required("threadId", FieldType::String, "Thread ID"),
                Field::required("subject", FieldType::String, "Subject line"),
                Field::required("from", FieldType::String, "Sender"),
                Field::required("snippet", FieldType::String, "Short preview of the body"),
                Field::required("date", FieldType::String, "Date header value"),
            ]))),
            "Summaries of unread emails, in mailbox order",
        )]),
        handler: operation_handler(service, |service, args: ListUnreadArgs| async move {
            service.list_unread(args).await
        }),
    }
}

fn thread_content_spec(service: Arc<MailboxService>) -> OperationSpec {
    OperationSpec {
        name: "getThreadContent",
        description: "Reads every message in a thread as plain text.",
        input: Schema::new(vec![Field::required(
            "threadId",
            FieldType::String,
            "Thread to read",
        )]),
        output: Schema::new(vec![Field::required(
            "messages",
            FieldType::Array(Box::new(FieldType::Object(vec![
                Field::required("from", FieldType::String, "Sender"),
                Field::required(
                    "body",
                    FieldType::String,
                    "Plain-text body, truncated to 2000 characters",
                ),
                Field::required("date", FieldType::String, "Date header value"),
            ]))),
            "Messages in thread order",
        )]),
        handler: operation_handler(service, |service, args: ThreadContentArgs| async move {
            service.thread_content(args).await
        }),
    }
}

fn draft_reply_spec(service: Arc<MailboxService>) -> OperationSpec {
    OperationSpec {
        name: "draftReply",
        description: "Composes a reply and saves it as a draft on the thread.",
        input: Schema::new(vec![
            Field::required("threadId", FieldType::String, "Thread the reply belongs to"),
            Field::optional(
                "messageId",
                FieldType::String,
                "Message-ID header of the message being replied to",
            ),
            Field::required("to", FieldType::String, "Recipient address"),
            Field::required("subject", FieldType::String, "Subject line"),
            Field::required("body", FieldType::String, "Reply body text"),
        ]),
        output: Schema::new(vec![
            Field::optional("draftId", FieldType::String, "ID of the saved draft"),
            Field::required("success", FieldType::Boolean, "Whether the draft was saved"),
        ]),
        handler: operation_handler(service, |service, request: DraftRequest| async move {
            service.draft_reply(request).await
        }),
    }
}

fn categorize_spec(service: Arc<MailboxService>) -> OperationSpec {
    OperationSpec {
        name: "categorizeThread",
        description: "Applies a label to a thread by label name.",
        input: Schema::new(vec![
            Field::required("threadId", FieldType::String, "Thread to label"),
            Field::required(
                "labelName",
                FieldType::String,
                "Label name, matched case-insensitively",
            ),
        ]),
        output: Schema::new(vec![Field::required(
            "success",
            FieldType::Boolean,
            "Whether the label was applied",
        )]),
        handler: operation_handler(service, |service, args: CategorizeArgs| async move {
            service.categorize_thread(args).await
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use crate::domain::{DraftId, Label, LabelId, MessageId, ThreadId};
    use crate::providers::mail::{
        MailProvider, MessageHandle, MessageMetadata, Result, ThreadEntry,
    };

    /// Stub provider that answers every capability with an empty success.
    struct OkProvider;

    #[async_trait]
    impl MailProvider for OkProvider {
        async fn list_messages(
            &self,
            _query: &str,
            _max_results: u32,
        ) -> Result<Vec<MessageHandle>> {
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
            Ok(Vec::new())
        }

        async fn modify_thread_labels(
            &self,
            _thread_id: &ThreadId,
            _add_label_ids: &[LabelId],
        ) -> Result<()> {
            Ok(())
        }
    }

    fn registry() -> OperationRegistry {
        let service = Arc::new(MailboxService::new(Arc::new(OkProvider)));
        mailbox_operations(service)
    }

    #[test]
    fn catalog_announces_four_operations() {
        let registry = registry();

        let names: Vec<&str> = registry.specs().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "categorizeThread",
                "draftReply",
                "getThreadContent",
                "listUnreadEmails"
            ]
        );
    }

    #[test]
    fn listing_schema_advertises_the_default_limit() {
        let registry = registry();
        let spec = registry.get("listUnreadEmails").unwrap();

        let schema = spec.input.to_json();
        assert_eq!(schema["properties"]["limit"]["default"], json!(10));
        assert_eq!(schema["required"], json!([]));
    }

    #[tokio::test]
    async fn list_unread_dispatches_with_empty_arguments() {
        let registry = registry();

        let result = registry
            .dispatch("listUnreadEmails", json!({}))
            .await
            .unwrap();

        assert_eq!(result, json!({"emails": []}));
    }

    #[tokio::test]
    async fn draft_reply_dispatches_and_reports_the_draft() {
        let registry = registry();

        let result = registry
            .dispatch(
                "draftReply",
                json!({
                    "threadId": "t1",
                    "to": "alice@example.com",
                    "subject": "Re: hi",
                    "body": "On it."
                }),
            )
            .await
            .unwrap();

        assert_eq!(result, json!({"draftId": "d1", "success": true}));
    }

    #[tokio::test]
    async fn draft_reply_rejects_incomplete_arguments() {
        let registry = registry();

        let err = registry
            .dispatch("draftReply", json!({"threadId": "t1"}))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DispatchError::InvalidArguments("missing required field: to".to_string())
        );
    }

    #[tokio::test]
    async fn categorize_reports_unknown_labels_as_unsuccessful() {
        let registry = registry();

        let result = registry
            .dispatch(
                "categorizeThread",
                json!({"threadId": "t1", "labelName": "Nonexistent"}),
            )
            .await
            .unwrap();

        assert_eq!(result, json!({"success": false}));
    }
}
