//! Reply draft composition.
//!
//! Builds the RFC 2822 message for a reply draft and encodes it the way the
//! provider's draft endpoint expects: CRLF line endings throughout, threading
//! headers present even when empty, and unpadded base64url.

use base64::prelude::{Engine as _, BASE64_URL_SAFE_NO_PAD};

use crate::domain::{DraftRequest, RawDraft};

/// Composes a reply draft from a request.
///
/// The message carries `To`, `Subject`, `In-Reply-To`, and `References`
/// headers followed by a blank line and the body. The threading headers take
/// the request's `message_id` verbatim, or an empty value when the request
/// has none; downstream threading relies on the lines being present either
/// way. The body's line endings are normalized to CRLF.
pub fn compose_reply(request: &DraftRequest) -> RawDraft {
    let reference = request.message_id.as_deref().unwrap_or_default();

    let lines = [
        format!("To: {}", request.to),
        format!("Subject: {}", request.subject),
        format!("In-Reply-To: {}", reference),
        format!("References: {}", reference),
        String::new(),
        normalize_crlf(&request.body),
    ];

    let message = lines.join("\r\n");
    let encoded = BASE64_URL_SAFE_NO_PAD.encode(message.as_bytes());

    RawDraft {
        thread_id: request.thread_id.clone(),
        message,
        encoded,
    }
}

/// Rewrites line endings to CRLF, leaving existing CRLF pairs intact.
fn normalize_crlf(body: &str) -> String {
    body.replace("\r\n", "\n").replace('\n', "\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::domain::ThreadId;

    fn request(message_id: Option<&str>, body: &str) -> DraftRequest {
        DraftRequest {
            thread_id: ThreadId::from("t1"),
            message_id: message_id.map(str::to_string),
            to: "alice@example.com".to_string(),
            subject: "Re: Quarterly report".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn composes_headers_in_order() {
        let draft = compose_reply(&request(Some("<msg-1@example.com>"), "Sounds good."));

        assert_eq!(
            draft.message,
            "To: alice@example.com\r\n\
             Subject: Re: Quarterly report\r\n\
             In-Reply-To: <msg-1@example.com>\r\n\
             References: <msg-1@example.com>\r\n\
             \r\n\
             Sounds good."
        );
    }

    #[test]
    fn missing_message_id_leaves_empty_header_values() {
        let draft = compose_reply(&request(None, "Sounds good."));

        assert!(draft.message.contains("In-Reply-To: \r\n"));
        assert!(draft.message.contains("References: \r\n"));
    }

    #[test]
    fn message_id_is_carried_verbatim() {
        let draft = compose_reply(&request(Some("bare-id-no-brackets"), "ok"));

        assert!(draft.message.contains("In-Reply-To: bare-id-no-brackets\r\n"));
        assert!(draft.message.contains("References: bare-id-no-brackets"));
    }

    #[test]
    fn body_line_endings_normalize_to_crlf() {
        let draft = compose_reply(&request(None, "line one\nline two\r\nline three"));

        assert!(draft
            .message
            .ends_with("line one\r\nline two\r\nline three"));
        assert!(!draft.message.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn encoding_round_trips_and_omits_padding() {
        let draft = compose_reply(&request(Some("<m@x>"), "hello"));

        assert!(!draft.encoded.contains('='));
        let decoded = BASE64_URL_SAFE_NO_PAD.decode(&draft.encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), draft.message);
    }

    #[test]
    fn thread_id_is_preserved() {
        let draft = compose_reply(&request(None, "ok"));
        assert_eq!(draft.thread_id, ThreadId::from("t1"));
    }
}
