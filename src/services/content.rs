//! Message body extraction.
//!
//! Thread entries arrive as a MIME tree of base64url-encoded parts. This
//! module converts the wire shape into a tagged [`Part`] tree, then extracts
//! a plain-text body from it: inline data on the root part wins outright,
//! otherwise the children are scanned for the first `text/plain` part that
//! decodes. The scan depth defaults to one level; deeper nestings fall back
//! to the snippet unless a caller asks for more.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::providers::mail::MimePart;

/// Maximum length of an extracted body, in characters.
pub const MAX_BODY_CHARS: usize = 2000;

/// How many levels of children are scanned for a text part.
pub const DEFAULT_SCAN_DEPTH: usize = 1;

/// base64url engine that accepts both padded and unpadded input.
///
/// Mail providers emit unpadded base64url, but padded data shows up in the
/// wild and must decode the same way.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A MIME part classified by structure.
///
/// The wire format leaves every field optional and lets a part carry both
/// inline data and children. Conversion settles that ambiguity once: a part
/// with inline data is a [`Part::Leaf`] no matter what else it carries, and
/// only dataless parts with children become containers.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// A part holding (possibly absent) inline body data.
    Leaf {
        /// MIME type, when the provider reported one.
        mime_type: Option<String>,
        /// base64url-encoded body data.
        data: Option<String>,
    },
    /// A part whose content lives in child parts.
    Container {
        /// Child parts in wire order.
        children: Vec<Part>,
    },
}

impl From<&MimePart> for Part {
    fn from(part: &MimePart) -> Self {
        let data = part.body.as_ref().and_then(|b| b.data.clone());
        if data.is_some() {
            return Part::Leaf {
                mime_type: part.mime_type.clone(),
                data,
            };
        }
        match &part.parts {
            Some(children) => Part::Container {
                children: children.iter().map(Part::from).collect(),
            },
            None => Part::Leaf {
                mime_type: part.mime_type.clone(),
                data: None,
            },
        }
    }
}

/// Extracts a plain-text body from a message payload.
///
/// Scans child parts at [`DEFAULT_SCAN_DEPTH`]. Falls back to the snippet
/// when the payload is absent, carries no decodable text, or nests its text
/// parts deeper than the scan reaches. The result never exceeds
/// [`MAX_BODY_CHARS`] characters.
pub fn extract_text(payload: Option<&MimePart>, snippet: &str) -> String {
    extract_text_at_depth(payload, snippet, DEFAULT_SCAN_DEPTH)
}

/// Extracts a plain-text body, scanning containers up to `depth` levels.
///
/// `depth` counts levels of children below the root part: `1` scans only
/// the root's immediate children, `2` also descends into containers among
/// them, and so on. A depth of `0` uses root inline data or nothing.
pub fn extract_text_at_depth(payload: Option<&MimePart>, snippet: &str, depth: usize) -> String {
    let text = payload
        .map(Part::from)
        .and_then(|part| part_text(&part, depth))
        .unwrap_or_else(|| snippet.to_string());

    truncate_chars(text, MAX_BODY_CHARS)
}

/// Extracts text from one classified part.
///
/// Root inline data decodes regardless of its MIME type; the `text/plain`
/// requirement applies only to scanned children.
fn part_text(part: &Part, depth: usize) -> Option<String> {
    match part {
        Part::Leaf {
            data: Some(data), ..
        } => decode_base64url(data),
        Part::Leaf { data: None, .. } => None,
        Part::Container { children } => scan_children(children, depth),
    }
}

/// Scans children in order for the first `text/plain` part that decodes.
///
/// A part whose data fails to decode is treated like a part with no data:
/// the scan moves on. Containers are entered only while `depth` allows.
fn scan_children(children: &[Part], depth: usize) -> Option<String> {
    if depth == 0 {
        return None;
    }

    for child in children {
        match child {
            Part::Leaf {
                mime_type: Some(mime),
                data: Some(data),
            } if mime == "text/plain" => {
                if let Some(text) = decode_base64url(data) {
                    return Some(text);
                }
            }
            Part::Container { children } => {
                if let Some(text) = scan_children(children, depth - 1) {
                    return Some(text);
                }
            }
            _ => {}
        }
    }

    None
}

/// Decodes base64url data into a UTF-8 string.
fn decode_base64url(data: &str) -> Option<String> {
    let bytes = URL_SAFE_LENIENT.decode(data).ok()?;
    String::from_utf8(bytes).ok()
}

/// Truncates a string to at most `limit` characters.
fn truncate_chars(mut text: String, limit: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(limit) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::prelude::BASE64_URL_SAFE_NO_PAD;
    use pretty_assertions::assert_eq;

    use crate::providers::mail::MimeBody;

    fn encode(text: &str) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(text.as_bytes())
    }

    fn leaf(mime: &str, data: Option<String>) -> MimePart {
        MimePart {
            mime_type: Some(mime.to_string()),
            body: Some(MimeBody { data }),
            parts: None,
        }
    }

    fn multipart(children: Vec<MimePart>) -> MimePart {
        MimePart {
            mime_type: Some("multipart/alternative".to_string()),
            body: None,
            parts: Some(children),
        }
    }

    #[test]
    fn decodes_root_inline_data() {
        let payload = leaf("text/plain", Some("SGVsbG8".to_string()));
        assert_eq!(extract_text(Some(&payload), "snippet"), "Hello");
    }

    #[test]
    fn root_inline_data_wins_regardless_of_mime_type() {
        let payload = leaf("text/html", Some(encode("<b>Hello</b>")));
        assert_eq!(extract_text(Some(&payload), "snippet"), "<b>Hello</b>");
    }

    #[test]
    fn scans_children_for_first_plain_text() {
        let payload = multipart(vec![
            leaf("text/html", Some(encode("<p>Hello</p>"))),
            leaf("text/plain", Some(encode("Hello"))),
        ]);

        assert_eq!(extract_text(Some(&payload), "snippet"), "Hello");
    }

    #[test]
    fn skips_plain_text_children_without_data() {
        let payload = multipart(vec![
            leaf("text/plain", None),
            leaf("text/plain", Some(encode("second part"))),
        ]);

        assert_eq!(extract_text(Some(&payload), "snippet"), "second part");
    }

    #[test]
    fn nested_containers_stay_unscanned_at_default_depth() {
        let payload = multipart(vec![multipart(vec![leaf(
            "text/plain",
            Some(encode("buried")),
        )])]);

        assert_eq!(extract_text(Some(&payload), "snippet"), "snippet");
        assert_eq!(extract_text_at_depth(Some(&payload), "snippet", 2), "buried");
    }

    #[test]
    fn decode_failure_on_root_falls_back_to_snippet() {
        let payload = leaf("text/plain", Some("!!! not base64 !!!".to_string()));
        assert_eq!(extract_text(Some(&payload), "snippet"), "snippet");
    }

    #[test]
    fn decode_failure_in_scan_moves_to_next_child() {
        let payload = multipart(vec![
            leaf("text/plain", Some("!!!".to_string())),
            leaf("text/plain", Some(encode("readable"))),
        ]);

        assert_eq!(extract_text(Some(&payload), "snippet"), "readable");
    }

    #[test]
    fn invalid_utf8_falls_back_to_snippet() {
        let data = BASE64_URL_SAFE_NO_PAD.encode([0xff, 0xfe]);
        let payload = leaf("text/plain", Some(data));

        assert_eq!(extract_text(Some(&payload), "snippet"), "snippet");
    }

    #[test]
    fn accepts_padded_and_unpadded_data() {
        let padded = leaf("text/plain", Some("aGk=".to_string()));
        let unpadded = leaf("text/plain", Some("aGk".to_string()));

        assert_eq!(extract_text(Some(&padded), ""), "hi");
        assert_eq!(extract_text(Some(&unpadded), ""), "hi");
    }

    #[test]
    fn missing_payload_falls_back_to_snippet() {
        assert_eq!(extract_text(None, "just the snippet"), "just the snippet");
    }

    #[test]
    fn truncates_long_bodies() {
        let payload = leaf("text/plain", Some(encode(&"a".repeat(5000))));
        let text = extract_text(Some(&payload), "");

        assert_eq!(text.len(), MAX_BODY_CHARS);
    }

    #[test]
    fn keeps_short_bodies_intact() {
        let body = "b".repeat(1500);
        let payload = leaf("text/plain", Some(encode(&body)));

        assert_eq!(extract_text(Some(&payload), ""), body);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let payload = leaf("text/plain", Some(encode(&"é".repeat(2500))));
        let text = extract_text(Some(&payload), "");

        assert_eq!(text.chars().count(), MAX_BODY_CHARS);
    }

    #[test]
    fn inline_data_classifies_as_leaf_even_with_children() {
        let mut wire = leaf("text/plain", Some(encode("direct")));
        wire.parts = Some(vec![leaf("text/plain", Some(encode("nested")))]);

        let part = Part::from(&wire);
        assert!(matches!(part, Part::Leaf { .. }));
        assert_eq!(extract_text(Some(&wire), ""), "direct");
    }
}
