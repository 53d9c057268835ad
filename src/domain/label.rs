//! Label domain types.
//!
//! Represents mailbox labels (folders/tags) used for categorization.

use serde::{Deserialize, Serialize};

use super::LabelId;

/// A mailbox label (folder or tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier for this label.
    pub id: LabelId,
    /// Display name of the label.
    pub name: String,
}

/// Well-known system labels.
///
/// The provider predefines these; their identifier is simply the uppercased
/// name, so applying one never requires a directory lookup.
pub mod system_labels {
    use super::LabelId;

    /// Names of the provider's built-in labels.
    pub const NAMES: [&str; 6] = ["INBOX", "SPAM", "TRASH", "UNREAD", "STARRED", "IMPORTANT"];

    /// Resolves a name against the built-in set, case-insensitively.
    ///
    /// Returns the label identifier (the uppercased name) on a match.
    pub fn resolve(name: &str) -> Option<LabelId> {
        let upper = name.to_uppercase();
        NAMES.contains(&upper.as_str()).then(|| LabelId(upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_serialization() {
        let label = Label {
            id: LabelId::from("Label_12"),
            name: "Work".to_string(),
        };

        let json = serde_json::to_string(&label).unwrap();
        let deserialized: Label = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.id, LabelId::from("Label_12"));
        assert_eq!(deserialized.name, "Work");
    }

    #[test]
    fn system_label_resolution_is_case_insensitive() {
        assert_eq!(system_labels::resolve("starred"), Some(LabelId::from("STARRED")));
        assert_eq!(system_labels::resolve("Inbox"), Some(LabelId::from("INBOX")));
        assert_eq!(system_labels::resolve("IMPORTANT"), Some(LabelId::from("IMPORTANT")));
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(system_labels::resolve("Work"), None);
        assert_eq!(system_labels::resolve(""), None);
    }

    #[test]
    fn system_label_names_are_distinct() {
        for (i, a) in system_labels::NAMES.iter().enumerate() {
            for b in &system_labels::NAMES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
