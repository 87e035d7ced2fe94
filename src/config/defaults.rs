//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

/// Config file looked up in the root directory.
pub const CONFIG_FILE: &str = "relink.toml";

// ============================================================================
// [images] Section Defaults
// ============================================================================

pub mod images {
    pub fn prefix() -> String {
        "../Assets/".into()
    }

    pub fn suffix() -> String {
        "@2x.png".into()
    }
}

// ============================================================================
// [[documents]] Defaults
// ============================================================================

pub mod documents {
    use super::super::{DocumentRules, StructuralRule};

    /// The book landing page cleaned up after upstream generation.
    pub const BOOK: &str = "The-Swift-Programming-Language.html";

    /// Leftover placeholder paragraphs, with all whitespace removed.
    pub const PLACEHOLDER_PARAGRAPHS: &[&str] =
        &["{}", "(scope:global){(disabled)(disabled)(disabled)}"];

    pub fn all() -> Vec<DocumentRules> {
        vec![book()]
    }

    pub fn book() -> DocumentRules {
        DocumentRules {
            name: BOOK.into(),
            rules: vec![
                StructuralRule::RemoveByClass {
                    tag: "span".into(),
                    class: "citation".into(),
                },
                StructuralRule::RemoveHeading {
                    tag: "h2".into(),
                    id: "topics".into(),
                    text: "Topics".into(),
                },
                StructuralRule::RenameTag {
                    from: "h3".into(),
                    to: "h2".into(),
                },
                StructuralRule::RemoveParagraphs {
                    texts: PLACEHOLDER_PARAGRAPHS.iter().map(|t| (*t).into()).collect(),
                },
            ],
        }
    }
}
