//! `[[documents]]` structural edit policy.
//!
//! Each entry names one document (by exact file name) and the ordered
//! list of structural edits applied to it.

use serde::Deserialize;

/// Structural edits for one named document.
///
/// # Example
/// ```toml
/// [[documents]]
/// name = "The-Swift-Programming-Language.html"
///
/// [[documents.rules]]
/// kind = "remove-by-class"
/// tag = "span"
/// class = "citation"
///
/// [[documents.rules]]
/// kind = "rename-tag"
/// from = "h3"
/// to = "h2"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentRules {
    /// Exact file name of the document, e.g. `Index.html`.
    pub name: String,

    /// Edits applied in order.
    #[serde(default)]
    pub rules: Vec<StructuralRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StructuralRule {
    /// Remove every `tag` element whose class list contains `class`.
    RemoveByClass { tag: String, class: String },

    /// Remove the first `tag` element with this `id` if its trimmed text is `text`.
    RemoveHeading {
        tag: String,
        id: String,
        text: String,
    },

    /// Rename every `from` element to `to`, keeping attributes and children.
    RenameTag { from: String, to: String },

    /// Remove every `<p>` whose text, with all whitespace removed, is in `texts`.
    RemoveParagraphs { texts: Vec<String> },
}

impl StructuralRule {
    /// Tag names the rule refers to.
    pub fn tags(&self) -> Vec<&str> {
        match self {
            Self::RemoveByClass { tag, .. } | Self::RemoveHeading { tag, .. } => vec![tag.as_str()],
            Self::RenameTag { from, to } => vec![from.as_str(), to.as_str()],
            Self::RemoveParagraphs { .. } => vec!["p"],
        }
    }

    /// Short name used in log lines.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RemoveByClass { .. } => "remove-by-class",
            Self::RemoveHeading { .. } => "remove-heading",
            Self::RenameTag { .. } => "rename-tag",
            Self::RemoveParagraphs { .. } => "remove-paragraphs",
        }
    }
}
