//! Planning of document-specific structural edits.

use crate::config::StructuralRule;
use crate::utils::xml::common::{get_attr, has_class};
use crate::utils::xml::{Document, NodePath, TreeEdit};

/// Edits one rule makes to the tree as it currently stands.
pub fn plan_rule(doc: &Document, rule: &StructuralRule) -> Vec<TreeEdit> {
    match rule {
        StructuralRule::RemoveByClass { tag, class } => doc
            .find_all(|elem| elem.is(tag) && has_class(&elem.start, class))
            .into_iter()
            .map(|path| TreeEdit::Remove { path })
            .collect(),

        StructuralRule::RemoveHeading { tag, id, text } => {
            let mut first: Option<NodePath> = None;
            doc.walk(|path, elem| {
                if first.is_none()
                    && elem.is(tag)
                    && get_attr(&elem.start, "id").is_some_and(|value| value == id.as_str())
                {
                    first = Some(path.clone());
                }
                first.is_none()
            });
            first
                .filter(|path| doc.element(path).is_some_and(|elem| elem.text().trim() == text))
                .map(|path| vec![TreeEdit::Remove { path }])
                .unwrap_or_default()
        }

        StructuralRule::RenameTag { from, to } => {
            let mut edits = Vec::new();
            doc.walk(|path, elem| {
                if elem.is(from) {
                    edits.push(TreeEdit::Rename {
                        path: path.clone(),
                        tag: to.clone(),
                    });
                }
                true
            });
            edits
        }

        StructuralRule::RemoveParagraphs { texts } => doc
            .find_all(|elem| {
                elem.is("p") && {
                    let squashed = squash_whitespace(&elem.text());
                    texts.iter().any(|text| *text == squashed)
                }
            })
            .into_iter()
            .map(|path| TreeEdit::Remove { path })
            .collect(),
    }
}

fn squash_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
