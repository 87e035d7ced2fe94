//! Per-document link repair and structural cleanup.
//!
//! # Flow
//!
//! ```text
//! read ──► parse ──► plan_links() ──► apply ──► plan_rule() ──► apply ──► write?
//!                        │                         (per rule)
//!                        ▼
//!                   HtmlIndex (read-only)
//! ```
//!
//! The file is written back only when at least one edit was applied.

pub mod links;
pub mod structure;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::RelinkConfig;
use crate::index::HtmlIndex;
use crate::log;
use crate::report::DocumentReport;
use crate::utils::xml::Document;
use links::{LinkContext, plan_links};
use structure::plan_rule;

/// Repair one document in place.
///
/// `relative` is the document path relative to `config.root`.
pub fn fix_document(
    relative: &Path,
    index: &HtmlIndex,
    config: &RelinkConfig,
) -> Result<DocumentReport> {
    let root = config.root.as_path();
    let path = root.join(relative);
    let shown = relative.display();
    let mut report = DocumentReport::new(relative.to_path_buf());

    let content =
        fs::read(&path).with_context(|| format!("failed to read `{}`", path.display()))?;
    let mut doc = match Document::parse(&content) {
        Ok(doc) => doc,
        Err(err) => {
            log!("warn"; "{shown}: skipped, {err:#}");
            report.skipped = Some(format!("{err:#}"));
            return Ok(report);
        }
    };

    let doc_dir = path.parent().unwrap_or(root);
    let ctx = LinkContext {
        index,
        root,
        doc_dir,
        images: &config.images,
    };
    let plan = plan_links(&doc, &ctx);

    for ambiguity in &plan.ambiguous {
        let candidates: Vec<_> = ambiguity
            .candidates
            .iter()
            .map(|c| c.display().to_string())
            .collect();
        log!("warn"; "{shown}: multiple targets for '{}': [{}], using {}",
            ambiguity.href, candidates.join(", "), ambiguity.chosen.display());
    }
    for href in &plan.unresolved {
        log!("link"; "{shown}: target not found for '{href}'");
    }
    for link in &plan.links {
        log!("link"; "{shown}: '{}' -> '{}'", link.from, link.to);
    }
    for image in &plan.images {
        log!("img"; "{shown}: '{}' -> '{}'", image.from, image.to);
    }

    doc.apply(plan.edits);
    report.links = plan.links;
    report.images = plan.images;
    report.unresolved = plan.unresolved;
    report.ambiguous = plan.ambiguous;

    let file_name = relative.file_name().map(|n| n.to_string_lossy());
    if let Some(rules) = file_name.and_then(|name| config.rules_for(&name)) {
        for rule in &rules.rules {
            let edits = plan_rule(&doc, rule);
            let applied = doc.apply(edits);
            if applied > 0 {
                log!("edit"; "{shown}: {} x{applied}", rule.kind());
            }
            report.structural += applied;
        }
    }

    if report.is_changed() {
        let bytes = doc.to_bytes()?;
        fs::write(&path, bytes).with_context(|| format!("failed to write `{}`", path.display()))?;
        report.written = true;
        log!("write"; "updated {shown}");
    }

    Ok(report)
}
