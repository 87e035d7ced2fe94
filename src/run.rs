//! Whole-tree repair.
//!
//! ```text
//! run()
//!     │
//!     ├── HtmlIndex::build()   once, read-only afterwards
//!     │
//!     └── fix_document()       every indexed file, in traversal order
//! ```

use anyhow::Result;

use crate::config::RelinkConfig;
use crate::index::HtmlIndex;
use crate::log;
use crate::report::RunReport;
use crate::rewrite::fix_document;

/// Index the tree under `config.root` and repair every HTML document in it.
///
/// Stops at the first I/O or parse failure.
pub fn run(config: &RelinkConfig) -> Result<RunReport> {
    let root = &config.root;

    log!("index"; "building html index for {}", root.display());
    let index = HtmlIndex::build(root)?;
    log!("index"; "{} html files, {} distinct names", index.files().len(), index.len());
    for (name, paths) in index.iter() {
        let paths: Vec<_> = paths.iter().map(|p| p.display().to_string()).collect();
        log!("index"; "{name}: [{}]", paths.join(", "));
    }

    let mut report = RunReport::default();
    for relative in index.files() {
        report.documents.push(fix_document(relative, &index, config)?);
    }
    Ok(report)
}
