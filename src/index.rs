//! Basename index over every HTML file under the root.
//!
//! ```text
//! root/
//! ├── Index.html              "Index.html"  -> ["Index.html"]
//! ├── guide/Intro.html        "Intro.html"  -> ["guide/Intro.html", "ref/Intro.html"]
//! └── ref/Intro.html
//! ```
//!
//! Directory entries are visited sorted by file name, so the order of
//! candidates for a basename is stable across platforms and runs.

use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension (compared case-insensitively) of indexed documents.
pub const HTML_EXTENSION: &str = "html";

#[derive(Debug, Clone, Default)]
pub struct HtmlIndex {
    root: PathBuf,
    /// Exact basename -> root-relative paths in traversal order.
    entries: BTreeMap<String, Vec<PathBuf>>,
    /// Root-relative paths of every indexed file in traversal order.
    files: Vec<PathBuf>,
}

impl HtmlIndex {
    /// Walk `root` and index every `.html` file.
    ///
    /// Fails if the root is not a directory or any entry cannot be read.
    pub fn build(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            bail!("root directory `{}` not found", root.display());
        }

        let mut index = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to walk `{}`", root.display()))?;
            if !entry.file_type().is_file() || !is_html_file(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .with_context(|| format!("`{}` is outside the root", entry.path().display()))?
                .to_path_buf();
            index.insert(relative);
        }

        Ok(index)
    }

    fn insert(&mut self, relative: PathBuf) {
        let Some(name) = relative.file_name() else {
            return;
        };
        let name = name.to_string_lossy().into_owned();
        self.entries.entry(name).or_default().push(relative.clone());
        self.files.push(relative);
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All root-relative paths sharing this exact basename.
    pub fn candidates(&self, basename: &str) -> &[PathBuf] {
        self.entries.get(basename).map(Vec::as_slice).unwrap_or_default()
    }

    /// Root-relative paths of every indexed file in traversal order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Entries in basename order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries.iter().map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }

    /// Number of distinct basenames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether the file name ends with `.html`, ignoring case.
pub fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(HTML_EXTENSION))
}
