//! Link target resolution.
//!
//! # Resolution Order
//!
//! | Step | Check | Result |
//! |------|-------|--------|
//! | 1 | strip leading `/` | - |
//! | 2 | file exists at `root/href` | `Exact` |
//! | 3 | basename has one index entry | `Unique` |
//! | 4 | basename has several entries | `Ambiguous` (first wins) |
//! | 5 | otherwise | `NotFound` |
//!
//! Step 2 only accepts regular files. An href naming a directory (`guide/`)
//! falls through to the basename lookup and is usually `NotFound`.

use std::path::{Path, PathBuf};

use crate::index::HtmlIndex;
use crate::utils::xml::link::normalize_relative;

/// Outcome of resolving one link path against the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The href already names an existing file relative to the root.
    Exact(PathBuf),
    /// The basename occurs once in the index.
    Unique(PathBuf),
    /// The basename occurs several times; `chosen` is the first candidate.
    Ambiguous {
        chosen: PathBuf,
        candidates: Vec<PathBuf>,
    },
    NotFound,
}

impl Resolution {
    /// Root-relative path of the resolved target.
    pub fn target(&self) -> Option<&Path> {
        match self {
            Self::Exact(path) | Self::Unique(path) => Some(path),
            Self::Ambiguous { chosen, .. } => Some(chosen),
            Self::NotFound => None,
        }
    }
}

/// Resolve `href` (path part only, no `?query` or `#fragment`) to a
/// root-relative file path.
pub fn resolve_target(href: &str, index: &HtmlIndex, root: &Path) -> Resolution {
    let normalized = href.trim_start_matches('/');

    if let Some(relative) = normalize_relative(normalized)
        && root.join(&relative).is_file()
    {
        return Resolution::Exact(relative);
    }

    let basename = normalized.rsplit('/').next().unwrap_or(normalized);
    match index.candidates(basename) {
        [] => Resolution::NotFound,
        [only] => Resolution::Unique(only.clone()),
        candidates @ [first, ..] => Resolution::Ambiguous {
            chosen: first.clone(),
            candidates: candidates.to_vec(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn tree(files: &[&str]) -> (TempDir, HtmlIndex) {
        let dir = tempdir().unwrap();
        for rel in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "<html></html>").unwrap();
        }
        let index = HtmlIndex::build(dir.path()).unwrap();
        (dir, index)
    }

    #[test]
    fn test_unique_basename_ignores_prefix() {
        let (dir, index) = tree(&["guide/Intro.html"]);
        for href in ["Intro.html", "wrong/dir/Intro.html", "../Intro.html", "/Intro.html"] {
            assert_eq!(
                resolve_target(href, &index, dir.path()),
                Resolution::Unique(PathBuf::from("guide/Intro.html")),
                "href: {href}"
            );
        }
    }

    #[test]
    fn test_exact_path_beats_ambiguous_basename() {
        let (dir, index) = tree(&["a/Page.html", "b/Page.html"]);
        assert_eq!(
            resolve_target("b/Page.html", &index, dir.path()),
            Resolution::Exact(PathBuf::from("b/Page.html"))
        );
        assert_eq!(
            resolve_target("/b/Page.html", &index, dir.path()),
            Resolution::Exact(PathBuf::from("b/Page.html"))
        );
    }

    #[test]
    fn test_exact_path_for_non_html_file() {
        let (dir, index) = tree(&["docs/manual.pdf"]);
        assert_eq!(
            resolve_target("docs/manual.pdf", &index, dir.path()),
            Resolution::Exact(PathBuf::from("docs/manual.pdf"))
        );
    }

    #[test]
    fn test_ambiguous_basename_picks_first_stably() {
        let (dir, index) = tree(&["z/Page.html", "a/Page.html", "m/Page.html"]);
        let first = resolve_target("Page.html", &index, dir.path());
        let second = resolve_target("Page.html", &index, dir.path());
        assert_eq!(first, second);
        match first {
            Resolution::Ambiguous { chosen, candidates } => {
                assert_eq!(chosen, PathBuf::from("a/Page.html"));
                assert_eq!(candidates.len(), 3);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found() {
        let (dir, index) = tree(&["Index.html"]);
        assert_eq!(resolve_target("Missing.html", &index, dir.path()), Resolution::NotFound);
        assert_eq!(Resolution::NotFound.target(), None);
    }

    #[test]
    fn test_directory_is_not_an_exact_match() {
        let (dir, index) = tree(&["guide/Intro.html"]);
        assert_eq!(resolve_target("guide", &index, dir.path()), Resolution::NotFound);
        assert_eq!(resolve_target("guide/", &index, dir.path()), Resolution::NotFound);
        assert_eq!(resolve_target("/guide/", &index, dir.path()), Resolution::NotFound);
    }
}
