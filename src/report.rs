//! Structured results of a run.

use std::path::PathBuf;

/// One attribute value that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

/// A basename that matched several files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub href: String,
    pub chosen: PathBuf,
    pub candidates: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentReport {
    /// Root-relative path of the document.
    pub path: PathBuf,
    pub links: Vec<Rewrite>,
    pub images: Vec<Rewrite>,
    /// hrefs left untouched because no target was found.
    pub unresolved: Vec<String>,
    pub ambiguous: Vec<Ambiguity>,
    /// Structural edits applied (removed, renamed elements).
    pub structural: usize,
    /// Whether the file was written back.
    pub written: bool,
    /// Parse error that left the document untouched.
    pub skipped: Option<String>,
}

impl DocumentReport {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Whether anything in the document changed.
    pub fn is_changed(&self) -> bool {
        !self.links.is_empty() || !self.images.is_empty() || self.structural > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub documents: Vec<DocumentReport>,
}

impl RunReport {
    pub fn processed(&self) -> usize {
        self.documents.len()
    }

    /// `(document, reason)` for every document that could not be parsed.
    pub fn skipped(&self) -> impl Iterator<Item = (&PathBuf, &str)> {
        self.documents
            .iter()
            .filter_map(|doc| doc.skipped.as_deref().map(|reason| (&doc.path, reason)))
    }

    /// Documents written back to disk.
    pub fn rewritten(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|doc| doc.written)
    }

    pub fn links_fixed(&self) -> usize {
        self.documents.iter().map(|doc| doc.links.len()).sum()
    }

    pub fn images_fixed(&self) -> usize {
        self.documents.iter().map(|doc| doc.images.len()).sum()
    }

    pub fn structural_edits(&self) -> usize {
        self.documents.iter().map(|doc| doc.structural).sum()
    }

    /// `(document, href)` for every link with no target.
    pub fn unresolved(&self) -> impl Iterator<Item = (&PathBuf, &str)> {
        self.documents
            .iter()
            .flat_map(|doc| doc.unresolved.iter().map(move |href| (&doc.path, href.as_str())))
    }

    /// `(document, ambiguity)` for every link resolved by first match.
    pub fn ambiguities(&self) -> impl Iterator<Item = (&PathBuf, &Ambiguity)> {
        self.documents
            .iter()
            .flat_map(|doc| doc.ambiguous.iter().map(move |amb| (&doc.path, amb)))
    }

    /// True when every link resolved to a single target.
    pub fn is_clean(&self) -> bool {
        self.unresolved().next().is_none() && self.ambiguities().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> DocumentReport {
        DocumentReport::new(PathBuf::from(name))
    }

    #[test]
    fn test_document_report_is_changed() {
        let mut report = doc("a.html");
        assert!(!report.is_changed());
        report.structural = 1;
        assert!(report.is_changed());
    }

    #[test]
    fn test_run_report_totals() {
        let mut a = doc("a.html");
        a.links.push(Rewrite {
            from: "B.html".into(),
            to: "sub/B.html".into(),
        });
        a.unresolved.push("Gone.html".into());
        a.written = true;

        let mut b = doc("sub/b.html");
        b.images.push(Rewrite {
            from: "x.png".into(),
            to: "../Assets/x@2x.png".into(),
        });
        b.ambiguous.push(Ambiguity {
            href: "Dup.html".into(),
            chosen: "a/Dup.html".into(),
            candidates: vec!["a/Dup.html".into(), "b/Dup.html".into()],
        });

        let report = RunReport {
            documents: vec![a, b],
        };
        assert_eq!(report.processed(), 2);
        assert_eq!(report.rewritten().count(), 1);
        assert_eq!(report.links_fixed(), 1);
        assert_eq!(report.images_fixed(), 1);
        let unresolved: Vec<_> = report.unresolved().collect();
        assert_eq!(unresolved, vec![(&PathBuf::from("a.html"), "Gone.html")]);
        assert_eq!(report.ambiguities().count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_empty_run_is_clean() {
        assert!(RunReport::default().is_clean());
    }
}
