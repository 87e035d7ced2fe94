//! Configuration management for `relink.toml`.
//!
//! The file is optional; without it the built-in defaults apply.
//!
//! # Sections
//!
//! | Section         | Purpose                                        |
//! |-----------------|------------------------------------------------|
//! | `[images]`      | Naming convention for bare `<img src>` values  |
//! | `[[documents]]` | Structural edits keyed by document file name   |
//!
//! # Example
//!
//! ```toml
//! [images]
//! prefix = "../Assets/"
//! suffix = "@2x.png"
//!
//! [[documents]]
//! name = "The-Swift-Programming-Language.html"
//!
//! [[documents.rules]]
//! kind = "rename-tag"
//! from = "h3"
//! to = "h2"
//! ```

pub mod defaults;
mod documents;
mod error;
mod images;

pub use documents::{DocumentRules, StructuralRule};
pub use error::ConfigError;
pub use images::ImagesConfig;

use anyhow::{Result, bail};
use educe::Educe;
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing relink.toml
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RelinkConfig {
    /// Absolute path of the tree being repaired (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file, if one was loaded
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Bare image naming convention
    #[serde(default)]
    pub images: ImagesConfig,

    /// Per-document structural edits
    #[serde(default = "defaults::documents::all")]
    #[educe(Default = defaults::documents::all())]
    pub documents: Vec<DocumentRules>,
}

impl RelinkConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: RelinkConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load `relink.toml` from `root` if present, otherwise use defaults.
    ///
    /// The root is canonicalized and must be an existing directory.
    pub fn load(root: &Path) -> Result<Self> {
        let root = Self::normalize_path(root);
        if !root.is_dir() {
            bail!("root directory `{}` not found", root.display());
        }

        let config_path = root.join(defaults::CONFIG_FILE);
        let mut config = if config_path.is_file() {
            let mut config = Self::from_path(&config_path)?;
            config.config_path = Some(config_path);
            config
        } else {
            Self::default()
        };
        config.root = root;
        config.validate()?;
        Ok(config)
    }

    /// Structural rules for a document file name, if any.
    pub fn rules_for(&self, file_name: &str) -> Option<&DocumentRules> {
        self.documents.iter().find(|doc| doc.name == file_name)
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.images.prefix.is_empty() {
            bail!(ConfigError::Validation(
                "[images.prefix] must not be empty".into()
            ));
        }

        let mut seen = HashSet::new();
        for doc in &self.documents {
            if doc.name.is_empty() || doc.name.contains(['/', '\\']) {
                bail!(ConfigError::Validation(format!(
                    "[[documents]] name `{}` must be a bare file name",
                    doc.name
                )));
            }
            if !seen.insert(doc.name.as_str()) {
                bail!(ConfigError::Validation(format!(
                    "[[documents]] `{}` is listed more than once",
                    doc.name
                )));
            }
            for rule in &doc.rules {
                if rule.tags().iter().any(|tag| !is_tag_name(tag)) {
                    bail!(ConfigError::Validation(format!(
                        "[[documents.rules]] `{}` in `{}` has an invalid tag name",
                        rule.kind(),
                        doc.name
                    )));
                }
            }
        }

        Ok(())
    }
}

fn is_tag_name(tag: &str) -> bool {
    tag.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_policy_targets_book() {
        let config = RelinkConfig::default();
        let rules = config.rules_for(defaults::documents::BOOK).unwrap();
        assert_eq!(rules.rules.len(), 4);
        assert!(config.rules_for("Other.html").is_none());
    }

    #[test]
    fn test_documents_replace_default_policy() {
        let config = RelinkConfig::from_str(
            r#"
            [[documents]]
            name = "Index.html"
        "#,
        )
        .unwrap();
        assert!(config.rules_for(defaults::documents::BOOK).is_none());
        assert!(config.rules_for("Index.html").unwrap().rules.is_empty());
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = RelinkConfig::from_str("[images");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result = RelinkConfig::from_str("verbose = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_config_file() {
        let dir = tempdir().unwrap();
        let config = RelinkConfig::load(dir.path()).unwrap();
        assert_eq!(config.root, dir.path().canonicalize().unwrap());
        assert!(config.config_path.is_none());
        assert_eq!(config.images.prefix, "../Assets/");
    }

    #[test]
    fn test_load_with_config_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(defaults::CONFIG_FILE),
            "[images]\nprefix = \"img/\"\n",
        )
        .unwrap();
        let config = RelinkConfig::load(dir.path()).unwrap();
        assert!(config.config_path.is_some());
        assert_eq!(config.images.prefix, "img/");
    }

    #[test]
    fn test_load_missing_root() {
        let dir = tempdir().unwrap();
        let result = RelinkConfig::load(&dir.path().join("missing"));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_prefix() {
        let config = RelinkConfig::from_str("[images]\nprefix = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_documents() {
        let config = RelinkConfig::from_str(
            r#"
            [[documents]]
            name = "A.html"
            [[documents]]
            name = "A.html"
        "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn test_validate_bad_tag() {
        let config = RelinkConfig::from_str(
            r#"
            [[documents]]
            name = "A.html"
            [[documents.rules]]
            kind = "rename-tag"
            from = "h3"
            to = "<h2>"
        "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_tag_name() {
        assert!(is_tag_name("h2"));
        assert!(is_tag_name("my-element"));
        assert!(!is_tag_name(""));
        assert!(!is_tag_name("2h"));
    }
}
