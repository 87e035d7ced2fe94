//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Repair links, bare image sources and known document quirks in a tree of HTML files
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root to repair in place (default: current directory)
    pub root: Option<PathBuf>,
}

impl Cli {
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("./"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_defaults_to_current_dir() {
        let cli = Cli::parse_from(["relink"]);
        assert_eq!(cli.root(), PathBuf::from("./"));
    }

    #[test]
    fn test_root_positional() {
        let cli = Cli::parse_from(["relink", "/srv/book"]);
        assert_eq!(cli.root(), PathBuf::from("/srv/book"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["relink", "--dry-run"]).is_err());
    }
}
