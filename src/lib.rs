//! Relink - repair cross-references in a static tree of HTML documents.
//!
//! - **index**: basename -> location index over the tree
//! - **resolve**: exact-path / unique / ambiguous target resolution
//! - **rewrite**: per-document link, image and structural edits
//! - **run**: whole-tree repair returning a [`report::RunReport`]

pub mod config;
pub mod index;
pub mod report;
pub mod resolve;
pub mod rewrite;
pub mod run;
pub mod utils;

pub use config::RelinkConfig;
pub use index::HtmlIndex;
pub use report::RunReport;
pub use resolve::{Resolution, resolve_target};
pub use rewrite::fix_document;
pub use run::run;
