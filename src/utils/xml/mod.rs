//! XML/HTML processing utilities.

pub mod common;
pub mod link;
pub mod tree;

pub use tree::{Document, Element, Node, NodePath, TreeEdit};
