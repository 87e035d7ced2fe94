//! Utility modules shared by the index and the rewriter.

pub mod log;
pub mod xml;
