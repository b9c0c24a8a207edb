//! Glob-pattern utilities shared across the crate.
//!
//! Brace expansion and path-aware matching live together here so that the
//! weight table, the exclusion rules, the inclusion check, and file-universe
//! discovery all see identical matching semantics.

mod braces;
mod matching;

pub use braces::{expand_braces, extract_base_directories};
pub use matching::{glob_files, matches_path};
