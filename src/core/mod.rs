//! Shared data types for the analysis pipeline.
//!
//! Every adapter produces a map keyed by normalized project-relative path;
//! the scoring engine joins those maps and emits [`MethodScore`] values. All
//! of these are read-only snapshots built fresh on each run.

pub mod errors;

pub use errors::{Error, Result};

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

/// File extension of the source files the analyzer understands.
pub const SOURCE_EXTENSION: &str = "rb";

/// Per-file line coverage derived from a SimpleCov resultset.
#[derive(Debug, Clone, PartialEq)]
pub struct FileCoverage {
    /// Covered fraction of executable lines, in `[0, 1]`.
    pub coverage_rate: f64,
    pub covered_lines: usize,
    pub total_lines: usize,
    /// Raw hit counts per line; `None` marks a non-executable line.
    pub line_hits: Vec<Option<u64>>,
}

/// One method flagged by the complexity analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodComplexity {
    pub method_name: String,
    /// 1-based line of the method definition.
    pub line_number: usize,
    pub complexity: u32,
}

/// A ranked method in the engine output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MethodScore {
    pub file_path: PathBuf,
    pub method_name: String,
    pub line_number: usize,
    pub score: f64,
    pub details: ScoreDetails,
}

/// Raw signal values behind a score, reported for transparency.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreDetails {
    /// File-level coverage rate, 0.0 when unmeasured.
    pub coverage: f64,
    pub complexity: u32,
    pub git_commits: usize,
}

pub type CoverageMap = HashMap<PathBuf, FileCoverage>;
pub type ComplexityMap = HashMap<PathBuf, Vec<MethodComplexity>>;
pub type ChangeCountMap = HashMap<PathBuf, usize>;
