//! Degenerate method discovery for files without complexity diagnostics.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{MethodComplexity, Result};

static METHOD_DEF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*def\s+(\w+[?!]?)").unwrap());

/// Scan a source file for method definitions.
///
/// This is the only place the engine reads file contents. Every discovered
/// method gets a default complexity of 1 so files without diagnostics still
/// rank. A file that no longer exists yields no methods; a file that exists
/// but cannot be read indicates a configuration inconsistency and the error
/// propagates.
pub fn scan_methods(file_path: &Path) -> Result<Vec<MethodComplexity>> {
    if !file_path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(file_path)?;
    Ok(scan_lines(&contents))
}

fn scan_lines(contents: &str) -> Vec<MethodComplexity> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            METHOD_DEF.captures(line).map(|caps| MethodComplexity {
                method_name: caps[1].to_string(),
                line_number: index + 1,
                complexity: 1,
            })
        })
        .collect()
}
