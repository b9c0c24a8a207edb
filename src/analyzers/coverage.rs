//! Coverage adapter: reads a SimpleCov resultset.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::{resolver, TestmapConfig};
use crate::core::{CoverageMap, Error, FileCoverage, Result};

pub const RESULTSET_PATH: &str = "coverage/.resultset.json";

/// Read `coverage/.resultset.json` under `root`.
///
/// A missing resultset is normal (the suite has not run with SimpleCov) and
/// yields an empty map; a present but malformed one is an adapter error for
/// the caller's degraded-data boundary.
pub fn analyze(config: &TestmapConfig, root: &Path) -> Result<CoverageMap> {
    let path = root.join(RESULTSET_PATH);
    if !path.exists() {
        log::debug!("No coverage resultset at {}", path.display());
        return Ok(CoverageMap::new());
    }

    let contents = fs::read_to_string(&path)
        .map_err(|e| Error::Coverage(format!("failed to read {}: {e}", path.display())))?;
    parse_resultset(&contents, config, root)
}

/// Parse a resultset document.
///
/// The top level maps a suite name to its result, whose `coverage` object
/// maps file paths to per-line hit arrays: `null` marks a non-executable
/// line, `0` an executable line never hit, `>0` a hit count.
pub fn parse_resultset(contents: &str, config: &TestmapConfig, root: &Path) -> Result<CoverageMap> {
    let data: Value = serde_json::from_str(contents)
        .map_err(|e| Error::Coverage(format!("malformed coverage resultset: {e}")))?;

    let mut results = CoverageMap::new();
    let Some(resultset) = data.as_object().and_then(|suites| suites.values().next()) else {
        return Ok(results);
    };
    let Some(file_entries) = resultset.get("coverage").and_then(Value::as_object) else {
        return Ok(results);
    };

    let target_patterns = resolver::target_patterns(config);
    for (file_path, line_coverage) in file_entries {
        let Some(line_hits) = extract_line_hits(line_coverage) else {
            continue;
        };
        let Some(file_coverage) = tally(line_hits) else {
            continue;
        };
        let normalized = resolver::normalize_path(Path::new(file_path), config, root);
        if !resolver::should_include_file(&normalized, &target_patterns) {
            continue;
        }
        results.insert(normalized, file_coverage);
    }

    Ok(results)
}

/// Newer SimpleCov resultsets nest the hit array under a `lines` key.
fn extract_line_hits(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(hits) => Some(hits),
        Value::Object(map) => map.get("lines").and_then(Value::as_array),
        _ => None,
    }
}

/// Files with no countable lines are skipped entirely.
fn tally(line_hits: &[Value]) -> Option<FileCoverage> {
    let hits: Vec<Option<u64>> = line_hits.iter().map(Value::as_u64).collect();
    let total_lines = hits.iter().filter(|hit| hit.is_some()).count();
    if total_lines == 0 {
        return None;
    }
    let covered_lines = hits
        .iter()
        .filter(|hit| matches!(hit, Some(count) if *count > 0))
        .count();

    Some(FileCoverage {
        coverage_rate: covered_lines as f64 / total_lines as f64,
        covered_lines,
        total_lines,
        line_hits: hits,
    })
}
