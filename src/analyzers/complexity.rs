//! Complexity adapter: runs RuboCop's cyclomatic-complexity cop and parses
//! its JSON diagnostics.

use std::path::Path;
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::config::{resolver, TestmapConfig};
use crate::core::{ComplexityMap, Error, MethodComplexity, Result};

const COMPLEXITY_COP: &str = "Metrics/CyclomaticComplexity";

const RUBOCOP_ARGS: [&str; 4] = ["--format", "json", "--only", COMPLEXITY_COP];

static COMPLEXITY_MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Cyclomatic complexity for `([^`]+)` is too high\. \[(\d+)/\d+\]").unwrap()
});

#[derive(Debug, Deserialize)]
struct RubocopReport {
    #[serde(default)]
    files: Vec<RubocopFile>,
}

#[derive(Debug, Deserialize)]
struct RubocopFile {
    path: String,
    #[serde(default)]
    offenses: Vec<RubocopOffense>,
}

#[derive(Debug, Deserialize)]
struct RubocopOffense {
    cop_name: String,
    message: String,
    location: RubocopLocation,
}

#[derive(Debug, Deserialize)]
struct RubocopLocation {
    start_line: usize,
}

/// Run RuboCop over the configured base directories and collect the flagged
/// methods per file.
pub fn analyze(config: &TestmapConfig, root: &Path) -> Result<ComplexityMap> {
    let directories = analysis_directories(config, root);
    if directories.is_empty() {
        log::debug!("No analysis directories exist under {}", root.display());
        return Ok(ComplexityMap::new());
    }

    let output = run_rubocop(&directories, root)?;
    parse_report(&output, config, root)
}

/// Configured base directories that actually exist on disk.
fn analysis_directories(config: &TestmapConfig, root: &Path) -> Vec<String> {
    resolver::base_directories(config, root)
        .into_iter()
        .filter(|dir| root.join(dir).is_dir())
        .collect()
}

/// Prefer the bundled RuboCop; fall back to a global install when bundler is
/// unavailable or produces nothing.
fn run_rubocop(directories: &[String], root: &Path) -> Result<String> {
    if which::which("bundle").is_ok() {
        let bundled = capture(
            Command::new("bundle")
                .args(["exec", "rubocop"])
                .args(RUBOCOP_ARGS)
                .args(directories)
                .current_dir(root),
        );
        match bundled {
            Ok(stdout) if !stdout.trim().is_empty() => return Ok(stdout),
            Ok(_) => log::debug!("bundle exec rubocop produced no output, trying a global rubocop"),
            Err(e) => log::debug!("bundle exec rubocop failed ({e}), trying a global rubocop"),
        }
    }

    let rubocop = which::which("rubocop")
        .map_err(|_| Error::Complexity("rubocop is not installed".to_string()))?;
    capture(
        Command::new(rubocop)
            .args(RUBOCOP_ARGS)
            .args(directories)
            .current_dir(root),
    )
}

fn capture(command: &mut Command) -> Result<String> {
    let output = command
        .output()
        .map_err(|e| Error::Complexity(format!("failed to run rubocop: {e}")))?;
    // RuboCop exits non-zero whenever offenses are found; only the report on
    // stdout matters here.
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse a RuboCop JSON report into per-file flagged methods.
pub fn parse_report(output: &str, config: &TestmapConfig, root: &Path) -> Result<ComplexityMap> {
    let mut results = ComplexityMap::new();

    // RuboCop sometimes prints plain-text warnings before the JSON document.
    let Some(json_start) = output.find('{') else {
        return Ok(results);
    };
    let report: RubocopReport = serde_json::from_str(&output[json_start..])
        .map_err(|e| Error::Complexity(format!("malformed rubocop output: {e}")))?;

    for file in report.files {
        let normalized = resolver::normalize_path(Path::new(&file.path), config, root);
        if normalized.as_os_str().is_empty() {
            continue;
        }
        for offense in &file.offenses {
            if offense.cop_name != COMPLEXITY_COP {
                continue;
            }
            let Some((method_name, complexity)) = parse_message(&offense.message) else {
                continue;
            };
            results
                .entry(normalized.clone())
                .or_default()
                .push(MethodComplexity {
                    method_name,
                    line_number: offense.location.start_line,
                    complexity,
                });
        }
    }

    Ok(results)
}

/// Extract the method name and reported complexity from the cop's message,
/// e.g. ``Cyclomatic complexity for `calculate_fee` is too high. [12/6]``.
fn parse_message(message: &str) -> Option<(String, u32)> {
    let caps = COMPLEXITY_MESSAGE.captures(message)?;
    let complexity = caps[2].parse().ok()?;
    Some((caps[1].to_string(), complexity))
}
