//! The terminal scoring component.
//!
//! Joins coverage, complexity, and change-frequency data against the
//! configured file universe and produces the globally ranked method list.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::{resolver, TestmapConfig};
use crate::core::{
    ChangeCountMap, ComplexityMap, CoverageMap, MethodComplexity, MethodScore, Result,
    ScoreDetails,
};
use crate::patterns;
use crate::priority::method_scan;

/// Scores every method in the configured file universe.
///
/// The combination is multiplicative: quality (how untested and complex a
/// method is) times importance (how often its file changes and how central
/// it is architecturally). A method must rate on both axes to top the
/// ranking, which a flat weighted sum cannot express.
pub struct ScoreCalculator<'a> {
    config: &'a TestmapConfig,
    root: PathBuf,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(config: &'a TestmapConfig) -> Self {
        Self::with_root(config, Path::new("."))
    }

    pub fn with_root(config: &'a TestmapConfig, root: &Path) -> Self {
        Self {
            config,
            root: root.to_path_buf(),
        }
    }

    /// Rank every non-excluded method, highest priority first.
    ///
    /// Ties are broken by file path and then line number so output is
    /// reproducible across runs.
    pub fn calculate(
        &self,
        coverage: &CoverageMap,
        complexity: &ComplexityMap,
        changes: &ChangeCountMap,
    ) -> Result<Vec<MethodScore>> {
        let mut results = Vec::new();

        for file_path in self.collect_files(coverage, complexity, changes) {
            if self.config.is_excluded(&file_path) {
                continue;
            }
            results.extend(self.score_file(&file_path, coverage, complexity, changes)?);
        }

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.file_path.cmp(&b.file_path))
                .then_with(|| a.line_number.cmp(&b.line_number))
        });
        Ok(results)
    }

    /// Universe of candidate files: everything the target patterns match on
    /// disk plus every file any data source knows about.
    fn collect_files(
        &self,
        coverage: &CoverageMap,
        complexity: &ComplexityMap,
        changes: &ChangeCountMap,
    ) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        let mut push = |path: PathBuf| {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        };

        for pattern in resolver::target_patterns(self.config) {
            for path in patterns::glob_files(&pattern, &self.root) {
                push(path);
            }
        }
        for key in sorted_keys(coverage) {
            push(key);
        }
        for key in sorted_keys(complexity) {
            push(key);
        }
        for key in sorted_keys(changes) {
            push(key);
        }

        files
    }

    fn score_file(
        &self,
        file_path: &Path,
        coverage: &CoverageMap,
        complexity: &ComplexityMap,
        changes: &ChangeCountMap,
    ) -> Result<Vec<MethodScore>> {
        let methods = match complexity.get(file_path) {
            Some(methods) if !methods.is_empty() => methods.clone(),
            _ => method_scan::scan_methods(&self.root.join(file_path))?,
        };

        Ok(methods
            .into_iter()
            .map(|method| {
                let score = self.score_method(file_path, &method, coverage, changes);
                let details = self.method_details(file_path, &method, coverage, changes);
                MethodScore {
                    file_path: file_path.to_path_buf(),
                    method_name: method.method_name,
                    line_number: method.line_number,
                    score,
                    details,
                }
            })
            .collect())
    }

    fn score_method(
        &self,
        file_path: &Path,
        method: &MethodComplexity,
        coverage: &CoverageMap,
        changes: &ChangeCountMap,
    ) -> f64 {
        let quality = self.quality_score(file_path, method, coverage);
        let importance = self.importance_score(file_path, changes);
        round2(quality * importance)
    }

    /// Weighted sum of the per-method quality signals. A category weight of
    /// 0 omits that term entirely.
    fn quality_score(
        &self,
        file_path: &Path,
        method: &MethodComplexity,
        coverage: &CoverageMap,
    ) -> f64 {
        let weights = &self.config.quality_weights;
        let mut score = 0.0;
        if weights.test_coverage > 0.0 {
            score += weights.test_coverage * coverage_factor(file_path, coverage);
        }
        if weights.cyclomatic_complexity > 0.0 {
            score += weights.cyclomatic_complexity * f64::from(method.complexity);
        }
        score
    }

    /// Weighted sum of the per-file importance signals.
    fn importance_score(&self, file_path: &Path, changes: &ChangeCountMap) -> f64 {
        let weights = &self.config.importance_weights;
        let mut score = 0.0;
        if weights.change_frequency > 0.0 {
            let commit_count = changes.get(file_path).copied().unwrap_or(0);
            score += weights.change_frequency * commit_count as f64;
        }
        if weights.architectural_importance > 0.0 {
            score += weights.architectural_importance * self.config.weight_for(file_path);
        }
        score
    }

    fn method_details(
        &self,
        file_path: &Path,
        method: &MethodComplexity,
        coverage: &CoverageMap,
        changes: &ChangeCountMap,
    ) -> ScoreDetails {
        ScoreDetails {
            coverage: coverage
                .get(file_path)
                .map(|file_coverage| file_coverage.coverage_rate)
                .unwrap_or(0.0),
            complexity: method.complexity.max(1),
            git_commits: changes.get(file_path).copied().unwrap_or(0),
        }
    }
}

/// A file with no coverage entry counts as fully uncovered.
fn coverage_factor(file_path: &Path, coverage: &CoverageMap) -> f64 {
    coverage
        .get(file_path)
        .map(|file_coverage| 1.0 - file_coverage.coverage_rate)
        .unwrap_or(1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Map keys in sorted order, so universe construction is deterministic.
fn sorted_keys<V>(map: &HashMap<PathBuf, V>) -> Vec<PathBuf> {
    let mut keys: Vec<PathBuf> = map.keys().cloned().collect();
    keys.sort();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileCoverage;

    fn coverage_entry(rate: f64) -> FileCoverage {
        FileCoverage {
            coverage_rate: rate,
            covered_lines: (rate * 10.0) as usize,
            total_lines: 10,
            line_hits: Vec::new(),
        }
    }

    #[test]
    fn test_coverage_factor_inverts_coverage_rate() {
        let mut coverage = CoverageMap::new();
        coverage.insert(PathBuf::from("a.rb"), coverage_entry(0.0));
        coverage.insert(PathBuf::from("b.rb"), coverage_entry(1.0));
        coverage.insert(PathBuf::from("c.rb"), coverage_entry(0.25));

        assert_eq!(coverage_factor(Path::new("a.rb"), &coverage), 1.0);
        assert_eq!(coverage_factor(Path::new("b.rb"), &coverage), 0.0);
        assert_eq!(coverage_factor(Path::new("c.rb"), &coverage), 0.75);
        // Unmeasured is worst case, identical to zero coverage.
        assert_eq!(coverage_factor(Path::new("missing.rb"), &coverage), 1.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(7.9 * 3.6), 28.44);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(10.2), 10.2);
    }
}
