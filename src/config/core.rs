//! Root configuration model for testmap.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::patterns;

/// Root configuration for an analysis run, loaded from `testmap.yml`.
///
/// Immutable after [`finalize`](Self::finalize), which validates the weight
/// values and expands brace patterns in the architectural weight table so
/// that per-file lookups only ever see plain glob patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestmapConfig {
    /// Weights for per-method code-quality signals.
    #[serde(default)]
    pub quality_weights: QualityWeights,

    /// Weights for per-file significance signals.
    #[serde(default)]
    pub importance_weights: ImportanceWeights,

    /// Ordered per-path weight table; the first matching entry wins.
    #[serde(default = "default_architectural_weights")]
    pub architectural_weights: Vec<ArchitecturalWeight>,

    /// Files matching any of these glob patterns are dropped before scoring.
    #[serde(default = "default_exclude_patterns", rename = "exclude")]
    pub exclude_patterns: Vec<String>,

    /// Lookback window in days for change-frequency measurement.
    #[serde(default = "default_git_history_days")]
    pub git_history_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityWeights {
    /// A weight of 0 disables the coverage signal entirely.
    #[serde(default = "default_test_coverage_weight")]
    pub test_coverage: f64,

    #[serde(default = "default_cyclomatic_complexity_weight")]
    pub cyclomatic_complexity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportanceWeights {
    #[serde(default = "default_change_frequency_weight")]
    pub change_frequency: f64,

    #[serde(default = "default_architectural_importance_weight")]
    pub architectural_importance: f64,
}

/// One entry of the architectural weight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitecturalWeight {
    pub path: String,
    pub weight: f64,
}

fn default_test_coverage_weight() -> f64 {
    1.5
}

fn default_cyclomatic_complexity_weight() -> f64 {
    1.0
}

fn default_change_frequency_weight() -> f64 {
    0.8
}

fn default_architectural_importance_weight() -> f64 {
    1.2
}

fn default_architectural_weights() -> Vec<ArchitecturalWeight> {
    vec![ArchitecturalWeight {
        path: "**/*.rb".to_string(),
        weight: 1.0,
    }]
}

fn default_exclude_patterns() -> Vec<String> {
    vec!["config/**/*".to_string(), "db/**/*".to_string()]
}

fn default_git_history_days() -> u32 {
    90
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            test_coverage: default_test_coverage_weight(),
            cyclomatic_complexity: default_cyclomatic_complexity_weight(),
        }
    }
}

impl Default for ImportanceWeights {
    fn default() -> Self {
        Self {
            change_frequency: default_change_frequency_weight(),
            architectural_importance: default_architectural_importance_weight(),
        }
    }
}

impl Default for TestmapConfig {
    fn default() -> Self {
        Self {
            quality_weights: QualityWeights::default(),
            importance_weights: ImportanceWeights::default(),
            architectural_weights: default_architectural_weights(),
            exclude_patterns: default_exclude_patterns(),
            git_history_days: default_git_history_days(),
        }
    }
}

impl TestmapConfig {
    /// Validate weight values and expand brace patterns in the weight table.
    ///
    /// Expansion preserves entry order; each alternative keeps the weight of
    /// the entry it came from.
    pub fn finalize(mut self) -> Result<Self> {
        self.validate()?;
        self.architectural_weights = expand_architectural_weights(self.architectural_weights);
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        let category_weights = [
            ("quality_weights.test_coverage", self.quality_weights.test_coverage),
            (
                "quality_weights.cyclomatic_complexity",
                self.quality_weights.cyclomatic_complexity,
            ),
            (
                "importance_weights.change_frequency",
                self.importance_weights.change_frequency,
            ),
            (
                "importance_weights.architectural_importance",
                self.importance_weights.architectural_importance,
            ),
        ];
        for (name, value) in category_weights {
            if value < 0.0 {
                return Err(Error::Config(format!(
                    "{name} must not be negative (got {value})"
                )));
            }
        }
        for entry in &self.architectural_weights {
            if entry.weight < 0.0 {
                return Err(Error::Config(format!(
                    "architectural weight for '{}' must not be negative (got {})",
                    entry.path, entry.weight
                )));
            }
        }
        Ok(())
    }

    /// Architectural weight for a file: first matching table entry wins,
    /// 1.0 when nothing matches.
    pub fn weight_for(&self, file_path: &Path) -> f64 {
        self.architectural_weights
            .iter()
            .find(|entry| patterns::matches_path(&entry.path, file_path))
            .map(|entry| entry.weight)
            .unwrap_or(1.0)
    }

    /// Whether a file is excluded from analysis entirely.
    pub fn is_excluded(&self, file_path: &Path) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| patterns::matches_path(pattern, file_path))
    }
}

fn expand_architectural_weights(entries: Vec<ArchitecturalWeight>) -> Vec<ArchitecturalWeight> {
    entries
        .into_iter()
        .flat_map(|entry| {
            let weight = entry.weight;
            patterns::expand_braces(&entry.path)
                .into_iter()
                .map(move |path| ArchitecturalWeight { path, weight })
        })
        .collect()
}
