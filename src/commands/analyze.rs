//! The analysis pipeline: configuration, adapters, scoring, rendering.

use std::path::PathBuf;

use anyhow::Result;

use crate::analyzers;
use crate::config;
use crate::core::{ChangeCountMap, ComplexityMap, CoverageMap, MethodScore};
use crate::io::output::{self, OutputFormat, RenderOptions};
use crate::priority::ScoreCalculator;

pub struct AnalyzeOptions {
    pub path: PathBuf,
    pub config_path: PathBuf,
    pub top: usize,
    pub format: OutputFormat,
    pub suggest: bool,
}

pub fn analyze_project(options: AnalyzeOptions) -> Result<()> {
    let root = &options.path;
    let config_path = root.join(&options.config_path);
    let config = config::load(&config_path)?;
    log::info!("Configuration loaded from {}", config_path.display());

    // A category weight of 0 disables the signal, so its adapter is never
    // invoked at all.
    let coverage: CoverageMap = if config.quality_weights.test_coverage > 0.0 {
        degraded_to_empty("coverage", analyzers::coverage::analyze(&config, root))
    } else {
        log::info!("Skipping coverage analysis: weight is 0");
        CoverageMap::new()
    };

    let complexity: ComplexityMap = if config.quality_weights.cyclomatic_complexity > 0.0 {
        degraded_to_empty("complexity", analyzers::complexity::analyze(&config, root))
    } else {
        log::info!("Skipping complexity analysis: weight is 0");
        ComplexityMap::new()
    };

    let changes: ChangeCountMap = if config.importance_weights.change_frequency > 0.0 {
        degraded_to_empty("git history", analyzers::git::analyze(&config, root))
    } else {
        log::info!("Skipping git history analysis: weight is 0");
        ChangeCountMap::new()
    };

    let results =
        ScoreCalculator::with_root(&config, root).calculate(&coverage, &complexity, &changes)?;
    log::info!("Scored {} methods", results.len());

    let top: Vec<MethodScore> = results.into_iter().take(options.top).collect();
    render(
        &top,
        options.format,
        RenderOptions {
            suggest: options.suggest,
            root: root.clone(),
        },
    )
}

/// Adapter failures degrade to an empty mapping so the remaining signals can
/// still produce a useful ranking.
fn degraded_to_empty<T: Default>(signal: &str, result: crate::core::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{signal} analysis failed: {e}; continuing without it");
            T::default()
        }
    }
}

fn render(results: &[MethodScore], format: OutputFormat, options: RenderOptions) -> Result<()> {
    let mut writer = output::create_writer(format, std::io::stdout(), options);
    writer.write_results(results)
}
