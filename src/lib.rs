// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod patterns;
pub mod priority;
pub mod scenarios;

// Re-export commonly used types
pub use crate::config::{ArchitecturalWeight, ImportanceWeights, QualityWeights, TestmapConfig};
pub use crate::core::{
    ChangeCountMap, ComplexityMap, CoverageMap, Error, FileCoverage, MethodComplexity,
    MethodScore, Result, ScoreDetails, SOURCE_EXTENSION,
};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::patterns::{expand_braces, extract_base_directories};
pub use crate::priority::ScoreCalculator;
