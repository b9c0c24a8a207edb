//! Configuration document loading.

use std::fs;
use std::path::Path;

use super::core::TestmapConfig;
use crate::core::{Error, Result};

/// Load configuration from `path`, falling back to built-in defaults when
/// the file does not exist.
///
/// A file that exists but cannot be read or parsed is a fatal configuration
/// error and propagates to the caller; it is never silently replaced by
/// defaults.
pub fn load(path: &Path) -> Result<TestmapConfig> {
    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return TestmapConfig::default().finalize();
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    parse(&contents)
}

/// Parse and finalize a configuration document.
pub fn parse(contents: &str) -> Result<TestmapConfig> {
    let config: TestmapConfig = serde_yaml::from_str(contents)
        .map_err(|e| Error::Config(format!("invalid configuration document: {e}")))?;
    config.finalize()
}
