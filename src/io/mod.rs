//! Input/output helpers and result renderers.

pub mod output;

use std::path::Path;

use anyhow::Result;

pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)?;
    Ok(())
}
