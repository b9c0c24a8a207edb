//! Path-aware glob matching.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

/// `*` and `?` stop at path separators; only `**` may cross them.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Match `path` against a glob pattern with path-aware semantics.
///
/// Invalid patterns match nothing.
pub fn matches_path(pattern: &str, path: &Path) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches_path_with(path, MATCH_OPTIONS))
        .unwrap_or(false)
}

/// Files under `root` matched by a glob pattern, with the root prefix
/// stripped back off so results stay project-relative.
pub fn glob_files(pattern: &str, root: &Path) -> Vec<PathBuf> {
    let full_pattern = root.join(pattern);
    match glob::glob_with(&full_pattern.to_string_lossy(), MATCH_OPTIONS) {
        Ok(paths) => paths
            .filter_map(std::result::Result::ok)
            .filter(|path| path.is_file())
            .map(|path| match path.strip_prefix(root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => path.clone(),
            })
            .collect(),
        Err(e) => {
            log::debug!("Skipping invalid glob pattern '{pattern}': {e}");
            Vec::new()
        }
    }
}
