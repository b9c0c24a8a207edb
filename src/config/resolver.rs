//! Target-pattern resolution and canonical path normalization.
//!
//! The data sources report file paths in different shapes: the coverage
//! resultset holds absolute paths, the complexity tool reports paths
//! relative to where it ran, and git history is repo-relative. Everything is
//! joined on the project-relative form produced here.

use std::path::{Path, PathBuf};

use super::core::TestmapConfig;
use crate::core::SOURCE_EXTENSION;
use crate::patterns;

/// Glob patterns describing the full set of source files the configuration
/// covers.
///
/// Directory-shaped weight-table entries are widened to recursive file
/// patterns; entries that already name files pass through unchanged.
pub fn target_patterns(config: &TestmapConfig) -> Vec<String> {
    config
        .architectural_weights
        .iter()
        .flat_map(|entry| patterns::expand_braces(&entry.path))
        .map(to_file_pattern)
        .collect()
}

fn to_file_pattern(pattern: String) -> String {
    if pattern.ends_with('/') {
        format!("{pattern}**/*.{SOURCE_EXTENSION}")
    } else if pattern.ends_with("/**/*") {
        format!("{pattern}.{SOURCE_EXTENSION}")
    } else if !pattern.contains('*') {
        format!("{pattern}/**/*.{SOURCE_EXTENSION}")
    } else {
        pattern
    }
}

/// Whether `file_path` belongs to the configured analysis scope.
///
/// Patterns are also tried with a `**/` prefix to tolerate patterns anchored
/// relative to a subtree.
pub fn should_include_file(file_path: &Path, target_patterns: &[String]) -> bool {
    if file_path
        .extension()
        .map(|ext| ext != SOURCE_EXTENSION)
        .unwrap_or(true)
    {
        return false;
    }

    target_patterns.iter().any(|pattern| {
        patterns::matches_path(pattern, file_path)
            || patterns::matches_path(&format!("**/{pattern}"), file_path)
    })
}

/// Base directories implied by the configured patterns, longest first so the
/// most specific prefix wins during normalization.
pub fn base_directories(config: &TestmapConfig, root: &Path) -> Vec<String> {
    let target_patterns = target_patterns(config);
    let mut directories: Vec<String> =
        patterns::extract_base_directories(&target_patterns, root)
            .into_iter()
            .map(|dir| dir.trim_end_matches('/').to_string())
            .collect();
    directories.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    directories
}

/// Normalize an absolute or relative file path onto the project-relative
/// form used as the join key across data sources.
///
/// The path is re-anchored at the longest configured base directory that
/// appears in it as a whole segment; paths already relative to a base are
/// returned unchanged. Paths matching no configured base are also returned
/// unchanged so non-standard layouts still work.
pub fn normalize_path(file_path: &Path, config: &TestmapConfig, root: &Path) -> PathBuf {
    let path_str = file_path.to_string_lossy();

    for base in base_directories(config, root) {
        let segment = format!("/{base}/");
        if let Some(index) = path_str.find(&segment) {
            return PathBuf::from(&path_str[index + 1..]);
        }
        if path_str.starts_with(&format!("{base}/")) {
            return file_path.to_path_buf();
        }
    }

    file_path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchitecturalWeight;

    fn config_with_paths(paths: &[&str]) -> TestmapConfig {
        TestmapConfig {
            architectural_weights: paths
                .iter()
                .map(|path| ArchitecturalWeight {
                    path: path.to_string(),
                    weight: 1.0,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_target_patterns_widen_directory_entries() {
        let config = config_with_paths(&["app/models/", "lib/**/*", "app", "app/**/*.rb"]);
        assert_eq!(
            target_patterns(&config),
            vec![
                "app/models/**/*.rb",
                "lib/**/*.rb",
                "app/**/*.rb",
                "app/**/*.rb",
            ]
        );
    }

    #[test]
    fn test_target_patterns_expand_braces() {
        let config = config_with_paths(&["app/{models,controllers}/**/*.rb"]);
        assert_eq!(
            target_patterns(&config),
            vec!["app/models/**/*.rb", "app/controllers/**/*.rb"]
        );
    }

    #[test]
    fn test_should_include_requires_source_extension() {
        let patterns = vec!["app/**/*.rb".to_string()];
        assert!(should_include_file(
            Path::new("app/models/user.rb"),
            &patterns
        ));
        assert!(!should_include_file(
            Path::new("app/views/index.html.erb"),
            &patterns
        ));
        assert!(!should_include_file(Path::new("app/models/user"), &patterns));
    }

    #[test]
    fn test_should_include_tolerates_subtree_anchored_patterns() {
        let patterns = vec!["models/**/*.rb".to_string()];
        assert!(should_include_file(
            Path::new("app/models/user.rb"),
            &patterns
        ));
    }

    #[test]
    fn test_base_directories_longest_first() {
        let root = tempfile::tempdir().unwrap();
        let config = config_with_paths(&["app/models/**/*.rb", "app/**/*.rb", "lib/"]);
        assert_eq!(
            base_directories(&config, root.path()),
            vec!["app/models", "app", "lib"]
        );
    }

    #[test]
    fn test_normalize_absolute_path_reanchors_at_base() {
        let root = tempfile::tempdir().unwrap();
        let config = config_with_paths(&["app/**/*.rb"]);
        assert_eq!(
            normalize_path(
                Path::new("/home/ci/build/project/app/models/user.rb"),
                &config,
                root.path()
            ),
            PathBuf::from("app/models/user.rb")
        );
    }

    #[test]
    fn test_normalize_relative_path_unchanged() {
        let root = tempfile::tempdir().unwrap();
        let config = config_with_paths(&["app/**/*.rb"]);
        assert_eq!(
            normalize_path(Path::new("app/models/user.rb"), &config, root.path()),
            PathBuf::from("app/models/user.rb")
        );
    }

    #[test]
    fn test_normalize_prefers_most_specific_base() {
        let root = tempfile::tempdir().unwrap();
        let config = config_with_paths(&["packs/users/app/**/*.rb", "app/**/*.rb"]);
        assert_eq!(
            normalize_path(
                Path::new("/ci/project/packs/users/app/models/user.rb"),
                &config,
                root.path()
            ),
            PathBuf::from("packs/users/app/models/user.rb")
        );
    }

    #[test]
    fn test_normalize_unmatched_path_passes_through() {
        let root = tempfile::tempdir().unwrap();
        let config = config_with_paths(&["app/**/*.rb"]);
        assert_eq!(
            normalize_path(Path::new("scripts/deploy.rb"), &config, root.path()),
            PathBuf::from("scripts/deploy.rb")
        );
    }
}
