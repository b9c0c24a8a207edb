//! Brace-alternation expansion for glob patterns.

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use crate::core::SOURCE_EXTENSION;

/// Expand a brace-alternation pattern like `app/{models,controllers}/**/*.rb`
/// into one plain glob pattern per alternative, preserving order.
///
/// Only the first `{...}` group per level is expanded; remaining groups are
/// handled by recursing on each constructed alternative. Patterns without a
/// well-formed group (no `{`, or no closing `}` after it) are returned
/// unchanged rather than rejected.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((prefix, rest)) = pattern.split_once('{') else {
        return vec![pattern.to_string()];
    };
    let Some((body, suffix)) = rest.split_once('}') else {
        return vec![pattern.to_string()];
    };

    let mut expanded = Vec::new();
    for alternative in body.split(',') {
        let candidate = format!("{prefix}{alternative}{suffix}");
        if candidate.contains('{') && candidate.contains('}') {
            expanded.extend(expand_braces(&candidate));
        } else {
            expanded.push(candidate);
        }
    }
    expanded
}

/// Derive the base directories implied by a list of glob patterns, each with
/// a trailing separator.
///
/// For a recursive pattern the base is everything before the `**`; for a
/// plain wildcard pattern everything before the first `*`. Patterns without
/// wildcards are treated as directories, or as source files when they carry
/// the source extension (root-level files contribute no base). A bare
/// recursive pattern with no prefix has no static base at all, so the
/// project root is scanned for top-level directories that actually contain
/// source files.
pub fn extract_base_directories<S: AsRef<str>>(patterns: &[S], root: &Path) -> BTreeSet<String> {
    let mut directories = BTreeSet::new();

    for pattern in patterns {
        for expanded in expand_braces(pattern.as_ref()) {
            match base_directory_of(&expanded, root) {
                Some(base) if !base.is_empty() => {
                    directories.insert(format!("{base}/"));
                }
                Some(_) if expanded.contains("**") => {
                    directories.extend(
                        top_level_source_directories(root)
                            .into_iter()
                            .map(|dir| format!("{dir}/")),
                    );
                }
                _ => {}
            }
        }
    }

    directories
}

fn base_directory_of(pattern: &str, root: &Path) -> Option<String> {
    if let Some((prefix, _)) = pattern.split_once("**") {
        return Some(prefix.trim_end_matches('/').to_string());
    }
    if let Some((prefix, _)) = pattern.split_once('*') {
        return Some(prefix.trim_end_matches('/').to_string());
    }
    if root.join(pattern).is_dir() {
        return Some(pattern.trim_end_matches('/').to_string());
    }
    if Path::new(pattern)
        .extension()
        .is_some_and(|ext| ext == SOURCE_EXTENSION)
    {
        let parent = Path::new(pattern).parent()?;
        if parent.as_os_str().is_empty() {
            return None;
        }
        return Some(parent.to_string_lossy().into_owned());
    }
    Some(pattern.trim_end_matches('/').to_string())
}

/// Top-level directories under `root` that contain at least one source file.
fn top_level_source_directories(root: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };

    let mut directories = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') || !path.is_dir() {
            continue;
        }
        if contains_source_file(&path) {
            directories.push(name);
        }
    }
    directories
}

fn contains_source_file(directory: &Path) -> bool {
    WalkDir::new(directory)
        .into_iter()
        .flatten()
        .any(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == SOURCE_EXTENSION)
        })
}
