//! Change-frequency adapter: counts commits touching each in-scope file
//! within the configured lookback window.

use std::path::Path;
use std::process::Command;

use chrono::{Duration, Utc};

use crate::config::{resolver, TestmapConfig};
use crate::core::{ChangeCountMap, Error, Result};

/// Count commits per in-scope file over the configured window.
///
/// A directory that is not a git repository yields an empty map; that is a
/// normal condition, not an error.
pub fn analyze(config: &TestmapConfig, root: &Path) -> Result<ChangeCountMap> {
    if !is_git_repository(root) {
        log::info!(
            "{} is not a git repository, skipping change-frequency analysis",
            root.display()
        );
        return Ok(ChangeCountMap::new());
    }

    let log_output = run_git_log(config.git_history_days, root)?;
    Ok(count_changes(&log_output, config, root))
}

fn is_git_repository(root: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(root)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn run_git_log(days: u32, root: &Path) -> Result<String> {
    let since = (Utc::now() - Duration::days(i64::from(days)))
        .format("%Y-%m-%d")
        .to_string();
    let output = Command::new("git")
        .args([
            "log",
            &format!("--since={since}"),
            "--name-only",
            "--pretty=format:",
        ])
        .current_dir(root)
        .output()
        .map_err(|e| Error::GitHistory(format!("failed to run git log: {e}")))?;

    if !output.status.success() {
        return Err(Error::GitHistory(format!(
            "git log exited with {}",
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Each commit contributes one count to every in-scope file it touched.
fn count_changes(log_output: &str, config: &TestmapConfig, root: &Path) -> ChangeCountMap {
    let target_patterns = resolver::target_patterns(config);
    let mut counts = ChangeCountMap::new();

    for line in log_output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let path = Path::new(line);
        if !resolver::should_include_file(path, &target_patterns) {
            continue;
        }
        let normalized = resolver::normalize_path(path, config, root);
        *counts.entry(normalized).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::path::PathBuf;

    #[test]
    fn test_count_changes_counts_per_file() {
        let root = tempfile::tempdir().unwrap();
        let config = crate::config::parse(
            "architectural_weights:\n  - path: 'app/**/*.rb'\n    weight: 1.0\n",
        )
        .unwrap();
        let log_output = indoc! {"
            app/models/user.rb
            app/models/account.rb

            app/models/user.rb

            app/models/user.rb
        "};

        let counts = count_changes(log_output, &config, root.path());
        assert_eq!(counts[&PathBuf::from("app/models/user.rb")], 3);
        assert_eq!(counts[&PathBuf::from("app/models/account.rb")], 1);
    }

    #[test]
    fn test_count_changes_skips_out_of_scope_files() {
        let root = tempfile::tempdir().unwrap();
        let config = crate::config::parse(
            "architectural_weights:\n  - path: 'app/**/*.rb'\n    weight: 1.0\n",
        )
        .unwrap();
        let log_output = indoc! {"
            README.md
            Gemfile
            spec/models/user_spec.rb
            app/models/user.rb
        "};

        let counts = count_changes(log_output, &config, root.path());
        assert_eq!(counts.len(), 1);
        assert!(counts.contains_key(&PathBuf::from("app/models/user.rb")));
    }
}
