use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

fn testmap() -> Command {
    Command::cargo_bin("testmap").unwrap()
}

fn write_ruby_project(root: &Path) {
    std::fs::create_dir_all(root.join("lib")).unwrap();
    std::fs::write(
        root.join("lib/calculator.rb"),
        concat!(
            "class Calculator\n",
            "  def add(a, b)\n",
            "    a + b\n",
            "  end\n",
            "\n",
            "  def divide(a, b)\n",
            "    raise ZeroDivisionError if b.zero?\n",
            "    a / b\n",
            "  end\n",
            "end\n",
        ),
    )
    .unwrap();
    std::fs::write(
        root.join("testmap.yml"),
        "architectural_weights:\n  - path: 'lib/**/*.rb'\n    weight: 1.0\n",
    )
    .unwrap();
}

#[test]
fn test_init_scaffolds_a_config_file() {
    let dir = TempDir::new().unwrap();
    let output = testmap().arg("init").arg(dir.path()).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Detected project type: Ruby project"));
    assert!(dir.path().join("testmap.yml").exists());
}

#[test]
fn test_init_detects_a_rails_application() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Gemfile"), "gem 'rails', '~> 7.1'\n").unwrap();
    std::fs::create_dir(dir.path().join("app")).unwrap();

    let output = testmap().arg("init").arg(dir.path()).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Detected project type: Rails application"));

    let config = std::fs::read_to_string(dir.path().join("testmap.yml")).unwrap();
    assert!(config.contains("app/models/**/*.rb"));
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    assert!(testmap().arg("init").arg(dir.path()).output().unwrap().status.success());

    let second = testmap().arg("init").arg(dir.path()).output().unwrap();
    assert!(!second.status.success());
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already exists"));

    let forced = testmap()
        .arg("init")
        .arg(dir.path())
        .arg("--force")
        .output()
        .unwrap();
    assert!(forced.status.success());
}

#[test]
fn test_analyze_empty_project_prints_empty_json_array() {
    let dir = TempDir::new().unwrap();
    let output = testmap()
        .arg("analyze")
        .arg(dir.path())
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
}

#[test]
fn test_analyze_empty_project_prints_csv_header_only() {
    let dir = TempDir::new().unwrap();
    let output = testmap()
        .arg("analyze")
        .arg(dir.path())
        .args(["--format", "csv"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "file_path,method_name,line_number,score,coverage,complexity,git_commits"
    );
}

#[test]
fn test_analyze_ranks_methods_found_by_the_fallback_scan() {
    let dir = TempDir::new().unwrap();
    write_ruby_project(dir.path());

    let output = testmap()
        .arg("analyze")
        .arg(dir.path())
        .args(["--top", "5"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("methods requiring test coverage"));
    assert!(stdout.contains("lib/calculator.rb"));
    assert!(stdout.contains("add"));
    assert!(stdout.contains("divide"));
    // No coverage data and no git history: every method is worst case.
    assert!(stdout.contains("Coverage: 0.0%"));
    assert!(stdout.contains("Git Commits: 0"));
}

#[test]
fn test_analyze_json_reports_score_details() {
    let dir = TempDir::new().unwrap();
    write_ruby_project(dir.path());

    let output = testmap()
        .arg("analyze")
        .arg(dir.path())
        .args(["--top", "5", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be a JSON array");
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["file_path"], "lib/calculator.rb");
    assert_eq!(records[0]["class_name"], "Calculator");
    // quality = 1.5 + 1.0, importance = 1.2 * 1.0
    assert_eq!(records[0]["score"], 3.0);
    assert_eq!(records[0]["details"]["complexity"], 1);
}

#[test]
fn test_analyze_suggest_adds_scenarios_to_human_output() {
    let dir = TempDir::new().unwrap();
    write_ruby_project(dir.path());

    let output = testmap()
        .arg("analyze")
        .arg(dir.path())
        .args(["--top", "5", "--suggest"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Suggested scenarios:"));
    assert!(stdout.contains("when b.zero? is true"));
}

#[test]
fn test_analyze_fails_fast_on_a_malformed_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("testmap.yml"), "{{{ not yaml").unwrap();

    let output = testmap().arg("analyze").arg(dir.path()).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"));
}

#[test]
fn test_analyze_rejects_unknown_format() {
    let output = testmap()
        .arg("analyze")
        .args(["--format", "xml"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
