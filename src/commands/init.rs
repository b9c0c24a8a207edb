//! First-time setup: project-type detection and scaffold configuration.

use std::path::Path;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::io;

pub const DEFAULT_CONFIG_FILE: &str = "testmap.yml";

static RAILS_GEM: Lazy<Regex> = Lazy::new(|| Regex::new(r#"gem\s+['"]rails['"]"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    RailsApp,
    RubyGem,
    Plain,
}

impl ProjectKind {
    fn describe(self) -> &'static str {
        match self {
            Self::RailsApp => "Rails application",
            Self::RubyGem => "Ruby gem",
            Self::Plain => "Ruby project",
        }
    }
}

pub fn init_config(directory: &Path, force: bool) -> Result<()> {
    let config_path = directory.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "configuration file '{}' already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    let kind = detect_project_kind(directory);
    println!("🔍 Detected project type: {}", kind.describe());

    io::write_file(&config_path, config_template(kind))?;
    println!(
        "✅ Configuration file '{}' created.",
        config_path.display()
    );
    println!("   You can now run: testmap analyze");
    Ok(())
}

pub fn detect_project_kind(directory: &Path) -> ProjectKind {
    if is_rails_app(directory) {
        ProjectKind::RailsApp
    } else if is_ruby_gem(directory) {
        ProjectKind::RubyGem
    } else {
        ProjectKind::Plain
    }
}

fn is_rails_app(directory: &Path) -> bool {
    let Ok(gemfile) = std::fs::read_to_string(directory.join("Gemfile")) else {
        return false;
    };
    RAILS_GEM.is_match(&gemfile) && directory.join("app").is_dir()
}

fn is_ruby_gem(directory: &Path) -> bool {
    let has_gemspec = std::fs::read_dir(directory)
        .map(|entries| {
            entries
                .flatten()
                .any(|entry| entry.file_name().to_string_lossy().ends_with(".gemspec"))
        })
        .unwrap_or(false);
    has_gemspec && directory.join("lib").is_dir()
}

fn config_template(kind: ProjectKind) -> &'static str {
    match kind {
        ProjectKind::RailsApp => RAILS_TEMPLATE,
        ProjectKind::RubyGem => GEM_TEMPLATE,
        ProjectKind::Plain => PLAIN_TEMPLATE,
    }
}

const RAILS_TEMPLATE: &str = r#"quality_weights:
  test_coverage: 1.5
  cyclomatic_complexity: 1.0

importance_weights:
  change_frequency: 0.8
  architectural_importance: 1.2

architectural_weights:
  - path: 'app/models/**/*.rb'
    weight: 2.0
  - path: 'app/services/**/*.rb'
    weight: 1.8
  - path: 'app/controllers/**/*.rb'
    weight: 1.5
  - path: 'app/**/*.rb'
    weight: 1.0
  - path: 'lib/**/*.rb'
    weight: 1.0

exclude:
  - 'app/channels/**/*'
  - 'app/helpers/**/*'
  - 'app/views/**/*'
  - 'app/assets/**/*'
  - 'config/**/*'
  - 'db/**/*'
  - 'spec/**/*'
  - 'test/**/*'

git_history_days: 90
"#;

const GEM_TEMPLATE: &str = r#"quality_weights:
  test_coverage: 1.5
  cyclomatic_complexity: 1.0

importance_weights:
  change_frequency: 0.8
  architectural_importance: 1.2

architectural_weights:
  - path: 'lib/**/*.rb'
    weight: 1.0
  - path: 'exe/**/*.rb'
    weight: 1.3

exclude:
  - 'spec/**/*'
  - 'test/**/*'

git_history_days: 90
"#;

const PLAIN_TEMPLATE: &str = r#"quality_weights:
  test_coverage: 1.5
  cyclomatic_complexity: 1.0

importance_weights:
  change_frequency: 0.8
  architectural_importance: 1.2

architectural_weights:
  - path: 'app/**/*.rb'
    weight: 1.0
  - path: 'lib/**/*.rb'
    weight: 1.0

exclude:
  - 'config/**/*'
  - 'db/**/*'
  - 'spec/**/*'
  - 'test/**/*'

git_history_days: 90
"#;
