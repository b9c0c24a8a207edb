//! Heuristic test-scenario suggestions for a method.
//!
//! Pattern-matches the method's source text for branching constructs and
//! well-known predicate calls, and phrases each branch as a scenario worth a
//! test case. This is a line-level heuristic with no parsing, and it plays
//! no part in scoring.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

static CONDITIONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\b(?:if|elsif|unless)\s+([^\n]+?)(?:\s+then\b|$)").unwrap());

static CASE_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^case\s+(.+)$").unwrap());

static WHEN_BRANCH: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^when\s+['"]?([^'",]+)"#).unwrap());

static RECEIVER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+\.").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Predicate calls that usually gate a branch worth testing both ways.
const PREDICATE_METHODS: [&str; 10] = [
    "present?", "blank?", "nil?", "empty?", "valid?", "invalid?", "admin?", "premium?",
    "active?", "locked?",
];

/// Suggest test scenarios for the method defined at `line_number` of
/// `file_path`. Best effort: an unreadable file yields no suggestions.
pub fn generate_for_method(file_path: &Path, line_number: usize) -> Vec<String> {
    let Ok(contents) = fs::read_to_string(file_path) else {
        return Vec::new();
    };
    let source = extract_method_source(&contents, line_number);
    if source.is_empty() {
        return Vec::new();
    }
    analyze_method_source(&source)
}

/// Capture the method body by indentation, from the definition line until
/// the matching `end` at the same level.
fn extract_method_source(contents: &str, line_number: usize) -> String {
    let lines: Vec<&str> = contents.lines().collect();
    if line_number == 0 || line_number > lines.len() {
        return String::new();
    }

    let start = line_number - 1;
    let indent = leading_spaces(lines[start]);
    let mut collected = Vec::new();

    for (offset, line) in lines[start..].iter().enumerate() {
        if offset > 0 && leading_spaces(line) <= indent && line.trim() == "end" {
            break;
        }
        collected.push(*line);
    }

    collected.join("\n")
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn analyze_method_source(source: &str) -> Vec<String> {
    let mut scenarios = Vec::new();
    scenarios.extend(conditional_scenarios(source));
    scenarios.extend(case_scenarios(source));
    scenarios.extend(predicate_scenarios(source));
    dedup_preserving_order(scenarios)
}

fn conditional_scenarios(source: &str) -> Vec<String> {
    let mut scenarios = Vec::new();
    for caps in CONDITIONAL.captures_iter(source) {
        let condition = simplify_condition(caps[1].trim());
        if condition.is_empty() {
            continue;
        }
        scenarios.push(format!("when {condition} is true"));
        scenarios.push(format!("when {condition} is false"));
    }
    scenarios
}

fn case_scenarios(source: &str) -> Vec<String> {
    let mut scenarios = Vec::new();
    let mut subject: Option<String> = None;

    for line in source.lines() {
        let trimmed = line.trim();
        if let Some(caps) = CASE_HEAD.captures(trimmed) {
            subject = Some(caps[1].trim().to_string());
        } else if let Some(current) = &subject {
            if let Some(caps) = WHEN_BRANCH.captures(trimmed) {
                scenarios.push(format!("when {current} is '{}'", caps[1].trim()));
            } else if trimmed == "else" {
                scenarios.push(format!("when {current} has any other value"));
            } else if trimmed == "end" {
                subject = None;
            }
        }
    }
    scenarios
}

fn predicate_scenarios(source: &str) -> Vec<String> {
    let mut scenarios = Vec::new();
    for predicate in PREDICATE_METHODS {
        if source.contains(predicate) {
            scenarios.push(format!("when {predicate} is true"));
            scenarios.push(format!("when {predicate} is false"));
        }
    }
    scenarios
}

/// Strip instance-variable receivers and collapse whitespace so equivalent
/// conditions dedup together.
fn simplify_condition(condition: &str) -> String {
    let stripped = RECEIVER_PREFIX.replace_all(condition, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

fn dedup_preserving_order(scenarios: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    scenarios
        .into_iter()
        .filter(|scenario| seen.insert(scenario.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_conditionals_produce_both_branches() {
        let source = indoc! {"
            def can_access?(resource)
              return false unless @user.active?
              if resource.owner == @user
                true
              end
            end
        "};
        let scenarios = analyze_method_source(source);
        // Instance-variable receivers are stripped by simplification.
        assert!(scenarios.contains(&"when active? is true".to_string()));
        assert!(scenarios.contains(&"when active? is false".to_string()));
        assert!(scenarios.contains(&"when resource.owner == @user is true".to_string()));
    }

    #[test]
    fn test_case_branches_are_enumerated() {
        let source = indoc! {"
            def shipping_rate(region)
              case region
              when 'domestic'
                5
              when 'international'
                25
              else
                0
              end
            end
        "};
        let scenarios = analyze_method_source(source);
        assert!(scenarios.contains(&"when region is 'domestic'".to_string()));
        assert!(scenarios.contains(&"when region is 'international'".to_string()));
        assert!(scenarios.contains(&"when region has any other value".to_string()));
    }

    #[test]
    fn test_duplicate_scenarios_are_removed() {
        let source = indoc! {"
            def check
              return if @account.locked?
              raise if @session.locked?
            end
        "};
        let scenarios = analyze_method_source(source);
        let locked_true = scenarios
            .iter()
            .filter(|s| s.as_str() == "when locked? is true")
            .count();
        assert_eq!(locked_true, 1);
    }

    #[test]
    fn test_extract_method_source_stops_at_matching_end() {
        let contents = indoc! {"
            class Order
              def total
                if discounted?
                  base * 0.9
                end
              end

              def base
                100
              end
            end
        "};
        let source = extract_method_source(contents, 2);
        assert!(source.contains("def total"));
        assert!(source.contains("discounted?"));
        assert!(!source.contains("def base"));
    }
}
