//! Result renderers for the four output formats.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::Table;
use serde::Serialize;

use crate::core::{MethodScore, ScoreDetails};
use crate::scenarios;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Csv,
    Table,
}

/// Options shared by the renderers.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Annotate human output with suggested test scenarios.
    pub suggest: bool,
    /// Project root, used to read method sources for suggestions.
    pub root: PathBuf,
}

pub trait OutputWriter {
    fn write_results(&mut self, results: &[MethodScore]) -> anyhow::Result<()>;
}

pub fn create_writer<W: Write + 'static>(
    format: OutputFormat,
    writer: W,
    options: RenderOptions,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Human => Box::new(HumanWriter { writer, options }),
        OutputFormat::Json => Box::new(JsonWriter { writer }),
        OutputFormat::Csv => Box::new(CsvWriter { writer }),
        OutputFormat::Table => Box::new(TableWriter { writer }),
    }
}

pub struct HumanWriter<W: Write> {
    writer: W,
    options: RenderOptions,
}

impl<W: Write> OutputWriter for HumanWriter<W> {
    fn write_results(&mut self, results: &[MethodScore]) -> anyhow::Result<()> {
        if results.is_empty() {
            writeln!(
                self.writer,
                "{}",
                "✅ No methods found that need additional testing.".green()
            )?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "📊 Top {} methods requiring test coverage:\n",
            results.len()
        )?;

        for (index, method) in results.iter().enumerate() {
            writeln!(
                self.writer,
                "{}. {}:{}",
                index + 1,
                method.file_path.display().to_string().cyan(),
                method.line_number
            )?;
            writeln!(self.writer, "   Method: {}", method.method_name.bold())?;
            writeln!(self.writer, "   Priority Score: {:.2}", method.score)?;
            writeln!(
                self.writer,
                "   Coverage: {:.1}%",
                method.details.coverage * 100.0
            )?;
            writeln!(self.writer, "   Complexity: {}", method.details.complexity)?;
            writeln!(self.writer, "   Git Commits: {}", method.details.git_commits)?;
            if self.options.suggest {
                self.write_suggestions(method)?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

impl<W: Write> HumanWriter<W> {
    fn write_suggestions(&mut self, method: &MethodScore) -> anyhow::Result<()> {
        let suggestions = scenarios::generate_for_method(
            &self.options.root.join(&method.file_path),
            method.line_number,
        );
        if suggestions.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "   Suggested scenarios:")?;
        for suggestion in suggestions {
            writeln!(self.writer, "     - {suggestion}")?;
        }
        Ok(())
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    file_path: &'a Path,
    class_name: String,
    method_name: &'a str,
    line_number: usize,
    score: f64,
    details: &'a ScoreDetails,
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, results: &[MethodScore]) -> anyhow::Result<()> {
        let records: Vec<JsonRecord> = results
            .iter()
            .map(|method| JsonRecord {
                file_path: &method.file_path,
                class_name: class_name_for(&method.file_path),
                method_name: &method.method_name,
                line_number: method.line_number,
                score: method.score,
                details: &method.details,
            })
            .collect();
        let json = serde_json::to_string_pretty(&records)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_results(&mut self, results: &[MethodScore]) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "file_path,method_name,line_number,score,coverage,complexity,git_commits"
        )?;
        for method in results {
            writeln!(
                self.writer,
                "{},{},{},{},{:.1},{},{}",
                method.file_path.display(),
                method.method_name,
                method.line_number,
                method.score,
                method.details.coverage * 100.0,
                method.details.complexity,
                method.details.git_commits
            )?;
        }
        Ok(())
    }
}

pub struct TableWriter<W: Write> {
    writer: W,
}

impl<W: Write> OutputWriter for TableWriter<W> {
    fn write_results(&mut self, results: &[MethodScore]) -> anyhow::Result<()> {
        if results.is_empty() {
            writeln!(self.writer, "No methods found that need additional testing.")?;
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec![
            "File",
            "Method",
            "Line",
            "Score",
            "Coverage",
            "Complexity",
            "Commits",
        ]);
        for method in results {
            table.add_row(vec![
                method.file_path.display().to_string(),
                method.method_name.clone(),
                method.line_number.to_string(),
                format!("{:.2}", method.score),
                format!("{:.1}%", method.details.coverage * 100.0),
                method.details.complexity.to_string(),
                method.details.git_commits.to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}

/// CamelCase guess at the class a file defines, from its basename.
fn class_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .map(|stem| stem.split('_').map(capitalize).collect())
        .unwrap_or_default()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
