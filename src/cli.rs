use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "testmap")]
#[command(about = "Ranks Ruby methods by how urgently they need tests", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze the codebase and rank methods by test priority
    Analyze {
        /// Directory to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Number of top priority methods to report
        #[arg(long = "top", visible_alias = "top-n", default_value = "3")]
        top: usize,

        /// Configuration file, relative to the analyzed directory
        #[arg(short, long, default_value = "testmap.yml")]
        config: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Include suggested test scenarios in human output
        #[arg(long)]
        suggest: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Create a starter configuration file for the project
    Init {
        /// Directory to set up
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
