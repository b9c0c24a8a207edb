use clap::Parser;
use colored::Colorize;
use testmap::cli::{Cli, Commands};
use testmap::commands::analyze::{analyze_project, AnalyzeOptions};
use testmap::commands::init::init_config;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            path,
            top,
            config,
            format,
            suggest,
            verbosity,
        } => {
            init_logging(verbosity);
            analyze_project(AnalyzeOptions {
                path,
                config_path: config,
                top,
                format,
                suggest,
            })
        }
        Commands::Init { path, force } => {
            init_logging(0);
            init_config(&path, force)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", "❌ Error:".red());
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}
