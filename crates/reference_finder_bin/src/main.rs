extern crate reference_finder;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use reference_finder::ReferenceFinderJSONConfig;

const USAGE: &str = "Usage: reference-finder <project_root_directory>";

/// Reports source files that no other file appears to import.
#[derive(Parser, Debug)]
#[command(name = "reference-finder", version, about)]
struct CliArgs {
    /// Root directory of the project to scan
    #[arg(value_name = "PROJECT_ROOT")]
    roots: Vec<PathBuf>,

    /// JSON config file; command-line flags override its values
    #[arg(short, long, default_value = None)]
    config_path: Option<PathBuf>,

    /// File extension to collect (repeatable), e.g. `-e .java -e .kt`
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Suffix a target's file name must end with (repeatable, all must match)
    #[arg(long = "target-suffix", value_name = "SUFFIX")]
    target_suffixes: Vec<String>,

    /// Check every collected file instead of filtering by suffix
    #[arg(long)]
    all_targets: bool,

    /// Print progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &CliArgs) -> Result<ReferenceFinderJSONConfig> {
    let mut config = match &args.config_path {
        Some(config_path) => ReferenceFinderJSONConfig::from_file(config_path)
            .with_context(|| {
                format!("Failed to load config from {}", config_path.display())
            })?,
        None => ReferenceFinderJSONConfig::default(),
    };

    if !args.extensions.is_empty() {
        config.extensions = args.extensions.clone();
    }
    if !args.target_suffixes.is_empty() {
        config.target_suffixes = args.target_suffixes.clone();
    }
    if args.all_targets {
        config.all_targets = true;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let project_root = match args.roots.as_slice() {
        [root] => root.clone(),
        _ => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
    };

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let logger = logger::StdioLogger::with_verbosity(args.verbose);
    match reference_finder::find_unreferenced_files(&logger, &project_root, config) {
        Ok(outcome) => {
            print!("{outcome}");
            ExitCode::SUCCESS
        }
        // an invalid root ends the run like a usage error: message on stdout, clean exit
        Err(reference_finder::FinderError::Scan(e)) => {
            println!("{e}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
