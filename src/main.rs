use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use pwd_policy::chart::{ChartOptions, render_charts};
use pwd_policy::loader::{DEFAULT_COLUMN, load_passwords};
use pwd_policy::report::save_analysis_csv;
use pwd_policy::{AnalyzerConfig, PatternList, Thresholds, audit};

/// Password policy analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file with a password column
    csv_file: PathBuf,

    /// Name of the password column
    #[arg(short, long, default_value = DEFAULT_COLUMN)]
    column: String,

    /// Weak pattern list file, one pattern per line
    #[arg(short, long, env = "PWD_POLICY_PATTERNS_PATH")]
    patterns: Option<PathBuf>,

    /// Save the analyzed passwords as CSV
    #[arg(short, long)]
    save: bool,

    /// Output path used with --save
    #[arg(short, long, default_value = "password_policy_report.csv")]
    output: PathBuf,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Skip the terminal charts
    #[arg(long)]
    no_chart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!("Error during execution: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let patterns = match &args.patterns {
        Some(path) => PatternList::from_path(path)
            .with_context(|| format!("Failed to load pattern list {}", path.display()))?,
        None => PatternList::default(),
    };
    let config = AnalyzerConfig::new(patterns, Thresholds::default());
    info!("Using {} weak patterns", config.patterns.len());

    let passwords = load_passwords(&args.csv_file, &args.column)
        .with_context(|| format!("Failed to load {}", args.csv_file.display()))?;

    #[cfg(feature = "async")]
    let outcome = audit(passwords, &config, None);

    #[cfg(not(feature = "async"))]
    let outcome = audit(passwords, &config);

    let (records, report) = outcome?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_text());
    }

    if !args.no_chart {
        println!("{}", render_charts(&records, &report.summary, &ChartOptions::default()));
    }

    if args.save {
        save_analysis_csv(&args.output, &records)
            .with_context(|| format!("Failed to save report to {}", args.output.display()))?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
