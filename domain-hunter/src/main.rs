//! Domain Hunter CLI Application
//!
//! Reads company name lists, checks today's batch of name variations against
//! the configured TLDs and reports the base names that still have an
//! unregistered domain.

mod logger;
mod ui;

use chrono::{Local, NaiveDate};
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_hunter_lib::{load_env_config, ConfigManager};
use domain_hunter_lib::{parse_name_list, prepare_batch, read_name_file, run_hunt, write_results_csv};
use domain_hunter_lib::{DomainChecker, HuntConfig};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::{debug, info, warn};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-hunter
#[derive(Parser, Debug)]
#[command(name = "domain-hunter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find short, plausibly available domains derived from company names")]
#[command(
    long_about = "Find short, plausibly available domains derived from company names.\n\nEach run checks one day-of-month batch of name variations against every configured TLD, using RDAP with a DNS fallback, and writes the interesting base names to a CSV file."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Files with raw company names, one per line ("-" or none reads stdin)
    #[arg(value_name = "FILES", help_heading = "Input")]
    pub files: Vec<PathBuf>,

    /// TLDs to check (comma-separated or multiple -t flags)
    #[arg(short = 't', long = "tld", value_name = "TLD", value_delimiter = ',', action = clap::ArgAction::Append, help_heading = "Input")]
    pub tlds: Option<Vec<String>>,

    /// Affixes added before and after each name (comma-separated)
    #[arg(
        long = "affix",
        value_name = "AFFIX",
        value_delimiter = ',',
        action = clap::ArgAction::Append,
        help_heading = "Generation"
    )]
    pub affixes: Option<Vec<String>>,

    /// Variations per daily batch
    #[arg(long = "batch-size", value_name = "N", help_heading = "Generation")]
    pub batch_size: Option<usize>,

    /// Reference day for batch rotation (default: today)
    #[arg(long = "date", value_name = "YYYY-MM-DD", help_heading = "Generation")]
    pub date: Option<String>,

    /// Print today's candidate domains without checking them
    #[arg(long = "dry-run", help_heading = "Generation")]
    pub dry_run: bool,

    /// Pause after every check, in milliseconds
    #[arg(long = "delay-ms", value_name = "MS", help_heading = "Lookup")]
    pub delay_ms: Option<u64>,

    /// Results file (default: results.csv)
    #[arg(short = 'o', long = "output", value_name = "FILE", help_heading = "Output")]
    pub output: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(short = 'j', long = "json", help_heading = "Output")]
    pub json: bool,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Show per-check timings and lookup details
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    logger::init_cli_logger(args.verbose || args.debug);

    if let Err(e) = run_domain_hunt(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if args.batch_size == Some(0) {
        return Err("Batch size must be at least 1".to_string());
    }

    if let Some(tlds) = &args.tlds {
        if tlds.iter().any(|t| t.trim().trim_start_matches('.').is_empty()) {
            return Err("TLDs cannot be empty".to_string());
        }
    }

    if let Some(date) = &args.date {
        parse_reference_date(date)?;
    }

    Ok(())
}

/// Parse a `--date` value.
fn parse_reference_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid --date '{}': {} (expected YYYY-MM-DD)", value, e))
}

/// Main hunting logic
async fn run_domain_hunt(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args)?;
    let reference_date = match &args.date {
        Some(date) => parse_reference_date(date)?,
        None => Local::now().date_naive(),
    };

    debug!(?config, %reference_date, "Resolved configuration");

    let raw_names = read_raw_names(&args.files)?;

    if args.dry_run {
        let prepared = prepare_batch(&raw_names, &config, reference_date)?;
        if args.json {
            let domains: Vec<&str> = prepared.candidates.iter().map(|c| c.domain.as_str()).collect();
            println!("{}", serde_json::to_string_pretty(&domains)?);
        } else {
            ui::print_dry_run(&prepared);
        }
        return Ok(());
    }

    // A file left over from an earlier run would read as today's findings
    remove_stale_output(&config.output);

    let checker = DomainChecker::with_config(config.clone())?;
    let report = run_hunt(&raw_names, &config, reference_date, &checker).await?;
    let written = write_results_csv(&config.output, &report.groups)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::print_header(&report.selection, config.tlds.len(), reference_date);
        ui::print_groups(&report.groups, args.debug);
        ui::print_summary(
            &report.summary,
            report.duration,
            written.then_some(config.output.as_path()),
        );
    }

    Ok(())
}

/// Build the run configuration.
///
/// Precedence: defaults < config file < DH_* environment < CLI flags.
fn build_config(args: &Args) -> Result<HuntConfig, Box<dyn std::error::Error>> {
    let mut config = HuntConfig::default();
    let config_manager = ConfigManager::new(args.verbose);
    let env_config = load_env_config();

    // Step 1: config files
    if let Some(explicit_config_path) = args.config.as_ref().or(env_config.config.as_ref()) {
        info!(path = %explicit_config_path.display(), "Using explicit config file");

        let file_config = config_manager.load_file(explicit_config_path).map_err(|e| {
            format!(
                "Failed to load config file '{}': {}",
                explicit_config_path.display(),
                e
            )
        })?;

        config = file_config.apply_to(config);
    } else {
        match config_manager.discover_and_load() {
            Ok(file_config) => config = file_config.apply_to(config),
            Err(e) => warn!("Config discovery warning: {}", e),
        }
    }

    // Step 2: DH_* environment variables
    config = env_config.apply_to(config);

    // Step 3: CLI arguments (highest precedence)
    Ok(apply_cli_args_to_config(config, args))
}

/// Apply CLI arguments to config. Only flags the user passed override.
fn apply_cli_args_to_config(mut config: HuntConfig, args: &Args) -> HuntConfig {
    if let Some(tlds) = &args.tlds {
        config = config.with_tlds(tlds.clone());
    }
    if let Some(affixes) = &args.affixes {
        config = config.with_affixes(affixes.clone());
    }
    if let Some(batch_size) = args.batch_size {
        config = config.with_batch_size(batch_size);
    }
    if let Some(delay_ms) = args.delay_ms {
        config = config.with_delay(Duration::from_millis(delay_ms));
    }
    if let Some(output) = &args.output {
        config = config.with_output(output.clone());
    }
    config
}

/// Collect raw names from the given files, or stdin when none (or "-") is given.
fn read_raw_names(files: &[PathBuf]) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if files.is_empty() {
        return read_stdin_names();
    }

    let mut names = Vec::new();
    for file in files {
        if file.as_os_str() == "-" {
            names.extend(read_stdin_names()?);
        } else {
            let from_file = read_name_file(file)?;
            debug!(path = %file.display(), names = from_file.len(), "Read name file");
            names.extend(from_file);
        }
    }
    Ok(names)
}

fn read_stdin_names() -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let content = std::io::read_to_string(std::io::stdin())?;
    Ok(parse_name_list(&content))
}

/// Remove the previous run's results file. Failure is only a warning.
fn remove_stale_output(path: &Path) {
    if !path.exists() {
        return;
    }
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "Removed stale results file"),
        Err(e) => warn!(path = %path.display(), error = %e, "Could not remove stale results file"),
    }
}
