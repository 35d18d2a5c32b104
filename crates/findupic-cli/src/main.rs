use anyhow::Context;
use clap::Parser;
use findupic_core::{logging, report, Config, ImageDeduper, ScanReport};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit status when the scan completed but some files failed
const EXIT_SCAN_ERRORS: u8 = 1;

/// Exit status when the scan could not start
const EXIT_FATAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "findupic")]
#[command(about = "Find images whose decoded pixels are identical")]
#[command(version)]
struct Cli {
    /// Directories to search for duplicate images
    #[arg(required_unless_present = "generate_config")]
    directories: Vec<PathBuf>,

    /// Enable CSV output
    #[arg(long)]
    csv: bool,

    /// Write error messages to FILE instead of stderr
    #[arg(long, value_name = "FILE")]
    error_log: Option<PathBuf>,

    /// Number of worker threads (0 = one per CPU)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Maximum directory depth to descend
    #[arg(long)]
    max_depth: Option<usize>,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Path to a JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the default configuration to FILE and exit
    #[arg(long, value_name = "FILE", exclusive = true)]
    generate_config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    // Parse command line arguments; usage errors exit with status 2
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    if let Some(path) = &cli.generate_config {
        Config::default()
            .save_to_file(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Configuration file generated at: {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = build_config(cli)?;
    logging::init_logger(config.log_level).context("Failed to initialize logger")?;

    // Open the error sink before any traversal
    let error_log = open_error_log(cli.error_log.as_deref())?;

    let deduper = ImageDeduper::new(config)?;
    info!("Starting duplicate image scan...");
    let scan = deduper.run(cli.directories.as_slice())?;
    info!("Scan complete");

    let stdout = io::stdout();
    let error_count = write_outputs(&scan, cli.csv, stdout.lock(), error_log)?;

    if error_count > 0 {
        eprintln!(
            "Encountered {} error(s). Check the error log for details.",
            error_count
        );
        return Ok(ExitCode::from(EXIT_SCAN_ERRORS));
    }

    Ok(ExitCode::SUCCESS)
}

/// Load the config file if given, then apply command line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(threads) = cli.threads {
        config.threads = threads;
    }
    if cli.max_depth.is_some() {
        config.max_depth = cli.max_depth;
    }
    if cli.progress {
        config.show_progress = true;
    }
    config.log_level = config.log_level.raised_by(cli.verbose);

    config.validate()?;
    Ok(config)
}

fn open_error_log(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Error creating error log file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stderr())),
    }
}

/// Write the report and the error log; returns the number of scan errors
fn write_outputs<W: Write, E: Write>(
    scan: &ScanReport,
    csv: bool,
    out: W,
    error_log: E,
) -> anyhow::Result<usize> {
    if csv {
        report::write_csv(&scan.results, out).context("Failed to write CSV output")?;
    } else {
        report::write_text(&scan.results, out).context("Failed to write output")?;
    }

    report::write_error_log(&scan.errors, error_log).context("Failed to write error log")?;

    Ok(scan.error_count())
}
