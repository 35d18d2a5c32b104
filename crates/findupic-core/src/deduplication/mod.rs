//! Grouping of images by the digest of their decoded pixels.
//!
//! Each root is walked in argument order. The walk itself is sequential; the
//! candidates it finds are decoded and hashed on a rayon pool with an
//! order-preserving map, and the outcomes are folded into the [`ResultSet`](crate::types::ResultSet) on
//! the calling thread. Group order and the order of paths inside a group are
//! therefore the same whatever the thread count.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::config::Config;
use crate::discovery;
use crate::error::Result;
use crate::logging;
use crate::processing::hash_image;
use crate::types::{Digest, ErrorRecord, ImageFile, ScanReport};

/// Outcome of processing one walked entry
type FileOutcome = std::result::Result<(ImageFile, Result<Digest>), ErrorRecord>;

/// Find images with identical decoded pixels under `directories`.
///
/// Failures on individual files or directories are collected in the returned
/// report and never stop the scan. The only error returned is a failure to
/// build the worker pool.
pub fn find_duplicates<P: AsRef<Path> + Sync>(
    directories: &[P],
    config: &Config,
) -> Result<ScanReport> {
    let threads = config.effective_threads();
    let progress = progress_bar(config);

    let report = if threads <= 1 {
        scan(directories, config, false, &progress)
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        pool.install(|| scan(directories, config, true, &progress))
    };

    progress.finish_and_clear();

    info!(
        "Hashed {} of {} images ({} bytes) into {} groups, {} duplicates, {} errors",
        report.results.image_count(),
        report.scanned,
        report.bytes_scanned,
        report.results.len(),
        report.results.duplicate_count(),
        report.error_count()
    );

    Ok(report)
}

fn scan<P: AsRef<Path>>(
    directories: &[P],
    config: &Config,
    parallel: bool,
    progress: &ProgressBar,
) -> ScanReport {
    let mut report = ScanReport::default();

    for directory in directories {
        let directory = directory.as_ref();
        info!("Scanning {}", directory.display());

        let entries = discovery::discover_in_directory(directory, config);
        let candidates = entries.iter().filter(|entry| entry.is_ok()).count();
        progress.inc_length(candidates as u64);

        let outcomes: Vec<FileOutcome> = if parallel {
            entries
                .into_par_iter()
                .map(|entry| process_entry(entry, progress))
                .collect()
        } else {
            entries
                .into_iter()
                .map(|entry| process_entry(entry, progress))
                .collect()
        };

        for outcome in outcomes {
            record_outcome(&mut report, outcome);
        }
    }

    report
}

fn process_entry(
    entry: std::result::Result<ImageFile, ErrorRecord>,
    progress: &ProgressBar,
) -> FileOutcome {
    let image = entry?;
    let digest = hash_image(&image.path);
    progress.inc(1);
    Ok((image, digest))
}

fn record_outcome(report: &mut ScanReport, outcome: FileOutcome) {
    let record = match outcome {
        Ok((image, Ok(digest))) => {
            report.scanned += 1;
            report.bytes_scanned += image.size;
            logging::log_hashed(&image.path, &digest);
            report.results.insert(digest, image.path);
            return;
        }
        Ok((image, Err(e))) => {
            report.scanned += 1;
            report.bytes_scanned += image.size;
            ErrorRecord::from_error(image.path, &e)
        }
        Err(record) => record,
    };

    logging::log_scan_error(&record);
    report.errors.push(record);
}

fn progress_bar(config: &Config) -> ProgressBar {
    if !config.show_progress {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    progress.set_style(style);
    progress.set_message("Hashing images...");
    progress
}
