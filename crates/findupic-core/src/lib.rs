//! Core functionality for finding duplicate images.
//!
//! Two images are duplicates when their decoded pixels are identical, whatever
//! their container format or encoding settings. This library provides:
//! - File discovery and extension-based classification
//! - Decoding and normalization to a canonical RGBA raster
//! - SHA-256 content digests of that raster
//! - Grouping of paths by digest, and text/CSV reports

// -- External Dependencies --

use log::info;

// -- Standard Library --
use std::path::Path;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod deduplication;
pub mod discovery;
pub mod logging;
pub mod processing;
pub mod report;
pub mod types;

/// Main entry point for a duplicate scan
pub struct ImageDeduper {
    config: Config,
}

impl ImageDeduper {
    /// Create a new ImageDeduper, rejecting an invalid configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline: walk, decode, hash and group
    pub fn run<P: AsRef<Path> + Sync>(&self, directories: &[P]) -> Result<ScanReport> {
        info!(
            "Scanning {} directories with {} threads",
            directories.len(),
            self.config.effective_threads()
        );
        deduplication::find_duplicates(directories, &self.config)
    }
}
