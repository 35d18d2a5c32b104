use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound accepted for `threads`
const MAX_THREADS: usize = 1024;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level name as understood by `env_logger` filters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Raise the level by `steps`, saturating at `Trace`
    pub fn raised_by(self, steps: u8) -> Self {
        const ORDER: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let current = ORDER.iter().position(|level| *level == self).unwrap_or(1);
        ORDER[(current + steps as usize).min(ORDER.len() - 1)]
    }
}

/// Configuration for a duplicate scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of threads used to decode and hash images (0 = auto, 1 = sequential)
    pub threads: usize,

    /// Maximum directory depth for scanning
    pub max_depth: Option<usize>,

    /// Whether to draw a progress bar on stderr
    pub show_progress: bool,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: 0, // Auto
            max_depth: None,
            show_progress: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(Error::Configuration(
                "Maximum depth must be at least 1".to_string(),
            ));
        }

        if self.threads > MAX_THREADS {
            return Err(Error::Configuration(format!(
                "Thread count must be at most {}",
                MAX_THREADS
            )));
        }

        Ok(())
    }

    /// Number of worker threads after resolving `0` to the CPU count
    pub fn effective_threads(&self) -> usize {
        match self.threads {
            0 => num_cpus::get().max(1),
            n => n,
        }
    }
}
