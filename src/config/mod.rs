//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, files, output_formats, timeouts};
use crate::core::error::{ChanProbeError, Result};
use crate::validation::ranking::RankMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-probe timeout in seconds
    pub timeout: Option<u64>,

    /// Number of probes allowed in flight at once
    pub concurrency: Option<usize>,

    /// Number of channels kept in top-N mode
    pub top_n: Option<usize>,

    /// Keep every reachable channel instead of the top N
    pub keep_all: Option<bool>,

    /// Group results by channel name
    pub grouped: Option<bool>,

    /// Maximum channels kept per group in grouped mode
    pub per_group: Option<usize>,

    /// Ask HTTP servers for only the first N bytes (Range header)
    pub range_bytes: Option<u64>,

    /// Executable used to probe rtmp streams
    pub ffprobe_path: Option<String>,

    /// Probe each URL only once, keeping its first entry
    pub dedup: Option<bool>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    pub skip_ssl_verification: Option<bool>,

    /// File the ranked list is written to
    pub output_path: Option<String>,

    /// Console output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            concurrency: Some(defaults::CONCURRENCY),
            top_n: Some(defaults::TOP_N),
            keep_all: Some(false),
            grouped: Some(false),
            per_group: None,
            range_bytes: None,
            ffprobe_path: None,
            dedup: Some(false),
            user_agent: None,
            proxy: None,
            skip_ssl_verification: Some(false),
            output_path: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChanProbeError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ChanProbeError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        let locations: Vec<PathBuf> = (0..=files::CONFIG_SEARCH_DEPTH)
            .map(|depth| Path::new(&"../".repeat(depth)).join(files::CONFIG_FILE_NAME))
            .collect();

        Self::load_first_existing(&locations)
    }

    /// Load the first config file in `paths` that exists and is valid.
    ///
    /// A file that exists but fails to load is skipped with a warning.
    /// Defaults are used when no file qualifies.
    pub fn load_first_existing<P: AsRef<Path>>(paths: &[P]) -> Self {
        for path in paths {
            let path: &Path = path.as_ref();
            if !path.is_file() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => warn!("Ignoring config file '{}': {e}", path.display()),
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Probing
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(range_bytes) = cli_config.range_bytes {
            self.range_bytes = Some(range_bytes);
        }
        if let Some(ref ffprobe_path) = cli_config.ffprobe_path {
            self.ffprobe_path = Some(ffprobe_path.clone());
        }
        if cli_config.dedup {
            self.dedup = Some(true);
        }

        // Ranking
        if let Some(top_n) = cli_config.top_n {
            self.top_n = Some(top_n);
        }
        if cli_config.keep_all {
            self.keep_all = Some(true);
        }
        if cli_config.grouped {
            self.grouped = Some(true);
        }
        if let Some(per_group) = cli_config.per_group {
            self.per_group = Some(per_group);
        }

        // Output & format
        if let Some(ref output_path) = cli_config.output_path {
            self.output_path = Some(output_path.clone());
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }

        // Network & security
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }
        if cli_config.skip_ssl_verification {
            self.skip_ssl_verification = Some(true);
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(defaults::CONCURRENCY)
    }

    pub fn ffprobe_path(&self) -> &str {
        self.ffprobe_path.as_deref().unwrap_or(defaults::FFPROBE)
    }

    pub fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(defaults::OUTPUT_FILE)
    }

    /// How the reachable channels are selected and ordered.
    ///
    /// Grouped mode wins over `keep_all`, which wins over top-N.
    pub fn rank_mode(&self) -> RankMode {
        if self.grouped.unwrap_or(false) {
            RankMode::Grouped {
                per_group: self.per_group,
            }
        } else if self.keep_all.unwrap_or(false) {
            RankMode::All
        } else {
            RankMode::Top(self.top_n.unwrap_or(defaults::TOP_N))
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(ChanProbeError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(ChanProbeError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large for a probe. Expected at most {} seconds.",
                    timeouts::MAX_TIMEOUT_SECONDS
                )));
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(ChanProbeError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > defaults::MAX_CONCURRENCY {
                return Err(ChanProbeError::Config(format!(
                    "Concurrency of {concurrency} is extremely high and may exhaust sockets. Consider using a smaller value."
                )));
            }
        }

        if self.top_n == Some(0) {
            return Err(ChanProbeError::Config(
                "Top-N cannot be 0. Expected a positive integer.".to_string(),
            ));
        }

        if self.per_group == Some(0) {
            return Err(ChanProbeError::Config(
                "Per-group limit cannot be 0. Expected a positive integer.".to_string(),
            ));
        }

        if self.range_bytes == Some(0) {
            return Err(ChanProbeError::Config(
                "Range bytes cannot be 0. Omit the option to disable the Range header.".to_string(),
            ));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(ChanProbeError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Probing
    pub timeout: Option<u64>,         // --timeout
    pub concurrency: Option<usize>,   // --concurrency
    pub range_bytes: Option<u64>,     // --range-bytes
    pub ffprobe_path: Option<String>, // --ffprobe
    pub dedup: bool,                  // --dedup

    // Ranking
    pub top_n: Option<usize>,     // --top
    pub keep_all: bool,           // --all
    pub grouped: bool,            // --grouped
    pub per_group: Option<usize>, // --per-group

    // Output & format
    pub output_path: Option<String>,   // --output
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress

    // Network & security
    pub user_agent: Option<String>,  // --user-agent
    pub proxy: Option<String>,       // --proxy
    pub skip_ssl_verification: bool, // --insecure

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
