// Copyright (c) 2025 - Cowboy AI, Inc.
//! Runtime configuration
//!
//! Everything the scanner and the provider installer need is passed in
//! explicitly through these structs; nothing is read from process-wide
//! state once they are built.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::scanner::DEFAULT_PARALLELISM;

/// Overrides the home directory under which providers are installed
pub const ENV_HOME: &str = "DRIFTCTL_HOME";
/// Overrides the number of suppliers enumerated at once
pub const ENV_PARALLELISM: &str = "DRIFTCTL_PARALLELISM";
/// Overrides the provider download timeout, in seconds
pub const ENV_DOWNLOAD_TIMEOUT: &str = "DRIFTCTL_DOWNLOAD_TIMEOUT";

/// Configuration loading errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed
    #[error("invalid value for {var}: {value}")]
    Invalid {
        /// Variable name
        var: String,
        /// Offending value
        value: String,
    },
}

/// Scanner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Maximum number of suppliers enumerated at once
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_parallelism() -> usize {
    DEFAULT_PARALLELISM
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
        }
    }
}

/// Provider download settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloaderConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent sent to the release server
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    300
}

fn default_user_agent() -> String {
    format!("driftctl/{}", env!("CARGO_PKG_VERSION"))
}

impl DownloaderConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Provider installation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Home directory holding `.driftctl/`; the user's home when unset
    #[serde(default)]
    pub home_dir: Option<PathBuf>,
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Scanner settings
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Download settings
    #[serde(default)]
    pub downloader: DownloaderConfig,

    /// Installation settings
    #[serde(default)]
    pub installer: InstallerConfig,
}

impl DriftConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(home) = lookup(ENV_HOME).filter(|h| !h.is_empty()) {
            config.installer.home_dir = Some(PathBuf::from(home));
        }
        if let Some(value) = lookup(ENV_PARALLELISM) {
            config.scanner.parallelism = parse_var(ENV_PARALLELISM, &value)?;
        }
        if let Some(value) = lookup(ENV_DOWNLOAD_TIMEOUT) {
            config.downloader.timeout_secs = parse_var(ENV_DOWNLOAD_TIMEOUT, &value)?;
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .ok()
        .ok_or_else(|| ConfigError::Invalid {
            var: var.to_string(),
            value: value.to_string(),
        })
}
