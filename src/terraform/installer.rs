// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Installation
//!
//! Providers live under `<home>/.driftctl/plugins/<os>_<arch>/`, one binary
//! per provider identity. Installation is idempotent:
//!
//! | State of the binary path | Outcome                                  |
//! |--------------------------|------------------------------------------|
//! | regular file             | returned as-is, no network access        |
//! | directory                | [`InstallError::ConflictingPath`]        |
//! | absent                   | downloaded, extracted, then returned     |
//!
//! A directory in place of the binary is never removed: it may hold user
//! data, so the conflict is reported and left for the user to resolve.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::downloader::{DownloadError, ProviderDownloader};
use super::platform::Platform;
use super::provider_config::ProviderConfig;
use crate::config::InstallerConfig;

/// Directory under the home directory holding driftctl state
pub const DRIFTCTL_DIR: &str = ".driftctl";
/// Directory under [`DRIFTCTL_DIR`] holding provider plugins
pub const PLUGINS_DIR: &str = "plugins";

/// Errors that can occur while installing a provider
#[derive(Debug, Error)]
pub enum InstallError {
    /// A directory sits where the provider binary should be
    #[error("found directory instead of provider binary in {}", .0.display())]
    ConflictingPath(PathBuf),

    /// No home directory configured and none could be resolved
    #[error("unable to determine home directory")]
    HomeDirUnavailable,

    /// The binary path could not be inspected
    #[error("unable to stat {}: {source}", .path.display())]
    Io {
        /// Inspected path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Download or extraction failed
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The archive did not contain the expected binary
    #[error("provider archive did not contain {}", .0.display())]
    MissingBinary(PathBuf),
}

/// Installs one provider into the local plugin directory
pub struct ProviderInstaller {
    downloader: Arc<dyn ProviderDownloader>,
    config: ProviderConfig,
    home_dir: Option<PathBuf>,
    platform: Platform,
}

impl ProviderInstaller {
    /// Create an installer for `config`
    pub fn new(
        config: ProviderConfig,
        downloader: Arc<dyn ProviderDownloader>,
        settings: &InstallerConfig,
    ) -> Self {
        Self {
            downloader,
            config,
            home_dir: settings.home_dir.clone(),
            platform: Platform::current(),
        }
    }

    /// Provider identity being installed
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Plugin directory for the running platform
    pub fn provider_dir(&self) -> Result<PathBuf, InstallError> {
        let home = match &self.home_dir {
            Some(home) => home.clone(),
            None => dirs::home_dir().ok_or(InstallError::HomeDirUnavailable)?,
        };

        Ok(home
            .join(DRIFTCTL_DIR)
            .join(PLUGINS_DIR)
            .join(self.platform.dir_name()))
    }

    /// Full path of the provider binary
    pub fn provider_path(&self) -> Result<PathBuf, InstallError> {
        Ok(self.provider_dir()?.join(self.config.binary_name()))
    }

    /// Make sure the provider is installed and return its path
    pub async fn install(&self) -> Result<PathBuf, InstallError> {
        let provider_dir = self.provider_dir()?;
        let provider_path = provider_dir.join(self.config.binary_name());

        if is_installed(&provider_path).await? {
            debug!(path = %provider_path.display(), "Provider already installed");
            return Ok(provider_path);
        }

        let url = self
            .downloader
            .provider_url(&self.config.key, &self.config.version);
        info!(
            provider = %self.config.key,
            version = %self.config.version,
            "Downloading terraform provider"
        );
        self.downloader.download(&url, &provider_dir).await?;

        if !is_installed(&provider_path).await? {
            return Err(InstallError::MissingBinary(provider_path));
        }

        info!(path = %provider_path.display(), "Provider installed");
        Ok(provider_path)
    }
}

/// `true` for a regular file, `false` when absent, an error for a directory
async fn is_installed(path: &Path) -> Result<bool, InstallError> {
    match tokio::fs::metadata(path).await {
        Ok(info) if info.is_dir() => Err(InstallError::ConflictingPath(path.to_path_buf())),
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(InstallError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
