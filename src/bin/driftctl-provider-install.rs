// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Installer
//!
//! Installs one Terraform provider into the local driftctl plugin directory
//! and prints where it lives.
//!
//! Run with: cargo run --bin driftctl-provider-install
//!
//! Environment:
//! - `PROVIDER_KEY`: provider name (default: `aws`)
//! - `PROVIDER_VERSION`: provider version (required)
//! - `PROVIDER_POSTFIX`: plugin protocol postfix (default: `x5`)
//! - `DRIFTCTL_HOME`, `DRIFTCTL_DOWNLOAD_TIMEOUT`: see `DriftConfig::from_env`

use anyhow::{Context, Result};
use driftctl_core::terraform::{HttpProviderDownloader, ProviderConfig, ProviderInstaller};
use driftctl_core::DriftConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Load the provider identity from environment variables
fn provider_from_env() -> Result<ProviderConfig> {
    let key = std::env::var("PROVIDER_KEY").unwrap_or_else(|_| "aws".to_string());
    let version = std::env::var("PROVIDER_VERSION").context("PROVIDER_VERSION not set")?;
    let postfix = std::env::var("PROVIDER_POSTFIX").unwrap_or_else(|_| "x5".to_string());

    Ok(ProviderConfig::new(key, version, postfix))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = DriftConfig::from_env().context("Failed to load configuration")?;
    let provider = provider_from_env()?;
    info!("📋 Provider: {} {} ({})", provider.key, provider.version, provider.postfix);

    let downloader = HttpProviderDownloader::new(&config.downloader)
        .context("Failed to create HTTP client")?;
    let installer = ProviderInstaller::new(provider, Arc::new(downloader), &config.installer);

    let path = tokio::select! {
        result = installer.install() => result.context("Failed to install provider")?,
        _ = tokio::signal::ctrl_c() => {
            warn!("⚠️ Interrupted, provider not installed");
            return Ok(());
        }
    };

    info!("✅ Provider installed at {}", path.display());
    Ok(())
}
