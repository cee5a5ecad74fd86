// Copyright (c) 2025 - Cowboy AI, Inc.
//! Terraform provider provisioning
//!
//! Resource suppliers talk to cloud APIs through Terraform provider plugins.
//! This module makes sure the right provider binary is present locally:
//!
//! ```text
//! ProviderConfig ──> ProviderInstaller ──absent──> ProviderDownloader
//!  (key, version,         │                         GET archive
//!   postfix)              │                         verify length
//!                         │                         unzip into plugin dir
//!                         ▼
//!     <home>/.driftctl/plugins/<os>_<arch>/terraform-provider-<key>_v<version>_<postfix>
//! ```

pub mod decompressor;
pub mod downloader;
pub mod installer;
pub mod platform;
pub mod provider_config;

pub use decompressor::ZipDecompressor;
pub use downloader::{copy_verified, DownloadError, HttpProviderDownloader, ProviderDownloader};
pub use installer::{InstallError, ProviderInstaller};
pub use platform::Platform;
pub use provider_config::{provider_url, ProviderConfig, RELEASES_URL};
