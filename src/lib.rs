//! Cloud resource discovery and Terraform provider provisioning
//!
//! This crate provides the two pieces a drift scan is built on:
//!
//! - [`Scanner`]: runs every resource supplier concurrently, routes their
//!   failures through an [`AlertRouter`] and normalizes what they return
//! - [`terraform::ProviderInstaller`]: installs the provider plugins those
//!   suppliers rely on, idempotently and with verified downloads

pub mod alerter;
pub mod config;
pub mod errors;
pub mod parallel;
pub mod remote;
pub mod resource;
pub mod scanner;
pub mod terraform;

// Re-export commonly used types
pub use alerter::{Alert, AlertRouter, Alerter};
pub use config::{DriftConfig, DownloaderConfig, InstallerConfig, ScannerConfig};
pub use errors::{EnumerationError, ScanError, ScanResult};
pub use resource::{AbstractResource, NormalizeError, NormalizedResource, Resource, ResourceSupplier};
pub use scanner::Scanner;
