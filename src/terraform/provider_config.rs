// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider identity

use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// Release server hosting Terraform providers
pub const RELEASES_URL: &str = "https://releases.hashicorp.com";

/// A versioned Terraform provider
///
/// ```rust
/// use driftctl_core::terraform::ProviderConfig;
///
/// let config = ProviderConfig::new("aws", "3.19.0", "x5");
/// assert_eq!(config.binary_name(), "terraform-provider-aws_v3.19.0_x5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name, e.g. `aws`
    pub key: String,
    /// Provider version, e.g. `3.19.0`
    pub version: String,
    /// Plugin protocol postfix, e.g. `x5`
    pub postfix: String,
}

impl ProviderConfig {
    /// Create a provider identity
    pub fn new(
        key: impl Into<String>,
        version: impl Into<String>,
        postfix: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            version: version.into(),
            postfix: postfix.into(),
        }
    }

    /// Release archive URL for the running platform
    pub fn download_url(&self) -> String {
        self.download_url_for(&Platform::current())
    }

    /// Release archive URL for an explicit platform
    pub fn download_url_for(&self, platform: &Platform) -> String {
        provider_url(&self.key, &self.version, platform)
    }

    /// File name of the provider binary inside its release archive
    pub fn binary_name(&self) -> String {
        format!(
            "terraform-provider-{}_v{}_{}",
            self.key, self.version, self.postfix
        )
    }
}

/// Release archive URL of provider `name` at `version`
pub fn provider_url(name: &str, version: &str, platform: &Platform) -> String {
    format!(
        "{}/terraform-provider-{}/{}/terraform-provider-{}_{}_{}_{}.zip",
        RELEASES_URL, name, version, name, version, platform.os, platform.arch
    )
}
