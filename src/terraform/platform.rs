// Copyright (c) 2025 - Cowboy AI, Inc.
//! Target platform naming
//!
//! Terraform release archives and plugin directories use Go's `GOOS` /
//! `GOARCH` vocabulary, which differs from Rust's target names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system and architecture, in Terraform naming
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// Operating system, e.g. `linux`, `darwin`
    pub os: String,
    /// CPU architecture, e.g. `amd64`, `arm64`
    pub arch: String,
}

impl Platform {
    /// Build a platform from Terraform names
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this binary runs on
    pub fn current() -> Self {
        Self::from_rust(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Translate Rust `target_os` / `target_arch` names
    pub fn from_rust(os: &str, arch: &str) -> Self {
        let os = match os {
            "macos" => "darwin",
            other => other,
        };
        let arch = match arch {
            "x86_64" => "amd64",
            "x86" => "386",
            "aarch64" => "arm64",
            "powerpc64" => "ppc64",
            other => other,
        };
        Self::new(os, arch)
    }

    /// Directory name for this platform's plugins, e.g. `linux_amd64`
    pub fn dir_name(&self) -> String {
        format!("{}_{}", self.os, self.arch)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}
