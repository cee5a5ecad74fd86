// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for resource discovery

use thiserror::Error;

use crate::parallel::TaskFailure;

/// Errors raised by a resource supplier while listing resources
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnumerationError {
    /// The credentials in use are not allowed to list a resource type
    #[error("listing {listed_type} is forbidden (while enumerating {resource_type})")]
    AccessDenied {
        /// Resource type the supplier produces
        resource_type: String,
        /// Resource type whose listing was denied
        listed_type: String,
    },

    /// Any other enumeration failure
    #[error("failed to enumerate {resource_type}: {message}")]
    Failed {
        /// Resource type the supplier produces
        resource_type: String,
        /// Underlying failure description
        message: String,
    },
}

impl EnumerationError {
    /// Resource type the failing supplier was responsible for
    pub fn resource_type(&self) -> &str {
        match self {
            Self::AccessDenied { resource_type, .. } | Self::Failed { resource_type, .. } => {
                resource_type
            }
        }
    }
}

/// Errors that abort a scan
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    /// A supplier failed and the alert router deemed the failure fatal
    #[error("Enumeration error: {0}")]
    Enumeration(#[from] EnumerationError),

    /// The scan was stopped before it completed
    #[error("interrupted")]
    Interrupted,

    /// A unit of work could not be driven to completion (panic, aborted task)
    #[error("Runner error: {0}")]
    Runner(String),
}

impl From<TaskFailure> for ScanError {
    fn from(failure: TaskFailure) -> Self {
        ScanError::Runner(failure.message)
    }
}

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;
