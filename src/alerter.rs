// Copyright (c) 2025 - Cowboy AI, Inc.
//! Alerts raised during a scan
//!
//! Suppressed enumeration failures do not abort a scan, but the user still
//! needs to know that part of the account could not be read. The [`Alerter`]
//! collects those alerts, keyed by resource type, for whoever renders the
//! scan outcome.
//!
//! Which errors are suppressed is decided by an [`AlertRouter`]; the scanner
//! only ever talks to that trait.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::errors::{EnumerationError, ScanError};

/// A single alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Human readable description
    pub message: String,

    /// Whether resources of the alerted type should be left out of drift
    /// calculation
    #[serde(default)]
    pub should_ignore_resource: bool,
}

impl Alert {
    /// Create an alert that does not affect drift calculation
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            should_ignore_resource: false,
        }
    }

    /// Create an alert that excludes its resource type from drift calculation
    pub fn ignoring(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            should_ignore_resource: true,
        }
    }
}

/// Alerts grouped by the resource type they concern
pub type Alerts = HashMap<String, Vec<Alert>>;

/// Decides whether an enumeration failure aborts the scan
pub trait AlertRouter: Send + Sync {
    /// `Ok(())` suppresses the failure, `Err` makes it fatal
    fn handle(&self, err: EnumerationError) -> Result<(), ScanError>;
}

/// Thread-safe alert collector
#[derive(Debug, Default)]
pub struct Alerter {
    alerts: Mutex<Alerts>,
}

impl Alerter {
    /// Create an empty alerter
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an alert under `key`
    pub fn send_alert(&self, key: impl Into<String>, alert: Alert) {
        self.lock().entry(key.into()).or_default().push(alert);
    }

    /// Snapshot of every alert recorded so far
    pub fn alerts(&self) -> Alerts {
        self.lock().clone()
    }

    /// True when no alert has been recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether resources of `resource_type` must be left out of drift
    /// calculation
    pub fn is_resource_ignored(&self, resource_type: &str) -> bool {
        self.lock()
            .get(resource_type)
            .is_some_and(|alerts| alerts.iter().any(|a| a.should_ignore_resource))
    }

    fn lock(&self) -> MutexGuard<'_, Alerts> {
        self.alerts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AlertRouter for Alerter {
    fn handle(&self, err: EnumerationError) -> Result<(), ScanError> {
        crate::remote::handle_enumeration_error(err, self)
    }
}
