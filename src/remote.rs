// Copyright (c) 2025 - Cowboy AI, Inc.
//! Enumeration error routing
//!
//! Missing read permissions on one resource family are common in real
//! accounts and must not prevent the rest of the account from being scanned.
//! Such failures become alerts; everything else stops the scan.

use tracing::warn;

use crate::alerter::{Alert, Alerter};
use crate::errors::{EnumerationError, ScanError};

/// Turn an enumeration failure into an alert or a fatal scan error
///
/// Access-denied failures are recorded on `alerter` and suppressed. Any other
/// failure is returned as fatal.
pub fn handle_enumeration_error(err: EnumerationError, alerter: &Alerter) -> Result<(), ScanError> {
    match err {
        EnumerationError::AccessDenied {
            resource_type,
            listed_type,
        } => {
            let message = format!(
                "Ignoring {} from drift calculation: Listing {} is forbidden.",
                resource_type, listed_type
            );
            warn!("{}", message);
            alerter.send_alert(resource_type, Alert::ignoring(message));
            Ok(())
        }
        err @ EnumerationError::Failed { .. } => Err(ScanError::Enumeration(err)),
    }
}
