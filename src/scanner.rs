// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Discovery
//!
//! The [`Scanner`] asks every registered [`ResourceSupplier`] for its
//! resources in parallel and folds the answers into one result set.
//!
//! # Flow
//!
//! ```text
//!                  ┌─> supplier 1 ─┐
//! resources() ─run─┼─> supplier 2 ─┼─> stream ──normalize──> Vec<Box<dyn Resource>>
//!                  └─> supplier n ─┘
//!                         │
//!                       Err(e) ──> AlertRouter ──Ok──> empty batch
//!                                        └──Err──> scan fails
//! ```
//!
//! Supplier failures are never fatal on their own: the [`AlertRouter`]
//! decides. Normalization failures are always tolerated, the original
//! resource being kept.
//!
//! A scanner runs a single scan. Build a new one for every scan.

use std::sync::Arc;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::alerter::AlertRouter;
use crate::config::ScannerConfig;
use crate::errors::{ScanError, ScanResult};
use crate::parallel::ParallelRunner;
use crate::resource::{normalize, Resource, ResourceSupplier};

/// Suppliers enumerated at once unless configured otherwise
pub const DEFAULT_PARALLELISM: usize = 10;

/// Batch of resources produced by one supplier
type Batch = Vec<Box<dyn Resource>>;

/// Parallel resource discovery over a set of suppliers
pub struct Scanner {
    resource_suppliers: Vec<Arc<dyn ResourceSupplier>>,
    runner: ParallelRunner<Batch, ScanError>,
    alerter: Arc<dyn AlertRouter>,
}

impl Scanner {
    /// Create a scanner enumerating [`DEFAULT_PARALLELISM`] suppliers at once
    pub fn new(
        resource_suppliers: Vec<Arc<dyn ResourceSupplier>>,
        alerter: Arc<dyn AlertRouter>,
    ) -> Self {
        Self::with_config(resource_suppliers, alerter, &ScannerConfig::default())
    }

    /// Create a scanner from explicit configuration
    pub fn with_config(
        resource_suppliers: Vec<Arc<dyn ResourceSupplier>>,
        alerter: Arc<dyn AlertRouter>,
        config: &ScannerConfig,
    ) -> Self {
        Self {
            resource_suppliers,
            runner: ParallelRunner::new(config.parallelism),
            alerter,
        }
    }

    /// Enumerate every supplier and return the normalized resources
    ///
    /// Fails with the first fatal enumeration error, or with
    /// [`ScanError::Interrupted`] when [`stop`](Self::stop) was called.
    pub async fn resources(&self) -> ScanResult<Vec<Box<dyn Resource>>> {
        let span = info_span!("scan", scan_id = %Uuid::now_v7());
        self.scan().instrument(span).await
    }

    /// Stop the scan in progress
    ///
    /// Suppliers already running are left to finish but their results are
    /// not waited for.
    pub fn stop(&self) {
        debug!("Stopping scanner");
        self.runner.stop(ScanError::Interrupted);
    }

    async fn scan(&self) -> ScanResult<Vec<Box<dyn Resource>>> {
        debug!(suppliers = self.resource_suppliers.len(), "Starting scan");

        for supplier in &self.resource_suppliers {
            let supplier = Arc::clone(supplier);
            let alerter = Arc::clone(&self.alerter);
            self.runner.run(async move {
                match supplier.resources().await {
                    Ok(resources) => {
                        for res in &resources {
                            debug!(
                                id = res.terraform_id(),
                                resource_type = res.terraform_type(),
                                "Found cloud resource"
                            );
                        }
                        Ok(resources)
                    }
                    Err(err) => {
                        debug!(supplier = supplier.name(), "Supplier failed: {}", err);
                        alerter.handle(err).map(|()| Vec::new())
                    }
                }
            });
        }

        let mut results: Vec<Box<dyn Resource>> = Vec::new();
        let mut batches = self.runner.read();
        let mut done = self.runner.done();

        loop {
            tokio::select! {
                batch = batches.recv() => match batch {
                    Some(batch) => results.extend(batch.into_iter().map(normalize)),
                    None => break,
                },
                _ = done.wait_for(|stopped| *stopped) => break,
            }
        }

        match self.runner.err() {
            Some(err) => Err(err),
            None => {
                debug!(resources = results.len(), "Scan complete");
                Ok(results)
            }
        }
    }
}
