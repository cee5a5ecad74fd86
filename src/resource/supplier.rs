// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Suppliers
//!
//! A supplier lists every resource of one family it can currently observe.
//! Suppliers are independent of each other and are invoked exactly once per
//! scan, possibly in parallel with every other supplier.

use async_trait::async_trait;

use super::Resource;
use crate::errors::EnumerationError;

/// Enumerates the live resources of one resource family
#[async_trait]
pub trait ResourceSupplier: Send + Sync {
    /// List all resources currently observed
    async fn resources(&self) -> Result<Vec<Box<dyn Resource>>, EnumerationError>;

    /// Name used in logs, usually the resource type supplied
    fn name(&self) -> &str;
}
