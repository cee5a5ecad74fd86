// Copyright (c) 2025 - Cowboy AI, Inc.
//! Discovered Infrastructure Resources
//!
//! A [`Resource`] is an opaque object found in a cloud account during a scan.
//! Every resource carries a stable identifier and a type tag; nothing else is
//! assumed by the scanner.
//!
//! # Normalization
//!
//! Some providers expose several representations of the same object. Those
//! resources implement [`NormalizedResource`] and advertise it through
//! [`Resource::as_normalized`], so the scanner can swap them for a canonical
//! form without inspecting concrete types:
//!
//! ```text
//! Resource ──as_normalized()──> Some(&dyn NormalizedResource)
//!                                   │
//!                      normalize_for_provider()
//!                                   │
//!                     Ok(canonical) │ Err(_)
//!                         ▼         ▼
//!                     replaced   original kept
//! ```

pub mod abstract_resource;
pub mod supplier;

pub use abstract_resource::AbstractResource;
pub use supplier::ResourceSupplier;

use std::fmt::Debug;
use thiserror::Error;

/// A discovered infrastructure object
///
/// Resources are immutable once created by a supplier.
pub trait Resource: Debug + Send + Sync {
    /// Identifier, unique within [`Resource::terraform_type`]
    fn terraform_id(&self) -> &str;

    /// Resource kind, e.g. `aws_instance`
    fn terraform_type(&self) -> &str;

    /// Normalization capability, if this resource has one
    fn as_normalized(&self) -> Option<&dyn NormalizedResource> {
        None
    }
}

/// Capability of producing a provider-canonical replacement
///
/// Implementations must be all-or-nothing: either a complete replacement is
/// returned or an error, never a half-converted resource. Normalizing an
/// already normalized resource must yield an equal resource.
pub trait NormalizedResource: Send + Sync {
    /// Build the canonical form of this resource
    fn normalize_for_provider(&self) -> Result<Box<dyn Resource>, NormalizeError>;
}

/// Normalization failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot normalize {resource_type} {id}: {reason}")]
pub struct NormalizeError {
    /// Identifier of the resource that failed to normalize
    pub id: String,
    /// Type of the resource that failed to normalize
    pub resource_type: String,
    /// Why normalization failed
    pub reason: String,
}

impl NormalizeError {
    /// Create a normalization error for the given resource
    pub fn new(resource: &dyn Resource, reason: impl Into<String>) -> Self {
        Self {
            id: resource.terraform_id().to_string(),
            resource_type: resource.terraform_type().to_string(),
            reason: reason.into(),
        }
    }
}

/// Replace a resource by its normalized form when possible
///
/// Resources without the capability are returned as-is. A failing
/// normalization is logged and the original resource is returned.
pub fn normalize(resource: Box<dyn Resource>) -> Box<dyn Resource> {
    let normalized = match resource.as_normalized() {
        Some(normalizable) => normalizable.normalize_for_provider(),
        None => return resource,
    };

    match normalized {
        Ok(normalized) => normalized,
        Err(e) => {
            tracing::error!(
                "Could not normalize remote for res {}: {}",
                resource.terraform_id(),
                e
            );
            resource
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct LegacyRecord {
        id: String,
        fail: bool,
    }

    impl Resource for LegacyRecord {
        fn terraform_id(&self) -> &str {
            &self.id
        }

        fn terraform_type(&self) -> &str {
            "aws_route53_record"
        }

        fn as_normalized(&self) -> Option<&dyn NormalizedResource> {
            Some(self)
        }
    }

    impl NormalizedResource for LegacyRecord {
        fn normalize_for_provider(&self) -> Result<Box<dyn Resource>, NormalizeError> {
            if self.fail {
                return Err(NormalizeError::new(self, "missing zone id"));
            }
            Ok(Box::new(AbstractResource::new(
                self.id.to_lowercase(),
                "aws_route53_record",
            )))
        }
    }

    #[test]
    fn test_normalize_replaces_resource() {
        let res = normalize(Box::new(LegacyRecord {
            id: "ZONE_WWW".to_string(),
            fail: false,
        }));

        assert_eq!(res.terraform_id(), "zone_www");
        assert!(res.as_normalized().is_none());
    }

    #[test]
    fn test_normalize_failure_keeps_original() {
        let res = normalize(Box::new(LegacyRecord {
            id: "ZONE_WWW".to_string(),
            fail: true,
        }));

        assert_eq!(res.terraform_id(), "ZONE_WWW");
        assert!(res.as_normalized().is_some());
    }

    #[test]
    fn test_normalize_without_capability_is_identity() {
        let res = normalize(Box::new(AbstractResource::new("i-1", "aws_instance")));

        assert_eq!(res.terraform_id(), "i-1");
        assert_eq!(res.terraform_type(), "aws_instance");
    }

    #[test]
    fn test_normalize_error_message() {
        let record = LegacyRecord {
            id: "www".to_string(),
            fail: true,
        };
        let err = NormalizeError::new(&record, "missing zone id");

        assert_eq!(
            err.to_string(),
            "cannot normalize aws_route53_record www: missing zone id"
        );
    }
}
