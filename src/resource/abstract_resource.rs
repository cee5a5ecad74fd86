// Copyright (c) 2025 - Cowboy AI, Inc.
//! Generic attribute-bag resource

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Resource;

/// A resource described only by its id, type and raw attributes
///
/// Suppliers that do not need a dedicated type return these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractResource {
    /// Identifier, unique within the type
    pub id: String,

    /// Resource kind, e.g. `aws_instance`
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Provider attributes as returned by the vendor API
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl AbstractResource {
    /// Create a resource with no attributes
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            attributes: Map::new(),
        }
    }

    /// Attach an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl Resource for AbstractResource {
    fn terraform_id(&self) -> &str {
        &self.id
    }

    fn terraform_type(&self) -> &str {
        &self.resource_type
    }
}
