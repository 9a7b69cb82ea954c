//! Resource specification types.
//!
//! A [`ResourceSpec`] names the object an access check is scoped to.
//! It is optional at query time: a query without one asks for the
//! actor's *platform-wide* privileges.

use serde::{Deserialize, Serialize};

/// The (type, identifier) pair naming the object a check is scoped to.
///
/// # Resource Types
///
/// Resource types are opaque strings from the catalog's entity
/// vocabulary (`"dataset"`, `"dashboard"`, `"dataFlow"`, ...). The
/// engine only compares them against policy type filters.
///
/// # Example
///
/// ```
/// use sentra_types::ResourceSpec;
///
/// let spec = ResourceSpec::new("dataset", "urn:data:dataset:ds1");
/// assert_eq!(spec.resource_type(), "dataset");
/// assert_eq!(spec.resource_id(), "urn:data:dataset:ds1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Entity type of the resource.
    resource_type: String,
    /// Identifier of the specific resource instance.
    resource_id: String,
}

impl ResourceSpec {
    /// Creates a new resource spec.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }

    /// Returns the resource's entity type.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the resource's identifier.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }
}

impl std::fmt::Display for ResourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource_id)
    }
}
