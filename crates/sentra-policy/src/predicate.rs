//! Resource predicates.
//!
//! Controls *where* a policy applies. A policy with no
//! [`ResourcePredicate`] is platform-wide: it applies to every resource
//! query and to queries with no resource at all. A policy with one
//! applies only when a resource is supplied and both filters match.
//!
//! # Filters
//!
//! | Filter | Variants | Matches |
//! |--------|----------|---------|
//! | [`TypeFilter`] | `Any`, `Exact` | Resource entity type |
//! | [`IdFilter`] | `Exact`, `Prefix`, `Pattern` | Resource identifier |

use crate::error::PolicyError;
use regex::Regex;
use sentra_types::ResourceSpec;
use serde::{Deserialize, Serialize};

// ─── Type Filter ────────────────────────────────────────────────────

/// Filter on the resource's entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    /// Wildcard: any resource type matches.
    Any,
    /// Only the named resource type matches.
    Exact(String),
}

impl TypeFilter {
    /// Returns `true` if `resource_type` satisfies this filter.
    #[must_use]
    pub fn matches(&self, resource_type: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == resource_type,
        }
    }
}

// ─── Id Filter ──────────────────────────────────────────────────────

/// Filter on the resource's identifier.
///
/// Which variant a policy uses is per-policy configuration in the
/// catalog: exact for single resources, prefix for domain/scope
/// hierarchies, pattern for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFilter {
    /// Exact identifier match.
    Exact(String),
    /// Identifier must start with the given prefix (domain/scope match).
    Prefix(String),
    /// Identifier must match a regular expression.
    Pattern(ResourcePattern),
}

impl IdFilter {
    /// Returns `true` if `resource_id` satisfies this filter.
    #[must_use]
    pub fn matches(&self, resource_id: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == resource_id,
            Self::Prefix(prefix) => resource_id.starts_with(prefix.as_str()),
            Self::Pattern(pattern) => pattern.matches(resource_id),
        }
    }
}

// ─── Pattern ────────────────────────────────────────────────────────

/// A validated, pre-compiled resource id pattern.
///
/// The pattern is anchored: it must match the *whole* identifier, so
/// `"urn:data:.*:prod"` does not match a mere substring. Compilation
/// happens once at policy construction, never on the match path.
///
/// Serializes as its source string; deserialization re-validates.
///
/// # Example
///
/// ```
/// use sentra_policy::ResourcePattern;
///
/// let pattern = ResourcePattern::new("urn:data:dataset:.*-prod")?;
/// assert!(pattern.matches("urn:data:dataset:events-prod"));
/// assert!(!pattern.matches("urn:data:dataset:events-dev"));
/// # Ok::<(), sentra_policy::PolicyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ResourcePattern {
    raw: String,
    regex: Regex,
}

impl ResourcePattern {
    /// Compiles a pattern, anchoring it to the full identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidPattern`] if the regex is invalid.
    pub fn new(raw: impl Into<String>) -> Result<Self, PolicyError> {
        let raw = raw.into();
        let regex =
            Regex::new(&format!("^(?:{raw})$")).map_err(|source| PolicyError::InvalidPattern {
                pattern: raw.clone(),
                source,
            })?;
        Ok(Self { raw, regex })
    }

    /// Returns the source pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the whole of `resource_id` matches.
    #[must_use]
    pub fn matches(&self, resource_id: &str) -> bool {
        self.regex.is_match(resource_id)
    }
}

// Compiled regex is derived state; identity is the source text.
impl PartialEq for ResourcePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ResourcePattern {}

impl Serialize for ResourcePattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for ResourcePattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

// ─── Predicate ──────────────────────────────────────────────────────

/// The resource half of a policy: a type filter plus an id filter.
///
/// # Example
///
/// ```
/// use sentra_policy::ResourcePredicate;
/// use sentra_types::ResourceSpec;
///
/// let predicate = ResourcePredicate::exact("dataset", "ds1");
/// assert!(predicate.matches(&ResourceSpec::new("dataset", "ds1")));
/// assert!(!predicate.matches(&ResourceSpec::new("dataset", "ds2")));
/// assert!(!predicate.matches(&ResourceSpec::new("chart", "ds1")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePredicate {
    type_filter: TypeFilter,
    id_filter: IdFilter,
}

impl ResourcePredicate {
    /// Creates a predicate from explicit filters.
    #[must_use]
    pub fn new(type_filter: TypeFilter, id_filter: IdFilter) -> Self {
        Self {
            type_filter,
            id_filter,
        }
    }

    /// Exact type and exact id.
    #[must_use]
    pub fn exact(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self::new(
            TypeFilter::Exact(resource_type.into()),
            IdFilter::Exact(resource_id.into()),
        )
    }

    /// Exact type with an id prefix (domain/scope matching).
    #[must_use]
    pub fn prefixed(resource_type: impl Into<String>, id_prefix: impl Into<String>) -> Self {
        Self::new(
            TypeFilter::Exact(resource_type.into()),
            IdFilter::Prefix(id_prefix.into()),
        )
    }

    /// The type filter.
    #[must_use]
    pub fn type_filter(&self) -> &TypeFilter {
        &self.type_filter
    }

    /// The id filter.
    #[must_use]
    pub fn id_filter(&self) -> &IdFilter {
        &self.id_filter
    }

    /// Returns `true` if the supplied resource satisfies both filters.
    #[must_use]
    pub fn matches(&self, resource: &ResourceSpec) -> bool {
        self.type_filter.matches(resource.resource_type())
            && self.id_filter.matches(resource.resource_id())
    }
}
