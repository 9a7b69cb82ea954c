//! Error types for policy construction and authorization queries.

use sentra_types::{ActorId, PolicyId};
use thiserror::Error;

/// Errors surfaced synchronously to authorization callers.
///
/// Each variant maps to one failure contract:
///
/// | Variant | Contract |
/// |---------|----------|
/// | `Unauthorized` | Caller not entitled to query another actor's privileges; never retried |
/// | `UnsupportedOperation` | Chain primary cannot list privileges; configuration mismatch |
/// | `DependencyUnavailable` | Catalog has never produced a snapshot; queries fail closed |
///
/// Transient catalog and membership failures are *not* represented here:
/// they are recovered locally (stale snapshot, empty memberships) and
/// never thrown into a query path.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The caller is not entitled to query the target actor's privileges.
    #[error("caller '{caller}' is not authorized to query privileges of '{actor}'")]
    Unauthorized {
        /// The actor making the call.
        caller: ActorId,
        /// The actor whose privileges were requested.
        actor: ActorId,
    },

    /// The chain's primary engine does not support privilege listing.
    #[error("privilege listing is not supported by authorizer '{engine}'")]
    UnsupportedOperation {
        /// Name of the engine that lacks the capability.
        engine: String,
    },

    /// A required upstream dependency has never produced usable data.
    #[error("dependency unavailable: {dependency}")]
    DependencyUnavailable {
        /// The dependency that is unavailable.
        dependency: String,
    },
}

impl AuthError {
    /// Returns a short stable code for logging and health reporting.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::UnsupportedOperation { .. } => "unsupported_operation",
            Self::DependencyUnavailable { .. } => "dependency_unavailable",
        }
    }
}

/// Errors from constructing or validating a policy record.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A policy must grant at least one privilege.
    #[error("policy '{policy}' grants no privileges")]
    EmptyPrivileges {
        /// The offending policy.
        policy: PolicyId,
    },

    /// A resource id pattern failed to compile.
    #[error("invalid resource pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The raw pattern text.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_display() {
        let err = AuthError::Unauthorized {
            caller: ActorId::new("bob"),
            actor: ActorId::new("alice"),
        };
        let msg = err.to_string();
        assert!(msg.contains("bob"), "got: {msg}");
        assert!(msg.contains("alice"), "got: {msg}");
        assert_eq!(err.code(), "unauthorized");
    }

    #[test]
    fn unsupported_operation_display() {
        let err = AuthError::UnsupportedOperation {
            engine: "external-ranger".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("external-ranger"), "got: {msg}");
        assert_eq!(err.code(), "unsupported_operation");
    }

    #[test]
    fn dependency_unavailable_display() {
        let err = AuthError::DependencyUnavailable {
            dependency: "policy catalog".to_string(),
        };
        assert!(err.to_string().contains("policy catalog"));
        assert_eq!(err.code(), "dependency_unavailable");
    }

    #[test]
    fn empty_privileges_display() {
        let err = PolicyError::EmptyPrivileges {
            policy: PolicyId::new("p1"),
        };
        assert!(err.to_string().contains("p1"));
    }

    #[test]
    fn invalid_pattern_carries_source() {
        use std::error::Error;

        let source = regex::Regex::new("(").expect_err("unbalanced paren must fail");
        let err = PolicyError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.source().is_some());
    }
}
