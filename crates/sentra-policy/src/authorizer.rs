//! Authorization engine capability traits.
//!
//! An [`Authorizer`] is one independent authorization engine. Multiple
//! engines compose into a chain (in `sentra-engine`); this module only
//! defines the capability surface.
//!
//! # Capability Discovery
//!
//! Privilege listing is an optional capability, exposed through
//! [`Authorizer::privilege_lister`] rather than downcasting. Callers
//! query the capability and never branch on the engine's concrete type:
//!
//! ```text
//! Authorizer trait (sentra-policy)   ← capability surface (THIS MODULE)
//!          │
//!          ├── DataAuthorizer (sentra-engine)   ← built-in engine, supports listing
//!          │
//!          └── (embedder-provided engines)      ← authorize only, or both
//! ```

use crate::error::AuthError;
use crate::privileges::PrivilegeSet;
use async_trait::async_trait;
use sentra_types::{ActorId, Privilege, ResourceSpec};
use serde::{Deserialize, Serialize};

// ─── Request / Decision ─────────────────────────────────────────────

/// One authorization question: may `actor` exercise `privilege`,
/// optionally scoped to `resource`?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    actor: ActorId,
    privilege: Privilege,
    resource: Option<ResourceSpec>,
}

impl AuthRequest {
    /// Creates a platform-wide request.
    #[must_use]
    pub fn new(actor: ActorId, privilege: Privilege) -> Self {
        Self {
            actor,
            privilege,
            resource: None,
        }
    }

    /// Scopes the request to a resource.
    #[must_use]
    pub fn with_resource(mut self, resource: ResourceSpec) -> Self {
        self.resource = Some(resource);
        self
    }

    /// The actor requesting access.
    #[must_use]
    pub fn actor(&self) -> &ActorId {
        &self.actor
    }

    /// The privilege being exercised.
    #[must_use]
    pub fn privilege(&self) -> &Privilege {
        &self.privilege
    }

    /// The resource the request is scoped to, if any.
    #[must_use]
    pub fn resource(&self) -> Option<&ResourceSpec> {
        self.resource.as_ref()
    }
}

/// The outcome of one authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Some active policy grants the privilege.
    Allow,
    /// No active policy grants the privilege.
    Deny,
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

// ─── Traits ─────────────────────────────────────────────────────────

/// One independent authorization engine.
///
/// Implementations must be cheap to query concurrently: a call may run
/// on every permission check platform-wide.
#[async_trait]
pub trait Authorizer: Send + Sync + std::fmt::Debug {
    /// A stable human-readable engine name, used in error messages and
    /// health reporting.
    fn name(&self) -> &str;

    /// Answers one authorization question.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DependencyUnavailable`] if the engine has no
    /// usable policy data and must fail closed.
    async fn authorize(&self, request: &AuthRequest) -> Result<Decision, AuthError>;

    /// Returns the privilege-listing capability, if this engine has one.
    ///
    /// The default is `None`: listing is optional and a chain routes
    /// listing queries only to its primary engine.
    fn privilege_lister(&self) -> Option<&dyn PrivilegeLister> {
        None
    }
}

/// Optional capability: enumerate every privilege granted to an actor.
#[async_trait]
pub trait PrivilegeLister: Send + Sync {
    /// Computes the complete, ordered privilege set granted to `actor`,
    /// optionally scoped to `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DependencyUnavailable`] if no policy data
    /// has ever been loaded.
    async fn granted_privileges(
        &self,
        actor: &ActorId,
        resource: Option<&ResourceSpec>,
    ) -> Result<PrivilegeSet, AuthError>;
}
