//! Caller-entitlement guard for privilege-listing queries.
//!
//! The inbound transport layer (out of scope here) hands
//! [`PrivilegeService`] the authenticated caller alongside the query.
//! Before any engine evaluation runs, the service checks the
//! precondition: a caller may list their own privileges, or anyone's if
//! they hold the policy-management privilege.

use crate::chain::AuthorizerChain;
use sentra_policy::{AuthError, AuthRequest, PrivilegeSet};
use sentra_types::{ActorId, Privilege, ResourceSpec};
use std::sync::Arc;

/// Privilege required to query other actors' privileges.
pub const MANAGE_POLICIES: &str = "MANAGE_POLICIES";

/// Entry point for privilege-listing queries, with the caller check in
/// front of the chain.
///
/// # Example
///
/// ```no_run
/// use sentra_engine::{AuthorizerChain, PrivilegeService};
/// use sentra_types::ActorId;
/// use std::sync::Arc;
///
/// # async fn demo(chain: Arc<AuthorizerChain>) -> Result<(), sentra_policy::AuthError> {
/// let service = PrivilegeService::new(chain);
/// let alice = ActorId::new("alice");
///
/// // Self-query always passes the caller check.
/// let privileges = service.granted_privileges(&alice, &alice, None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PrivilegeService {
    chain: Arc<AuthorizerChain>,
    management_privilege: Privilege,
}

impl PrivilegeService {
    /// Creates a service over the given chain with the default
    /// [`MANAGE_POLICIES`] management privilege.
    #[must_use]
    pub fn new(chain: Arc<AuthorizerChain>) -> Self {
        Self {
            chain,
            management_privilege: Privilege::new(MANAGE_POLICIES),
        }
    }

    /// Overrides the privilege that entitles a caller to query others.
    #[must_use]
    pub fn with_management_privilege(mut self, privilege: Privilege) -> Self {
        self.management_privilege = privilege;
        self
    }

    /// The underlying chain.
    #[must_use]
    pub fn chain(&self) -> &Arc<AuthorizerChain> {
        &self.chain
    }

    /// Lists every privilege granted to `actor`, optionally scoped to
    /// `resource`, on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Unauthorized`] if `caller` is neither `actor` nor
    ///   authorized for the management privilege; checked before any
    ///   engine evaluation.
    /// - [`AuthError::UnsupportedOperation`] if the chain's primary
    ///   engine cannot list privileges.
    /// - [`AuthError::DependencyUnavailable`] if no policy snapshot has
    ///   ever loaded.
    pub async fn granted_privileges(
        &self,
        caller: &ActorId,
        actor: &ActorId,
        resource: Option<&ResourceSpec>,
    ) -> Result<PrivilegeSet, AuthError> {
        if caller != actor {
            let check =
                AuthRequest::new(caller.clone(), self.management_privilege.clone());
            let decision = self.chain.authorize(&check).await?;
            if !decision.is_allowed() {
                return Err(AuthError::Unauthorized {
                    caller: caller.clone(),
                    actor: actor.clone(),
                });
            }
        }
        self.chain.granted_privileges(actor, resource).await
    }
}
