//! The built-in data-policy authorization engine.
//!
//! [`DataAuthorizer`] composes the four leaf components: the
//! [`IdentityResolver`] expands the actor, the [`PolicyStore`] supplies
//! the current snapshot, [`PolicyMatcher`] filters it, and
//! [`PrivilegeAggregator`] reduces the matches to the final ordered
//! privilege set.
//!
//! ```text
//! caller
//!   └─► DataAuthorizer
//!         ├─► IdentityResolver.resolve(actor)      (cached membership expansion)
//!         ├─► PolicyStore.snapshot()               (captured once per query)
//!         ├─► PolicyMatcher.matches(...)           (pure filter)
//!         └─► PrivilegeAggregator.reduce(...)      (deterministic union)
//! ```

use crate::resolver::IdentityResolver;
use crate::store::PolicyStore;
use async_trait::async_trait;
use sentra_policy::{
    AuthError, AuthRequest, Authorizer, Decision, PolicyMatcher, PrivilegeAggregator,
    PrivilegeLister, PrivilegeSet,
};
use sentra_types::{ActorId, ResourceSpec};
use std::sync::Arc;
use tracing::debug;

/// The default engine: evaluates catalog policies over snapshots.
///
/// Queries are pure, bounded, in-memory computations over one captured
/// snapshot; they never block on refresh I/O and are not cancellable
/// mid-flight. Callers enforce timeouts externally.
#[derive(Debug)]
pub struct DataAuthorizer {
    store: Arc<PolicyStore>,
    resolver: Arc<IdentityResolver>,
}

impl DataAuthorizer {
    /// Engine name used in errors and logs.
    pub const NAME: &'static str = "data-policy";

    /// Creates the engine over a store and resolver.
    #[must_use]
    pub fn new(store: Arc<PolicyStore>, resolver: Arc<IdentityResolver>) -> Self {
        Self { store, resolver }
    }

    /// The policy store backing this engine.
    #[must_use]
    pub fn store(&self) -> &Arc<PolicyStore> {
        &self.store
    }

    /// The identity resolver backing this engine.
    #[must_use]
    pub fn resolver(&self) -> &Arc<IdentityResolver> {
        &self.resolver
    }

    /// Computes every privilege granted to `actor`, optionally scoped
    /// to `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DependencyUnavailable`] if no snapshot has
    /// ever loaded.
    pub async fn granted_privileges(
        &self,
        actor: &ActorId,
        resource: Option<&ResourceSpec>,
    ) -> Result<PrivilegeSet, AuthError> {
        let ctx = self.resolver.resolve(actor).await;
        let snapshot = self.store.snapshot()?;

        let matching = snapshot
            .policies()
            .iter()
            .filter(|policy| PolicyMatcher::matches(policy, &ctx, resource));
        let privileges = PrivilegeAggregator::reduce(matching);

        debug!(
            actor = %actor,
            snapshot_version = snapshot.version(),
            granted = privileges.len(),
            "computed granted privileges"
        );
        Ok(privileges)
    }
}

#[async_trait]
impl Authorizer for DataAuthorizer {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// Allow iff some active matching policy grants the privilege;
    /// the first match suffices (allow-only model).
    async fn authorize(&self, request: &AuthRequest) -> Result<Decision, AuthError> {
        let ctx = self.resolver.resolve(request.actor()).await;
        let snapshot = self.store.snapshot()?;

        let allowed = snapshot.policies().iter().any(|policy| {
            policy.grants(request.privilege())
                && PolicyMatcher::matches(policy, &ctx, request.resource())
        });

        Ok(if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        })
    }

    fn privilege_lister(&self) -> Option<&dyn PrivilegeLister> {
        Some(self)
    }
}

#[async_trait]
impl PrivilegeLister for DataAuthorizer {
    async fn granted_privileges(
        &self,
        actor: &ActorId,
        resource: Option<&ResourceSpec>,
    ) -> Result<PrivilegeSet, AuthError> {
        DataAuthorizer::granted_privileges(self, actor, resource).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::membership::{MembershipClient, MembershipError, MembershipSet};
    use sentra_policy::{ActorPredicate, Policy, ResourcePredicate};
    use sentra_types::{PolicyId, Privilege};
    use std::time::Duration;

    #[derive(Debug)]
    struct NoMemberships;

    #[async_trait]
    impl MembershipClient for NoMemberships {
        async fn fetch_transitive_memberships(
            &self,
            _actor: &ActorId,
        ) -> Result<MembershipSet, MembershipError> {
            Ok(MembershipSet::new())
        }
    }

    async fn engine_with(policies: Vec<Policy>) -> DataAuthorizer {
        let store = Arc::new(PolicyStore::new(Arc::new(StaticCatalog::new(policies))));
        store.refresh().await.expect("refresh");
        let resolver = Arc::new(IdentityResolver::new(
            Arc::new(NoMemberships),
            Duration::from_secs(60),
        ));
        DataAuthorizer::new(store, resolver)
    }

    fn edit_ds1_policy() -> Policy {
        Policy::builder(PolicyId::new("edit-ds1"))
            .actors(ActorPredicate::actors([ActorId::new("alice")]))
            .resource(ResourcePredicate::exact("dataset", "ds1"))
            .privileges([Privilege::new("EDIT")])
            .build()
            .expect("valid policy")
    }

    #[tokio::test]
    async fn authorize_allows_on_matching_policy() {
        let engine = engine_with(vec![edit_ds1_policy()]).await;

        let request = AuthRequest::new(ActorId::new("alice"), Privilege::new("EDIT"))
            .with_resource(ResourceSpec::new("dataset", "ds1"));
        let decision = engine.authorize(&request).await.expect("authorize");
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn authorize_denies_unmatched_privilege() {
        let engine = engine_with(vec![edit_ds1_policy()]).await;

        let request = AuthRequest::new(ActorId::new("alice"), Privilege::new("DELETE"))
            .with_resource(ResourceSpec::new("dataset", "ds1"));
        let decision = engine.authorize(&request).await.expect("authorize");
        assert!(!decision.is_allowed());
    }

    #[tokio::test]
    async fn authorize_fails_closed_when_unloaded() {
        let store = Arc::new(PolicyStore::new(Arc::new(StaticCatalog::default())));
        let resolver = Arc::new(IdentityResolver::new(
            Arc::new(NoMemberships),
            Duration::from_secs(60),
        ));
        let engine = DataAuthorizer::new(store, resolver);

        let request = AuthRequest::new(ActorId::new("alice"), Privilege::new("EDIT"));
        let err = engine.authorize(&request).await.expect_err("must fail closed");
        assert!(matches!(err, AuthError::DependencyUnavailable { .. }));
    }

    #[tokio::test]
    async fn exposes_privilege_lister_capability() {
        let engine = engine_with(vec![edit_ds1_policy()]).await;
        let lister = engine.privilege_lister().expect("capability present");

        let privileges = lister
            .granted_privileges(
                &ActorId::new("alice"),
                Some(&ResourceSpec::new("dataset", "ds1")),
            )
            .await
            .expect("listing");
        assert!(privileges.contains(&Privilege::new("EDIT")));
    }
}
