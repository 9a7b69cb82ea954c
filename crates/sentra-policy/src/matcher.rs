//! Policy matching.
//!
//! [`PolicyMatcher`] decides whether one policy applies to one
//! (actor context, resource) pair. It is a pure function over the
//! arguments: no clocks, no I/O, no allocation.

use crate::policy::Policy;
use sentra_types::{ActorContext, ResourceSpec};

/// Decides whether a single policy applies to a query.
///
/// # Resource Asymmetry
///
/// A policy with a resource predicate is *excluded* when the query
/// supplies no resource. Platform-wide privilege listing therefore
/// surfaces only policies with no resource predicate. This asymmetry is
/// part of the contract: a resource-scoped grant says nothing about the
/// actor's platform-wide standing.
///
/// # Example
///
/// ```
/// use sentra_policy::{ActorPredicate, Policy, PolicyMatcher};
/// use sentra_types::{ActorContext, ActorId, PolicyId, Privilege};
///
/// let policy = Policy::builder(PolicyId::new("p1"))
///     .actors(ActorPredicate::all())
///     .privileges([Privilege::new("VIEW")])
///     .build()?;
///
/// let ctx = ActorContext::new(ActorId::new("alice"));
/// assert!(PolicyMatcher::matches(&policy, &ctx, None));
/// # Ok::<(), sentra_policy::PolicyError>(())
/// ```
#[derive(Debug)]
pub struct PolicyMatcher;

impl PolicyMatcher {
    /// Returns `true` if `policy` applies to the given actor context and
    /// optional resource.
    ///
    /// Inactive policies never match; snapshots drop them at build time,
    /// but the invariant is enforced here as well so a matcher call over
    /// an arbitrary policy list stays correct.
    #[must_use]
    pub fn matches(policy: &Policy, ctx: &ActorContext, resource: Option<&ResourceSpec>) -> bool {
        if !policy.is_active() {
            return false;
        }
        if !policy.actors().applies_to(ctx) {
            return false;
        }
        match (policy.resource(), resource) {
            // Platform-wide policies apply to every query.
            (None, _) => true,
            // Resource-scoped policies never match a resource-less query.
            (Some(_), None) => false,
            (Some(predicate), Some(spec)) => predicate.matches(spec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{ActorPredicate, PolicyState};
    use crate::predicate::ResourcePredicate;
    use sentra_types::{ActorId, GroupId, PolicyId, Privilege};

    fn platform_policy(state: PolicyState) -> Policy {
        Policy::builder(PolicyId::new("platform"))
            .actors(ActorPredicate::all())
            .privileges([Privilege::new("VIEW")])
            .state(state)
            .build()
            .expect("valid policy")
    }

    fn dataset_policy() -> Policy {
        Policy::builder(PolicyId::new("ds1-edit"))
            .actors(ActorPredicate::actors([ActorId::new("alice")]))
            .resource(ResourcePredicate::exact("dataset", "ds1"))
            .privileges([Privilege::new("EDIT")])
            .build()
            .expect("valid policy")
    }

    fn alice() -> ActorContext {
        ActorContext::new(ActorId::new("alice"))
    }

    #[test]
    fn platform_policy_matches_with_and_without_resource() {
        let policy = platform_policy(PolicyState::Active);
        let ds1 = ResourceSpec::new("dataset", "ds1");

        assert!(PolicyMatcher::matches(&policy, &alice(), None));
        assert!(PolicyMatcher::matches(&policy, &alice(), Some(&ds1)));
    }

    #[test]
    fn inactive_policy_never_matches() {
        let policy = platform_policy(PolicyState::Inactive);
        assert!(!PolicyMatcher::matches(&policy, &alice(), None));
    }

    #[test]
    fn resource_scoped_policy_excluded_from_platform_query() {
        // The asymmetry: scoped policies are invisible to resource-less queries.
        let policy = dataset_policy();
        assert!(!PolicyMatcher::matches(&policy, &alice(), None));
    }

    #[test]
    fn resource_scoped_policy_matches_only_its_resource() {
        let policy = dataset_policy();
        let ds1 = ResourceSpec::new("dataset", "ds1");
        let ds2 = ResourceSpec::new("dataset", "ds2");
        let chart = ResourceSpec::new("chart", "ds1");

        assert!(PolicyMatcher::matches(&policy, &alice(), Some(&ds1)));
        assert!(!PolicyMatcher::matches(&policy, &alice(), Some(&ds2)));
        assert!(!PolicyMatcher::matches(&policy, &alice(), Some(&chart)));
    }

    #[test]
    fn actor_predicate_gates_before_resource() {
        let policy = dataset_policy();
        let bob = ActorContext::new(ActorId::new("bob"));
        let ds1 = ResourceSpec::new("dataset", "ds1");

        assert!(!PolicyMatcher::matches(&policy, &bob, Some(&ds1)));
    }

    #[test]
    fn group_scoped_policy_matches_via_context() {
        let policy = Policy::builder(PolicyId::new("eng-edit"))
            .actors(ActorPredicate::groups([GroupId::new("eng")]))
            .privileges([Privilege::new("EDIT")])
            .build()
            .expect("valid policy");

        let member = alice().with_groups([GroupId::new("eng")]);
        assert!(PolicyMatcher::matches(&policy, &member, None));
        assert!(!PolicyMatcher::matches(&policy, &alice(), None));
    }
}
