//! Policy records and actor predicates.
//!
//! A [`Policy`] is a declarative rule from the external catalog binding
//! an [`ActorPredicate`] (WHO) and an optional
//! [`ResourcePredicate`](crate::ResourcePredicate) (WHERE) to a set of
//! granted privileges (WHAT). The engine never mutates policies; it only
//! observes their lifecycle state at read time.

use crate::error::PolicyError;
use crate::predicate::ResourcePredicate;
use chrono::{DateTime, Utc};
use sentra_types::{ActorContext, ActorId, GroupId, PolicyId, Privilege, RoleId};
use serde::{Deserialize, Serialize};

// ─── Lifecycle ──────────────────────────────────────────────────────

/// Lifecycle state of a policy, managed by the external catalog.
///
/// Only `Active` policies are ever considered by the engine. The state
/// machine (Active ⇄ Inactive) lives entirely in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyState {
    /// The policy participates in evaluation.
    Active,
    /// The policy is retained in the catalog but ignored by the engine.
    Inactive,
}

// ─── Actor predicate ────────────────────────────────────────────────

/// The WHO half of a policy.
///
/// A policy applies to an actor only through one of three doors:
/// the actor's own identifier is listed, one of the actor's resolved
/// groups/roles intersects the policy's lists, or the policy carries
/// the all-identities flag.
///
/// # Example
///
/// ```
/// use sentra_policy::ActorPredicate;
/// use sentra_types::{ActorContext, ActorId, GroupId};
///
/// let predicate = ActorPredicate::groups([GroupId::new("eng")]);
/// let ctx = ActorContext::new(ActorId::new("alice")).with_groups([GroupId::new("eng")]);
/// assert!(predicate.applies_to(&ctx));
///
/// let outsider = ActorContext::new(ActorId::new("mallory"));
/// assert!(!predicate.applies_to(&outsider));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorPredicate {
    /// When set, the policy applies to every identity.
    pub all_identities: bool,
    /// Explicitly listed actor identifiers.
    pub actors: Vec<ActorId>,
    /// Group identifiers; matched against the actor's resolved groups.
    pub groups: Vec<GroupId>,
    /// Role identifiers; matched against the actor's resolved roles.
    pub roles: Vec<RoleId>,
}

impl ActorPredicate {
    /// Predicate matching every identity.
    #[must_use]
    pub fn all() -> Self {
        Self {
            all_identities: true,
            ..Self::default()
        }
    }

    /// Predicate listing explicit actors.
    #[must_use]
    pub fn actors(actors: impl IntoIterator<Item = ActorId>) -> Self {
        Self {
            actors: actors.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Predicate listing groups.
    #[must_use]
    pub fn groups(groups: impl IntoIterator<Item = GroupId>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Predicate listing roles.
    #[must_use]
    pub fn roles(roles: impl IntoIterator<Item = RoleId>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Adds explicit actors to this predicate.
    #[must_use]
    pub fn with_actors(mut self, actors: impl IntoIterator<Item = ActorId>) -> Self {
        self.actors.extend(actors);
        self
    }

    /// Adds groups to this predicate.
    #[must_use]
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.groups.extend(groups);
        self
    }

    /// Adds roles to this predicate.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// Returns `true` if the resolved actor context satisfies this predicate.
    #[must_use]
    pub fn applies_to(&self, ctx: &ActorContext) -> bool {
        if self.all_identities {
            return true;
        }
        if self.actors.contains(ctx.actor()) {
            return true;
        }
        if self.groups.iter().any(|g| ctx.in_group(g)) {
            return true;
        }
        self.roles.iter().any(|r| ctx.has_role(r))
    }
}

// ─── Policy ─────────────────────────────────────────────────────────

/// A declarative access rule from the external catalog.
///
/// Invariants enforced at construction:
///
/// - The privilege set is never empty.
///
/// Invariants observed at evaluation:
///
/// - Only [`PolicyState::Active`] policies are considered.
/// - A policy with no resource predicate is platform-wide.
///
/// # Example
///
/// ```
/// use sentra_policy::{ActorPredicate, Policy, PolicyState};
/// use sentra_types::{PolicyId, Privilege};
///
/// let policy = Policy::builder(PolicyId::new("p1"))
///     .actors(ActorPredicate::all())
///     .privileges([Privilege::new("VIEW_ENTITY")])
///     .build()?;
///
/// assert!(policy.is_active());
/// assert!(policy.is_platform_wide());
/// # Ok::<(), sentra_policy::PolicyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyRecord")]
pub struct Policy {
    id: PolicyId,
    actors: ActorPredicate,
    resource: Option<ResourcePredicate>,
    privileges: Vec<Privilege>,
    state: PolicyState,
    created_at: DateTime<Utc>,
}

/// Wire shape of a catalog record. Deserialization routes through
/// [`TryFrom`] so a record can never bypass the construction invariants.
#[derive(Deserialize)]
struct PolicyRecord {
    id: PolicyId,
    actors: ActorPredicate,
    resource: Option<ResourcePredicate>,
    privileges: Vec<Privilege>,
    state: PolicyState,
    created_at: DateTime<Utc>,
}

impl TryFrom<PolicyRecord> for Policy {
    type Error = PolicyError;

    fn try_from(record: PolicyRecord) -> Result<Self, Self::Error> {
        if record.privileges.is_empty() {
            return Err(PolicyError::EmptyPrivileges { policy: record.id });
        }
        Ok(Self {
            id: record.id,
            actors: record.actors,
            resource: record.resource,
            privileges: record.privileges,
            state: record.state,
            created_at: record.created_at,
        })
    }
}

impl Policy {
    /// Starts building a policy with the given id.
    ///
    /// Defaults: empty actor predicate, no resource predicate, `Active`
    /// state, creation time of `Utc::now()`.
    #[must_use]
    pub fn builder(id: PolicyId) -> PolicyBuilder {
        PolicyBuilder {
            id,
            actors: ActorPredicate::default(),
            resource: None,
            privileges: Vec::new(),
            state: PolicyState::Active,
            created_at: Utc::now(),
        }
    }

    /// The catalog identifier of this policy.
    #[must_use]
    pub fn id(&self) -> &PolicyId {
        &self.id
    }

    /// The WHO predicate.
    #[must_use]
    pub fn actors(&self) -> &ActorPredicate {
        &self.actors
    }

    /// The WHERE predicate, if any. `None` means platform-wide.
    #[must_use]
    pub fn resource(&self) -> Option<&ResourcePredicate> {
        self.resource.as_ref()
    }

    /// The privileges this policy grants. Never empty.
    #[must_use]
    pub fn privileges(&self) -> &[Privilege] {
        &self.privileges
    }

    /// The lifecycle state observed at catalog fetch time.
    #[must_use]
    pub fn state(&self) -> PolicyState {
        self.state
    }

    /// When the catalog created this policy. Used only as the
    /// deterministic tie-break when ordering aggregated privileges.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` if the policy is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == PolicyState::Active
    }

    /// Returns `true` if the policy has no resource predicate.
    #[must_use]
    pub fn is_platform_wide(&self) -> bool {
        self.resource.is_none()
    }

    /// Returns `true` if the policy grants the given privilege.
    #[must_use]
    pub fn grants(&self, privilege: &Privilege) -> bool {
        self.privileges.contains(privilege)
    }
}

/// Builder for [`Policy`]. Produced by [`Policy::builder`].
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    id: PolicyId,
    actors: ActorPredicate,
    resource: Option<ResourcePredicate>,
    privileges: Vec<Privilege>,
    state: PolicyState,
    created_at: DateTime<Utc>,
}

impl PolicyBuilder {
    /// Sets the actor predicate.
    #[must_use]
    pub fn actors(mut self, actors: ActorPredicate) -> Self {
        self.actors = actors;
        self
    }

    /// Sets the resource predicate. Omitting it leaves the policy
    /// platform-wide.
    #[must_use]
    pub fn resource(mut self, resource: ResourcePredicate) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Sets the granted privileges.
    #[must_use]
    pub fn privileges(mut self, privileges: impl IntoIterator<Item = Privilege>) -> Self {
        self.privileges = privileges.into_iter().collect();
        self
    }

    /// Sets the lifecycle state.
    #[must_use]
    pub fn state(mut self, state: PolicyState) -> Self {
        self.state = state;
        self
    }

    /// Sets the catalog creation time.
    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Validates and builds the policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::EmptyPrivileges`] if no privileges were set.
    pub fn build(self) -> Result<Policy, PolicyError> {
        if self.privileges.is_empty() {
            return Err(PolicyError::EmptyPrivileges { policy: self.id });
        }
        Ok(Policy {
            id: self.id,
            actors: self.actors,
            resource: self.resource,
            privileges: self.privileges,
            state: self.state,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::ResourcePredicate;

    fn ctx(actor: &str) -> ActorContext {
        ActorContext::new(ActorId::new(actor))
    }

    #[test]
    fn all_identities_applies_to_anyone() {
        let predicate = ActorPredicate::all();
        assert!(predicate.applies_to(&ctx("alice")));
        assert!(predicate.applies_to(&ctx("bob")));
    }

    #[test]
    fn explicit_actor_match() {
        let predicate = ActorPredicate::actors([ActorId::new("alice")]);
        assert!(predicate.applies_to(&ctx("alice")));
        assert!(!predicate.applies_to(&ctx("bob")));
    }

    #[test]
    fn group_intersection_match() {
        let predicate = ActorPredicate::groups([GroupId::new("eng"), GroupId::new("data")]);

        let member = ctx("alice").with_groups([GroupId::new("data")]);
        let outsider = ctx("bob").with_groups([GroupId::new("finance")]);

        assert!(predicate.applies_to(&member));
        assert!(!predicate.applies_to(&outsider));
    }

    #[test]
    fn role_intersection_match() {
        let predicate = ActorPredicate::roles([RoleId::new("admin")]);

        let admin = ctx("alice").with_roles([RoleId::new("admin")]);
        let viewer = ctx("bob").with_roles([RoleId::new("viewer")]);

        assert!(predicate.applies_to(&admin));
        assert!(!predicate.applies_to(&viewer));
    }

    #[test]
    fn empty_predicate_applies_to_nobody() {
        let predicate = ActorPredicate::default();
        assert!(!predicate.applies_to(&ctx("alice")));
    }

    #[test]
    fn mixed_predicate_any_door_suffices() {
        let predicate = ActorPredicate::actors([ActorId::new("alice")])
            .with_groups([GroupId::new("eng")])
            .with_roles([RoleId::new("admin")]);

        assert!(predicate.applies_to(&ctx("alice")));
        assert!(predicate.applies_to(&ctx("bob").with_groups([GroupId::new("eng")])));
        assert!(predicate.applies_to(&ctx("carol").with_roles([RoleId::new("admin")])));
        assert!(!predicate.applies_to(&ctx("mallory")));
    }

    #[test]
    fn builder_produces_active_platform_wide_by_default() {
        let policy = Policy::builder(PolicyId::new("p1"))
            .actors(ActorPredicate::all())
            .privileges([Privilege::new("VIEW")])
            .build()
            .expect("valid policy");

        assert!(policy.is_active());
        assert!(policy.is_platform_wide());
        assert!(policy.grants(&Privilege::new("VIEW")));
        assert!(!policy.grants(&Privilege::new("EDIT")));
    }

    #[test]
    fn builder_rejects_empty_privileges() {
        let err = Policy::builder(PolicyId::new("p1"))
            .actors(ActorPredicate::all())
            .build()
            .expect_err("empty privilege set must be rejected");

        assert!(matches!(err, PolicyError::EmptyPrivileges { .. }));
    }

    #[test]
    fn resource_scoped_policy_is_not_platform_wide() {
        let policy = Policy::builder(PolicyId::new("p1"))
            .actors(ActorPredicate::all())
            .resource(ResourcePredicate::exact("dataset", "ds1"))
            .privileges([Privilege::new("EDIT")])
            .build()
            .expect("valid policy");

        assert!(!policy.is_platform_wide());
    }

    #[test]
    fn policy_serde_round_trip() {
        let policy = Policy::builder(PolicyId::new("p1"))
            .actors(ActorPredicate::actors([ActorId::new("alice")]))
            .resource(ResourcePredicate::prefixed("dataset", "urn:data:"))
            .privileges([Privilege::new("EDIT"), Privilege::new("VIEW")])
            .state(PolicyState::Inactive)
            .build()
            .expect("valid policy");

        let json = serde_json::to_string(&policy).expect("serialize");
        let parsed: Policy = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, policy);
    }

    #[test]
    fn deserialization_rejects_empty_privileges() {
        let json = r#"{
            "id": "p1",
            "actors": { "all_identities": true },
            "resource": null,
            "privileges": [],
            "state": "ACTIVE",
            "created_at": "2026-01-01T00:00:00Z"
        }"#;

        let err = serde_json::from_str::<Policy>(json)
            .expect_err("empty privilege set must be rejected at the wire");
        assert!(err.to_string().contains("p1"), "got: {err}");
    }

    #[test]
    fn state_serializes_screaming_snake() {
        let json = serde_json::to_string(&PolicyState::Active).expect("serialize");
        assert_eq!(json, "\"ACTIVE\"");
    }
}
