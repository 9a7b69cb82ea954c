//! Actor context — the resolved identity a query evaluates against.

use crate::{ActorId, GroupId, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An actor identifier together with its resolved transitive memberships.
///
/// Built per query by the identity resolver and discarded afterwards; it
/// is never persisted. When membership resolution fails, the resolver
/// deliberately builds a context with *empty* membership sets — the
/// actor still matches policies naming it directly or policies with the
/// all-identities flag, but nothing membership-derived (fail-narrow).
///
/// # Example
///
/// ```
/// use sentra_types::{ActorContext, ActorId, GroupId};
///
/// let ctx = ActorContext::new(ActorId::new("alice"))
///     .with_groups([GroupId::new("eng")]);
///
/// assert!(ctx.in_group(&GroupId::new("eng")));
/// assert!(!ctx.in_group(&GroupId::new("finance")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    actor: ActorId,
    groups: HashSet<GroupId>,
    roles: HashSet<RoleId>,
}

impl ActorContext {
    /// Creates a context with no resolved memberships.
    #[must_use]
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor,
            groups: HashSet::new(),
            roles: HashSet::new(),
        }
    }

    /// Adds resolved group memberships.
    #[must_use]
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.groups.extend(groups);
        self
    }

    /// Adds resolved role assignments.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// The actor this context was resolved for.
    #[must_use]
    pub fn actor(&self) -> &ActorId {
        &self.actor
    }

    /// Resolved transitive group memberships.
    #[must_use]
    pub fn groups(&self) -> &HashSet<GroupId> {
        &self.groups
    }

    /// Resolved role assignments.
    #[must_use]
    pub fn roles(&self) -> &HashSet<RoleId> {
        &self.roles
    }

    /// Returns `true` if the actor transitively belongs to `group`.
    #[must_use]
    pub fn in_group(&self, group: &GroupId) -> bool {
        self.groups.contains(group)
    }

    /// Returns `true` if the actor holds `role`.
    #[must_use]
    pub fn has_role(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }
}
