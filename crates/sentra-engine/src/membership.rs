//! Membership service client trait.
//!
//! The membership service answers "which groups and roles does this
//! actor transitively hold?". The engine consumes it through
//! [`MembershipClient`] and caches answers in
//! [`IdentityResolver`](crate::resolver::IdentityResolver).

use async_trait::async_trait;
use sentra_types::{ActorId, GroupId, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from a membership lookup.
///
/// Never surfaced to query callers: the resolver degrades to an empty
/// membership set for that query (fail-narrow).
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The membership service could not be reached.
    #[error("membership service unreachable: {0}")]
    Unreachable(String),

    /// The actor is unknown to the membership service.
    #[error("unknown actor '{0}'")]
    UnknownActor(ActorId),
}

/// The transitive groups and roles resolved for one actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSet {
    /// Transitive group memberships.
    pub groups: HashSet<GroupId>,
    /// Assigned roles.
    pub roles: HashSet<RoleId>,
}

impl MembershipSet {
    /// Creates an empty membership set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership set with the given groups.
    #[must_use]
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.groups.extend(groups);
        self
    }

    /// Membership set with the given roles.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.roles.extend(roles);
        self
    }
}

/// Read-only client for the external membership service.
#[async_trait]
pub trait MembershipClient: Send + Sync + std::fmt::Debug {
    /// Fetches the actor's transitive groups and roles.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] if the lookup fails; the resolver
    /// recovers with an empty membership set for that query.
    async fn fetch_transitive_memberships(
        &self,
        actor: &ActorId,
    ) -> Result<MembershipSet, MembershipError>;
}
