//! Privilege sets and deterministic aggregation.
//!
//! [`PrivilegeSet`] is the ordered, deduplicated result of one query.
//! [`PrivilegeAggregator`] reduces the policies that matched a query
//! into that set with a fixed, documented ordering so repeated calls
//! against the same snapshot are byte-identical.

use crate::policy::Policy;
use sentra_types::Privilege;
use serde::{Deserialize, Serialize};

// ─── PrivilegeSet ───────────────────────────────────────────────────

/// An ordered, deduplicated sequence of privilege identifiers.
///
/// Owned by the caller of one query; never cached by the engine.
/// Insertion order is preserved and duplicates are dropped on first
/// occurrence.
///
/// # Example
///
/// ```
/// use sentra_policy::PrivilegeSet;
/// use sentra_types::Privilege;
///
/// let set: PrivilegeSet = [
///     Privilege::new("EDIT"),
///     Privilege::new("VIEW"),
///     Privilege::new("EDIT"), // duplicate, dropped
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&Privilege::new("VIEW")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivilegeSet(Vec<Privilege>);

impl PrivilegeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a privilege if not already present.
    pub fn insert(&mut self, privilege: Privilege) {
        if !self.0.contains(&privilege) {
            self.0.push(privilege);
        }
    }

    /// Returns `true` if the set grants `privilege`.
    #[must_use]
    pub fn contains(&self, privilege: &Privilege) -> bool {
        self.0.contains(privilege)
    }

    /// Number of distinct privileges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no privileges were granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates privileges in result order.
    pub fn iter(&self) -> std::slice::Iter<'_, Privilege> {
        self.0.iter()
    }

    /// The privileges as an ordered slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Privilege] {
        &self.0
    }

    /// Consumes the set, returning the ordered privileges.
    #[must_use]
    pub fn into_vec(self) -> Vec<Privilege> {
        self.0
    }
}

impl FromIterator<Privilege> for PrivilegeSet {
    fn from_iter<I: IntoIterator<Item = Privilege>>(iter: I) -> Self {
        let mut set = Self::new();
        for privilege in iter {
            set.insert(privilege);
        }
        set
    }
}

impl<'a> IntoIterator for &'a PrivilegeSet {
    type Item = &'a Privilege;
    type IntoIter = std::slice::Iter<'a, Privilege>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for PrivilegeSet {
    type Item = Privilege;
    type IntoIter = std::vec::IntoIter<Privilege>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ─── Aggregator ─────────────────────────────────────────────────────

/// Reduces matched policies into one deterministic [`PrivilegeSet`].
///
/// # Ordering
///
/// 1. Resource-scoped policies before platform-wide policies (more
///    specific grants surface first).
/// 2. Ties broken by catalog creation time, then policy id.
///
/// The model is allow-only: reduction is a pure union. A future
/// deny-capable policy variant must take precedence over any allow for
/// the same privilege identifier; that rule belongs here and nowhere
/// else.
#[derive(Debug)]
pub struct PrivilegeAggregator;

impl PrivilegeAggregator {
    /// Unions the privileges of `matching` policies, deduplicated, in
    /// specificity order.
    #[must_use]
    pub fn reduce<'a>(matching: impl IntoIterator<Item = &'a Policy>) -> PrivilegeSet {
        let mut policies: Vec<&Policy> = matching.into_iter().collect();
        policies.sort_by(|a, b| {
            a.is_platform_wide()
                .cmp(&b.is_platform_wide())
                .then_with(|| a.created_at().cmp(&b.created_at()))
                .then_with(|| a.id().cmp(b.id()))
        });

        policies
            .into_iter()
            .flat_map(|p| p.privileges().iter().cloned())
            .collect()
    }
}
