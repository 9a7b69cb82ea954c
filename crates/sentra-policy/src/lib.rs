//! Policy model and evaluation primitives for Sentra.
//!
//! This crate is the pure core of the privilege engine: it defines what a
//! policy *is* and how a single policy is matched and reduced, with no
//! I/O, no caching, and no clocks. The runtime layer (`sentra-engine`)
//! composes these primitives with a policy store and identity resolver.
//!
//! # Evaluation Model
//!
//! ```text
//! Granted Privileges = reduce( ACTIVE policies where
//!                              ActorPredicate(WHO) ∧ ResourcePredicate(WHERE) )
//! ```
//!
//! | Layer | Type | Controls |
//! |-------|------|----------|
//! | [`ActorPredicate`] | Struct | Who a policy applies to (actors, groups, roles, everyone) |
//! | [`ResourcePredicate`] | Struct | Where it applies (type + id filters, or platform-wide) |
//! | [`PrivilegeAggregator`] | Reducer | Deterministic union of matched privileges |
//!
//! # Crate Architecture
//!
//! ```text
//! sentra-types  (ActorId, Privilege, ResourceSpec, ActorContext)
//!      ↑
//! sentra-policy (Policy, PolicyMatcher, PrivilegeAggregator, Authorizer trait)  ◄── THIS CRATE
//!      ↑
//! sentra-engine (PolicyStore, IdentityResolver, DataAuthorizer, AuthorizerChain)
//! ```
//!
//! # Design Principles
//!
//! - **Trait definitions here, implementations in consumers** — the
//!   [`Authorizer`] capability interface lives here; `sentra-engine`
//!   provides the concrete data-policy engine.
//! - **Allow-only** — there is no deny record. A future deny-capable
//!   policy variant must take precedence over any allow for the same
//!   privilege; [`PrivilegeAggregator`] is the single place that rule
//!   would land.
//! - **Deterministic** — identical inputs against the same policy set
//!   always produce the same ordered output.

pub mod authorizer;
pub mod error;
pub mod matcher;
pub mod policy;
pub mod predicate;
pub mod privileges;

pub use authorizer::{AuthRequest, Authorizer, Decision, PrivilegeLister};
pub use error::{AuthError, PolicyError};
pub use matcher::PolicyMatcher;
pub use policy::{ActorPredicate, Policy, PolicyState};
pub use predicate::{IdFilter, ResourcePattern, ResourcePredicate, TypeFilter};
pub use privileges::{PrivilegeAggregator, PrivilegeSet};

// Re-export the vocabulary types for convenience
pub use sentra_types::{ActorContext, ActorId, GroupId, PolicyId, Privilege, ResourceSpec, RoleId};
