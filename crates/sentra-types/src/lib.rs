//! Core identity and data-model types for Sentra.
//!
//! This crate sits at the bottom of the dependency graph and carries no
//! evaluation logic — only the vocabulary every other layer speaks.
//!
//! # Crate Architecture
//!
//! ```text
//! sentra-types  (ActorId, Privilege, ResourceSpec, ActorContext)  ◄── THIS CRATE
//!      ↑
//! sentra-policy (Policy, PolicyMatcher, PrivilegeAggregator)
//!      ↑
//! sentra-engine (PolicyStore, IdentityResolver, DataAuthorizer, AuthorizerChain)
//! ```
//!
//! # Design Principles
//!
//! - **Identity only, no permission logic** — whether an actor is allowed
//!   to do something is decided upstream; these types just name things.
//! - **Catalog-issued identifiers** — every id wraps the opaque string the
//!   external catalog uses, so the engine never invents identity.

pub mod context;
pub mod id;
pub mod resource;

pub use context::ActorContext;
pub use id::{ActorId, GroupId, PolicyId, Privilege, RoleId};
pub use resource::ResourceSpec;
