//! Sentra Engine - the runtime layer of the privilege engine.
//!
//! This crate composes the pure evaluation primitives from
//! `sentra-policy` with the stateful pieces a running service needs:
//! a periodically refreshed policy snapshot, a caching identity
//! resolver, the built-in data-policy engine, and the authorizer chain
//! the transport layer talks to.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  sentra-types   : ActorId, Privilege, ResourceSpec, ...     │
//! │  sentra-policy  : Policy, PolicyMatcher, Authorizer trait   │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Runtime Layer (THIS CRATE)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  store     : PolicyStore, PolicySnapshot, StoreHealth       │
//! │  resolver  : IdentityResolver (TTL membership cache)        │
//! │  authorizer: DataAuthorizer (the built-in engine)           │
//! │  chain     : AuthorizerChain (ordered engines, one primary) │
//! │  service   : PrivilegeService (caller entitlement guard)    │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//!             (embedding service: transport, schema, authn)
//! ```
//!
//! # Query Flow
//!
//! ```text
//! caller ─► PrivilegeService (caller check)
//!             └─► AuthorizerChain (primary engine)
//!                   └─► DataAuthorizer
//!                         ├─► IdentityResolver (cached group/role expansion)
//!                         ├─► PolicyStore.snapshot() (captured once)
//!                         ├─► PolicyMatcher (pure filter)
//!                         └─► PrivilegeAggregator (deterministic union)
//! ```
//!
//! # Wiring Example
//!
//! [`Engine::spawn`] wires the default single-engine stack from a
//! config. Services composing additional engines into the chain wire
//! the pieces by hand instead:
//!
//! ```no_run
//! use sentra_engine::{
//!     AuthorizerChain, DataAuthorizer, Engine, EngineConfig, IdentityResolver,
//!     MembershipClient, PolicyCatalog, PolicyStore, PrivilegeService,
//! };
//! use sentra_policy::Authorizer;
//! use std::sync::Arc;
//!
//! # async fn wire(catalog: Arc<dyn PolicyCatalog>, members: Arc<dyn MembershipClient>) {
//! let config = EngineConfig::default();
//!
//! // Default stack, one call.
//! let engine = Engine::spawn(Arc::clone(&catalog), Arc::clone(&members), &config);
//!
//! // Or by hand, e.g. to add engines to the chain.
//! let store = Arc::new(PolicyStore::new(catalog));
//! let _refresh = store.spawn_refresh_task(config.refresh_interval());
//!
//! let resolver = Arc::new(IdentityResolver::new(members, config.resolver_ttl()));
//! let primary: Arc<dyn Authorizer> = Arc::new(DataAuthorizer::new(store, resolver));
//!
//! let chain = Arc::new(AuthorizerChain::new(primary, vec![]));
//! let service = PrivilegeService::new(chain);
//! # }
//! ```

pub mod authorizer;
pub mod catalog;
pub mod chain;
pub mod config;
pub mod engine;
pub mod membership;
pub mod resolver;
pub mod service;
pub mod store;

pub use authorizer::DataAuthorizer;
pub use catalog::{CatalogError, PolicyCatalog, StaticCatalog};
pub use chain::AuthorizerChain;
pub use config::EngineConfig;
pub use engine::Engine;
pub use membership::{MembershipClient, MembershipError, MembershipSet};
pub use resolver::IdentityResolver;
pub use service::{PrivilegeService, MANAGE_POLICIES};
pub use store::{PolicySnapshot, PolicyStore, StoreHealth};

// Re-export the evaluation core (it's part of the public API)
pub use sentra_policy::{
    AuthError, AuthRequest, Authorizer, Decision, Policy, PrivilegeLister, PrivilegeSet,
};
