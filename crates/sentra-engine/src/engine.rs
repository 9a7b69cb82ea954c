//! One-call wiring of the default engine stack.
//!
//! [`Engine::spawn`] assembles what the lib-level example wires by
//! hand: a [`PolicyStore`] with its background refresh task, a caching
//! [`IdentityResolver`], the built-in [`DataAuthorizer`] as the chain
//! primary, and a [`PrivilegeService`] in front. Services that need
//! additional engines in the chain wire the pieces manually instead.

use crate::authorizer::DataAuthorizer;
use crate::catalog::PolicyCatalog;
use crate::chain::AuthorizerChain;
use crate::config::EngineConfig;
use crate::membership::MembershipClient;
use crate::resolver::IdentityResolver;
use crate::service::PrivilegeService;
use crate::store::{PolicyStore, StoreHealth};
use sentra_policy::Authorizer;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A fully wired privilege engine with its background refresh task.
///
/// # Example
///
/// ```no_run
/// use sentra_engine::{Engine, EngineConfig, MembershipClient, PolicyCatalog};
/// use sentra_types::ActorId;
/// use std::sync::Arc;
///
/// # async fn demo(catalog: Arc<dyn PolicyCatalog>, members: Arc<dyn MembershipClient>) {
/// let engine = Engine::spawn(catalog, members, &EngineConfig::default());
/// let alice = ActorId::new("alice");
/// let privileges = engine.service().granted_privileges(&alice, &alice, None).await;
/// # }
/// ```
#[derive(Debug)]
pub struct Engine {
    service: PrivilegeService,
    store: Arc<PolicyStore>,
    resolver: Arc<IdentityResolver>,
    refresh_task: JoinHandle<()>,
}

impl Engine {
    /// Wires the default stack and spawns the refresh task. Must be
    /// called from within a tokio runtime.
    ///
    /// The store starts unloaded; queries fail closed until the first
    /// refresh lands. Call [`PolicyStore::refresh`] directly to load
    /// synchronously at startup.
    #[must_use]
    pub fn spawn(
        catalog: Arc<dyn PolicyCatalog>,
        members: Arc<dyn MembershipClient>,
        config: &EngineConfig,
    ) -> Self {
        let store = Arc::new(PolicyStore::new(catalog));
        let refresh_task = store.spawn_refresh_task(config.refresh_interval());
        let resolver = Arc::new(IdentityResolver::new(members, config.resolver_ttl()));
        let authorizer: Arc<dyn Authorizer> = Arc::new(DataAuthorizer::new(
            Arc::clone(&store),
            Arc::clone(&resolver),
        ));
        let chain = Arc::new(AuthorizerChain::new(authorizer, Vec::new()));
        Self {
            service: PrivilegeService::new(chain),
            store,
            resolver,
            refresh_task,
        }
    }

    /// The query entry point.
    #[must_use]
    pub fn service(&self) -> &PrivilegeService {
        &self.service
    }

    /// The policy store, for explicit refresh and invalidation.
    #[must_use]
    pub fn store(&self) -> &Arc<PolicyStore> {
        &self.store
    }

    /// The identity resolver, for membership cache invalidation.
    #[must_use]
    pub fn resolver(&self) -> &Arc<IdentityResolver> {
        &self.resolver
    }

    /// The store's health signal.
    #[must_use]
    pub fn health(&self) -> StoreHealth {
        self.store.health()
    }

    /// Stops the background refresh task. Queries keep working against
    /// the last published snapshot.
    pub fn shutdown(self) {
        self.refresh_task.abort();
    }
}
