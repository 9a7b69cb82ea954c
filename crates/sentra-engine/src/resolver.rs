//! Identity resolution with a bounded TTL cache.
//!
//! [`IdentityResolver`] expands an actor identifier into its transitive
//! group/role memberships. Membership lookups hit an external service,
//! so answers are cached per actor for a configurable TTL.
//!
//! # Degradation
//!
//! A failed lookup yields a context with *empty* membership sets for
//! that query — the actor keeps its direct identity and nothing more.
//! This is fail-narrow, not fail-open: the actor can lose
//! membership-derived privileges but never gain any. Failures are not
//! cached; the next query retries the service.
//!
//! # Cache Scope
//!
//! One cache per resolver, shared process-wide by every query flowing
//! through it. Concurrent misses for the same actor may race on
//! population; the recompute is idempotent and last write wins, which
//! avoids any locking on the hot path beyond the map itself.

use crate::membership::{MembershipClient, MembershipSet};
use parking_lot::RwLock;
use sentra_types::{ActorContext, ActorId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

struct CacheEntry {
    memberships: MembershipSet,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Expands actors into [`ActorContext`]s, caching membership lookups.
///
/// # Example
///
/// ```no_run
/// use sentra_engine::{IdentityResolver, MembershipClient};
/// use sentra_types::ActorId;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn demo(client: Arc<dyn MembershipClient>) {
/// let resolver = IdentityResolver::new(client, Duration::from_secs(60));
/// let ctx = resolver.resolve(&ActorId::new("alice")).await;
/// # }
/// ```
pub struct IdentityResolver {
    client: Arc<dyn MembershipClient>,
    ttl: Duration,
    cache: RwLock<HashMap<ActorId, CacheEntry>>,
}

impl IdentityResolver {
    /// Creates a resolver over the given client with the given cache TTL.
    ///
    /// The TTL is the staleness window: a membership change becomes
    /// visible at most `ttl` after the affected actor's entry was
    /// cached.
    #[must_use]
    pub fn new(client: Arc<dyn MembershipClient>, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves the actor's context, from cache when fresh.
    ///
    /// Infallible by contract: lookup failures degrade to a context
    /// with no memberships and are logged, never surfaced.
    pub async fn resolve(&self, actor: &ActorId) -> ActorContext {
        if let Some(memberships) = self.cached(actor) {
            return Self::context(actor, memberships);
        }

        match self.client.fetch_transitive_memberships(actor).await {
            Ok(memberships) => {
                debug!(
                    actor = %actor,
                    groups = memberships.groups.len(),
                    roles = memberships.roles.len(),
                    "cached membership lookup"
                );
                let mut cache = self.cache.write();
                // Sweep on insert so the map stays bounded by the set of
                // actors seen within one TTL window.
                cache.retain(|_, entry| entry.is_fresh());
                cache.insert(
                    actor.clone(),
                    CacheEntry {
                        memberships: memberships.clone(),
                        expires_at: Instant::now() + self.ttl,
                    },
                );
                drop(cache);
                Self::context(actor, memberships)
            }
            Err(err) => {
                warn!(
                    actor = %actor,
                    error = %err,
                    "membership lookup failed; resolving with direct identity only"
                );
                ActorContext::new(actor.clone())
            }
        }
    }

    /// Drops the cached entry for one actor.
    pub fn invalidate(&self, actor: &ActorId) {
        self.cache.write().remove(actor);
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.cache.write().clear();
    }

    /// Number of cached entries, fresh or expired.
    #[must_use]
    pub fn cached_actors(&self) -> usize {
        self.cache.read().len()
    }

    fn cached(&self, actor: &ActorId) -> Option<MembershipSet> {
        let cache = self.cache.read();
        cache
            .get(actor)
            .filter(|entry| entry.is_fresh())
            .map(|entry| entry.memberships.clone())
    }

    fn context(actor: &ActorId, memberships: MembershipSet) -> ActorContext {
        ActorContext::new(actor.clone())
            .with_groups(memberships.groups)
            .with_roles(memberships.roles)
    }
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("ttl", &self.ttl)
            .field("cached_actors", &self.cached_actors())
            .finish_non_exhaustive()
    }
}
