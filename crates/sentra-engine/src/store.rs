//! Policy store: immutable snapshots with background refresh.
//!
//! [`PolicyStore`] owns the engine's only shared mutable state — a
//! single `Arc` pointing at the current [`PolicySnapshot`]. Refresh
//! builds a whole new snapshot and swaps the pointer; a query captures
//! one `Arc` at its start and uses it consistently, so concurrent
//! refresh can never produce a partially-updated view.
//!
//! # Failure Model
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | Fetch fails, snapshot exists | Keep serving last good snapshot, health → Degraded, `warn!` |
//! | Fetch fails, never loaded | `snapshot()` fails closed with `DependencyUnavailable` |
//! | Fetch succeeds | New snapshot published atomically, health → Healthy |

use crate::catalog::{CatalogError, PolicyCatalog};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use sentra_policy::{AuthError, Policy, PolicyId};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, warn};

// ─── Snapshot ───────────────────────────────────────────────────────

/// An immutable, versioned view of all ACTIVE policies.
///
/// Built once per refresh and never mutated. Inactive records are
/// dropped at build time; policies are held in (creation time, id)
/// order so iteration is stable across refreshes of identical content.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicySnapshot {
    version: u64,
    refreshed_at: DateTime<Utc>,
    policies: Vec<Policy>,
}

impl PolicySnapshot {
    /// Builds a snapshot from catalog records, keeping only ACTIVE
    /// policies.
    #[must_use]
    pub fn build(version: u64, mut policies: Vec<Policy>) -> Self {
        policies.retain(Policy::is_active);
        policies.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Self {
            version,
            refreshed_at: Utc::now(),
            policies,
        }
    }

    /// Monotonically increasing snapshot version.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// When this snapshot was published.
    #[must_use]
    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    /// The active policies, in stable order.
    #[must_use]
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Number of active policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns `true` if no policies are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

// ─── Health ─────────────────────────────────────────────────────────

/// Health signal exposed by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreHealth {
    /// No snapshot has ever loaded; queries fail closed.
    Unloaded,
    /// The latest refresh succeeded.
    Healthy {
        /// Version of the published snapshot.
        version: u64,
        /// When it was published.
        refreshed_at: DateTime<Utc>,
    },
    /// Serving a stale snapshot after one or more failed refreshes.
    Degraded {
        /// Version of the stale snapshot still being served.
        version: u64,
        /// When that snapshot was published.
        refreshed_at: DateTime<Utc>,
        /// Failed refresh attempts since the last success.
        consecutive_failures: u32,
        /// Message from the most recent failure.
        last_error: String,
    },
}

// ─── Store ──────────────────────────────────────────────────────────

/// Maintains the in-memory, periodically refreshed policy snapshot.
///
/// # Concurrency
///
/// `snapshot()` takes a read lock only long enough to clone an `Arc`;
/// it never blocks on refresh I/O. Refresh holds the write lock only
/// for the pointer swap. There is no per-actor or per-resource locking
/// anywhere on the read path.
///
/// # Example
///
/// ```
/// use sentra_engine::{PolicyStore, StaticCatalog};
/// use sentra_policy::{ActorPredicate, Policy, PolicyId, Privilege};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let policy = Policy::builder(PolicyId::new("p1"))
///     .actors(ActorPredicate::all())
///     .privileges([Privilege::new("VIEW")])
///     .build()?;
///
/// let store = PolicyStore::new(Arc::new(StaticCatalog::new(vec![policy])));
/// assert!(store.snapshot().is_err()); // Nothing loaded yet
///
/// store.refresh().await?;
/// assert_eq!(store.snapshot()?.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PolicyStore {
    catalog: Arc<dyn PolicyCatalog>,
    current: RwLock<Option<Arc<PolicySnapshot>>>,
    next_version: AtomicU64,
    consecutive_failures: AtomicU32,
    last_error: RwLock<Option<String>>,
    refresh_now: Notify,
}

impl PolicyStore {
    /// Creates a store over the given catalog. No snapshot is loaded
    /// until the first [`refresh`](Self::refresh).
    #[must_use]
    pub fn new(catalog: Arc<dyn PolicyCatalog>) -> Self {
        Self {
            catalog,
            current: RwLock::new(None),
            next_version: AtomicU64::new(1),
            consecutive_failures: AtomicU32::new(0),
            last_error: RwLock::new(None),
            refresh_now: Notify::new(),
        }
    }

    /// Returns the current snapshot without blocking on I/O.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DependencyUnavailable`] if the catalog has
    /// never produced a usable snapshot.
    pub fn snapshot(&self) -> Result<Arc<PolicySnapshot>, AuthError> {
        self.current
            .read()
            .clone()
            .ok_or(AuthError::DependencyUnavailable {
                dependency: "policy catalog".to_string(),
            })
    }

    /// Returns the current snapshot, or `None` before the first
    /// successful refresh.
    #[must_use]
    pub fn try_snapshot(&self) -> Option<Arc<PolicySnapshot>> {
        self.current.read().clone()
    }

    /// Fetches the catalog and atomically replaces the published
    /// snapshot. Readers in flight keep the snapshot they captured.
    ///
    /// # Errors
    ///
    /// Returns the catalog error on a failed fetch. The previous
    /// snapshot, if any, stays published.
    pub async fn refresh(&self) -> Result<(), CatalogError> {
        match self.catalog.fetch_active_policies().await {
            Ok(policies) => {
                let version = self.next_version.fetch_add(1, Ordering::Relaxed);
                let snapshot = Arc::new(PolicySnapshot::build(version, policies));
                debug!(
                    version,
                    policies = snapshot.len(),
                    "published policy snapshot"
                );
                *self.current.write() = Some(snapshot);
                self.consecutive_failures.store(0, Ordering::Relaxed);
                *self.last_error.write() = None;
                Ok(())
            }
            Err(err) => {
                let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(
                    consecutive_failures = failures,
                    error = %err,
                    "policy catalog refresh failed; serving last good snapshot"
                );
                *self.last_error.write() = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Requests an out-of-band early refresh, e.g. after a policy
    /// change notification. Returns immediately; the background task
    /// picks the request up.
    pub fn invalidate(&self, policy_id: &PolicyId) {
        debug!(policy = %policy_id, "early refresh requested");
        self.refresh_now.notify_one();
    }

    /// The store's health signal for monitoring.
    #[must_use]
    pub fn health(&self) -> StoreHealth {
        let snapshot = self.current.read().clone();
        let failures = self.consecutive_failures.load(Ordering::Relaxed);
        match snapshot {
            None => StoreHealth::Unloaded,
            Some(snapshot) if failures == 0 => StoreHealth::Healthy {
                version: snapshot.version(),
                refreshed_at: snapshot.refreshed_at(),
            },
            Some(snapshot) => StoreHealth::Degraded {
                version: snapshot.version(),
                refreshed_at: snapshot.refreshed_at(),
                consecutive_failures: failures,
                last_error: self.last_error.read().clone().unwrap_or_default(),
            },
        }
    }

    /// Spawns the background refresh task: one refresh immediately,
    /// then one per `interval` or whenever [`invalidate`](Self::invalidate)
    /// fires. Refresh failures are logged and absorbed; the task never
    /// exits on its own. Abort the returned handle to stop it.
    #[must_use]
    pub fn spawn_refresh_task(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = store.refresh_now.notified() => {}
                }
                // refresh() already logs failures; nothing to add here.
                let _ = store.refresh().await;
            }
        })
    }
}
