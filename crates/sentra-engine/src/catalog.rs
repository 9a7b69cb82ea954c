//! Policy catalog client trait.
//!
//! The catalog is the external source of truth for policies. The engine
//! never writes to it; it periodically pulls the full ACTIVE set and
//! publishes an immutable snapshot (see [`crate::store`]).
//!
//! ```text
//! PolicyCatalog trait (THIS MODULE)   ← outbound dependency definition
//!          │
//!          ├── (embedder-provided HTTP/DB client)
//!          └── StaticCatalog                      ← fixed in-memory impl
//! ```

use async_trait::async_trait;
use sentra_policy::Policy;
use thiserror::Error;

/// Errors from fetching the policy catalog.
///
/// These never reach query callers: a failed fetch leaves the last good
/// snapshot in place and is reported through
/// [`StoreHealth`](crate::store::StoreHealth).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog service could not be reached.
    #[error("catalog unreachable: {0}")]
    Unreachable(String),

    /// The catalog responded with data the engine could not use.
    #[error("catalog returned invalid data: {0}")]
    InvalidData(String),
}

/// Read-only client for the external policy catalog.
///
/// Implementations must return every policy the catalog considers
/// ACTIVE. Returning inactive records is tolerated — snapshot
/// construction drops them — but wasteful.
#[async_trait]
pub trait PolicyCatalog: Send + Sync + std::fmt::Debug {
    /// Fetches all active policy records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the fetch fails; the store recovers
    /// by keeping its previous snapshot.
    async fn fetch_active_policies(&self) -> Result<Vec<Policy>, CatalogError>;
}

/// A catalog serving a fixed policy list. Intended for tests and
/// bootstrapping; production embeds a real service client.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    policies: Vec<Policy>,
}

impl StaticCatalog {
    /// Creates a catalog serving the given policies.
    #[must_use]
    pub fn new(policies: Vec<Policy>) -> Self {
        Self { policies }
    }
}

#[async_trait]
impl PolicyCatalog for StaticCatalog {
    async fn fetch_active_policies(&self) -> Result<Vec<Policy>, CatalogError> {
        Ok(self.policies.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentra_policy::{ActorPredicate, PolicyId, Privilege};

    #[tokio::test]
    async fn static_catalog_serves_its_policies() {
        let policy = sentra_policy::Policy::builder(PolicyId::new("p1"))
            .actors(ActorPredicate::all())
            .privileges([Privilege::new("VIEW")])
            .build()
            .expect("valid policy");

        let catalog = StaticCatalog::new(vec![policy.clone()]);
        let fetched = catalog.fetch_active_policies().await.expect("fetch");
        assert_eq!(fetched, vec![policy]);
    }

    #[test]
    fn error_display() {
        let err = CatalogError::Unreachable("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));

        let err = CatalogError::InvalidData("missing privileges".to_string());
        assert!(err.to_string().contains("invalid data"));
    }
}
