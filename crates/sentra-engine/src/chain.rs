//! Ordered composition of authorization engines.
//!
//! An [`AuthorizerChain`] holds one or more independent engines with
//! one designated primary. Privilege-listing queries go only to the
//! primary: aggregating lists across heterogeneous engines with
//! possibly incompatible privilege vocabularies has no well-defined
//! union semantics. `authorize` composes across the whole chain.
//!
//! The chain is built once at startup and passed explicitly to entry
//! points. Reconfiguration means building a new chain and swapping the
//! `Arc` — never in-place mutation visible to in-flight queries.

use sentra_policy::{AuthError, AuthRequest, Authorizer, Decision, PrivilegeSet};
use sentra_types::{ActorId, ResourceSpec};
use std::sync::Arc;
use tracing::warn;

/// An ordered, non-empty list of engines; index 0 is the primary.
///
/// # Combination Rule
///
/// `authorize` is allow-if-any-approves: engines are consulted in
/// order and the first `Allow` short-circuits. A failing engine is
/// treated as denying (logged); only if *every* engine fails does the
/// first error propagate, failing the call closed.
///
/// # Example
///
/// ```no_run
/// use sentra_engine::AuthorizerChain;
/// use sentra_policy::Authorizer;
/// use std::sync::Arc;
///
/// # fn demo(primary: Arc<dyn Authorizer>, audit: Arc<dyn Authorizer>) {
/// let chain = AuthorizerChain::new(primary, vec![audit]);
/// assert_eq!(chain.len(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AuthorizerChain {
    engines: Vec<Arc<dyn Authorizer>>,
}

impl AuthorizerChain {
    /// Builds a chain with `primary` first, followed by any additional
    /// engines in order. Non-empty by construction.
    #[must_use]
    pub fn new(primary: Arc<dyn Authorizer>, additional: Vec<Arc<dyn Authorizer>>) -> Self {
        let mut engines = Vec::with_capacity(1 + additional.len());
        engines.push(primary);
        engines.extend(additional);
        Self { engines }
    }

    /// The designated primary engine, used for privilege listing.
    #[must_use]
    pub fn default_authorizer(&self) -> &dyn Authorizer {
        self.engines[0].as_ref()
    }

    /// Number of engines in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Always `false`: a chain is non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Authorizes across the full chain (allow-if-any-approves).
    ///
    /// # Errors
    ///
    /// Propagates the first engine error only if every engine errored;
    /// otherwise errors are logged and that engine counts as denying.
    pub async fn authorize(&self, request: &AuthRequest) -> Result<Decision, AuthError> {
        let mut first_error: Option<AuthError> = None;
        let mut any_answered = false;

        for engine in &self.engines {
            match engine.authorize(request).await {
                Ok(Decision::Allow) => return Ok(Decision::Allow),
                Ok(Decision::Deny) => any_answered = true,
                Err(err) => {
                    warn!(
                        engine = engine.name(),
                        error = %err,
                        "authorizer failed; treating as deny"
                    );
                    first_error.get_or_insert(err);
                }
            }
        }

        match (any_answered, first_error) {
            (false, Some(err)) => Err(err),
            _ => Ok(Decision::Deny),
        }
    }

    /// Lists privileges via the primary engine's listing capability.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnsupportedOperation`] if the primary does
    /// not expose [`PrivilegeLister`](sentra_policy::PrivilegeLister) —
    /// an explicit signal, never a silent empty result.
    pub async fn granted_privileges(
        &self,
        actor: &ActorId,
        resource: Option<&ResourceSpec>,
    ) -> Result<PrivilegeSet, AuthError> {
        let primary = self.default_authorizer();
        let lister = primary
            .privilege_lister()
            .ok_or_else(|| AuthError::UnsupportedOperation {
                engine: primary.name().to_string(),
            })?;
        lister.granted_privileges(actor, resource).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sentra_types::Privilege;

    /// Engine with a fixed answer and no listing capability.
    #[derive(Debug)]
    struct Fixed {
        name: &'static str,
        decision: Option<Decision>, // None = error
    }

    #[async_trait]
    impl Authorizer for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        async fn authorize(&self, _request: &AuthRequest) -> Result<Decision, AuthError> {
            self.decision.ok_or(AuthError::DependencyUnavailable {
                dependency: "test".to_string(),
            })
        }
    }

    fn allow() -> Arc<dyn Authorizer> {
        Arc::new(Fixed {
            name: "allow",
            decision: Some(Decision::Allow),
        })
    }

    fn deny() -> Arc<dyn Authorizer> {
        Arc::new(Fixed {
            name: "deny",
            decision: Some(Decision::Deny),
        })
    }

    fn broken() -> Arc<dyn Authorizer> {
        Arc::new(Fixed {
            name: "broken",
            decision: None,
        })
    }

    fn request() -> AuthRequest {
        AuthRequest::new(ActorId::new("alice"), Privilege::new("EDIT"))
    }

    #[tokio::test]
    async fn any_allow_wins() {
        let chain = AuthorizerChain::new(deny(), vec![allow()]);
        let decision = chain.authorize(&request()).await.expect("authorize");
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn all_deny_is_deny() {
        let chain = AuthorizerChain::new(deny(), vec![deny()]);
        let decision = chain.authorize(&request()).await.expect("authorize");
        assert!(!decision.is_allowed());
    }

    #[tokio::test]
    async fn failing_engine_counts_as_deny_when_another_answers() {
        let chain = AuthorizerChain::new(broken(), vec![deny()]);
        let decision = chain.authorize(&request()).await.expect("authorize");
        assert!(!decision.is_allowed());
    }

    #[tokio::test]
    async fn failing_engine_does_not_mask_a_later_allow() {
        let chain = AuthorizerChain::new(broken(), vec![allow()]);
        let decision = chain.authorize(&request()).await.expect("authorize");
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn all_engines_failing_fails_closed() {
        let chain = AuthorizerChain::new(broken(), vec![broken()]);
        let err = chain.authorize(&request()).await.expect_err("must fail");
        assert!(matches!(err, AuthError::DependencyUnavailable { .. }));
    }

    #[tokio::test]
    async fn listing_without_capability_is_unsupported() {
        let chain = AuthorizerChain::new(deny(), vec![]);
        let err = chain
            .granted_privileges(&ActorId::new("alice"), None)
            .await
            .expect_err("no capability");

        match err {
            AuthError::UnsupportedOperation { engine } => assert_eq!(engine, "deny"),
            other => panic!("expected UnsupportedOperation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn primary_is_first_engine() {
        let chain = AuthorizerChain::new(allow(), vec![deny()]);
        assert_eq!(chain.default_authorizer().name(), "allow");
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
    }
}
