//! Object type resolution.
//!
//! Maps a live object identifier to its current fully-qualified Move type.
//! This is the only suspension point of the validation pipeline.
//!
//! - [`GraphQLObjectResolver`]: live lookup against a Sui GraphQL endpoint
//! - [`RetryingResolver`]: bounded retry of transient failures
//! - [`InMemoryObjectResolver`]: fixture-backed, for offline checks and tests

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use sui_call_transport::GraphQLClient;
use sui_call_types::RetryConfig;
use sui_types::base_types::ObjectID;

/// Which network a lookup targets. Passed explicitly into every call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkContext {
    pub network: String,
    pub graphql_endpoint: String,
}

impl NetworkContext {
    pub fn new(network: &str, graphql_endpoint: &str) -> Self {
        Self {
            network: network.to_string(),
            graphql_endpoint: graphql_endpoint.to_string(),
        }
    }

    /// Context for a named network using its public GraphQL endpoint.
    pub fn for_network(network: &str) -> Self {
        Self::new(
            network,
            &sui_call_transport::default_graphql_endpoint(network),
        )
    }
}

/// Why an object type could not be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The identifier is not a live Move object.
    NotFound { object_id: String },
    /// Network, timeout, or server failure. May succeed on retry.
    Transient { object_id: String, message: String },
    /// The identifier is not a well-formed object ID.
    Malformed { object_id: String },
}

impl ResolveError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ResolveError::Transient { .. })
    }

    pub fn object_id(&self) -> &str {
        match self {
            ResolveError::NotFound { object_id }
            | ResolveError::Transient { object_id, .. }
            | ResolveError::Malformed { object_id } => object_id,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotFound { object_id } => write!(f, "object not found: {}", object_id),
            ResolveError::Transient { object_id, message } => {
                write!(f, "lookup of {} failed: {}", object_id, message)
            }
            ResolveError::Malformed { object_id } => {
                write!(f, "malformed object id: {}", object_id)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Read-only lookup of an object's current type string.
#[async_trait]
pub trait ObjectTypeResolver: Send + Sync {
    async fn resolve(&self, object_id: &str, ctx: &NetworkContext)
        -> Result<String, ResolveError>;
}

#[async_trait]
impl<T: ObjectTypeResolver + ?Sized> ObjectTypeResolver for Arc<T> {
    async fn resolve(
        &self,
        object_id: &str,
        ctx: &NetworkContext,
    ) -> Result<String, ResolveError> {
        (**self).resolve(object_id, ctx).await
    }
}

#[async_trait]
impl<T: ObjectTypeResolver + ?Sized> ObjectTypeResolver for Box<T> {
    async fn resolve(
        &self,
        object_id: &str,
        ctx: &NetworkContext,
    ) -> Result<String, ResolveError> {
        (**self).resolve(object_id, ctx).await
    }
}

#[async_trait]
impl<T: ObjectTypeResolver + ?Sized> ObjectTypeResolver for &T {
    async fn resolve(
        &self,
        object_id: &str,
        ctx: &NetworkContext,
    ) -> Result<String, ResolveError> {
        (**self).resolve(object_id, ctx).await
    }
}

// =============================================================================
// GraphQL
// =============================================================================

/// Resolves object types over Sui GraphQL.
///
/// One blocking client is kept per endpoint; requests run on tokio's blocking
/// pool so concurrent lookups do not stall the runtime.
pub struct GraphQLObjectResolver {
    timeout: Duration,
    connect_timeout: Duration,
    clients: Mutex<HashMap<String, GraphQLClient>>,
}

impl GraphQLObjectResolver {
    pub fn new() -> Self {
        Self::with_timeouts(
            Duration::from_secs(GraphQLClient::DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(GraphQLClient::DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            timeout,
            connect_timeout,
            clients: Mutex::new(HashMap::new()),
        }
    }

    fn client_for(&self, endpoint: &str) -> GraphQLClient {
        self.clients
            .lock()
            .entry(endpoint.to_string())
            .or_insert_with(|| {
                GraphQLClient::with_timeouts(endpoint, self.timeout, self.connect_timeout)
            })
            .clone()
    }
}

impl Default for GraphQLObjectResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectTypeResolver for GraphQLObjectResolver {
    async fn resolve(
        &self,
        object_id: &str,
        ctx: &NetworkContext,
    ) -> Result<String, ResolveError> {
        let id = ObjectID::from_hex_literal(object_id.trim()).map_err(|_| {
            ResolveError::Malformed {
                object_id: object_id.to_string(),
            }
        })?;

        let client = self.client_for(&ctx.graphql_endpoint);
        let address = id.to_hex_literal();
        debug!(object_id = %address, network = %ctx.network, "resolving object type");

        let fetched = tokio::task::spawn_blocking(move || client.fetch_object_type(&address))
            .await
            .map_err(|e| ResolveError::Transient {
                object_id: object_id.to_string(),
                message: format!("lookup task failed: {e}"),
            })?;

        match fetched {
            Ok(Some(type_string)) => Ok(type_string),
            Ok(None) => Err(ResolveError::NotFound {
                object_id: object_id.to_string(),
            }),
            Err(e) => Err(ResolveError::Transient {
                object_id: object_id.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

// =============================================================================
// Retry
// =============================================================================

/// Retries `Transient` failures with exponential backoff. Other errors pass
/// through on the first attempt.
pub struct RetryingResolver<R> {
    inner: R,
    retry: RetryConfig,
}

impl<R: ObjectTypeResolver> RetryingResolver<R> {
    pub fn new(inner: R, retry: RetryConfig) -> Self {
        Self { inner, retry }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: ObjectTypeResolver> ObjectTypeResolver for RetryingResolver<R> {
    async fn resolve(
        &self,
        object_id: &str,
        ctx: &NetworkContext,
    ) -> Result<String, ResolveError> {
        let mut attempt = 0;
        loop {
            match self.inner.resolve(object_id, ctx).await {
                Err(e) if e.is_transient() && attempt < self.retry.retries => {
                    let backoff = self.retry.backoff(attempt);
                    warn!(
                        object_id = object_id,
                        attempt = attempt + 1,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "transient lookup failure, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Fixture-backed resolver.
///
/// Objects map identifiers to type strings; failures and per-object delays
/// can be injected. Every call is counted.
#[derive(Default)]
pub struct InMemoryObjectResolver {
    objects: HashMap<String, String>,
    failures: Mutex<HashMap<String, Vec<ResolveError>>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl InMemoryObjectResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `{ "<object id>": "<type string>", ... }`.
    pub fn from_map(objects: HashMap<String, String>) -> Self {
        Self {
            objects,
            ..Self::default()
        }
    }

    /// Load a JSON fixture of the form `{ "<object id>": "<type string>" }`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read object fixture {}", path.display()))?;
        let objects: HashMap<String, String> = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid object fixture {}", path.display()))?;
        Ok(Self::from_map(objects))
    }

    pub fn with_object(mut self, object_id: &str, type_string: &str) -> Self {
        self.insert(object_id, type_string);
        self
    }

    pub fn insert(&mut self, object_id: &str, type_string: &str) {
        self.objects
            .insert(object_id.to_string(), type_string.to_string());
    }

    /// Queue a failure returned before any fixture lookup for `object_id`.
    /// Queued failures are consumed in order, one per call.
    pub fn with_failure(self, object_id: &str, error: ResolveError) -> Self {
        self.failures
            .lock()
            .entry(object_id.to_string())
            .or_default()
            .push(error);
        self
    }

    /// Delay every lookup of `object_id`.
    pub fn with_delay(mut self, object_id: &str, delay: Duration) -> Self {
        self.delays.insert(object_id.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectTypeResolver for InMemoryObjectResolver {
    async fn resolve(
        &self,
        object_id: &str,
        _ctx: &NetworkContext,
    ) -> Result<String, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(object_id) {
            tokio::time::sleep(*delay).await;
        }

        let queued = {
            let mut failures = self.failures.lock();
            failures.get_mut(object_id).and_then(|queue| {
                if queue.is_empty() {
                    None
                } else {
                    Some(queue.remove(0))
                }
            })
        };
        if let Some(err) = queued {
            return Err(err);
        }

        self.objects
            .get(object_id)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                object_id: object_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> NetworkContext {
        NetworkContext::new("testnet", "http://localhost:9125/graphql")
    }

    fn transient(id: &str) -> ResolveError {
        ResolveError::Transient {
            object_id: id.to_string(),
            message: "timed out".to_string(),
        }
    }

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let resolver = InMemoryObjectResolver::new().with_object("O1", "0x2::clock::Clock");
        assert_eq!(
            resolver.resolve("O1", &ctx()).await.unwrap(),
            "0x2::clock::Clock"
        );
        assert_eq!(
            resolver.resolve("O2", &ctx()).await,
            Err(ResolveError::NotFound {
                object_id: "O2".into()
            })
        );
        assert_eq!(resolver.call_count(), 2);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_single_transient_failure() {
        let inner = InMemoryObjectResolver::new()
            .with_object("O1", "0x2::clock::Clock")
            .with_failure("O1", transient("O1"));
        let resolver = RetryingResolver::new(inner, RetryConfig::new(1, 1, 1));

        assert_eq!(
            resolver.resolve("O1", &ctx()).await.unwrap(),
            "0x2::clock::Clock"
        );
        assert_eq!(resolver.inner().call_count(), 2);
    }

    #[tokio::test]
    async fn test_retry_is_bounded() {
        let inner = InMemoryObjectResolver::new()
            .with_object("O1", "0x2::clock::Clock")
            .with_failure("O1", transient("O1"))
            .with_failure("O1", transient("O1"));
        let resolver = RetryingResolver::new(inner, RetryConfig::new(1, 1, 1));

        let err = resolver.resolve("O1", &ctx()).await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(resolver.inner().call_count(), 2);
    }

    #[tokio::test]
    async fn test_retry_skips_non_transient_errors() {
        let inner = InMemoryObjectResolver::new().with_failure(
            "bad",
            ResolveError::Malformed {
                object_id: "bad".into(),
            },
        );
        let resolver = RetryingResolver::new(inner, RetryConfig::new(3, 1, 1));

        let err = resolver.resolve("bad", &ctx()).await.unwrap_err();
        assert!(matches!(err, ResolveError::Malformed { .. }));
        assert_eq!(resolver.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn test_graphql_resolver_rejects_malformed_id_without_network() {
        let resolver = GraphQLObjectResolver::new();
        let err = resolver.resolve("not-an-id", &ctx()).await.unwrap_err();
        assert_eq!(
            err,
            ResolveError::Malformed {
                object_id: "not-an-id".into()
            }
        );
    }

    #[test]
    fn test_resolve_error_display() {
        assert_eq!(
            transient("0x6").to_string(),
            "lookup of 0x6 failed: timed out"
        );
        assert_eq!(transient("0x6").object_id(), "0x6");
    }

    #[test]
    fn test_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("objects.json");
        std::fs::write(&path, r#"{ "0x6": "0x2::clock::Clock" }"#).unwrap();
        let resolver = InMemoryObjectResolver::from_json_file(&path).unwrap();
        assert_eq!(resolver.objects.get("0x6").unwrap(), "0x2::clock::Clock");
    }

    /// Run with: cargo test test_graphql_resolves_clock -- --ignored --nocapture
    #[tokio::test]
    #[ignore]
    async fn test_graphql_resolves_clock() {
        let resolver = GraphQLObjectResolver::new();
        let ty = resolver
            .resolve("0x6", &NetworkContext::for_network("mainnet"))
            .await
            .unwrap();
        assert!(ty.ends_with("::clock::Clock"));
    }
}
