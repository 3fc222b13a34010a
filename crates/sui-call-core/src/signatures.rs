//! Function signature sources.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use sui_call_transport::GraphQLClient;
use sui_call_types::{FunctionSignature, FunctionTarget};

use crate::resolver::NetworkContext;

/// Read-only lookup of a deployed function's normalized signature.
#[async_trait]
pub trait SignatureSource: Send + Sync {
    async fn fetch_function(
        &self,
        target: &FunctionTarget,
        ctx: &NetworkContext,
    ) -> Result<FunctionSignature>;
}

/// Fetches signatures over Sui GraphQL on tokio's blocking pool.
pub struct GraphQLSignatureSource {
    timeout: Duration,
    connect_timeout: Duration,
}

impl GraphQLSignatureSource {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            timeout,
            connect_timeout,
        }
    }
}

impl Default for GraphQLSignatureSource {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(GraphQLClient::DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(GraphQLClient::DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }
}

#[async_trait]
impl SignatureSource for GraphQLSignatureSource {
    async fn fetch_function(
        &self,
        target: &FunctionTarget,
        ctx: &NetworkContext,
    ) -> Result<FunctionSignature> {
        let client =
            GraphQLClient::with_timeouts(&ctx.graphql_endpoint, self.timeout, self.connect_timeout);
        let owned = target.clone();
        let start = Instant::now();

        let signature = tokio::task::spawn_blocking(move || {
            client.fetch_function_signature(&owned.package, &owned.module, &owned.function)
        })
        .await
        .context("signature fetch task failed")??;

        debug!(
            target_fn = %target,
            params = signature.parameters.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fetched function signature"
        );
        Ok(signature)
    }
}

/// Signatures from memory, keyed by `package::module::function`.
#[derive(Debug, Default)]
pub struct InMemorySignatureSource {
    signatures: Mutex<HashMap<String, FunctionSignature>>,
}

impl InMemorySignatureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, signature: FunctionSignature) {
        self.signatures
            .lock()
            .insert(signature.target.to_string(), signature);
    }
}

#[async_trait]
impl SignatureSource for InMemorySignatureSource {
    async fn fetch_function(
        &self,
        target: &FunctionTarget,
        _ctx: &NetworkContext,
    ) -> Result<FunctionSignature> {
        self.signatures
            .lock()
            .get(&target.to_string())
            .cloned()
            .ok_or_else(|| anyhow!("function not found: {}", target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sui_call_types::{NormalizedType, ScalarWidth};

    #[tokio::test]
    async fn test_in_memory_source() {
        let source = InMemorySignatureSource::new();
        let target = FunctionTarget::new("0x2", "m", "f");
        source.insert(FunctionSignature {
            target: target.clone(),
            type_parameter_count: 0,
            parameters: vec![NormalizedType::Scalar(ScalarWidth::U64)],
        });

        let ctx = NetworkContext::for_network("mainnet");
        let sig = source.fetch_function(&target, &ctx).await.unwrap();
        assert_eq!(sig.parameters.len(), 1);

        let missing = FunctionTarget::new("0x2", "m", "g");
        assert!(source.fetch_function(&missing, &ctx).await.is_err());
    }

    /// Run with: cargo test test_graphql_fetches_coin_split -- --ignored --nocapture
    #[tokio::test]
    #[ignore]
    async fn test_graphql_fetches_coin_split() {
        let source = GraphQLSignatureSource::default();
        let target = FunctionTarget::new("0x2", "coin", "split");
        let sig = source
            .fetch_function(&target, &NetworkContext::for_network("mainnet"))
            .await
            .unwrap();
        assert_eq!(sig.type_parameter_count, 1);
        assert!(sig.takes_tx_context());
    }
}
