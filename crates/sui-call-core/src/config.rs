//! Engine configuration.
//!
//! Settings come from three layers, later ones winning: [`EngineConfig::default`],
//! an optional JSON file ([`EngineConfig::load`]), and `SUI_CALL_*` environment
//! variables ([`EngineConfig::apply_env`]).
//!
//! | Variable | Field |
//! |---|---|
//! | `SUI_CALL_NETWORK` | `network` |
//! | `SUI_GRAPHQL_ENDPOINT` | `graphql_endpoint` |
//! | `SUI_CALL_CHECK_RANGES` | `check_ranges` |
//! | `SUI_CALL_SEQUENTIAL` | `!concurrent_validation` |
//! | `SUI_CALL_RETRIES` | `retry.retries` |

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use sui_call_transport::network::resolve_graphql_endpoint;
use sui_call_transport::GraphQLClient;
use sui_call_types::env_utils::{env_bool_or, env_string, env_var};
use sui_call_types::RetryConfig;

use crate::resolver::NetworkContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Network label: `mainnet`, `testnet`, `devnet`, or a custom name.
    pub network: String,
    /// Explicit GraphQL endpoint; derived from `network` when unset.
    pub graphql_endpoint: Option<String>,
    /// Reject integers that do not fit their declared width.
    pub check_ranges: bool,
    /// Validate all parameters concurrently instead of one after another.
    pub concurrent_validation: bool,
    /// Retry policy for transient resolver failures.
    pub retry: RetryConfig,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            network: "mainnet".to_string(),
            graphql_endpoint: None,
            check_ranges: true,
            concurrent_validation: true,
            retry: RetryConfig::default(),
            request_timeout_secs: GraphQLClient::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: GraphQLClient::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay `SUI_CALL_*` environment variables onto this config.
    pub fn apply_env(&mut self) {
        if let Some(network) = env_string("SUI_CALL_NETWORK") {
            self.network = network;
        }
        if let Some(endpoint) = env_string("SUI_GRAPHQL_ENDPOINT") {
            self.graphql_endpoint = Some(endpoint);
        }
        self.check_ranges = env_bool_or("SUI_CALL_CHECK_RANGES", self.check_ranges);
        self.concurrent_validation =
            !env_bool_or("SUI_CALL_SEQUENTIAL", !self.concurrent_validation);
        if let Some(retries) = env_var::<usize>("SUI_CALL_RETRIES") {
            self.retry.retries = retries;
        }
    }

    /// The immutable network context passed into every resolver call.
    pub fn network_context(&self) -> NetworkContext {
        NetworkContext::new(
            &self.network,
            &resolve_graphql_endpoint(&self.network, self.graphql_endpoint.as_deref()),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.network, "mainnet");
        assert!(config.check_ranges);
        assert!(config.concurrent_validation);
        assert_eq!(config.retry.retries, 1);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "network": "testnet", "check_ranges": false, "retry": {{ "retries": 3, "initial_backoff_ms": 10, "max_backoff_ms": 40 }} }}"#
        )
        .unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.network, "testnet");
        assert!(!config.check_ranges);
        assert!(config.concurrent_validation);
        assert_eq!(config.retry.retries, 3);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = EngineConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_network_context_prefers_explicit_endpoint() {
        let config = EngineConfig {
            network: "localnet".into(),
            graphql_endpoint: Some("http://127.0.0.1:9125/graphql".into()),
            ..EngineConfig::default()
        };
        let ctx = config.network_context();
        assert_eq!(ctx.network, "localnet");
        assert_eq!(ctx.graphql_endpoint, "http://127.0.0.1:9125/graphql");
    }

    #[test]
    fn test_network_context_without_endpoint_uses_network_default() {
        let config = EngineConfig {
            network: "testnet".into(),
            graphql_endpoint: None,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.network_context().graphql_endpoint,
            sui_call_transport::network::TESTNET_GRAPHQL
        );
    }
}
