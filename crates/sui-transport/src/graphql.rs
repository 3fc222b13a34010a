//! GraphQL Client for Sui Network
//!
//! Read-only queries backing the call engine's two network collaborators:
//! live object type lookup and normalized function signature fetch.
//!
//! ## Endpoints
//! - Mainnet: `https://graphql.mainnet.sui.io/graphql`
//! - Testnet: `https://graphql.testnet.sui.io/graphql`
//!
//! ## Usage
//!
//! ```ignore
//! let client = GraphQLClient::mainnet();
//! let ty = client.fetch_object_type("0x6")?; // Some("0x...02::clock::Clock")
//! let sig = client.fetch_function_signature("0x2", "coin", "split")?;
//! ```
//!
//! The client is blocking (ureq). Async callers should run it on a blocking
//! thread.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::time::Duration;

use sui_call_types::{FunctionSignature, FunctionTarget, NormalizedType, ScalarWidth};

use crate::network::{default_graphql_endpoint, MAINNET_GRAPHQL, TESTNET_GRAPHQL};

/// GraphQL client for Sui network queries.
#[derive(Clone)]
pub struct GraphQLClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl GraphQLClient {
    /// Default request timeout in seconds (can be overridden by env).
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds (can be overridden by env).
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    fn default_timeouts() -> (Duration, Duration) {
        let timeout_secs = std::env::var("SUI_GRAPHQL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);
        let connect_secs = std::env::var("SUI_GRAPHQL_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_CONNECT_TIMEOUT_SECS);
        (
            Duration::from_secs(timeout_secs),
            Duration::from_secs(connect_secs),
        )
    }

    fn build_agent(timeout: Duration, connect_timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .build()
    }

    /// Create a client for mainnet.
    pub fn mainnet() -> Self {
        Self::new(MAINNET_GRAPHQL)
    }

    /// Create a client for testnet.
    pub fn testnet() -> Self {
        Self::new(TESTNET_GRAPHQL)
    }

    /// Create a client for a named network (`mainnet`, `testnet`, `devnet`).
    pub fn for_network(network: &str) -> Self {
        Self::new(&default_graphql_endpoint(network))
    }

    /// Create a client with a custom endpoint.
    pub fn new(endpoint: &str) -> Self {
        let (timeout, connect_timeout) = Self::default_timeouts();
        Self::with_timeouts(endpoint, timeout, connect_timeout)
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(endpoint: &str, timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            agent: Self::build_agent(timeout, connect_timeout),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a GraphQL query.
    fn query(&self, query: &str, variables: Option<Value>) -> Result<Value> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or(Value::Null)
        });

        let response: Value = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| anyhow!("GraphQL request failed: {}", e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse GraphQL response: {}", e))?;

        // Check for GraphQL errors
        if let Some(errors) = response.get("errors") {
            if let Some(arr) = errors.as_array() {
                if !arr.is_empty() {
                    let msg = arr[0]
                        .get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or("unknown error");
                    return Err(anyhow!("GraphQL error: {}", msg));
                }
            }
        }

        response
            .get("data")
            .cloned()
            .ok_or_else(|| anyhow!("No data in GraphQL response"))
    }

    /// Fetch the current Move type of a live object.
    ///
    /// Returns `Ok(None)` when the object does not exist or is not a Move
    /// object (e.g. a package). Transport and GraphQL failures are errors.
    pub fn fetch_object_type(&self, address: &str) -> Result<Option<String>> {
        let query = r#"
            query GetObjectType($address: SuiAddress!) {
                object(address: $address) {
                    address
                    asMoveObject {
                        contents {
                            type { repr }
                        }
                    }
                }
            }
        "#;

        let variables = serde_json::json!({
            "address": address
        });

        let data = self.query(query, Some(variables))?;
        Ok(object_type_from_response(&data))
    }

    /// Fetch a function's type parameter count and declared parameter types.
    pub fn fetch_function_signature(
        &self,
        package: &str,
        module: &str,
        function: &str,
    ) -> Result<FunctionSignature> {
        let query = r#"
            query GetFunction($address: SuiAddress!, $module: String!, $function: String!) {
                object(address: $address) {
                    asMovePackage {
                        module(name: $module) {
                            function(name: $function) {
                                typeParameters { constraints }
                                parameters { signature }
                            }
                        }
                    }
                }
            }
        "#;

        let variables = serde_json::json!({
            "address": package,
            "module": module,
            "function": function,
        });

        let data = self.query(query, Some(variables))?;
        let target = FunctionTarget::new(package, module, function);
        signature_from_response(&data, target)
    }
}

/// Extract `object.asMoveObject.contents.type.repr` from a GetObjectType response.
fn object_type_from_response(data: &Value) -> Option<String> {
    data.get("object")
        .filter(|o| !o.is_null())
        .and_then(|o| o.get("asMoveObject"))
        .and_then(|m| m.get("contents"))
        .and_then(|c| c.get("type"))
        .and_then(|t| t.get("repr"))
        .and_then(|r| r.as_str())
        .map(|s| s.to_string())
}

/// Build a FunctionSignature from a GetFunction response.
fn signature_from_response(data: &Value, target: FunctionTarget) -> Result<FunctionSignature> {
    let package = data
        .get("object")
        .filter(|o| !o.is_null())
        .ok_or_else(|| anyhow!("Package not found: {}", target.package))?;
    let module = package
        .get("asMovePackage")
        .filter(|p| !p.is_null())
        .ok_or_else(|| anyhow!("Object is not a package: {}", target.package))?
        .get("module")
        .filter(|m| !m.is_null())
        .ok_or_else(|| anyhow!("Module not found: {}::{}", target.package, target.module))?;
    let function = module
        .get("function")
        .filter(|f| !f.is_null())
        .ok_or_else(|| anyhow!("Function not found: {}", target))?;

    let type_parameter_count = function
        .get("typeParameters")
        .and_then(|t| t.as_array())
        .map(|t| t.len())
        .unwrap_or(0);

    let parameters = function
        .get("parameters")
        .and_then(|p| p.as_array())
        .map(|params| {
            params
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let signature = p
                        .get("signature")
                        .ok_or_else(|| anyhow!("parameter {} has no signature", i))?;
                    parse_open_move_type(signature)
                        .with_context(|| format!("parameter {} of {}", i, target))
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(FunctionSignature {
        target,
        type_parameter_count,
        parameters,
    })
}

/// Convert an `OpenMoveTypeSignature` (`{ "ref": "&" | "&mut" | null, "body": ... }`)
/// into a NormalizedType.
pub fn parse_open_move_type(signature: &Value) -> Result<NormalizedType> {
    let body = signature
        .get("body")
        .ok_or_else(|| anyhow!("type signature has no body: {}", signature))?;
    let inner = parse_signature_body(body)?;

    match signature.get("ref").and_then(|r| r.as_str()) {
        Some("&") => Ok(NormalizedType::Reference(Box::new(inner))),
        Some("&mut") => Ok(NormalizedType::MutableReference(Box::new(inner))),
        Some(other) => Err(anyhow!("unknown reference kind: {}", other)),
        None => Ok(inner),
    }
}

fn parse_signature_body(body: &Value) -> Result<NormalizedType> {
    if let Some(name) = body.as_str() {
        return ScalarWidth::from_name(name)
            .map(NormalizedType::Scalar)
            .ok_or_else(|| anyhow!("unsupported primitive type: {}", name));
    }

    if let Some(element) = body.get("vector") {
        return Ok(NormalizedType::vector(parse_signature_body(element)?));
    }

    if let Some(idx) = body.get("typeParameter") {
        let idx = idx
            .as_u64()
            .and_then(|i| u16::try_from(i).ok())
            .ok_or_else(|| anyhow!("invalid type parameter index: {}", idx))?;
        return Ok(NormalizedType::TypeParameter(idx));
    }

    if let Some(datatype) = body.get("datatype") {
        let field = |key: &str| {
            datatype
                .get(key)
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow!("datatype is missing '{}': {}", key, datatype))
        };
        let type_arguments = datatype
            .get("typeParameters")
            .and_then(|t| t.as_array())
            .map(|args| args.iter().map(parse_signature_body).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();
        return Ok(NormalizedType::structure(
            field("package")?,
            field("module")?,
            field("type")?,
            type_arguments,
        ));
    }

    Err(anyhow!("unrecognized type signature body: {}", body))
}
