//! Network naming and GraphQL endpoint selection.

pub const MAINNET_GRAPHQL: &str = "https://graphql.mainnet.sui.io/graphql";
pub const TESTNET_GRAPHQL: &str = "https://graphql.testnet.sui.io/graphql";
pub const DEVNET_GRAPHQL: &str = "https://graphql.devnet.sui.io/graphql";

pub fn default_graphql_endpoint(network: &str) -> String {
    match network {
        "testnet" => TESTNET_GRAPHQL.to_string(),
        "devnet" => DEVNET_GRAPHQL.to_string(),
        _ => MAINNET_GRAPHQL.to_string(),
    }
}

/// Pick the GraphQL endpoint for a network, honoring an explicit override.
///
/// The override wins when non-empty; otherwise the public endpoint of the
/// named network. No environment variables are consulted here.
pub fn resolve_graphql_endpoint(network: &str, endpoint_override: Option<&str>) -> String {
    match endpoint_override.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value.to_string(),
        None => default_graphql_endpoint(network),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_override_wins() {
        assert_eq!(
            resolve_graphql_endpoint("testnet", Some("http://localhost:9125/graphql")),
            "http://localhost:9125/graphql"
        );
        assert_eq!(default_graphql_endpoint("unknown"), MAINNET_GRAPHQL);
    }

    #[test]
    fn test_missing_override_uses_network_default() {
        assert_eq!(resolve_graphql_endpoint("testnet", None), TESTNET_GRAPHQL);
        assert_eq!(resolve_graphql_endpoint("devnet", Some("  ")), DEVNET_GRAPHQL);
    }
}
