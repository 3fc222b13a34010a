//! Sui Transport Layer
//!
//! Network transport for the call engine's read-only collaborators.
//!
//! This crate provides:
//! - [`graphql`]: GraphQL client for object types and function signatures
//! - [`network`]: Network names and endpoint selection
//!
//! # Example
//!
//! ```ignore
//! use sui_call_transport::graphql::GraphQLClient;
//!
//! let client = GraphQLClient::testnet();
//! let ty = client.fetch_object_type("0x6")?;
//! ```

pub mod graphql;
pub mod network;

// Re-export main types for convenience
pub use graphql::{parse_open_move_type, GraphQLClient};
pub use network::{default_graphql_endpoint, resolve_graphql_endpoint};
