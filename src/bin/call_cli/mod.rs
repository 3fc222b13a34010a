//! CLI subcommand implementations for sui-call

pub mod call;
pub mod check;
pub mod output;
pub mod signature;

use anyhow::Result;
use std::path::Path;

use sui_call_studio::engine::ObjectTypeResolver;
use sui_call_studio::{
    EngineConfig, GraphQLObjectResolver, InMemoryObjectResolver, RetryingResolver,
};

/// Object resolver for a command: the fixture file when given, otherwise
/// GraphQL with the configured retry policy.
pub fn object_resolver(
    config: &EngineConfig,
    objects: Option<&Path>,
) -> Result<Box<dyn ObjectTypeResolver>> {
    match objects {
        Some(path) => Ok(Box::new(InMemoryObjectResolver::from_json_file(path)?)),
        None => Ok(Box::new(RetryingResolver::new(
            GraphQLObjectResolver::with_timeouts(
                config.request_timeout(),
                config.connect_timeout(),
            ),
            config.retry,
        ))),
    }
}
