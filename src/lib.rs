//! Sui Call Studio
//!
//! Type-checked argument entry for Sui Move function calls: fetch a
//! function's signature, validate user-typed values against each parameter
//! type (resolving object types over the network), and encode the call.
//!
//! The engine lives in the workspace crates and is re-exported here:
//!
//! - [`types`]: normalized types, raw input, encoded arguments
//! - [`transport`]: GraphQL client
//! - [`engine`]: resolver, validator, encoder, orchestrator
//!
//! This crate adds the pieces the `sui-call` binary needs:
//! - [`input`]: JSON argument and type-list parsing
//! - [`logging`]: tracing subscriber setup

pub mod input;
pub mod logging;

pub use sui_call_core as engine;
pub use sui_call_transport as transport;
pub use sui_call_types as types;

pub use sui_call_core::{
    CallOrchestrator, EngineConfig, GraphQLObjectResolver, GraphQLSignatureSource,
    InMemoryObjectResolver, InvocationOutcome, NetworkContext, ParamError, PreparedCall,
    RecordingSubmitter, RetryingResolver, Validator, Verdict,
};
pub use sui_call_types::{FunctionSignature, FunctionTarget, NormalizedType, RawInput};
