//! Move call argument resolution engine.
//!
//! Turns user-supplied strings for a Move function's parameters into
//! type-checked, encoded call arguments:
//!
//! - [`resolver`]: object type lookup (GraphQL, retrying, in-memory)
//! - [`validator`]: type-directed validation of raw input
//! - [`encoder`]: BCS encoding and argument allocation
//! - [`builder`]: the argument builder seam and [`PreparedCall`]
//! - [`orchestrator`]: validate-then-encode-then-submit state machine
//! - [`signatures`]: function signature sources
//! - [`submit`]: transaction submission seam
//! - [`config`]: engine configuration
//!
//! # Example
//!
//! ```ignore
//! use sui_call_core::{CallOrchestrator, EngineConfig, GraphQLObjectResolver, RecordingSubmitter};
//!
//! let config = EngineConfig::from_env();
//! let orch = CallOrchestrator::from_config(signature, GraphQLObjectResolver::new(), RecordingSubmitter::new(), &config);
//! let outcome = orch.invoke(&["0x6".into(), "100".into()], &[]).await?;
//! ```

pub mod builder;
pub mod config;
pub mod encoder;
pub mod orchestrator;
pub mod resolver;
pub mod signatures;
pub mod submit;
pub mod validator;

pub use builder::{ArgumentBuilder, CallArgBuilder, CallInput, PreparedCall};
pub use config::EngineConfig;
pub use encoder::{allocate, encode_argument, prepare_arguments, EncodeError};
pub use orchestrator::{CallOrchestrator, InvocationOutcome, InvocationState, ParamError, ParamView};
pub use resolver::{
    GraphQLObjectResolver, InMemoryObjectResolver, NetworkContext, ObjectTypeResolver,
    ResolveError, RetryingResolver,
};
pub use signatures::{GraphQLSignatureSource, InMemorySignatureSource, SignatureSource};
pub use submit::{CallSubmitter, RecordingSubmitter, SubmissionReceipt};
pub use validator::{Validator, Verdict};
