//! Shared types for the sui-call workspace.
//!
//! This crate holds the data model of the Move call argument engine and the
//! pure functions defined directly over it:
//!
//! - [`normalized`]: [`NormalizedType`], its input category and canonical name
//! - [`argument`]: raw form input and encoded call arguments
//! - [`signature`]: function targets and signatures
//! - [`type_parsing`]: Move type syntax to [`NormalizedType`]
//! - [`framework`]: execution-context identity
//! - [`env_utils`]: environment variable helpers

pub mod argument;
pub mod env_utils;
pub mod framework;
pub mod normalized;
pub mod signature;
pub mod type_parsing;

// Re-export the data model at crate root
pub use argument::{EncodedArgument, RawInput};
pub use normalized::{NormalizedType, ScalarWidth, StructRef, TypeCategory};
pub use signature::{FunctionSignature, FunctionTarget};
pub use type_parsing::parse_normalized_type;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for retry behavior on network operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Number of retry attempts after the first failure.
    pub retries: usize,
    /// Initial backoff between retries, in milliseconds.
    pub initial_backoff_ms: u64,
    /// Maximum backoff, in milliseconds.
    pub max_backoff_ms: u64,
}

impl RetryConfig {
    /// Create a new RetryConfig with the specified parameters.
    pub fn new(retries: usize, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            retries,
            initial_backoff_ms,
            max_backoff_ms,
        }
    }

    /// No retries at all.
    pub fn none() -> Self {
        Self::new(0, 0, 0)
    }

    /// Backoff before retry number `attempt` (0-based), doubling up to the cap.
    pub fn backoff(&self, attempt: usize) -> Duration {
        let factor = 1u64.checked_shl(attempt as u32).unwrap_or(u64::MAX);
        let ms = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 1,
            initial_backoff_ms: 250,
            max_backoff_ms: 2000,
        }
    }
}
