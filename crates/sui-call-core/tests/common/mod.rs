#![allow(dead_code, unused_imports)]
//! Shared test utilities for the engine's integration tests.
//!
//! - `fixtures`: common parameter types, signatures, and network context
//! - `mocks`: collaborator doubles (submitters)

pub mod fixtures;
pub mod mocks;

pub use fixtures::{
    clock_type, coin_of, function, sui_type, test_context, tx_context_param, u64_type, u8_type,
    usdc_type, COIN_PACKAGE,
};
pub use mocks::FailingSubmitter;
