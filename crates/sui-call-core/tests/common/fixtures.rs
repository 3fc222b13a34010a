//! Type and signature fixtures.

use sui_call_core::NetworkContext;
use sui_call_types::{FunctionSignature, FunctionTarget, NormalizedType, ScalarWidth};

/// Package that publishes the test coin module.
pub const COIN_PACKAGE: &str = "0xabc";

pub fn test_context() -> NetworkContext {
    NetworkContext::new("testnet", "http://127.0.0.1:9125/graphql")
}

pub fn u8_type() -> NormalizedType {
    NormalizedType::Scalar(ScalarWidth::U8)
}

pub fn u64_type() -> NormalizedType {
    NormalizedType::Scalar(ScalarWidth::U64)
}

pub fn sui_type() -> NormalizedType {
    NormalizedType::structure("0x2", "sui", "SUI", vec![])
}

pub fn usdc_type() -> NormalizedType {
    NormalizedType::structure("0x2", "sui", "USDC", vec![])
}

/// `0xabc::coin::Coin<T>`
pub fn coin_of(inner: NormalizedType) -> NormalizedType {
    NormalizedType::structure(COIN_PACKAGE, "coin", "Coin", vec![inner])
}

pub fn clock_type() -> NormalizedType {
    NormalizedType::structure("0x2", "clock", "Clock", vec![])
}

/// `&mut 0x2::tx_context::TxContext`
pub fn tx_context_param() -> NormalizedType {
    NormalizedType::MutableReference(Box::new(NormalizedType::structure(
        "0x2",
        "tx_context",
        "TxContext",
        vec![],
    )))
}

pub fn function(parameters: Vec<NormalizedType>) -> FunctionSignature {
    FunctionSignature {
        target: FunctionTarget::new(COIN_PACKAGE, "pool", "deposit"),
        type_parameter_count: 0,
        parameters,
    }
}
