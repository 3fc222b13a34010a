//! Sui framework constants.
//!
//! The only framework type the call engine needs to recognize is the implicit
//! trailing `0x2::tx_context::TxContext` parameter.
//!
//! # Example
//!
//! ```
//! use sui_call_types::framework::is_tx_context_name;
//!
//! assert!(is_tx_context_name("0x2::tx_context::TxContext"));
//! assert!(!is_tx_context_name("0x2::clock::Clock"));
//! ```

use move_core_types::account_address::AccountAddress;

/// Sui framework address (0x2)
pub const SUI_FRAMEWORK: AccountAddress = {
    let mut bytes = [0u8; 32];
    bytes[31] = 2;
    AccountAddress::new(bytes)
};

/// Module declaring the execution context struct.
pub const TX_CONTEXT_MODULE: &str = "tx_context";

/// Execution context struct name.
pub const TX_CONTEXT_STRUCT: &str = "TxContext";

/// Check whether `address::module::name` names the execution context struct.
///
/// The address may be written in short (`0x2`) or full 64-digit form.
pub fn is_tx_context_name(qualified: &str) -> bool {
    let mut parts = qualified.split("::");
    let (Some(addr), Some(module), Some(name), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    module == TX_CONTEXT_MODULE
        && name == TX_CONTEXT_STRUCT
        && AccountAddress::from_hex_literal(addr)
            .map(|a| a == SUI_FRAMEWORK)
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_address() {
        assert_eq!(
            SUI_FRAMEWORK,
            AccountAddress::from_hex_literal("0x2").unwrap()
        );
    }

    #[test]
    fn test_tx_context_name() {
        assert!(is_tx_context_name("0x2::tx_context::TxContext"));
        assert!(is_tx_context_name(
            "0x0000000000000000000000000000000000000000000000000000000000000002::tx_context::TxContext"
        ));
        assert!(!is_tx_context_name("0x1::tx_context::TxContext"));
        assert!(!is_tx_context_name("0x2::tx_context::Other"));
        assert!(!is_tx_context_name("0x2::tx_context"));
        assert!(!is_tx_context_name("nothex::tx_context::TxContext"));
    }
}
