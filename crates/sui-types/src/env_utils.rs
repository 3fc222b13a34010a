//! Environment variable parsing utilities.
//!
//! Used by the engine configuration to overlay `SUI_CALL_*` variables on top
//! of file or default settings.
//!
//! # Example
//!
//! ```
//! use sui_call_types::env_utils::{env_bool_or, env_var_or};
//!
//! let retries: usize = env_var_or("SUI_CALL_DOC_RETRIES", 1);
//! let sequential = env_bool_or("SUI_CALL_DOC_SEQUENTIAL", false);
//! assert_eq!(retries, 1);
//! assert!(!sequential);
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable with a default value.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Check if an environment variable is set to a truthy value, with a default.
///
/// "1", "true", "yes" and "on" (case-insensitive) are truthy; any other value
/// that is set is falsy.
pub fn env_bool_or(key: &str, default: bool) -> bool {
    match std::env::var(key).ok() {
        Some(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

/// Get a non-empty environment variable as a string.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_parsing() {
        std::env::set_var("SUI_CALL_TEST_U64", "42");
        let val: Option<u64> = env_var("SUI_CALL_TEST_U64");
        assert_eq!(val, Some(42));

        let missing: Option<u64> = env_var("SUI_CALL_NONEXISTENT_12345");
        assert_eq!(missing, None);

        std::env::remove_var("SUI_CALL_TEST_U64");
    }

    #[test]
    fn test_env_var_or() {
        std::env::set_var("SUI_CALL_TEST_DEFAULT", "not-a-number");
        let val: u64 = env_var_or("SUI_CALL_TEST_DEFAULT", 50);
        assert_eq!(val, 50);
        std::env::remove_var("SUI_CALL_TEST_DEFAULT");
    }

    #[test]
    fn test_env_bool_or() {
        std::env::set_var("SUI_CALL_TEST_BOOL_YES", "YES");
        std::env::set_var("SUI_CALL_TEST_BOOL_OFF", "off");

        assert!(env_bool_or("SUI_CALL_TEST_BOOL_YES", false));
        assert!(!env_bool_or("SUI_CALL_TEST_BOOL_OFF", true));
        assert!(env_bool_or("SUI_CALL_NONEXISTENT_12347", true));

        std::env::remove_var("SUI_CALL_TEST_BOOL_YES");
        std::env::remove_var("SUI_CALL_TEST_BOOL_OFF");
    }

    #[test]
    fn test_env_string() {
        std::env::set_var("SUI_CALL_TEST_STRING", "  testnet ");
        std::env::set_var("SUI_CALL_TEST_BLANK", "   ");
        assert_eq!(env_string("SUI_CALL_TEST_STRING").as_deref(), Some("testnet"));
        assert_eq!(env_string("SUI_CALL_TEST_BLANK"), None);
        std::env::remove_var("SUI_CALL_TEST_STRING");
        std::env::remove_var("SUI_CALL_TEST_BLANK");
    }
}
