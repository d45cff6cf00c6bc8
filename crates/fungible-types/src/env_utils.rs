//! Environment variable helpers for configuration defaults.
//!
//! Configuration structs read their overrides through these helpers so that a
//! missing or unparsable variable always falls back the same way:
//!
//! ```
//! use fungible_admin_types::env_utils::{env_bool, env_var, env_var_or};
//!
//! let gas_limit: u64 = env_var_or("FUNGIBLE_DOC_GAS_LIMIT", 1_000_000);
//! let module: Option<fungible_admin_types::ChainAddress> = env_var("FUNGIBLE_DOC_MODULE");
//! let strict = env_bool("FUNGIBLE_DOC_STRICT");
//! # assert_eq!(gas_limit, 1_000_000);
//! # assert!(module.is_none());
//! # assert!(!strict);
//! ```

use std::str::FromStr;

/// Parse an environment variable into any `FromStr` type.
///
/// Returns `None` if the variable is unset, not unicode, or fails to parse.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable, falling back to `default`.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Read a non-empty string variable.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// True if the variable is set to "1", "true", "yes" or "on" (any case).
pub fn env_bool(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
