//! Environment lookups

use std::env;

/// Get environment variable value
///
/// # Returns
///
/// The value of the environment variable or empty string if not found
pub fn get_env(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

/// Get system proxy settings from the usual environment variables
///
/// # Returns
///
/// The proxy server string or empty string if none is set
pub fn get_system_proxy() -> String {
    let proxy_env = [
        "all_proxy",
        "ALL_PROXY",
        "https_proxy",
        "HTTPS_PROXY",
        "http_proxy",
        "HTTP_PROXY",
    ];

    proxy_env
        .iter()
        .map(|var| get_env(var))
        .find(|proxy| !proxy.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env() {
        // Test against a common environment variable
        let path = get_env("PATH");
        assert!(!path.is_empty());
    }

    #[test]
    fn test_get_env_missing() {
        assert_eq!(get_env("SUBMERGE_SURELY_UNSET_VARIABLE"), "");
    }
}
