//! Loading [`ManagerOptions`] from environment variables.

use super::ManagerOptions;
use std::time::Duration;

/// Total attempts per request, including the first (standard AWS variable).
pub const AWS_MAX_ATTEMPTS: &str = "AWS_MAX_ATTEMPTS";
/// `true` to use dual-stack endpoints (standard AWS variable).
pub const AWS_USE_DUALSTACK_ENDPOINT: &str = "AWS_USE_DUALSTACK_ENDPOINT";
/// Per-request timeout in milliseconds, shared with other AWS HTTP tooling.
pub const AWS_HTTP_TIMEOUT_MS: &str = "AWS_HTTP_TIMEOUT_MS";
/// Per-request timeout in milliseconds. Takes precedence over
/// [`AWS_HTTP_TIMEOUT_MS`].
pub const AWS_MANAGER_TIMEOUT_MS: &str = "AWS_MANAGER_TIMEOUT_MS";
/// Connection limit per server.
pub const AWS_MANAGER_MAX_CONNECTIONS: &str = "AWS_MANAGER_MAX_CONNECTIONS";
/// Proxy host name.
pub const AWS_MANAGER_PROXY_HOST: &str = "AWS_MANAGER_PROXY_HOST";
/// Proxy port.
pub const AWS_MANAGER_PROXY_PORT: &str = "AWS_MANAGER_PROXY_PORT";

impl ManagerOptions {
    /// Defaults overlaid with values from the process environment.
    ///
    /// Unset or unparsable variables leave the default in place.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(attempts) = lookup(AWS_MAX_ATTEMPTS).and_then(|v| v.parse::<u32>().ok()) {
            options.max_error_retry = Some(attempts.saturating_sub(1));
        }
        if let Some(val) = lookup(AWS_USE_DUALSTACK_ENDPOINT) {
            options.use_dual_stack_endpoint = val.eq_ignore_ascii_case("true");
        }
        let timeout_ms = lookup(AWS_MANAGER_TIMEOUT_MS)
            .and_then(|v| v.parse().ok())
            .or_else(|| lookup(AWS_HTTP_TIMEOUT_MS).and_then(|v| v.parse().ok()));
        if let Some(ms) = timeout_ms {
            options.timeout = Some(Duration::from_millis(ms));
        }
        if let Some(max) = lookup(AWS_MANAGER_MAX_CONNECTIONS).and_then(|v| v.parse().ok()) {
            options.max_connections_per_server = Some(max);
        }
        if let Some(host) = lookup(AWS_MANAGER_PROXY_HOST).filter(|h| !h.is_empty()) {
            options.proxy_host = Some(host);
        }
        if let Some(port) = lookup(AWS_MANAGER_PROXY_PORT).and_then(|v| v.parse().ok()) {
            options.proxy_port = Some(port);
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        assert_eq!(ManagerOptions::from_lookup(|_| None), ManagerOptions::default());
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let options = ManagerOptions::from_lookup(lookup(&[
            (AWS_MAX_ATTEMPTS, "4"),
            (AWS_USE_DUALSTACK_ENDPOINT, "TRUE"),
            (AWS_MANAGER_TIMEOUT_MS, "2500"),
            (AWS_HTTP_TIMEOUT_MS, "9000"),
            (AWS_MANAGER_MAX_CONNECTIONS, "16"),
            (AWS_MANAGER_PROXY_HOST, "proxy.internal"),
            (AWS_MANAGER_PROXY_PORT, "3128"),
        ]));

        assert_eq!(options.max_error_retry, Some(3));
        assert!(options.use_dual_stack_endpoint);
        assert_eq!(options.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(options.max_connections_per_server, Some(16));
        assert_eq!(options.proxy_host.as_deref(), Some("proxy.internal"));
        assert_eq!(options.proxy_port, Some(3128));
    }

    #[test]
    fn test_http_timeout_used_when_manager_timeout_unset() {
        let options = ManagerOptions::from_lookup(lookup(&[(AWS_HTTP_TIMEOUT_MS, "1500")]));
        assert_eq!(options.timeout, Some(Duration::from_millis(1500)));

        let options = ManagerOptions::from_lookup(lookup(&[
            (AWS_MANAGER_TIMEOUT_MS, "soon"),
            (AWS_HTTP_TIMEOUT_MS, "750"),
        ]));
        assert_eq!(options.timeout, Some(Duration::from_millis(750)));
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let options = ManagerOptions::from_lookup(lookup(&[
            (AWS_MAX_ATTEMPTS, "many"),
            (AWS_MANAGER_PROXY_PORT, "99999"),
            (AWS_MANAGER_PROXY_HOST, ""),
        ]));

        assert!(options.max_error_retry.is_none());
        assert!(options.proxy_port.is_none());
        assert!(options.proxy_host.is_none());
    }
}
