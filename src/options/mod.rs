//! Manager-level tunables.
//!
//! [`ManagerOptions`] holds every setting a manager knows how to offer to a
//! client configuration. Which of them a given configuration actually takes
//! is decided by that configuration (see [`crate::config::ClientConfig`]).

mod env;

pub use env::{
    AWS_HTTP_TIMEOUT_MS, AWS_MANAGER_MAX_CONNECTIONS, AWS_MANAGER_PROXY_HOST,
    AWS_MANAGER_PROXY_PORT, AWS_MANAGER_TIMEOUT_MS, AWS_MAX_ATTEMPTS, AWS_USE_DUALSTACK_ENDPOINT,
};

use crate::config::ClientConfig;
use crate::credentials::ProxyCredentials;
use crate::types::SigningAlgorithm;
use serde::Deserialize;
use std::time::Duration;
use tracing::trace;

/// Default buffer size for request and response streams.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Default number of bytes between progress callbacks.
pub const DEFAULT_PROGRESS_UPDATE_INTERVAL: usize = 100 * 1024;

/// Caller-overridable settings applied to a client configuration on first use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManagerOptions {
    /// Follow HTTP redirects.
    pub allow_auto_redirect: bool,

    /// Re-sign requests before each retry.
    pub resign_retries: bool,

    /// Region used for signing, when it differs from the endpoint region.
    pub authentication_region: Option<String>,

    /// Service name used for signing, when it differs from the endpoint.
    pub authentication_service_name: Option<String>,

    /// Stream buffer size in bytes.
    pub buffer_size: usize,

    /// Turn off SDK logging.
    pub disable_logging: bool,

    /// Log request metrics.
    pub log_metrics: bool,

    /// Connection limit per server.
    pub max_connections_per_server: Option<u32>,

    /// Log response bodies.
    pub log_response: bool,

    /// Maximum retries on error responses.
    pub max_error_retry: Option<u32>,

    /// Bytes transferred between progress events.
    pub progress_update_interval: usize,

    /// Credentials for an authenticating proxy.
    #[serde(skip)]
    pub proxy_credentials: Option<ProxyCredentials>,

    /// Proxy host name.
    pub proxy_host: Option<String>,

    /// Proxy port.
    pub proxy_port: Option<u16>,

    /// Signing algorithm for query-protocol services.
    pub signature_method: SigningAlgorithm,

    /// Apply client-side throttling to retries.
    pub throttle_retries: bool,

    /// Per-request timeout.
    #[serde(with = "millis")]
    pub timeout: Option<Duration>,

    /// Use dual-stack (IPv4/IPv6) endpoints.
    pub use_dual_stack_endpoint: bool,

    /// Talk plain HTTP instead of HTTPS.
    pub use_http: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            allow_auto_redirect: true,
            resign_retries: false,
            authentication_region: None,
            authentication_service_name: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
            disable_logging: false,
            log_metrics: false,
            max_connections_per_server: None,
            log_response: false,
            max_error_retry: None,
            progress_update_interval: DEFAULT_PROGRESS_UPDATE_INTERVAL,
            proxy_credentials: None,
            proxy_host: None,
            proxy_port: None,
            signature_method: SigningAlgorithm::default(),
            throttle_retries: true,
            timeout: None,
            use_dual_stack_endpoint: false,
            use_http: false,
        }
    }
}

impl ManagerOptions {
    /// Build options from defaults and an optional setup callback.
    ///
    /// The callback, when present, runs exactly once against a fresh default
    /// instance.
    pub fn configure<F>(setup: Option<F>) -> Self
    where
        F: FnOnce(&mut ManagerOptions),
    {
        Self::default().with_setup(setup)
    }

    /// Run an optional setup callback against these options.
    pub fn with_setup<F>(mut self, setup: Option<F>) -> Self
    where
        F: FnOnce(&mut ManagerOptions),
    {
        if let Some(setup) = setup {
            setup(&mut self);
        }
        self
    }

    /// Every option as a [`ClientSetting`], in declaration order.
    pub fn settings(&self) -> Vec<ClientSetting> {
        // Exhaustive: a new field does not compile until it is listed here.
        let ManagerOptions {
            allow_auto_redirect,
            resign_retries,
            authentication_region,
            authentication_service_name,
            buffer_size,
            disable_logging,
            log_metrics,
            max_connections_per_server,
            log_response,
            max_error_retry,
            progress_update_interval,
            proxy_credentials,
            proxy_host,
            proxy_port,
            signature_method,
            throttle_retries,
            timeout,
            use_dual_stack_endpoint,
            use_http,
        } = self;

        vec![
            ClientSetting::AllowAutoRedirect(*allow_auto_redirect),
            ClientSetting::ResignRetries(*resign_retries),
            ClientSetting::AuthenticationRegion(authentication_region.clone()),
            ClientSetting::AuthenticationServiceName(authentication_service_name.clone()),
            ClientSetting::BufferSize(*buffer_size),
            ClientSetting::DisableLogging(*disable_logging),
            ClientSetting::LogMetrics(*log_metrics),
            ClientSetting::MaxConnectionsPerServer(*max_connections_per_server),
            ClientSetting::LogResponse(*log_response),
            ClientSetting::MaxErrorRetry(*max_error_retry),
            ClientSetting::ProgressUpdateInterval(*progress_update_interval),
            ClientSetting::ProxyCredentials(proxy_credentials.clone()),
            ClientSetting::ProxyHost(proxy_host.clone()),
            ClientSetting::ProxyPort(*proxy_port),
            ClientSetting::SignatureMethod(*signature_method),
            ClientSetting::ThrottleRetries(*throttle_retries),
            ClientSetting::Timeout(*timeout),
            ClientSetting::UseDualStackEndpoint(*use_dual_stack_endpoint),
            ClientSetting::UseHttp(*use_http),
        ]
    }

    /// Offer every setting to `config`.
    ///
    /// Settings the configuration does not take are skipped. Returns the
    /// names of the settings that were applied.
    pub fn apply_to<C: ClientConfig>(&self, config: &mut C) -> Vec<&'static str> {
        let mut applied = Vec::new();
        for setting in self.settings() {
            let name = setting.name();
            if config.apply(setting) {
                applied.push(name);
            } else {
                trace!(option = name, "Option not supported by configuration, skipped");
            }
        }
        applied
    }
}

/// One manager option with its value.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientSetting {
    /// See [`ManagerOptions::allow_auto_redirect`].
    AllowAutoRedirect(bool),
    /// See [`ManagerOptions::resign_retries`].
    ResignRetries(bool),
    /// See [`ManagerOptions::authentication_region`].
    AuthenticationRegion(Option<String>),
    /// See [`ManagerOptions::authentication_service_name`].
    AuthenticationServiceName(Option<String>),
    /// See [`ManagerOptions::buffer_size`].
    BufferSize(usize),
    /// See [`ManagerOptions::disable_logging`].
    DisableLogging(bool),
    /// See [`ManagerOptions::log_metrics`].
    LogMetrics(bool),
    /// See [`ManagerOptions::max_connections_per_server`].
    MaxConnectionsPerServer(Option<u32>),
    /// See [`ManagerOptions::log_response`].
    LogResponse(bool),
    /// See [`ManagerOptions::max_error_retry`].
    MaxErrorRetry(Option<u32>),
    /// See [`ManagerOptions::progress_update_interval`].
    ProgressUpdateInterval(usize),
    /// See [`ManagerOptions::proxy_credentials`].
    ProxyCredentials(Option<ProxyCredentials>),
    /// See [`ManagerOptions::proxy_host`].
    ProxyHost(Option<String>),
    /// See [`ManagerOptions::proxy_port`].
    ProxyPort(Option<u16>),
    /// See [`ManagerOptions::signature_method`].
    SignatureMethod(SigningAlgorithm),
    /// See [`ManagerOptions::throttle_retries`].
    ThrottleRetries(bool),
    /// See [`ManagerOptions::timeout`].
    Timeout(Option<Duration>),
    /// See [`ManagerOptions::use_dual_stack_endpoint`].
    UseDualStackEndpoint(bool),
    /// See [`ManagerOptions::use_http`].
    UseHttp(bool),
}

impl ClientSetting {
    /// Number of distinct settings, one per [`ManagerOptions`] field.
    ///
    /// Checked against [`ManagerOptions::settings`] in tests.
    pub const COUNT: usize = 19;

    /// The option's field name.
    pub fn name(&self) -> &'static str {
        match self {
            ClientSetting::AllowAutoRedirect(_) => "allow_auto_redirect",
            ClientSetting::ResignRetries(_) => "resign_retries",
            ClientSetting::AuthenticationRegion(_) => "authentication_region",
            ClientSetting::AuthenticationServiceName(_) => "authentication_service_name",
            ClientSetting::BufferSize(_) => "buffer_size",
            ClientSetting::DisableLogging(_) => "disable_logging",
            ClientSetting::LogMetrics(_) => "log_metrics",
            ClientSetting::MaxConnectionsPerServer(_) => "max_connections_per_server",
            ClientSetting::LogResponse(_) => "log_response",
            ClientSetting::MaxErrorRetry(_) => "max_error_retry",
            ClientSetting::ProgressUpdateInterval(_) => "progress_update_interval",
            ClientSetting::ProxyCredentials(_) => "proxy_credentials",
            ClientSetting::ProxyHost(_) => "proxy_host",
            ClientSetting::ProxyPort(_) => "proxy_port",
            ClientSetting::SignatureMethod(_) => "signature_method",
            ClientSetting::ThrottleRetries(_) => "throttle_retries",
            ClientSetting::Timeout(_) => "timeout",
            ClientSetting::UseDualStackEndpoint(_) => "use_dual_stack_endpoint",
            ClientSetting::UseHttp(_) => "use_http",
        }
    }
}

/// `Option<Duration>` as optional milliseconds.
mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
