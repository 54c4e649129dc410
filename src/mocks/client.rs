//! Mock clients and configurations for exercising [`ClientManager`].
//!
//! [`ClientManager`]: crate::manager::ClientManager

use crate::config::ClientConfig;
use crate::credentials::SharedCredentialsProvider;
use crate::manager::ServiceClient;
use crate::options::ClientSetting;
use crate::region::RegionEndpoint;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Error returned by mock clients that refuse to build.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MockClientError {
    /// Construction was rejected.
    #[error("mock client rejected construction: {0}")]
    Rejected(String),
}

/// Configuration taking a subset of the manager options.
///
/// Defaults differ from [`ManagerOptions`](crate::options::ManagerOptions)
/// defaults so tests can see which values were applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MockClientConfig {
    /// Region set by the manager.
    pub region: Option<RegionEndpoint>,
    /// Follows redirects.
    pub allow_auto_redirect: bool,
    /// Retries on error responses.
    pub max_error_retry: Option<u32>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Proxy host.
    pub proxy_host: Option<String>,
    /// Proxy port.
    pub proxy_port: Option<u16>,
    /// Plain HTTP.
    pub use_http: bool,
    /// Client-side retry throttling.
    pub throttle_retries: bool,
}

impl Default for MockClientConfig {
    fn default() -> Self {
        Self {
            region: None,
            allow_auto_redirect: false,
            max_error_retry: Some(4),
            timeout: Some(Duration::from_secs(100)),
            proxy_host: Some("unset.invalid".to_string()),
            proxy_port: Some(1),
            use_http: true,
            throttle_retries: false,
        }
    }
}

impl MockClientConfig {
    /// Names of the settings this configuration takes.
    pub const SUPPORTED: [&'static str; 7] = [
        "allow_auto_redirect",
        "max_error_retry",
        "proxy_host",
        "proxy_port",
        "throttle_retries",
        "timeout",
        "use_http",
    ];
}

impl ClientConfig for MockClientConfig {
    fn set_region_endpoint(&mut self, region: RegionEndpoint) {
        self.region = Some(region);
    }

    fn apply(&mut self, setting: ClientSetting) -> bool {
        match setting {
            ClientSetting::AllowAutoRedirect(v) => self.allow_auto_redirect = v,
            ClientSetting::MaxErrorRetry(v) => self.max_error_retry = v,
            ClientSetting::Timeout(v) => self.timeout = v,
            ClientSetting::ProxyHost(v) => self.proxy_host = v,
            ClientSetting::ProxyPort(v) => self.proxy_port = v,
            ClientSetting::UseHttp(v) => self.use_http = v,
            ClientSetting::ThrottleRetries(v) => self.throttle_retries = v,
            _ => return false,
        }
        true
    }
}

/// Client built from a [`MockClientConfig`].
pub struct MockClient {
    config: MockClientConfig,
    credentials: SharedCredentialsProvider,
    shutdowns: AtomicUsize,
}

impl MockClient {
    /// The configuration the client was built with.
    pub fn config(&self) -> &MockClientConfig {
        &self.config
    }

    /// The credentials the client was built with.
    pub fn credentials(&self) -> &SharedCredentialsProvider {
        &self.credentials
    }

    /// Number of times [`ServiceClient::shutdown`] ran.
    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for MockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials.name())
            .field("shutdowns", &self.shutdown_count())
            .finish()
    }
}

impl ServiceClient for MockClient {
    type Config = MockClientConfig;
    type Error = MockClientError;

    fn from_parts(
        credentials: SharedCredentialsProvider,
        config: Self::Config,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            config,
            credentials,
            shutdowns: AtomicUsize::new(0),
        })
    }

    fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

/// Configuration that supports no optional settings at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BareConfig {
    /// Region set by the manager.
    pub region: Option<RegionEndpoint>,
}

impl ClientConfig for BareConfig {
    fn set_region_endpoint(&mut self, region: RegionEndpoint) {
        self.region = Some(region);
    }
}

/// Client built from a [`BareConfig`].
#[derive(Debug)]
pub struct BareClient {
    config: BareConfig,
}

impl BareClient {
    /// The configuration the client was built with.
    pub fn config(&self) -> &BareConfig {
        &self.config
    }
}

impl ServiceClient for BareClient {
    type Config = BareConfig;
    type Error = MockClientError;

    fn from_parts(_: SharedCredentialsProvider, config: Self::Config) -> Result<Self, Self::Error> {
        Ok(Self { config })
    }
}

/// Client whose constructor always fails.
#[derive(Debug)]
pub struct FailingClient;

impl ServiceClient for FailingClient {
    type Config = BareConfig;
    type Error = MockClientError;

    fn from_parts(_: SharedCredentialsProvider, config: Self::Config) -> Result<Self, Self::Error> {
        let region = config.region.map(|r| r.system_name()).unwrap_or("none");
        Err(MockClientError::Rejected(format!("no endpoint in {}", region)))
    }
}
