//! A generic AWS HTTP client manageable by [`ClientManager`].
//!
//! [`HttpServiceClient`] wraps a `reqwest::Client` configured from an
//! [`HttpClientConfig`]. It does not sign or marshal requests; it owns the
//! connection pool, the resolved endpoint and the settings a signer needs.
//!
//! [`ClientManager`]: crate::manager::ClientManager

use crate::config::ClientConfig;
use crate::credentials::{ProxyCredentials, SharedCredentialsProvider};
use crate::manager::ServiceClient;
use crate::options::ClientSetting;
use crate::region::RegionEndpoint;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default retry count when none is configured.
pub const DEFAULT_MAX_ERROR_RETRY: u32 = 4;

/// Errors from building or using an [`HttpServiceClient`].
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The endpoint URL could not be formed.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The underlying HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Proxy settings are incomplete.
    #[error("Invalid proxy configuration: {message}")]
    InvalidProxy {
        /// What is wrong with the proxy settings.
        message: String,
    },

    /// The client was shut down by its manager.
    #[error("Client has been shut down")]
    Closed,
}

/// Settings for an [`HttpServiceClient`].
#[derive(Clone)]
pub struct HttpClientConfig {
    /// Region the client talks to.
    pub region: RegionEndpoint,
    /// Endpoint prefix of the service, e.g. `sqs`.
    pub service_name: String,
    /// Follow HTTP redirects.
    pub allow_auto_redirect: bool,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// Idle connections kept per host. reqwest has no limit on concurrent
    /// connections per host, so the manager's `max_connections_per_server`
    /// is not taken by this configuration.
    pub pool_max_idle_per_host: Option<usize>,
    /// Proxy host name.
    pub proxy_host: Option<String>,
    /// Proxy port.
    pub proxy_port: Option<u16>,
    /// Proxy credentials.
    pub proxy_credentials: Option<ProxyCredentials>,
    /// Use `http://` endpoints.
    pub use_http: bool,
    /// Use dual-stack endpoints.
    pub use_dual_stack_endpoint: bool,
    /// Region override for signing.
    pub authentication_region: Option<String>,
    /// Service name override for signing.
    pub authentication_service_name: Option<String>,
    /// Retries on error responses.
    pub max_error_retry: Option<u32>,
    /// Client-side retry throttling.
    pub throttle_retries: bool,
    /// User-Agent header.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            region: RegionEndpoint::US_EAST_1,
            service_name: "execute-api".to_string(),
            allow_auto_redirect: true,
            timeout: None,
            connect_timeout: Duration::from_secs(5),
            pool_max_idle_per_host: None,
            proxy_host: None,
            proxy_port: None,
            proxy_credentials: None,
            use_http: false,
            use_dual_stack_endpoint: false,
            authentication_region: None,
            authentication_service_name: None,
            max_error_retry: None,
            throttle_retries: true,
            user_agent: format!("aws-client-manager/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl fmt::Debug for HttpClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClientConfig")
            .field("region", &self.region)
            .field("service_name", &self.service_name)
            .field("allow_auto_redirect", &self.allow_auto_redirect)
            .field("timeout", &self.timeout)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .field("proxy_host", &self.proxy_host)
            .field("proxy_port", &self.proxy_port)
            .field("use_http", &self.use_http)
            .field("use_dual_stack_endpoint", &self.use_dual_stack_endpoint)
            .field("max_error_retry", &self.max_error_retry)
            // proxy_credentials omitted
            .finish_non_exhaustive()
    }
}

impl HttpClientConfig {
    /// Set the service endpoint prefix.
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Regional endpoint for the configured service.
    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        let scheme = if self.use_http { "http" } else { "https" };
        let dual_stack = if self.use_dual_stack_endpoint {
            ".dualstack"
        } else {
            ""
        };

        Url::parse(&format!(
            "{}://{}{}.{}.{}",
            scheme,
            self.service_name,
            dual_stack,
            self.region.system_name(),
            self.region.dns_suffix()
        ))
    }

    /// Region used to sign requests.
    pub fn signing_region(&self) -> &str {
        self.authentication_region
            .as_deref()
            .unwrap_or_else(|| self.region.system_name())
    }

    /// Service name used to sign requests.
    pub fn signing_service(&self) -> &str {
        self.authentication_service_name
            .as_deref()
            .unwrap_or(self.service_name.as_str())
    }

    /// Retries on error responses, falling back to the default.
    pub fn effective_max_error_retry(&self) -> u32 {
        self.max_error_retry.unwrap_or(DEFAULT_MAX_ERROR_RETRY)
    }

    /// Proxy URL, if a proxy host is set.
    pub fn proxy_url(&self) -> Result<Option<String>, HttpClientError> {
        match (&self.proxy_host, self.proxy_port) {
            (Some(host), Some(port)) => Ok(Some(format!("http://{}:{}", host, port))),
            (Some(host), None) => Ok(Some(format!("http://{}", host))),
            (None, Some(port)) => Err(HttpClientError::InvalidProxy {
                message: format!("proxy port {} set without a proxy host", port),
            }),
            (None, None) => Ok(None),
        }
    }

    fn build_http_client(&self) -> Result<reqwest::Client, HttpClientError> {
        let redirect = if self.allow_auto_redirect {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        };

        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .redirect(redirect)
            .user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(max) = self.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max);
        }
        if let Some(url) = self.proxy_url()? {
            let mut proxy = reqwest::Proxy::all(url.as_str())?;
            if let Some(credentials) = &self.proxy_credentials {
                proxy = proxy.basic_auth(credentials.username(), credentials.password());
            }
            builder = builder.proxy(proxy);
        }

        Ok(builder.build()?)
    }
}

impl ClientConfig for HttpClientConfig {
    fn set_region_endpoint(&mut self, region: RegionEndpoint) {
        self.region = region;
    }

    fn apply(&mut self, setting: ClientSetting) -> bool {
        match setting {
            ClientSetting::AllowAutoRedirect(v) => self.allow_auto_redirect = v,
            ClientSetting::Timeout(v) => self.timeout = v,
            ClientSetting::ProxyHost(v) => self.proxy_host = v,
            ClientSetting::ProxyPort(v) => self.proxy_port = v,
            ClientSetting::ProxyCredentials(v) => self.proxy_credentials = v,
            ClientSetting::UseHttp(v) => self.use_http = v,
            ClientSetting::UseDualStackEndpoint(v) => self.use_dual_stack_endpoint = v,
            ClientSetting::AuthenticationRegion(v) => self.authentication_region = v,
            ClientSetting::AuthenticationServiceName(v) => self.authentication_service_name = v,
            ClientSetting::MaxErrorRetry(v) => self.max_error_retry = v,
            ClientSetting::ThrottleRetries(v) => self.throttle_retries = v,
            _ => return false,
        }
        true
    }
}

/// HTTP client bound to one regional service endpoint.
pub struct HttpServiceClient {
    http: reqwest::Client,
    endpoint: Url,
    config: HttpClientConfig,
    credentials: SharedCredentialsProvider,
    closed: AtomicBool,
}

impl HttpServiceClient {
    /// Resolved service endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The configuration the client was built with.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Credentials to sign requests with.
    pub fn credentials(&self) -> &SharedCredentialsProvider {
        &self.credentials
    }

    /// Returns true once the client has been shut down.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Start a request to `path` under the service endpoint.
    pub fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        if self.is_closed() {
            return Err(HttpClientError::Closed);
        }
        let url = self.endpoint.join(path)?;
        Ok(self.http.request(method, url))
    }
}

impl ServiceClient for HttpServiceClient {
    type Config = HttpClientConfig;
    type Error = HttpClientError;

    fn from_parts(
        credentials: SharedCredentialsProvider,
        config: Self::Config,
    ) -> Result<Self, Self::Error> {
        let endpoint = config.endpoint()?;
        let http = config.build_http_client()?;

        Ok(Self {
            http,
            endpoint,
            config,
            credentials,
            closed: AtomicBool::new(false),
        })
    }

    fn shutdown(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(endpoint = %self.endpoint, "HTTP client shut down");
        }
    }
}

impl fmt::Debug for HttpServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpServiceClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
