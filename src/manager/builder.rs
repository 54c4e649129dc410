//! Builder for [`ClientManager`].

use super::{ClientManager, EndpointResolver, ServiceClient};
use crate::credentials::{AwsCredentials, SharedCredentialsProvider, StaticCredentialsProvider};
use crate::error::{ManagerError, Result};
use crate::options::ManagerOptions;
use crate::region::RegionEndpoint;
use std::marker::PhantomData;
use std::sync::Arc;

type Setup = Box<dyn FnOnce(&mut ManagerOptions)>;

/// Builder for [`ClientManager`].
///
/// Credentials and an endpoint resolver are required; the setup callback is
/// optional.
pub struct ClientManagerBuilder<C: ServiceClient> {
    credentials: Option<SharedCredentialsProvider>,
    endpoint_resolver: Option<EndpointResolver>,
    setup: Option<Setup>,
    from_env: bool,
    _client: PhantomData<fn() -> C>,
}

impl<C: ServiceClient> ClientManagerBuilder<C> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            credentials: None,
            endpoint_resolver: None,
            setup: None,
            from_env: false,
            _client: PhantomData,
        }
    }

    /// Set the credentials provider passed to the client.
    pub fn credentials(mut self, provider: SharedCredentialsProvider) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Use fixed credentials.
    pub fn static_credentials(self, credentials: AwsCredentials) -> Self {
        self.credentials(StaticCredentialsProvider::shared(credentials))
    }

    /// Set the function resolving the client's region.
    pub fn endpoint_resolver<R>(mut self, resolver: R) -> Self
    where
        R: Fn() -> RegionEndpoint + Send + Sync + 'static,
    {
        self.endpoint_resolver = Some(Arc::new(resolver));
        self
    }

    /// Always use `region`.
    pub fn region(self, region: RegionEndpoint) -> Self {
        self.endpoint_resolver(move || region)
    }

    /// Set the callback that adjusts [`ManagerOptions`] during `build`.
    pub fn setup<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut ManagerOptions) + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Start from [`ManagerOptions::from_env`] instead of the defaults.
    pub fn options_from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Build the manager. The client itself is not built.
    ///
    /// Fails with [`ManagerError::InvalidArgument`] when credentials or the
    /// endpoint resolver are missing; the setup callback does not run then.
    pub fn build(self) -> Result<ClientManager<C>> {
        let credentials = self
            .credentials
            .ok_or(ManagerError::invalid_argument("credentials"))?;
        let endpoint_resolver = self
            .endpoint_resolver
            .ok_or(ManagerError::invalid_argument("endpoint_resolver"))?;

        let base = if self.from_env {
            ManagerOptions::from_env()
        } else {
            ManagerOptions::default()
        };
        let options = base.with_setup(self.setup);

        Ok(ClientManager::from_parts(
            credentials,
            endpoint_resolver,
            options,
        ))
    }
}

impl<C: ServiceClient> Default for ClientManagerBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
