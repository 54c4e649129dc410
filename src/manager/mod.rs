//! Lazy, thread-safe client manager.
//!
//! A [`ClientManager`] stores credentials, an endpoint resolver and the
//! resolved [`ManagerOptions`] when it is created, and defers all expensive
//! work until the client is first requested. It is meant to be embedded as a
//! private field of a service-specific manager, which is the only code that
//! reaches [`ClientManager::client`]:
//!
//! ```rust,no_run
//! use aws_manager::http::HttpServiceClient;
//! use aws_manager::{AwsCredentials, ClientManager, ManagerError, RegionEndpoint};
//!
//! pub struct QueueManager {
//!     inner: ClientManager<HttpServiceClient>,
//! }
//!
//! impl QueueManager {
//!     pub fn new(credentials: AwsCredentials) -> Result<Self, ManagerError> {
//!         let inner = ClientManager::builder()
//!             .static_credentials(credentials)
//!             .region(RegionEndpoint::EU_WEST_1)
//!             .setup(|o| o.max_error_retry = Some(5))
//!             .build()?;
//!         Ok(Self { inner })
//!     }
//!
//!     pub fn queue_url(&self, name: &str) -> Result<String, ManagerError> {
//!         let client = self.inner.client()?;
//!         Ok(format!("{}{}", client.endpoint(), name))
//!     }
//! }
//! ```

mod builder;

pub use builder::ClientManagerBuilder;

use crate::config::ClientConfig;
use crate::credentials::SharedCredentialsProvider;
use crate::error::{ManagerError, Result, SharedError};
use crate::options::ManagerOptions;
use crate::region::RegionEndpoint;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Function resolving the region a client should talk to.
///
/// Invoked once per build attempt, outside the manager's lock.
pub type EndpointResolver = Arc<dyn Fn() -> RegionEndpoint + Send + Sync>;

/// A client that a [`ClientManager`] can build.
pub trait ServiceClient: Send + Sync + Sized + 'static {
    /// Configuration type consumed by [`ServiceClient::from_parts`].
    type Config: ClientConfig;

    /// Error returned when construction fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the client from credentials and a populated configuration.
    fn from_parts(
        credentials: SharedCredentialsProvider,
        config: Self::Config,
    ) -> std::result::Result<Self, Self::Error>;

    /// Release resources held by the client.
    ///
    /// Called once, when the owning manager is disposed.
    fn shutdown(&self) {}
}

/// Observable lifecycle state of a [`ClientManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// No client has been built yet.
    Created,
    /// The client is built and cached.
    ClientBuilt,
    /// The manager was disposed. Terminal.
    Disposed,
}

type Attempt<C> = OnceCell<std::result::Result<Arc<C>, SharedError>>;

enum Slot<C> {
    Empty,
    Building(Arc<Attempt<C>>),
    Built(Arc<C>),
    Disposed,
}

impl<C> Slot<C> {
    fn state(&self) -> ManagerState {
        match self {
            Slot::Empty | Slot::Building(_) => ManagerState::Created,
            Slot::Built(_) => ManagerState::ClientBuilt,
            Slot::Disposed => ManagerState::Disposed,
        }
    }
}

/// Owns one lazily built client of type `C`.
pub struct ClientManager<C: ServiceClient> {
    credentials: SharedCredentialsProvider,
    endpoint_resolver: EndpointResolver,
    options: ManagerOptions,
    slot: RwLock<Slot<C>>,
}

impl<C: ServiceClient> ClientManager<C> {
    /// Create a builder.
    pub fn builder() -> ClientManagerBuilder<C> {
        ClientManagerBuilder::new()
    }

    /// Create a manager with default options.
    pub fn new<R>(credentials: SharedCredentialsProvider, endpoint_resolver: R) -> Self
    where
        R: Fn() -> RegionEndpoint + Send + Sync + 'static,
    {
        Self::from_parts(
            credentials,
            Arc::new(endpoint_resolver),
            ManagerOptions::default(),
        )
    }

    pub(crate) fn from_parts(
        credentials: SharedCredentialsProvider,
        endpoint_resolver: EndpointResolver,
        options: ManagerOptions,
    ) -> Self {
        debug!(
            client = std::any::type_name::<C>(),
            credentials = credentials.name(),
            "Client manager created"
        );
        Self {
            credentials,
            endpoint_resolver,
            options,
            slot: RwLock::new(Slot::Empty),
        }
    }

    /// Get the client, building it on first use.
    ///
    /// Concurrent first calls share one build attempt: the constructor runs
    /// once and every caller gets the same instance, or the same
    /// [`ManagerError::Construction`] failure. A failed attempt leaves
    /// nothing cached, so a later call tries again. After
    /// [`dispose`](Self::dispose) this returns [`ManagerError::Disposed`].
    ///
    /// The build runs without holding the manager's lock, so the resolver
    /// and the client constructor may call [`state`](Self::state) or
    /// [`dispose`](Self::dispose). Calling `client()` on the same manager
    /// from inside the build deadlocks.
    pub fn client(&self) -> Result<Arc<C>> {
        let attempt = match &*self.slot.read() {
            Slot::Built(client) => return Ok(Arc::clone(client)),
            Slot::Disposed => return Err(ManagerError::Disposed),
            Slot::Building(attempt) => Some(Arc::clone(attempt)),
            Slot::Empty => None,
        };

        let attempt = match attempt {
            Some(attempt) => attempt,
            None => {
                // Another thread may have started, finished or disposed
                // while we waited for the write lock.
                let mut slot = self.slot.write();
                let existing = match &*slot {
                    Slot::Built(client) => return Ok(Arc::clone(client)),
                    Slot::Disposed => return Err(ManagerError::Disposed),
                    Slot::Building(attempt) => Some(Arc::clone(attempt)),
                    Slot::Empty => None,
                };
                match existing {
                    Some(attempt) => attempt,
                    None => {
                        let attempt = Arc::new(OnceCell::new());
                        *slot = Slot::Building(Arc::clone(&attempt));
                        attempt
                    }
                }
            }
        };

        let mut built_here = false;
        let outcome = attempt.get_or_init(|| {
            built_here = true;
            self.build().map(Arc::new)
        });

        if built_here {
            return self.publish(&attempt, outcome);
        }

        if self.is_disposed() {
            return Err(ManagerError::Disposed);
        }
        Self::outcome_to_result(outcome)
    }

    /// Record the outcome of an attempt this thread ran.
    fn publish(
        &self,
        attempt: &Arc<Attempt<C>>,
        outcome: &std::result::Result<Arc<C>, SharedError>,
    ) -> Result<Arc<C>> {
        let mut slot = self.slot.write();
        if matches!(&*slot, Slot::Disposed) {
            drop(slot);
            if let Ok(client) = outcome {
                debug!(
                    client = std::any::type_name::<C>(),
                    "Manager disposed during build, shutting client down"
                );
                client.shutdown();
            }
            return Err(ManagerError::Disposed);
        }

        if matches!(&*slot, Slot::Building(current) if Arc::ptr_eq(current, attempt)) {
            *slot = match outcome {
                Ok(client) => Slot::Built(Arc::clone(client)),
                Err(_) => Slot::Empty,
            };
        }
        drop(slot);

        Self::outcome_to_result(outcome)
    }

    fn outcome_to_result(outcome: &std::result::Result<Arc<C>, SharedError>) -> Result<Arc<C>> {
        match outcome {
            Ok(client) => Ok(Arc::clone(client)),
            Err(source) => Err(ManagerError::Construction {
                client: std::any::type_name::<C>(),
                source: Arc::clone(source),
            }),
        }
    }

    fn build(&self) -> std::result::Result<C, SharedError> {
        let client_name = std::any::type_name::<C>();
        let region = (self.endpoint_resolver)();
        debug!(client = client_name, region = %region, "Building client");

        let mut config = C::Config::default();
        config.set_region_endpoint(region);
        let applied = self.options.apply_to(&mut config);

        match C::from_parts(Arc::clone(&self.credentials), config) {
            Ok(client) => {
                debug!(
                    client = client_name,
                    applied = applied.len(),
                    "Client built"
                );
                Ok(client)
            }
            Err(err) => {
                debug!(client = client_name, error = %err, "Client construction failed");
                let shared: SharedError = Arc::new(err);
                Err(shared)
            }
        }
    }

    /// Dispose the manager, shutting down the client if it was built.
    ///
    /// Idempotent and safe to call concurrently; exactly one call performs
    /// the shutdown. Never builds the client. A build already in progress
    /// finishes on its own thread, which then shuts the new client down.
    pub fn dispose(&self) {
        let previous = std::mem::replace(&mut *self.slot.write(), Slot::Disposed);
        match previous {
            Slot::Built(client) => {
                debug!(client = std::any::type_name::<C>(), "Disposing client");
                client.shutdown();
            }
            Slot::Building(_) => {
                debug!(
                    client = std::any::type_name::<C>(),
                    "Manager disposed while client was building"
                );
            }
            Slot::Empty => {
                debug!(
                    client = std::any::type_name::<C>(),
                    "Manager disposed before client was built"
                );
            }
            Slot::Disposed => {}
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ManagerState {
        self.slot.read().state()
    }

    /// Returns true once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.state() == ManagerState::Disposed
    }

    /// The options this manager applies.
    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    /// The credentials provider handed to the client.
    pub fn credentials(&self) -> &SharedCredentialsProvider {
        &self.credentials
    }

    /// Invoke the endpoint resolver.
    pub fn resolve_endpoint(&self) -> RegionEndpoint {
        (self.endpoint_resolver)()
    }
}

impl<C: ServiceClient> Drop for ClientManager<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<C: ServiceClient> fmt::Debug for ClientManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientManager")
            .field("client", &std::any::type_name::<C>())
            .field("credentials", &self.credentials.name())
            .field("options", &self.options)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
