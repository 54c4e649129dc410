//! AWS Client Manager
//!
//! Lazy, thread-safe construction and orderly disposal of AWS service
//! clients.
//!
//! # Features
//!
//! - **Lazy construction**: the client is built on first use, exactly once
//! - **Capability-based options**: each client configuration takes the
//!   manager options it supports and skips the rest
//! - **Deterministic disposal**: idempotent, thread-safe teardown
//! - **Region resolution**: map service URLs to known regions
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aws_manager::http::HttpServiceClient;
//! use aws_manager::{AwsCredentials, ClientManager, RegionEndpoint};
//! use std::time::Duration;
//!
//! let manager = ClientManager::<HttpServiceClient>::builder()
//!     .static_credentials(AwsCredentials::new("AKID", "SECRET"))
//!     .region(RegionEndpoint::US_WEST_2)
//!     .setup(|options| {
//!         options.timeout = Some(Duration::from_secs(10));
//!         options.max_error_retry = Some(3);
//!     })
//!     .build()?;
//!
//! // Nothing has been built yet; this builds and caches the client.
//! let client = manager.client()?;
//! println!("endpoint: {}", client.endpoint());
//!
//! manager.dispose();
//! # Ok::<(), aws_manager::ManagerError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod manager;
pub mod mocks;
pub mod options;
pub mod region;
pub mod request;
pub mod types;

// Re-export main types at crate root
pub use config::ClientConfig;
pub use credentials::{
    AwsCredentials, CredentialsProvider, EnvCredentialsProvider, ProxyCredentials,
    SharedCredentialsProvider, StaticCredentialsProvider,
};
pub use error::{CredentialsError, ManagerError, Result, SharedError};
pub use manager::{ClientManager, ClientManagerBuilder, ManagerState, ServiceClient};
pub use options::{ClientSetting, ManagerOptions};
pub use region::{resolve_region, resolve_region_with, RegionEndpoint, UrlRegionExt};
pub use request::{approximate_message_size, ServiceRequest};
pub use types::{AttributeType, SigningAlgorithm};
