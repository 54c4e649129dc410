//! Error types for the client manager.
//!
//! Errors are split by where they originate: argument validation at
//! construction time, lifecycle violations, credential loading, and failures
//! surfaced by the wrapped client's own constructor.

use std::sync::Arc;
use thiserror::Error;

/// Error carried from a client constructor, shared by every caller that
/// waited on the same build.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for the client manager.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A required argument was not supplied or could not be used.
    #[error("Invalid argument: {argument} must be provided")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
    },

    /// The manager has been disposed and no longer hands out clients.
    #[error("Manager disposed: the client is no longer available")]
    Disposed,

    /// The wrapped client failed to construct.
    ///
    /// `source` is the client's own error, unchanged. Callers that raced on
    /// the same build receive the same `source`.
    #[error("Client construction failed for {client}: {source}")]
    Construction {
        /// Type name of the client that failed to build.
        client: &'static str,
        /// The constructor's error.
        #[source]
        source: SharedError,
    },

    /// Credential-related errors.
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),
}

impl ManagerError {
    /// Shorthand for [`ManagerError::InvalidArgument`].
    pub fn invalid_argument(argument: &'static str) -> Self {
        ManagerError::InvalidArgument { argument }
    }

    /// Returns true if this is an argument validation failure.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ManagerError::InvalidArgument { .. })
    }

    /// Returns true if the client constructor failed.
    pub fn is_construction(&self) -> bool {
        matches!(self, ManagerError::Construction { .. })
    }

    /// Borrow the construction error as its concrete type, if it is one.
    pub fn construction_source<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            ManagerError::Construction { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Credential-related errors.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// No credentials could be found.
    #[error("Credentials not found: {source_name} had no credentials")]
    NotFound {
        /// Provider or variable that was consulted.
        source_name: String,
    },

    /// Credentials are present but unusable.
    #[error("Invalid credentials: {message}")]
    Invalid {
        /// Why the credentials were rejected.
        message: String,
    },

    /// Credentials have expired.
    #[error("Credentials expired: session credentials expired at {expiration}")]
    Expired {
        /// When the credentials expired.
        expiration: String,
    },
}

/// Result type alias for manager operations.
pub type Result<T> = std::result::Result<T, ManagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn test_invalid_argument_display() {
        let err = ManagerError::invalid_argument("credentials");
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "Invalid argument: credentials must be provided"
        );
    }

    #[test]
    fn test_construction_source_downcast() {
        let err = ManagerError::Construction {
            client: "Dummy",
            source: Arc::new(Boom),
        };

        assert!(err.is_construction());
        assert!(err.construction_source::<Boom>().is_some());
        assert!(err.construction_source::<std::fmt::Error>().is_none());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_credentials_error_converts() {
        let err: ManagerError = CredentialsError::Invalid {
            message: "empty key".to_string(),
        }
        .into();

        assert!(matches!(err, ManagerError::Credentials(_)));
        assert!(!err.is_invalid_argument());
    }
}
