//! AWS credentials handed to managed clients.
//!
//! The manager never inspects credentials itself; it stores a shared provider
//! and passes it to the client constructor. Providers are async because
//! clients resolve credentials per request.

mod env;

pub use env::EnvCredentialsProvider;

use crate::error::{CredentialsError, ManagerError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;

/// Credentials provider shared between a manager and the client it builds.
pub type SharedCredentialsProvider = Arc<dyn CredentialsProvider>;

/// AWS credentials.
#[derive(Clone)]
pub struct AwsCredentials {
    access_key_id: String,
    secret_access_key: SecretString,
    session_token: Option<SecretString>,
    expiration: Option<DateTime<Utc>>,
}

impl AwsCredentials {
    /// Create new long-term credentials.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: SecretString::new(secret_access_key.into()),
            session_token: None,
            expiration: None,
        }
    }

    /// Attach a session token, making these temporary credentials.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(SecretString::new(session_token.into()));
        self
    }

    /// Set an expiration time.
    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Get the access key ID.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Get the secret access key.
    ///
    /// Note: This exposes the secret. Avoid logging the result.
    pub fn secret_access_key(&self) -> &str {
        self.secret_access_key.expose_secret()
    }

    /// Get the session token, if any.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_ref().map(|s| s.expose_secret().as_str())
    }

    /// Get the expiration time, if any.
    pub fn expiration(&self) -> Option<&DateTime<Utc>> {
        self.expiration.as_ref()
    }

    /// Check if credentials have expired.
    pub fn is_expired(&self) -> bool {
        match &self.expiration {
            Some(exp) => Utc::now() >= *exp,
            None => false,
        }
    }

    /// Check if credentials are temporary (have a session token).
    pub fn is_temporary(&self) -> bool {
        self.session_token.is_some()
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Trait for credential providers.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Get credentials from this provider.
    async fn get_credentials(&self) -> Result<AwsCredentials, ManagerError>;

    /// Provider name for logging/debugging.
    fn name(&self) -> &'static str;
}

/// Static credentials provider for explicit configuration.
pub struct StaticCredentialsProvider {
    credentials: AwsCredentials,
}

impl StaticCredentialsProvider {
    /// Create a new static credentials provider.
    pub fn new(credentials: AwsCredentials) -> Self {
        Self { credentials }
    }

    /// Wrap credentials into a shareable provider.
    pub fn shared(credentials: AwsCredentials) -> SharedCredentialsProvider {
        Arc::new(Self::new(credentials))
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentialsProvider {
    async fn get_credentials(&self) -> Result<AwsCredentials, ManagerError> {
        if self.credentials.is_expired() {
            return Err(CredentialsError::Expired {
                expiration: self
                    .credentials
                    .expiration()
                    .map(|e| e.to_rfc3339())
                    .unwrap_or_default(),
            }
            .into());
        }
        Ok(self.credentials.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

impl fmt::Debug for StaticCredentialsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentialsProvider")
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Username and password for an authenticating HTTP proxy.
#[derive(Clone)]
pub struct ProxyCredentials {
    username: String,
    password: SecretString,
}

impl ProxyCredentials {
    /// Create proxy credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Get the proxy username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the proxy password.
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl PartialEq for ProxyCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username && self.password() == other.password()
    }
}

impl fmt::Debug for ProxyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
