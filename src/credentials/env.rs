//! Environment variable credentials provider.

use super::{AwsCredentials, CredentialsProvider};
use crate::error::{CredentialsError, ManagerError};
use async_trait::async_trait;
use std::env;

/// Environment variable names for AWS credentials.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Secret access key variable.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Optional session token variable.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Credentials provider that reads from environment variables.
///
/// Variables are read on every call, so rotated values are picked up by
/// long-lived clients.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialsProvider {
    access_key_var: Option<String>,
    secret_key_var: Option<String>,
    session_token_var: Option<String>,
}

impl EnvCredentialsProvider {
    /// Create a provider reading the standard `AWS_*` variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with custom variable names.
    pub fn with_vars(
        access_key_var: impl Into<String>,
        secret_key_var: impl Into<String>,
        session_token_var: Option<String>,
    ) -> Self {
        Self {
            access_key_var: Some(access_key_var.into()),
            secret_key_var: Some(secret_key_var.into()),
            session_token_var,
        }
    }

    fn access_key_var(&self) -> &str {
        self.access_key_var.as_deref().unwrap_or(AWS_ACCESS_KEY_ID)
    }

    fn secret_key_var(&self) -> &str {
        self.secret_key_var.as_deref().unwrap_or(AWS_SECRET_ACCESS_KEY)
    }

    fn session_token_var(&self) -> &str {
        self.session_token_var.as_deref().unwrap_or(AWS_SESSION_TOKEN)
    }

    fn required(&self, var: &str) -> Result<String, ManagerError> {
        let value = env::var(var).map_err(|_| CredentialsError::NotFound {
            source_name: var.to_string(),
        })?;

        if value.is_empty() {
            return Err(CredentialsError::Invalid {
                message: format!("{} is empty", var),
            }
            .into());
        }

        Ok(value)
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentialsProvider {
    async fn get_credentials(&self) -> Result<AwsCredentials, ManagerError> {
        let access_key_id = self.required(self.access_key_var())?;
        let secret_access_key = self.required(self.secret_key_var())?;

        let credentials = AwsCredentials::new(access_key_id, secret_access_key);
        match env::var(self.session_token_var()).ok().filter(|s| !s.is_empty()) {
            Some(token) => Ok(credentials.with_session_token(token)),
            None => Ok(credentials),
        }
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}
