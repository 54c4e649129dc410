//! Mock implementations for testing.
//!
//! This module provides mock clients, configurations and credentials for
//! testing code built on [`ClientManager`](crate::manager::ClientManager).

mod client;
mod credentials;

pub use client::{
    BareClient, BareConfig, FailingClient, MockClient, MockClientConfig, MockClientError,
};
pub use credentials::MockCredentialsProvider;

use crate::request::ServiceRequest;
use std::sync::Arc;

/// Test fixtures for manager tests.
pub struct TestFixtures;

impl TestFixtures {
    /// Shared mock credentials.
    pub fn credentials() -> Arc<MockCredentialsProvider> {
        Arc::new(MockCredentialsProvider::new())
    }

    /// A query-protocol request with a handful of parameters.
    pub fn sample_request() -> ServiceRequest {
        ServiceRequest::new("sqs", "POST", "/123456789012/orders")
            .with_parameter("Action", "SendMessage")
            .with_parameter("MessageBody", "hello")
            .with_parameter("Version", "2012-11-05")
    }

    /// Service URLs paired with the region they should resolve to.
    pub fn regional_urls() -> Vec<(&'static str, &'static str)> {
        vec![
            ("https://sqs.us-east-1.amazonaws.com/123/queue", "us-east-1"),
            ("https://monitoring.eu-central-1.amazonaws.com", "eu-central-1"),
            ("https://s3.dualstack.ap-south-1.amazonaws.com", "ap-south-1"),
            ("https://kinesis.cn-northwest-1.amazonaws.com.cn", "cn-northwest-1"),
        ]
    }
}
