//! Outgoing service requests.
//!
//! Marshalling is done by the wrapped client; this type only carries what
//! is needed to reason about a request before it is sent.

use std::collections::HashMap;

/// A marshalled request on its way to a service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRequest {
    /// Service the request targets, e.g. `sqs`.
    pub service_name: String,
    /// HTTP method.
    pub http_method: String,
    /// Resource path, relative to the endpoint.
    pub resource_path: String,
    /// Query or form parameters, in insertion order.
    pub parameters: Vec<(String, String)>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl ServiceRequest {
    /// Create a new request.
    pub fn new(
        service_name: impl Into<String>,
        http_method: impl Into<String>,
        resource_path: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            http_method: http_method.into(),
            resource_path: resource_path.into(),
            parameters: Vec::new(),
            headers: HashMap::new(),
        }
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// See [`approximate_message_size`].
    pub fn approximate_message_size(&self) -> usize {
        self.parameters
            .iter()
            .map(|(key, value)| key.chars().count() + value.chars().count())
            .sum()
    }
}

/// Approximate size of the data a request sends.
///
/// Sums the character lengths of every parameter key and value; `None`
/// counts as zero. This is an estimate and must not be used to enforce
/// service payload limits.
pub fn approximate_message_size(request: Option<&ServiceRequest>) -> usize {
    request.map_or(0, ServiceRequest::approximate_message_size)
}
