//! Common enums shared across managed clients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an attribute value is interpreted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttributeType {
    /// Unicode string with UTF-8 binary encoding.
    #[default]
    String,
    /// Positive or negative integer or floating point number.
    Number,
    /// Arbitrary binary data such as compressed or encrypted payloads.
    Binary,
}

impl AttributeType {
    /// Every attribute type, in wire order.
    pub const ALL: [AttributeType; 3] = [
        AttributeType::String,
        AttributeType::Number,
        AttributeType::Binary,
    ];

    /// Returns the API string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "String",
            AttributeType::Number => "Number",
            AttributeType::Binary => "Binary",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttributeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(AttributeType::String),
            "Number" => Ok(AttributeType::Number),
            "Binary" => Ok(AttributeType::Binary),
            _ => Err(format!("Unknown attribute type: {}", s)),
        }
    }
}

/// Request signing algorithm for the legacy query protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// HMAC-SHA1 (signature version 2, legacy endpoints only).
    #[serde(rename = "HmacSHA1")]
    HmacSha1,
    /// HMAC-SHA256.
    #[default]
    #[serde(rename = "HmacSHA256")]
    HmacSha256,
}

impl SigningAlgorithm {
    /// Returns the API string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::HmacSha1 => "HmacSHA1",
            SigningAlgorithm::HmacSha256 => "HmacSHA256",
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SigningAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HmacSHA1" => Ok(SigningAlgorithm::HmacSha1),
            "HmacSHA256" => Ok(SigningAlgorithm::HmacSha256),
            _ => Err(format!("Unknown signing algorithm: {}", s)),
        }
    }
}
