//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding cache, serialization, image, and input validation failures.
#[derive(Debug)]
pub enum SpaceLaunchError {
    /// An error from the underlying GraphQL client.
    Api(spacelaunch_api::Error),
    /// A cache operation failed (e.g. deserialization of cached data).
    Cache(String),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// Downloading, decoding, or encoding a thumbnail failed.
    Image(String),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for SpaceLaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Cache(msg) => write!(f, "Cache error: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Image(msg) => write!(f, "Image error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for SpaceLaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<spacelaunch_api::Error> for SpaceLaunchError {
    fn from(e: spacelaunch_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for SpaceLaunchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<image::ImageError> for SpaceLaunchError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e.to_string())
    }
}
