//! Error types for the relay client.

use std::path::PathBuf;

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// More photos than the relay accepts
    #[error("too many photos: {count} (max {max})")]
    TooManyPhotos { count: usize, max: usize },

    /// A photo file could not be read
    #[error("failed to read {path}: {source}")]
    ReadPhoto {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport error while talking to the relay
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered with a failure response
    #[error("relay rejected the request ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
