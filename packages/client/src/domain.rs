//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use std::path::Path;

use jobrelay_server::domain::MAX_ATTACHMENTS;

use crate::error::ClientError;

/// Build an HTTP endpoint URL from the relay base URL
///
/// # Arguments
///
/// * `base_url` - Relay base URL (e.g., "http://127.0.0.1:3000/")
/// * `path` - Absolute endpoint path (e.g., "/api/job-orders")
pub fn api_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Build the realtime endpoint URL from the relay base URL
///
/// `http` becomes `ws` and `https` becomes `wss`. URLs that already use a
/// WebSocket scheme are kept as they are.
///
/// # Errors
///
/// Returns `ClientError::ConnectionError` for any other scheme.
pub fn websocket_url(base_url: &str) -> Result<String, ClientError> {
    let base = base_url.trim_end_matches('/');
    let converted = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else if base.starts_with("ws://") || base.starts_with("wss://") {
        base.to_string()
    } else {
        return Err(ClientError::ConnectionError(format!(
            "unsupported URL scheme: {}",
            base_url
        )));
    };
    Ok(format!("{}/ws", converted))
}

/// Reject photo lists the relay would refuse anyway
pub fn check_photo_count(count: usize) -> Result<(), ClientError> {
    if count > MAX_ATTACHMENTS {
        return Err(ClientError::TooManyPhotos {
            count,
            max: MAX_ATTACHMENTS,
        });
    }
    Ok(())
}

/// Guess the MIME type of a photo from its file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}
