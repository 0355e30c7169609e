//! Display helpers for images and server timestamps

use crate::shared::error::SharedError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Prefix turning a base64 payload into an image URL
pub const IMAGE_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Build an image URL from a base64 payload; absent payloads stay absent.
pub fn format_image(image_bytes: Option<&str>) -> Option<String> {
    image_bytes.map(|bytes| format!("{}{}", IMAGE_URL_PREFIX, bytes))
}

/// Decoded image ready for the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Cache key; changes whenever the payload changes
    pub uri: String,
    pub bytes: Arc<[u8]>,
}

/// Decode a base64 payload (with or without the data-URL prefix).
pub fn decode_image(key: &str, payload: &str) -> Result<DecodedImage, SharedError> {
    let raw = payload.strip_prefix(IMAGE_URL_PREFIX).unwrap_or(payload);
    let bytes = STANDARD
        .decode(raw.trim())
        .map_err(|e| SharedError::image(format!("invalid base64 for {}: {}", key, e)))?;
    image_from_bytes(key, bytes)
}

/// Wrap raw image bytes, e.g. a file picked for upload.
pub fn image_from_bytes(key: &str, bytes: Vec<u8>) -> Result<DecodedImage, SharedError> {
    if bytes.is_empty() {
        return Err(SharedError::image(format!("empty image for {}", key)));
    }

    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    Ok(DecodedImage {
        uri: format!("bytes://{}-{:016x}.jpg", key, hasher.finish()),
        bytes: Arc::from(bytes),
    })
}

/// Render a server timestamp `YYYY/MM/DD-HH:MM` as `YYYY/MM/DD at HH:MM`.
///
/// Anything that does not contain a dash is returned as-is.
pub fn when_was_it_published(timestamp: &str) -> String {
    if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(timestamp, "%Y/%m/%d-%H:%M") {
        return parsed.format("%Y/%m/%d at %H:%M").to_string();
    }
    match timestamp.split_once('-') {
        Some((date, time)) => format!("{} at {}", date, time),
        None => timestamp.to_string(),
    }
}
