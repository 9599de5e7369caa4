//! Decoding of uploaded payloads.
//!
//! Browsers submit files as data URIs (`data:image/png;base64,...`). The CLI
//! also accepts local file paths, so [`read_input`] handles both.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageError};
use thiserror::Error;

const BASE64_MARKER: &str = "base64,";

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Payload is empty")]
    Empty,
    #[error("Payload is not valid base64: {0}")]
    Base64(String),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Failed to read input file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Image(#[from] ImageError),
}

/// Returns the base64 section of a data URI, or the input unchanged when no
/// `base64,` marker is present.
pub fn strip_data_uri(input: &str) -> &str {
    match input.split_once(BASE64_MARKER) {
        Some((_, data)) => data,
        None => input,
    }
}

/// Decode a data URI or bare base64 string into raw bytes.
pub fn decode_payload(input: &str) -> Result<Vec<u8>, PayloadError> {
    let data: String = strip_data_uri(input.trim())
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if data.is_empty() {
        return Err(PayloadError::Empty);
    }
    let bytes = STANDARD
        .decode(data.as_bytes())
        .map_err(|e| PayloadError::Base64(e.to_string()))?;
    if bytes.is_empty() {
        return Err(PayloadError::Empty);
    }
    Ok(bytes)
}

/// Resolve a CLI input value: data URI, existing file path, or bare base64.
pub fn read_input(value: &str) -> Result<Vec<u8>, PayloadError> {
    let trimmed = value.trim();
    if trimmed.starts_with("data:") {
        return decode_payload(trimmed);
    }

    let path = Path::new(trimmed);
    if path.is_file() {
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(PayloadError::Empty);
        }
        return Ok(bytes);
    }

    // '.' never appears in base64, so this can only have been meant as a path.
    if trimmed.contains('.') {
        return Err(PayloadError::NotFound(path.display().to_string()));
    }

    decode_payload(trimmed)
}

pub fn load_image(bytes: &[u8]) -> Result<DynamicImage, PayloadError> {
    Ok(image::load_from_memory(bytes)?)
}
