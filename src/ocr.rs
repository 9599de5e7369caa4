//! OCR (Optical Character Recognition) for uploaded images.
//!
//! Uses Tesseract via the `leptess` crate. The recognized text is only used to
//! confirm that an image carries text; fonts cannot be recovered from it.
//!
//! # Feature Flag
//!
//! Requires the `ocr` feature:
//!
//! ```toml
//! [dependencies]
//! stylescope = { version = "0.1", features = ["ocr"] }
//! ```
//!
//! Tesseract and its `tessdata` directory must be installed (or located via
//! `TESSDATA_PREFIX`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine: {0}")]
    InitError(String),
    #[error("Failed to load image for OCR: {0}")]
    ImageLoadError(String),
    #[error("OCR processing failed: {0}")]
    ProcessingError(String),
    #[error("Tesseract not available - install Tesseract OCR or enable the 'ocr' feature")]
    NotAvailable,
}

/// Options for OCR text extraction.
#[derive(Debug, Clone)]
pub struct OcrOptions {
    /// Language code for Tesseract (default: "eng")
    pub language: String,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }
}

/// Recognize text in an encoded image (PNG, JPEG, ...).
#[cfg(feature = "ocr")]
pub fn recognize_text(image_bytes: &[u8], options: &OcrOptions) -> Result<String, OcrError> {
    use leptess::LepTess;

    let mut lt = LepTess::new(None, &options.language)
        .map_err(|e| OcrError::InitError(format!("{:?}", e)))?;

    lt.set_image_from_mem(image_bytes)
        .map_err(|e| OcrError::ImageLoadError(format!("{:?}", e)))?;

    lt.get_utf8_text()
        .map_err(|e| OcrError::ProcessingError(format!("{:?}", e)))
}

/// Stub implementation when OCR feature is disabled.
#[cfg(not(feature = "ocr"))]
pub fn recognize_text(_image_bytes: &[u8], _options: &OcrOptions) -> Result<String, OcrError> {
    Err(OcrError::NotAvailable)
}

/// Check if OCR is available in this build.
#[inline]
pub const fn is_available() -> bool {
    cfg!(feature = "ocr")
}
