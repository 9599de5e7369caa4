use crate::image_loader::PayloadError;
use crate::ocr::OcrError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid payload: {0}")]
    Payload(String),

    #[error("{0}")]
    Pdf(String),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl ScanError {
    pub fn browser(message: impl Into<String>) -> Self {
        ScanError::Browser(message.into())
    }

    pub fn navigation(message: impl Into<String>) -> Self {
        ScanError::Navigation(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            ScanError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            ScanError::Browser(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("executable") || lower.contains("no such file") {
                    ErrorPayload::new(
                        ErrorCategory::Browser,
                        msg.to_string(),
                        "Install Chromium/Chrome or point [browser].executable (or STYLESCOPE_CHROMIUM_PATH) at a browser binary.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Browser,
                        msg.to_string(),
                        "Check that the browser can start headless in this environment (sandbox, /dev/shm, GPU flags).",
                    )
                }
            }
            ScanError::Navigation(msg) => {
                if msg.to_ascii_lowercase().contains("timed out") {
                    ErrorPayload::new(
                        ErrorCategory::Navigation,
                        msg.to_string(),
                        "Try increasing --nav-timeout or ensure the page finishes loading.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Navigation,
                        msg.to_string(),
                        "Verify the URL is reachable from this host.",
                    )
                }
            }
            ScanError::Image(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Verify the image format (png, jpeg, gif, webp, bmp) and that the upload is not truncated.",
            ),
            ScanError::Payload(msg) => ErrorPayload::new(
                ErrorCategory::Input,
                msg.to_string(),
                "Send the file as a base64 data URI (data:<mime>;base64,...).",
            ),
            ScanError::Pdf(msg) => ErrorPayload::new(
                ErrorCategory::Input,
                msg.to_string(),
                "Verify the upload is a readable, unencrypted PDF.",
            ),
            ScanError::Ocr(e) => ErrorPayload::new(
                ErrorCategory::Ocr,
                e.to_string(),
                "Install Tesseract and its language data, or set TESSDATA_PREFIX.",
            ),
            ScanError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Browser,
                e.to_string(),
                "The page returned unexpected measurement data; run with --verbose for details.",
            ),
            ScanError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("packaged") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set [browser].executable or STYLESCOPE_CHROMIUM_PATH when running in packaged mode.",
                    )
                } else if lower.contains("bind") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a HOST:PORT bind address (e.g., 127.0.0.1:3000) that is free.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags and the config file (stylescope.toml).",
                    )
                }
            }
            ScanError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

impl From<PayloadError> for ScanError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Image(e) => ScanError::Image(e),
            PayloadError::NotFound(path) => ScanError::Config(format!("File not found: {}", path)),
            PayloadError::Read(e) => ScanError::Io(e),
            other => ScanError::Payload(other.to_string()),
        }
    }
}

impl From<chromiumoxide::error::CdpError> for ScanError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ScanError::Browser(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Browser,
    Navigation,
    Input,
    Ocr,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
