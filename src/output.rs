use serde::{Deserialize, Serialize};

use crate::error::ErrorPayload;
use crate::request::RequestError;
use crate::types::AnalysisKind;
use crate::ScanError;

/// Error body returned by the HTTP endpoint and printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }

    /// `{ "error": "<Kind> analysis failed", "details": "<message>" }`
    pub fn analysis_failed(kind: AnalysisKind, err: &ScanError) -> Self {
        Self::with_details(kind.failure_label(), err.to_string())
    }
}

impl From<RequestError> for ErrorResponse {
    fn from(err: RequestError) -> Self {
        Self::new(err.to_string())
    }
}

/// CLI error output: the response shape plus category and remediation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliErrorOutput {
    #[serde(flatten)]
    pub response: ErrorResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<ErrorPayload>,
}
