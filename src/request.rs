//! Validation of `POST /api/analyze` bodies.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::types::AnalysisKind;

/// Raw request body as submitted by the client.
///
/// For `image` and `pdf`, `url` carries the file as a data URI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeBody {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
}

/// A request that passed validation and can be handed to an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Website(Url),
    Image(String),
    Pdf(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Invalid request parameters")]
    InvalidParameters,
    #[error("Invalid URL. Must start with http:// or https://")]
    InvalidUrl,
}

impl AnalysisRequest {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisRequest::Website(_) => AnalysisKind::Website,
            AnalysisRequest::Image(_) => AnalysisKind::Image,
            AnalysisRequest::Pdf(_) => AnalysisKind::Pdf,
        }
    }

    /// Validate a kind and input value.
    pub fn parse(kind: Option<&str>, input: Option<&str>) -> Result<Self, RequestError> {
        let input = input
            .filter(|v| !v.is_empty())
            .ok_or(RequestError::InvalidParameters)?;
        let kind: AnalysisKind = kind
            .and_then(|k| k.parse().ok())
            .ok_or(RequestError::InvalidParameters)?;

        match kind {
            AnalysisKind::Website => parse_website_url(input).map(AnalysisRequest::Website),
            AnalysisKind::Image => Ok(AnalysisRequest::Image(input.to_string())),
            AnalysisKind::Pdf => Ok(AnalysisRequest::Pdf(input.to_string())),
        }
    }
}

impl AnalyzeBody {
    pub fn validate(self) -> Result<AnalysisRequest, RequestError> {
        AnalysisRequest::parse(self.kind.as_deref(), self.url.as_deref())
    }
}

fn parse_website_url(value: &str) -> Result<Url, RequestError> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(RequestError::InvalidUrl);
    }
    Url::parse(value).map_err(|_| RequestError::InvalidUrl)
}

/// First `max_chars` characters of an input, for logging.
pub fn preview(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
