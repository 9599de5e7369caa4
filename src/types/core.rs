//! Core types used throughout the stylescope library.
//!
//! - [`AnalysisKind`] - Input type classification
//! - [`TypographyStyle`] - One extracted text style
//! - [`AnalysisResult`] - Ranked typography plus dominant palette

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of the submitted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// Live web page rendered in a headless browser
    Website,
    /// Raster image delivered as a data URI
    Image,
    /// PDF document delivered as a data URI
    Pdf,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Website => "website",
            AnalysisKind::Image => "image",
            AnalysisKind::Pdf => "pdf",
        }
    }

    /// Label used in the `error` field of failed analysis responses.
    pub fn failure_label(&self) -> &'static str {
        match self {
            AnalysisKind::Website => "Website analysis failed",
            AnalysisKind::Image => "Image analysis failed",
            AnalysisKind::Pdf => "PDF analysis failed",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(AnalysisKind::Website),
            "image" => Ok(AnalysisKind::Image),
            "pdf" => Ok(AnalysisKind::Pdf),
            other => Err(format!("unknown analysis type '{other}'")),
        }
    }
}

/// Typography style properties as reported by the rendering engine.
///
/// Values are kept verbatim (e.g. `"16px"`, `"rgb(0, 0, 0)"`); nothing is
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    pub element: String,
    pub font_family: String,
    pub font_weight: String,
    pub font_size: String,
    pub line_height: String,
    pub letter_spacing: String,
    pub text_transform: String,
    pub color: String,
    pub background_color: String,
}

/// Result returned by every analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub typography: Vec<TypographyStyle>,
    pub colors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_kind_round_trips_wire_names() {
        for kind in [AnalysisKind::Website, AnalysisKind::Image, AnalysisKind::Pdf] {
            assert_eq!(kind.as_str().parse::<AnalysisKind>(), Ok(kind));
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.as_str())
            );
        }
        assert!("Website".parse::<AnalysisKind>().is_err());
        assert!("svg".parse::<AnalysisKind>().is_err());
    }

    #[test]
    fn typography_style_serializes_camel_case() {
        let style = TypographyStyle {
            element: "h1".to_string(),
            font_family: "Inter".to_string(),
            background_color: "rgb(255, 255, 255)".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["element"], "h1");
        assert_eq!(json["fontFamily"], "Inter");
        assert_eq!(json["backgroundColor"], "rgb(255, 255, 255)");
        assert!(json.get("font_family").is_none());
    }
}
