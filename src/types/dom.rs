//! Raw page measurement types.
//!
//! These mirror the JSON produced by the in-page instrumentation script and
//! are consumed by the website aggregator.

use serde::{Deserialize, Serialize};

/// Measurements gathered from one page in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSample {
    /// One entry per visited element
    #[serde(default)]
    pub elements: Vec<RawElement>,
    /// Whether the walk stopped at the node cap before reaching the end
    #[serde(default)]
    pub truncated: bool,
}

/// Computed-style snapshot of a single element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawElement {
    /// Lowercase tag name
    pub tag: String,
    /// `textContent` is non-empty after trimming
    pub has_text: bool,
    pub display: String,
    pub visibility: String,
    pub font_family: String,
    pub font_weight: String,
    pub font_size: String,
    pub line_height: String,
    pub letter_spacing: String,
    pub text_transform: String,
    pub color: String,
    pub background_color: String,
}

impl RawElement {
    pub fn is_visible(&self) -> bool {
        self.display != "none" && self.visibility != "hidden"
    }
}
