//! Website analysis: turn raw page measurements into a ranked summary.
//!
//! [`aggregate`] is a single linear pass with no color-space awareness:
//! near-identical colors can both appear, and the node cap biases results
//! towards content early in the document.

use std::collections::HashSet;

use tracing::info;
use url::Url;

use super::tally::FrequencyTally;
use crate::browser::{BrowserManager, MAX_VISITED_NODES};
use crate::types::{AnalysisResult, PageSample, RawElement, TypographyStyle};
use crate::Result;

pub const MAX_TYPOGRAPHY: usize = 8;
pub const MAX_COLORS: usize = 10;

/// Tags that always qualify, in output order.
pub const PRIORITY_TAGS: [&str; 6] = ["h1", "h2", "h3", "p", "a", "button"];

const UNLISTED_RANK: usize = 99;

/// Sizes above this many pixels qualify regardless of tag.
const MIN_PROMINENT_SIZE: i64 = 14;

/// Sample `url` in a fresh browser and aggregate the measurements.
pub async fn analyze_website(browser: &BrowserManager, url: &Url) -> Result<AnalysisResult> {
    let sample = browser.sample_page(url).await?;
    if sample.truncated {
        info!(
            url = %url,
            "page walk stopped at {} elements; later content is not represented",
            MAX_VISITED_NODES
        );
    }
    Ok(aggregate(&sample))
}

pub fn aggregate(sample: &PageSample) -> AnalysisResult {
    let mut signatures = HashSet::new();
    let mut typography = Vec::new();
    let mut colors = FrequencyTally::new();

    for element in sample.elements.iter().take(MAX_VISITED_NODES) {
        if element.is_visible() && element.has_text && signatures.insert(signature(element)) {
            typography.push(typography_style(element));
        }

        for value in [&element.color, &element.background_color] {
            if counts_as_color(value) {
                colors.add(value.clone());
            }
        }
    }

    typography.retain(is_prominent);
    typography.sort_by_key(|style| tag_rank(&style.element));
    typography.truncate(MAX_TYPOGRAPHY);

    AnalysisResult {
        typography,
        colors: colors.top(MAX_COLORS),
    }
}

fn signature(element: &RawElement) -> String {
    format!(
        "{}-{}-{}",
        element.font_family, element.font_weight, element.font_size
    )
}

fn typography_style(element: &RawElement) -> TypographyStyle {
    TypographyStyle {
        element: element.tag.clone(),
        font_family: element.font_family.clone(),
        font_weight: element.font_weight.clone(),
        font_size: element.font_size.clone(),
        line_height: element.line_height.clone(),
        letter_spacing: element.letter_spacing.clone(),
        text_transform: element.text_transform.clone(),
        color: element.color.clone(),
        background_color: element.background_color.clone(),
    }
}

fn counts_as_color(value: &str) -> bool {
    !value.is_empty() && !is_fully_transparent(value)
}

/// `transparent`, or a functional color whose alpha is zero:
/// `rgba(255, 255, 255, 0)`, `rgb(0 0 0 / 0%)`.
fn is_fully_transparent(value: &str) -> bool {
    let value = value.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return true;
    }
    let Some((_, args)) = value.strip_suffix(')').and_then(|v| v.split_once('(')) else {
        return false;
    };
    let alpha = match args.rsplit_once('/') {
        Some((_, alpha)) => alpha,
        None => match args.split(',').collect::<Vec<_>>().as_slice() {
            [_, _, _, alpha] => *alpha,
            _ => return false,
        },
    };
    let alpha = alpha.trim();
    alpha
        .strip_suffix('%')
        .unwrap_or(alpha)
        .parse::<f64>()
        .is_ok_and(|a| a == 0.0)
}

fn tag_rank(tag: &str) -> usize {
    PRIORITY_TAGS
        .iter()
        .position(|t| *t == tag)
        .unwrap_or(UNLISTED_RANK)
}

fn is_prominent(style: &TypographyStyle) -> bool {
    tag_rank(&style.element) != UNLISTED_RANK
        || leading_integer(&style.font_size).is_some_and(|size| size > MIN_PROMINENT_SIZE)
}

/// Integer prefix of a CSS length, as JavaScript's `parseInt` reads it
/// (`"16.5px"` is 16, `"px"` is none).
fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // Every digit run that overflows is far above any threshold we compare against.
    let magnitude: i64 = rest[..digits].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
