//! Image analysis: quantized color histogram plus an OCR presence check.
//!
//! Fonts cannot be recovered from pixels, so typography is a fixed
//! placeholder record.

use image::DynamicImage;
use palette::Srgb;
use tracing::debug;

use super::tally::FrequencyTally;
use crate::config::ImageConfig;
use crate::image_loader::{decode_payload, load_image};
use crate::ocr::{self, OcrError, OcrOptions};
use crate::types::{AnalysisResult, TypographyStyle};
use crate::{Result, ScanError};

/// Pixels below this alpha are skipped.
const MIN_ALPHA: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteOptions {
    pub sample_step: usize,
    pub quantize_step: u8,
    pub max_colors: usize,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self::from(&ImageConfig::default())
    }
}

impl From<&ImageConfig> for PaletteOptions {
    fn from(config: &ImageConfig) -> Self {
        Self {
            sample_step: config.sample_step,
            quantize_step: config.quantize_step,
            max_colors: config.max_colors,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageAnalyzer {
    pub palette: PaletteOptions,
    pub ocr: OcrOptions,
}

impl ImageAnalyzer {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            palette: PaletteOptions::from(config),
            ocr: OcrOptions {
                language: config.ocr_language.clone(),
            },
        }
    }

    /// Analyze a data-URI or base64 payload.
    pub async fn analyze_payload(&self, payload: String) -> Result<AnalysisResult> {
        let bytes = decode_payload(&payload)?;
        self.analyze_bytes(bytes).await
    }

    /// Analyze encoded image bytes on the blocking pool.
    pub async fn analyze_bytes(&self, bytes: Vec<u8>) -> Result<AnalysisResult> {
        let analyzer = self.clone();
        tokio::task::spawn_blocking(move || analyzer.analyze_blocking(&bytes))
            .await
            .map_err(|e| ScanError::Unknown(format!("image analysis task failed: {}", e)))?
    }

    fn analyze_blocking(&self, bytes: &[u8]) -> Result<AnalysisResult> {
        match ocr::recognize_text(bytes, &self.ocr) {
            Ok(text) => debug!(chars = text.trim().chars().count(), "OCR finished"),
            Err(OcrError::NotAvailable) => debug!("OCR not compiled in; skipping text check"),
            Err(err) => return Err(err.into()),
        }

        let img = load_image(bytes)?;
        Ok(AnalysisResult {
            typography: vec![placeholder_typography()],
            colors: dominant_colors(&img, &self.palette),
        })
    }
}

pub fn placeholder_typography() -> TypographyStyle {
    TypographyStyle {
        element: "Detected Text".to_string(),
        font_family: "Unknown (Image Source)".to_string(),
        font_weight: "Regular".to_string(),
        font_size: "Varied".to_string(),
        line_height: "Normal".to_string(),
        letter_spacing: "Normal".to_string(),
        text_transform: "None".to_string(),
        color: "N/A".to_string(),
        background_color: "N/A".to_string(),
    }
}

/// Most frequent quantized colors as `#RRGGBB`, most frequent first.
///
/// Pixels are visited in row-major order, every `sample_step`-th one.
pub fn dominant_colors(img: &DynamicImage, options: &PaletteOptions) -> Vec<String> {
    let rgba = img.to_rgba8();
    let mut buckets: FrequencyTally<[u8; 3]> = FrequencyTally::new();

    for pixel in rgba
        .as_raw()
        .chunks_exact(4)
        .step_by(options.sample_step.max(1))
    {
        if pixel[3] < MIN_ALPHA {
            continue;
        }
        buckets.add([
            quantize(pixel[0], options.quantize_step),
            quantize(pixel[1], options.quantize_step),
            quantize(pixel[2], options.quantize_step),
        ]);
    }

    buckets
        .top(options.max_colors)
        .into_iter()
        .map(|[r, g, b]| to_hex(Srgb::new(r, g, b)))
        .collect()
}

/// Round to the nearest multiple of `step`, clamped to the channel range.
fn quantize(channel: u8, step: u8) -> u8 {
    let step = f32::from(step.max(1));
    ((f32::from(channel) / step).round() * step).min(255.0) as u8
}

fn to_hex(color: Srgb<u8>) -> String {
    format!(
        "#{:02X}{:02X}{:02X}",
        color.red, color.green, color.blue
    )
}
