//! Analyzers for the three supported input kinds.
//!
//! - [`website`] - Headless-browser DOM walk plus heuristic aggregation
//! - [`image`] - Quantized color histogram, optional OCR
//! - [`pdf`] - Parse check with placeholder typography
//!
//! [`Analyzer`] dispatches a validated [`AnalysisRequest`] to the matching
//! analyzer. The HTTP layer talks to it through [`AnalysisBackend`].

pub mod image;
pub mod pdf;
mod tally;
pub mod website;

use futures::future::BoxFuture;
use tracing::debug;

use crate::browser::{BrowserManager, BrowserOptions};
use crate::request::AnalysisRequest;
use crate::types::AnalysisResult;
use crate::{Config, Result};

pub use self::image::{dominant_colors, ImageAnalyzer, PaletteOptions};
pub use self::pdf::analyze_pdf;
pub use self::tally::FrequencyTally;
pub use self::website::{aggregate, analyze_website, MAX_COLORS, MAX_TYPOGRAPHY, PRIORITY_TAGS};

/// Anything that can serve analysis requests.
pub trait AnalysisBackend: Send + Sync {
    fn analyze(&self, request: AnalysisRequest) -> BoxFuture<'_, Result<AnalysisResult>>;
}

/// Production backend: one browser per website request, blocking pool for
/// image and PDF work.
#[derive(Debug, Clone)]
pub struct Analyzer {
    browser: BrowserManager,
    image: ImageAnalyzer,
}

impl Analyzer {
    pub fn new(browser: BrowserManager, image: ImageAnalyzer) -> Self {
        Self { browser, image }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            BrowserManager::new(BrowserOptions::from(&config.browser)),
            ImageAnalyzer::new(&config.image),
        )
    }

    pub async fn run(&self, request: AnalysisRequest) -> Result<AnalysisResult> {
        debug!(kind = %request.kind(), "dispatching analysis");
        match request {
            AnalysisRequest::Website(url) => analyze_website(&self.browser, &url).await,
            AnalysisRequest::Image(payload) => self.image.analyze_payload(payload).await,
            AnalysisRequest::Pdf(payload) => analyze_pdf(payload).await,
        }
    }
}

impl AnalysisBackend for Analyzer {
    fn analyze(&self, request: AnalysisRequest) -> BoxFuture<'_, Result<AnalysisResult>> {
        Box::pin(self.run(request))
    }
}
