//! Stylescope Library
//!
//! Extracts a design-style summary (typography records and dominant colors)
//! from a live website, a raster image, or a PDF.
//!
//! # Module Overview
//!
//! - [`browser`] - Headless Chromium sessions and the in-page measurement script
//! - [`analysis`] - Website aggregation, image palette, PDF parse check
//! - [`request`] - Validation of `{ type, url }` requests
//! - [`server`] - The `POST /api/analyze` HTTP surface
//! - [`config`] - Configuration file support
//! - [`types`] - Core data types and structures
//! - [`output`] - JSON error bodies
//!
//! # Example
//!
//! ```no_run
//! use stylescope_lib::{AnalysisRequest, Analyzer, Config};
//!
//! # async fn example() -> stylescope_lib::Result<()> {
//! let analyzer = Analyzer::from_config(&Config::default());
//! let request = AnalysisRequest::parse(Some("website"), Some("https://example.com"))
//!     .expect("valid request");
//! let result = analyzer.run(request).await?;
//! println!("{} styles, {} colors", result.typography.len(), result.colors.len());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod browser;
pub mod config;
pub mod error;
pub mod image_loader;
pub mod ocr;
pub mod output;
pub mod request;
pub mod server;
pub mod types;

pub use analysis::{AnalysisBackend, Analyzer, ImageAnalyzer, PaletteOptions};
pub use browser::{
    BrowserManager, BrowserOptions, BrowserSession, DEFAULT_LAUNCH_TIMEOUT,
    DEFAULT_NAVIGATION_TIMEOUT, MAX_VISITED_NODES, WindowSize, WindowSizeError,
};
pub use config::{Config, LaunchMode};
pub use error::{ErrorCategory, ErrorPayload, Result, ScanError};
pub use image_loader::{decode_payload, load_image, read_input, PayloadError};
pub use output::{CliErrorOutput, ErrorResponse};
pub use request::{AnalysisRequest, AnalyzeBody, RequestError};
pub use server::{router, serve, shutdown_signal, ANALYZE_ROUTE};
pub use types::{AnalysisKind, AnalysisResult, PageSample, RawElement, TypographyStyle};
