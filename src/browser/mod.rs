//! Headless browser automation for website analysis.
//!
//! # Module Structure
//!
//! - [`manager`] - Browser launch, per-request sessions, guaranteed teardown
//! - [`script`] - In-page instrumentation script and CDP error mapping
//! - [`window`] - `WIDTHxHEIGHT` window geometry
//!
//! # Example
//!
//! ```no_run
//! use stylescope_lib::{BrowserManager, BrowserOptions};
//! use url::Url;
//!
//! # async fn example() -> stylescope_lib::Result<()> {
//! let manager = BrowserManager::new(BrowserOptions::default());
//! let url = Url::parse("https://example.com").expect("valid url");
//! let sample = manager.sample_page(&url).await?;
//! println!("visited {} elements", sample.elements.len());
//! # Ok(())
//! # }
//! ```

mod manager;
mod script;
mod window;

pub use manager::{
    BrowserManager, BrowserOptions, BrowserSession, DEFAULT_LAUNCH_TIMEOUT,
    DEFAULT_NAVIGATION_TIMEOUT,
};
pub use script::MAX_VISITED_NODES;
pub use window::{WindowSize, WindowSizeError};
