//! Browser manager for headless page sampling.
//!
//! Every request gets its own browser process and page. `BrowserSession`
//! closes the browser on every exit path; if a session is dropped without
//! `close()`, the CDP handler is aborted and the child process is killed on
//! drop.
//!
//! Navigation is complete once the main frame fires `DOMContentLoaded`.
//! Images, fonts and frames that are still loading do not hold it up.

use crate::config::{BrowserSettings, LaunchMode};
use crate::types::PageSample;
use crate::{Result, ScanError};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{EventDomContentEventFired, NavigateParams};
use chromiumoxide::handler::viewport::Viewport as CdpViewport;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use url::Url;

use super::script::{
    map_launch_error, map_navigation_error, navigation_timeout_error, SAMPLE_PAGE_SCRIPT,
};
use super::window::WindowSize;

/// Default timeout for page navigation.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for the browser process to expose its CDP endpoint.
pub const DEFAULT_LAUNCH_TIMEOUT: Duration = Duration::from_secs(20);

const LOCAL_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
];

/// Flags for a bundled Chromium in a constrained (serverless/container) host.
const PACKAGED_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--single-process",
    "--no-zygote",
];

/// Configuration options for browser sessions.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Local (auto-detected binary) or packaged (explicit binary).
    pub mode: LaunchMode,
    /// Browser binary; required in packaged mode.
    pub executable: Option<PathBuf>,
    /// Whether to run in headless mode.
    pub headless: bool,
    /// Window and emulated viewport size.
    pub viewport: WindowSize,
    /// User agent reported to the site.
    pub user_agent: String,
    /// Timeout for page navigation.
    pub navigation_timeout: Duration,
    /// Timeout for the browser to come up.
    pub launch_timeout: Duration,
    /// Accept invalid TLS certificates (local mode only).
    pub ignore_https_errors: bool,
    /// Maximum number of concurrent browser sessions.
    pub max_concurrent_sessions: usize,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self::from(&BrowserSettings::default())
    }
}

impl From<&BrowserSettings> for BrowserOptions {
    fn from(settings: &BrowserSettings) -> Self {
        Self {
            mode: settings.resolved_mode(),
            executable: settings.resolved_executable(),
            headless: settings.headless,
            viewport: settings.viewport,
            user_agent: settings.user_agent.clone(),
            navigation_timeout: settings.navigation_timeout,
            launch_timeout: settings.launch_timeout,
            ignore_https_errors: settings.ignore_https_errors,
            max_concurrent_sessions: settings.max_concurrent_sessions,
        }
    }
}

impl BrowserOptions {
    /// Command-line flags passed to the browser for the configured mode.
    pub fn launch_args(&self) -> Vec<String> {
        match self.mode {
            LaunchMode::Local => {
                let mut args: Vec<String> = LOCAL_ARGS.iter().map(|a| a.to_string()).collect();
                args.push(self.viewport.launch_arg());
                if self.ignore_https_errors {
                    args.push("--ignore-certificate-errors".to_string());
                }
                args
            }
            LaunchMode::Packaged => PACKAGED_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .args(self.launch_args())
            .viewport(CdpViewport::from(self.viewport))
            .request_timeout(self.navigation_timeout)
            .launch_timeout(self.launch_timeout);

        if !self.headless {
            builder = builder.with_head();
        } else if self.mode == LaunchMode::Packaged {
            builder = builder.new_headless_mode();
        }

        match (self.mode, &self.executable) {
            (_, Some(path)) => builder = builder.chrome_executable(path),
            (LaunchMode::Packaged, None) => {
                return Err(ScanError::Config(
                    "packaged browser mode requires an executable path".to_string(),
                ))
            }
            (LaunchMode::Local, None) => {}
        }

        builder
            .build()
            .map_err(|e| map_launch_error(&e, self.executable.as_deref()))
    }
}

/// One launched browser with a single page.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    shutdown_grace: Duration,
    closed: bool,
}

impl BrowserSession {
    pub async fn launch(options: &BrowserOptions) -> Result<Self> {
        let config = options.browser_config()?;
        info!(mode = ?options.mode, executable = ?options.executable, "launching headless browser");

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| map_launch_error(&e.to_string(), options.executable.as_deref()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!("browser handler error: {}", err);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(err) => {
                if let Err(close_err) = shutdown(&mut browser, options.launch_timeout).await {
                    warn!("failed to close browser after page error: {}", close_err);
                }
                handler.abort();
                return Err(ScanError::browser(format!("Failed to open page: {}", err)));
            }
        };

        Ok(Self {
            browser,
            handler,
            page,
            shutdown_grace: options.launch_timeout,
            closed: false,
        })
    }

    /// Navigate to `url` and collect raw element measurements.
    pub async fn sample(&self, url: &Url, options: &BrowserOptions) -> Result<PageSample> {
        self.page
            .set_user_agent(SetUserAgentOverrideParams::new(options.user_agent.clone()))
            .await?;

        let started = Instant::now();
        match timeout(options.navigation_timeout, self.navigate(url)).await {
            Ok(outcome) => outcome?,
            Err(_) => return Err(navigation_timeout_error(url.as_str(), options.navigation_timeout)),
        }
        debug!(url = %url, elapsed_ms = started.elapsed().as_millis() as u64, "DOM content loaded");

        let sample: PageSample = self.page.evaluate(SAMPLE_PAGE_SCRIPT).await?.into_value()?;
        debug!(
            elements = sample.elements.len(),
            truncated = sample.truncated,
            "page sampled"
        );
        Ok(sample)
    }

    /// Issue `Page.navigate` and wait for the main frame's `DOMContentLoaded`.
    async fn navigate(&self, url: &Url) -> Result<()> {
        // Subscribe first so a fast page cannot fire before we listen.
        let mut dom_ready = self
            .page
            .event_listener::<EventDomContentEventFired>()
            .await?;

        let response = self
            .page
            .execute(NavigateParams::new(url.as_str()))
            .await
            .map_err(|e| map_navigation_error(url.as_str(), &e.to_string()))?;
        if let Some(error_text) = response.result.error_text.as_deref() {
            return Err(map_navigation_error(url.as_str(), error_text));
        }

        match dom_ready.next().await {
            Some(_) => Ok(()),
            None => Err(ScanError::navigation(format!(
                "Browser went away while loading {}",
                url
            ))),
        }
    }

    /// Close the browser and reap its process.
    pub async fn close(mut self) -> Result<()> {
        self.closed = true;
        let result = shutdown(&mut self.browser, self.shutdown_grace).await;
        self.handler.abort();
        result
    }
}

/// Ask the browser to exit, killing it if it refuses. No step waits longer
/// than `grace`.
async fn shutdown(browser: &mut Browser, grace: Duration) -> Result<()> {
    let closed = match timeout(grace, browser.close()).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(err)) => Err(ScanError::from(err)),
        Err(_) => Err(ScanError::browser(format!(
            "Browser did not close within {}s",
            grace.as_secs()
        ))),
    };

    if closed.is_err() {
        if let Some(Err(err)) = browser.kill().await {
            warn!("failed to kill browser: {}", err);
        }
    }

    if timeout(grace, browser.wait()).await.is_err() {
        warn!("browser process still running {}s after shutdown; killing", grace.as_secs());
        let _ = browser.kill().await;
    }

    closed
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if !self.closed {
            warn!("browser session dropped without close; killing browser");
            self.handler.abort();
        }
    }
}

/// Launches one browser per request, bounded by a semaphore.
#[derive(Debug, Clone)]
pub struct BrowserManager {
    options: BrowserOptions,
    semaphore: Arc<Semaphore>,
}

impl BrowserManager {
    pub fn new(options: BrowserOptions) -> Self {
        let permits = options.max_concurrent_sessions.max(1);
        Self {
            options,
            semaphore: Arc::new(Semaphore::new(permits)),
        }
    }

    /// Launch, navigate, measure, and always close.
    pub async fn sample_page(&self, url: &Url) -> Result<PageSample> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ScanError::browser("Browser manager unavailable"))?;

        let session = BrowserSession::launch(&self.options).await?;
        let outcome = session.sample(url, &self.options).await;

        if let Err(err) = session.close().await {
            warn!("failed to close browser: {}", err);
        }

        outcome
    }
}
