use std::path::{Path, PathBuf};
use std::time::Duration;

use stylescope_lib::{Config, LaunchMode, ScanError, WindowSize};

/// Flags that override config values when present.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub bind: Option<String>,
    pub nav_timeout: Option<u64>,
    pub viewport: Option<WindowSize>,
    pub browser_mode: Option<LaunchMode>,
    pub chromium: Option<PathBuf>,
}

/// Merge CLI overrides into the loaded config, preferring CLI when set.
pub fn apply_overrides(mut config: Config, overrides: Overrides) -> Config {
    if let Some(bind) = overrides.bind {
        config.server.bind = bind;
    }
    if let Some(secs) = overrides.nav_timeout {
        config.browser.navigation_timeout = Duration::from_secs(secs);
    }
    if let Some(viewport) = overrides.viewport {
        config.browser.viewport = viewport;
    }
    if let Some(mode) = overrides.browser_mode {
        config.browser.mode = Some(mode);
    }
    if let Some(path) = overrides.chromium {
        config.browser.executable = Some(path);
    }
    config
}

/// Load config from a TOML file, local or central config, or return defaults.
/// Priority: explicit path > ./stylescope.toml > ~/.config/stylescope/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, ScanError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        ScanError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    validate(&cfg, path)?;
    Ok(cfg)
}

/// Re-check a config after overrides were applied.
pub fn validate(cfg: &Config, path: Option<&Path>) -> Result<(), ScanError> {
    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        ScanError::Config(prefix)
    })
}

/// Format effective config as a single-line string.
pub fn format_effective_config(config: &Config, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let browser = &config.browser;
    format!(
        "Effective config [{source}]: bind={}, body-limit={}B, browser: mode={:?}, executable={}, viewport={}, nav={}s, launch={}s, sessions={}, palette: step={}, quantize={}, colors={}",
        config.server.bind,
        config.server.max_body_bytes,
        browser.resolved_mode(),
        browser
            .resolved_executable()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "auto".to_string()),
        browser.viewport,
        browser.navigation_timeout.as_secs(),
        browser.launch_timeout.as_secs(),
        browser.max_concurrent_sessions,
        config.image.sample_step,
        config.image.quantize_step,
        config.image.max_colors,
    )
}
