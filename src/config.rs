use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WindowSize;

/// Config file looked up in the working directory when no path is given.
pub const LOCAL_CONFIG_FILE: &str = "stylescope.toml";

/// Selects production vs development launch mode when `[browser].mode` is unset.
pub const ENV_MODE_VAR: &str = "STYLESCOPE_ENV";

/// Chromium executable used when `[browser].executable` is unset.
pub const ENV_CHROMIUM_PATH_VAR: &str = "STYLESCOPE_CHROMIUM_PATH";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub browser: BrowserSettings,
    pub image: ImageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            max_body_bytes: 25 * 1024 * 1024,
        }
    }
}

/// How the headless browser binary is located and launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Development: auto-detected local Chrome/Chromium.
    Local,
    /// Production: a bundled Chromium at a known path.
    Packaged,
}

impl LaunchMode {
    /// Mode implied by the value of [`ENV_MODE_VAR`].
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") => LaunchMode::Packaged,
            _ => LaunchMode::Local,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub mode: Option<LaunchMode>,
    pub executable: Option<PathBuf>,
    pub headless: bool,
    #[serde(with = "humantime_serde")]
    pub navigation_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub launch_timeout: Duration,
    pub user_agent: String,
    pub ignore_https_errors: bool,
    pub max_concurrent_sessions: usize,
    pub viewport: WindowSize,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            mode: None,
            executable: None,
            headless: true,
            navigation_timeout: Duration::from_secs(60),
            launch_timeout: Duration::from_secs(20),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ignore_https_errors: true,
            max_concurrent_sessions: 2,
            viewport: WindowSize::DESKTOP,
        }
    }
}

impl BrowserSettings {
    pub fn resolved_mode(&self) -> LaunchMode {
        self.mode.unwrap_or_else(|| {
            LaunchMode::from_env_value(std::env::var(ENV_MODE_VAR).ok().as_deref())
        })
    }

    pub fn resolved_executable(&self) -> Option<PathBuf> {
        self.executable.clone().or_else(|| {
            std::env::var_os(ENV_CHROMIUM_PATH_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Visit every Nth pixel.
    pub sample_step: usize,
    /// Channels are rounded to the nearest multiple of this value.
    pub quantize_step: u8,
    pub max_colors: usize,
    pub ocr_language: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            sample_step: 20,
            quantize_step: 10,
            max_colors: 8,
            ocr_language: "eng".to_string(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, `./stylescope.toml`, the central
    /// config, or fall back to defaults, in that order.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(local);
        }
        if let Some(central) = Self::central_config_path().filter(|p| p.is_file()) {
            return Self::from_file(&central);
        }
        Ok(Config::default())
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// `$HOME/.config/stylescope/config.toml`
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(|home| {
                PathBuf::from(home)
                    .join(".config")
                    .join("stylescope")
                    .join("config.toml")
            })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.bind.trim().is_empty() {
            return Err("server.bind must not be empty".to_string());
        }
        if self.server.max_body_bytes == 0 {
            return Err("server.max_body_bytes must be positive".to_string());
        }
        if self.browser.navigation_timeout.is_zero() {
            return Err("browser.navigation_timeout must be positive".to_string());
        }
        if self.image.sample_step == 0 {
            return Err("image.sample_step must be positive".to_string());
        }
        if self.image.quantize_step == 0 {
            return Err("image.quantize_step must be positive".to_string());
        }
        Ok(())
    }
}
