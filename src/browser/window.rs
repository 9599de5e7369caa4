//! Window geometry for the sampling browser.
//!
//! Written as `WIDTHxHEIGHT` everywhere a person types it: the `viewport`
//! key in `[browser]` and the `--viewport` flag.

use chromiumoxide::handler::viewport::Viewport as CdpViewport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected WIDTHxHEIGHT with positive integers (e.g. 1920x1080), got '{0}'")]
pub struct WindowSizeError(String);

/// Size of the browser window, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    /// Desktop-sized window used when nothing else is configured.
    pub const DESKTOP: WindowSize = WindowSize {
        width: 1920,
        height: 1080,
    };

    /// Chromium flag sizing the OS window to match the emulated viewport.
    pub fn launch_arg(self) -> String {
        format!("--window-size={},{}", self.width, self.height)
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::DESKTOP
    }
}

impl From<WindowSize> for CdpViewport {
    fn from(size: WindowSize) -> Self {
        CdpViewport {
            width: size.width,
            height: size.height,
            ..CdpViewport::default()
        }
    }
}

impl FromStr for WindowSize {
    type Err = WindowSizeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || WindowSizeError(raw.to_string());
        let (width, height) = raw.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: NonZeroU32 = width.trim().parse().map_err(|_| invalid())?;
        let height: NonZeroU32 = height.trim().parse().map_err(|_| invalid())?;
        Ok(WindowSize {
            width: width.get(),
            height: height.get(),
        })
    }
}

impl TryFrom<String> for WindowSize {
    type Error = WindowSizeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<WindowSize> for String {
    fn from(size: WindowSize) -> Self {
        size.to_string()
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_value_parses_either_separator_case() {
        let phone: WindowSize = "390x844".parse().unwrap();
        assert_eq!((phone.width, phone.height), (390, 844));
        assert_eq!(" 1280 X 720 ".parse::<WindowSize>().unwrap().to_string(), "1280x720");
    }

    #[test]
    fn degenerate_windows_are_rejected() {
        for raw in ["", "1920", "0x1080", "1920x0", "1920x1080x2", "-1x10", "widex720"] {
            let err = raw.parse::<WindowSize>().unwrap_err();
            assert!(err.to_string().contains(&format!("got '{raw}'")), "{raw}: {err}");
        }
    }

    #[test]
    fn launch_arg_and_cdp_viewport_agree() {
        let size = WindowSize {
            width: 1366,
            height: 768,
        };
        let cdp = CdpViewport::from(size);
        assert_eq!((cdp.width, cdp.height), (1366, 768));
        assert!(!cdp.emulating_mobile);
        assert_eq!(size.launch_arg(), "--window-size=1366,768");
    }

    #[test]
    fn config_value_is_a_string() {
        #[derive(Deserialize, Serialize)]
        struct Browser {
            viewport: WindowSize,
        }

        let parsed: Browser = toml::from_str("viewport = \"800x600\"").unwrap();
        assert_eq!(parsed.viewport.to_string(), "800x600");
        assert!(toml::from_str::<Browser>("viewport = \"800by600\"").is_err());
        assert_eq!(
            toml::to_string(&parsed).unwrap().trim(),
            "viewport = \"800x600\""
        );
    }
}
