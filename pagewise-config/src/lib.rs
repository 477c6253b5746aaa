//! Status screen configuration loading
//!
//! Reads a `[screen]` table from TOML. Every key is optional and falls back
//! to the default configuration; the result is validated before it is
//! returned, so a loaded configuration always builds a renderer.
//!
//! ```toml
//! [screen]
//! hotends = 2
//! page_rows = 16
//! progress = "remaining_estimate"
//! ```

use core::fmt;

use serde::Deserialize;

use pagewise_core::config::{ConfigError, StatusScreenConfig};

/// Configuration loading errors
#[derive(Debug)]
pub enum LoadError {
    /// Input is not UTF-8
    InvalidUtf8,
    /// TOML syntax error or a key with the wrong shape
    Toml(toml::de::Error),
    /// Parsed values the renderer cannot use
    Invalid(ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::InvalidUtf8 => write!(f, "configuration is not valid UTF-8"),
            LoadError::Toml(e) => write!(f, "configuration parse error: {e}"),
            LoadError::Invalid(e) => write!(f, "invalid configuration: {}", describe(e)),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Toml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Toml(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

fn describe(e: &ConfigError) -> &'static str {
    match e {
        ConfigError::InvalidGeometry => "display size outside the supported range",
        ConfigError::InvalidPageRows => "page_rows must be between 1 and the band buffer height",
        ConfigError::StatusWidthOutOfRange => "status_width outside the status field range",
        ConfigError::TooManyHotends => "too many hotends for the status header",
        ConfigError::InvalidFanFrames => "fan_frames outside the supported range",
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    screen: StatusScreenConfig,
}

/// Load and validate a configuration from TOML text
///
/// Empty input yields the default configuration.
pub fn load_str(input: &str) -> Result<StatusScreenConfig, LoadError> {
    let file: ConfigFile = toml::from_str(input)?;
    file.screen.validate()?;
    Ok(file.screen)
}

/// Load and validate a configuration from raw bytes
pub fn load_bytes(input: &[u8]) -> Result<StatusScreenConfig, LoadError> {
    let text = core::str::from_utf8(input).map_err(|_| LoadError::InvalidUtf8)?;
    load_str(text)
}
