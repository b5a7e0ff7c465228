//! Configuration management for Key Highlight
//!
//! Settings are loaded from and saved to a platform-specific config file.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/key-highlight/config.toml` |
//! | macOS | `~/Library/Application Support/key-highlight/config.toml` |
//! | Windows | `%APPDATA%\key-highlight\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use key_highlight::Config;
//!
//! let mut config = Config::load().unwrap_or_default();
//! config.reveal.reveal_delay_ms = 1500;
//! config.save().expect("Failed to save config");
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const APP_DIR: &str = "key-highlight";

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Directory holding the config file (and the log file), created on demand
pub fn app_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = config_dir.join(APP_DIR);

    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }

    Ok(app_dir)
}

/// Returns the path to the config file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dir()?.join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Next-key highlighting
    #[serde(default)]
    pub highlight: HighlightConfig,
    /// Progressive reveal drill
    #[serde(default)]
    pub reveal: RevealConfig,
    /// Practice material
    #[serde(default)]
    pub drill: DrillConfig,
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Next-key highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Require the exact case of the target text
    pub case_sensitive: bool,
    /// How long a pressed key stays lit, in ms
    pub press_feedback_ms: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            press_feedback_ms: 200,
        }
    }
}

impl HighlightConfig {
    pub fn press_feedback(&self) -> Duration {
        Duration::from_millis(self.press_feedback_ms)
    }
}

/// Progressive reveal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay between reveals, in ms
    pub reveal_delay_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 1000,
        }
    }
}

impl RevealConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

/// Practice material
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    /// Text for the letter drill
    pub text: String,
    /// Words for the sequence and reveal drills
    pub words: Vec<String>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            text: "the cat sat on the mat".to_string(),
            words: ["cat", "dog", "sun", "fish", "jump", "kite"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Refresh rate for UI updates (in Hz)
    pub refresh_rate_hz: u32,
    /// Color theme (dark/light)
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: 30,
            theme: Theme::Dark,
        }
    }
}

/// Color theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get UI refresh interval as Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.ui.refresh_rate_hz.max(1) as u64)
    }
}
