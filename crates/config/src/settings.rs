// User settings
//
// <config_dir>/vocabdeck/settings.toml. Every field has a default, so a
// partial file (or no file) is valid.
//
//   [deck]
//   name = "Imported Vocabulary"
//
//   [classifier]
//   max_term_words = 10
//
//   [report]
//   max_rejections = 10
//   line_width = 100

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use vocabdeck_classifier::ClassifierConfig;

pub const DEFAULT_DECK_NAME: &str = "Imported Vocabulary";

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Invalid { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::Parse { path, message } => write!(f, "invalid settings in {}: {message}", path.display()),
            Self::Invalid { path, message } => write!(f, "{}: {message}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckSettings {
    /// Deck name used when `--deck` is not given.
    pub name: String,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self { name: DEFAULT_DECK_NAME.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Rejected lines listed in the parsing report before "... and N more".
    pub max_rejections: usize,
    /// Display width for report lines.
    pub line_width: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { max_rejections: 10, line_width: 100 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub deck: DeckSettings,
    pub classifier: ClassifierConfig,
    pub report: ReportSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocabdeck")
            .join("settings.toml")
    }

    /// Load from the default location. A missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = Self::from_toml(&contents).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        settings.validate().map_err(|message| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        })?;
        debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(s: &str) -> Result<Self, String> {
        toml::from_str(s).map_err(|e| e.to_string())
    }

    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.deck.name.trim().is_empty() {
            return Err("deck.name must not be empty".into());
        }
        self.classifier.validate().map_err(|e| e.to_string())?;
        if self.report.line_width < 20 {
            return Err(format!("report.line_width must be at least 20, got {}", self.report.line_width));
        }
        Ok(())
    }
}
