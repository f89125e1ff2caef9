// Source settings
// Loaded from ~/.config/colab/colab.toml, then overridden by COLAB_* variables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "COLAB_DB_PATH";
pub const ENV_SHEET_URL: &str = "COLAB_SHEET_URL";
pub const ENV_SHEET_TIMEOUT: &str = "COLAB_SHEET_TIMEOUT_SECS";
pub const ENV_LAYOUT: &str = "COLAB_LAYOUT";

#[derive(Debug)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    Read { path: PathBuf, message: String },
    /// The settings file is not valid TOML for `Settings`.
    Parse { path: PathBuf, message: String },
    /// An environment override has an unusable value.
    InvalidEnv { var: &'static str, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read settings {}: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid settings {}: {message}", path.display())
            }
            Self::InvalidEnv { var, value } => write!(f, "invalid value for {var}: '{value}'"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Where the employee database lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("colaboradores.db"),
        }
    }
}

/// Where and how to fetch the published spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSettings {
    /// Default location when a command gets none.
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub sheet: SheetSettings,
    /// Optional sheet layout TOML; the built-in layout otherwise.
    pub layout: Option<PathBuf>,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("colab");
        config_dir.join("colab.toml")
    }

    /// Settings from `explicit` (must exist) or the default path (may be
    /// missing), with process environment overrides applied.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_env(|var| std::env::var(var).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Override fields from variables found by `lookup`. Empty values are ignored.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), SettingsError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(ENV_DB_PATH) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(url) = get(ENV_SHEET_URL) {
            self.sheet.url = Some(url);
        }
        if let Some(secs) = get(ENV_SHEET_TIMEOUT) {
            self.sheet.timeout_secs = secs
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(SettingsError::InvalidEnv { var: ENV_SHEET_TIMEOUT, value: secs })?;
        }
        if let Some(layout) = get(ENV_LAYOUT) {
            self.layout = Some(PathBuf::from(layout));
        }
        Ok(())
    }

    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
