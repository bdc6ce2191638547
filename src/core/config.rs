//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.slides/config.toml` and is optional. Unlike the theme,
//! nothing here is required to present a deck.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt::{self, Write};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::state::Metadata;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SlidesConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneralConfig {
    pub author: Option<String>,
    pub date_format: Option<String>,
    pub theme: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_AUTHOR: &str = "me";
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";
/// Looked up in the working directory when no theme is named anywhere.
pub const DEFAULT_THEME_FILE: &str = "theme.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Which theme to present with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeChoice {
    /// Named on the CLI, in the env, or in the config file. Must load.
    Explicit(PathBuf),
    /// `./theme.json` exists. Must load.
    Local(PathBuf),
    /// Nothing named and no local theme file.
    Builtin,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub document: PathBuf,
    pub author: String,
    pub date_format: String,
    pub theme: ThemeChoice,
}

impl ResolvedConfig {
    /// Capture the status bar metadata. Call once; the date is taken now.
    pub fn metadata(&self) -> Metadata {
        let now = chrono::Local::now();
        let mut date = String::new();
        if write!(date, "{}", now.format(&self.date_format)).is_err() {
            warn!("Invalid date format {:?}, using {}", self.date_format, DEFAULT_DATE_FORMAT);
            date = now.format(DEFAULT_DATE_FORMAT).to_string();
        }
        Metadata {
            author: self.author.clone(),
            date,
        }
    }
}

/// Values that only come from the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub author: Option<String>,
    pub theme: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.slides`, where the config and log files live.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".slides"))
}

/// Returns the path to `~/.slides/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.slides/config.toml`.
///
/// A missing file (or home directory) yields `SlidesConfig::default()`.
/// A file that exists but is malformed returns `ConfigError::Parse`.
pub fn load_config() -> Result<SlidesConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(SlidesConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<SlidesConfig, ConfigError> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(SlidesConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SlidesConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SlidesConfig, document: PathBuf, cli: &CliOverrides) -> ResolvedConfig {
    // Author: CLI → env → config → login name → default
    let author = cli
        .author
        .clone()
        .or_else(|| std::env::var("SLIDES_AUTHOR").ok())
        .or_else(|| config.general.author.clone())
        .or_else(login_name)
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    let date_format = config
        .general
        .date_format
        .clone()
        .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());

    // Theme: CLI → env → config → ./theme.json → builtin
    let named = cli
        .theme
        .clone()
        .or_else(|| std::env::var("SLIDES_THEME").ok().map(PathBuf::from))
        .or_else(|| config.general.theme.as_ref().map(PathBuf::from));
    let theme = match named {
        Some(path) => ThemeChoice::Explicit(path),
        None => {
            let local = PathBuf::from(DEFAULT_THEME_FILE);
            if local.is_file() {
                ThemeChoice::Local(local)
            } else {
                ThemeChoice::Builtin
            }
        }
    };

    ResolvedConfig {
        document,
        author,
        date_format,
        theme,
    }
}

fn login_name() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|name| !name.trim().is_empty())
}
