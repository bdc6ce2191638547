//! # Slide Theme
//!
//! Colors and modifiers for rendered markdown, read from a JSON file:
//!
//! ```json
//! {
//!   "text":    { "fg": "white" },
//!   "heading": { "fg": "#ff79c6", "bold": true },
//!   "code":    { "fg": "white", "bg": "darkgray" },
//!   "code_theme": "base16-ocean.dark"
//! }
//! ```
//!
//! Every key is optional. Missing keys keep the built-in value, so a theme
//! file only needs to mention what it changes. Colors accept anything
//! `ratatui::style::Color` parses: names, `#rrggbb`, or a 0-255 index.

use log::info;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::tui::markdown::THEME_SET;

/// Syntect theme used for fenced code when the file doesn't name one.
pub const DEFAULT_CODE_THEME: &str = "base16-ocean.dark";

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub text: Style,
    pub heading: Style,
    pub code: Style,
    pub code_border: Style,
    pub link: Style,
    pub quote: Style,
    pub rule: Style,
    pub list_marker: Style,
    /// Key into syntect's default theme set.
    pub code_theme: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Style::default(),
            heading: Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::White).bg(Color::DarkGray),
            code_border: Style::default().fg(Color::DarkGray),
            link: Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            quote: Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
            rule: Style::default().fg(Color::DarkGray),
            list_marker: Style::default().fg(Color::DarkGray),
            code_theme: DEFAULT_CODE_THEME.to_string(),
        }
    }
}

// ============================================================================
// File format
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    text: Option<StyleSpec>,
    heading: Option<StyleSpec>,
    code: Option<StyleSpec>,
    code_border: Option<StyleSpec>,
    link: Option<StyleSpec>,
    quote: Option<StyleSpec>,
    rule: Option<StyleSpec>,
    list_marker: Option<StyleSpec>,
    code_theme: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleSpec {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
    #[serde(default)]
    faint: bool,
    #[serde(default)]
    crossed_out: bool,
}

impl StyleSpec {
    fn to_style(&self) -> Result<Style, ThemeError> {
        let mut style = Style::default();
        if let Some(fg) = &self.fg {
            style = style.fg(parse_color(fg)?);
        }
        if let Some(bg) = &self.bg {
            style = style.bg(parse_color(bg)?);
        }
        let flags = [
            (self.bold, Modifier::BOLD),
            (self.italic, Modifier::ITALIC),
            (self.underlined, Modifier::UNDERLINED),
            (self.faint, Modifier::DIM),
            (self.crossed_out, Modifier::CROSSED_OUT),
        ];
        for (on, modifier) in flags {
            if on {
                style = style.add_modifier(modifier);
            }
        }
        Ok(style)
    }
}

fn parse_color(value: &str) -> Result<Color, ThemeError> {
    Color::from_str(value).map_err(|_| ThemeError::Color(value.to_string()))
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ThemeError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Color(String),
    UnknownCodeTheme(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::Io { path, source } => {
                write!(f, "theme {}: {source}", path.display())
            }
            ThemeError::Parse { path, source } => {
                write!(f, "theme {}: malformed JSON: {source}", path.display())
            }
            ThemeError::Color(value) => write!(f, "theme: unknown color {value:?}"),
            ThemeError::UnknownCodeTheme(name) => {
                write!(f, "theme: unknown code theme {name:?}")
            }
        }
    }
}

impl std::error::Error for ThemeError {}

// ============================================================================
// Loading
// ============================================================================

impl Theme {
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let contents = fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let theme = Self::from_json(&contents).map_err(|e| match e {
            ThemeError::Parse { source, .. } => ThemeError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!("Loaded theme from {}", path.display());
        Ok(theme)
    }

    /// Parse a theme, layering it over the built-in defaults.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        let file: ThemeFile = serde_json::from_str(json).map_err(|source| ThemeError::Parse {
            path: PathBuf::new(),
            source,
        })?;

        let mut theme = Theme::default();
        let slots = [
            (&file.text, &mut theme.text),
            (&file.heading, &mut theme.heading),
            (&file.code, &mut theme.code),
            (&file.code_border, &mut theme.code_border),
            (&file.link, &mut theme.link),
            (&file.quote, &mut theme.quote),
            (&file.rule, &mut theme.rule),
            (&file.list_marker, &mut theme.list_marker),
        ];
        for (spec, slot) in slots {
            if let Some(spec) = spec {
                *slot = spec.to_style()?;
            }
        }

        if let Some(name) = file.code_theme {
            if !THEME_SET.themes.contains_key(&name) {
                return Err(ThemeError::UnknownCodeTheme(name));
            }
            theme.code_theme = name;
        }
        Ok(theme)
    }
}
