//! # Deck
//!
//! A deck is the ordered list of slides cut out of one document. Slides are
//! separated by the literal [`DELIMITER`] wherever it occurs, not only on a
//! line of its own, so a `---` inside a code block also splits the slide.
//!
//! ```text
//! "Title\n---\nBody text"  →  ["Title", "Body text"]
//! ```
//!
//! A deck is never empty: a document without delimiters is a single slide.

use log::debug;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Marker separating two slides.
pub const DELIMITER: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    slides: Vec<String>,
}

impl Deck {
    /// Split a document into slides and strip edge newlines from each one.
    ///
    /// Only `\n` and `\r` are stripped; leading spaces and tabs survive so
    /// indented code stays indented.
    pub fn parse(content: &str) -> Self {
        let slides = content
            .split(DELIMITER)
            .map(|fragment| fragment.trim_matches(['\r', '\n']).to_string())
            .collect();
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false for a parsed deck; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slides.get(index).map(String::as_str)
    }

    pub fn slides(&self) -> &[String] {
        &self.slides
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum DeckError {
    NotFound(PathBuf),
    /// The path exists but is a directory.
    InvalidTarget(PathBuf),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::NotFound(path) => write!(f, "{}: no such file", path.display()),
            DeckError::InvalidTarget(path) => {
                write!(f, "{}: can not read directories", path.display())
            }
            DeckError::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl DeckError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            DeckError::NotFound(path.to_path_buf())
        } else {
            DeckError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Read and split the document at `path`.
pub fn load(path: &Path) -> Result<Deck, DeckError> {
    let metadata = fs::metadata(path).map_err(|e| DeckError::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(DeckError::InvalidTarget(path.to_path_buf()));
    }

    // Any bytes are accepted; a save caught mid-write may end inside a character
    let bytes = fs::read(path).map_err(|e| DeckError::from_io(path, e))?;
    let deck = Deck::parse(&String::from_utf8_lossy(&bytes));
    debug!("Loaded {} slide(s) from {}", deck.len(), path.display());
    Ok(deck)
}
