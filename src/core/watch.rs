//! # Change Watcher
//!
//! Detects edits to the presented document by polling its modification time.
//! The runtime calls [`Watcher::poll`] once per [`POLL_INTERVAL`].
//!
//! ```text
//! tick ──► modified() ──err──► ignore, retry next tick
//!              │
//!              ├── same as baseline ──► nothing
//!              │
//!              └── different ──► load() ──ok──► new deck, baseline = mtime
//!                                    │
//!                                    └──err──► fatal
//! ```
//!
//! The baseline lives in the `Watcher` itself, so several watchers (or tests)
//! never share state.

use log::{debug, info};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::core::deck::{self, Deck, DeckError};

/// How often the runtime asks the watcher to check the file.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Where a deck comes from. Implemented for files on disk by [`FileSource`].
pub trait DeckSource {
    /// Human-readable origin for log lines.
    fn describe(&self) -> String;

    /// Current modification time of the underlying document.
    fn modified(&self) -> io::Result<SystemTime>;

    fn load(&self) -> Result<Deck, DeckError>;
}

/// A document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DeckSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn modified(&self) -> io::Result<SystemTime> {
        std::fs::metadata(&self.path)?.modified()
    }

    fn load(&self) -> Result<Deck, DeckError> {
        deck::load(&self.path)
    }
}

pub struct Watcher {
    source: Box<dyn DeckSource>,
    /// Modification time of the last successfully loaded content.
    baseline: Option<SystemTime>,
}

impl Watcher {
    /// Record the baseline, then perform the initial load.
    ///
    /// The baseline is taken first: an edit racing the load shows up as a
    /// change on the next poll instead of being missed.
    pub fn open(source: impl DeckSource + 'static) -> Result<(Self, Deck), DeckError> {
        let baseline = source.modified().ok();
        let deck = source.load()?;
        info!("Watching {} ({} slide(s))", source.describe(), deck.len());
        let watcher = Self {
            source: Box::new(source),
            baseline,
        };
        Ok((watcher, deck))
    }

    pub fn baseline(&self) -> Option<SystemTime> {
        self.baseline
    }

    /// Check the source once.
    ///
    /// Returns `Ok(Some(deck))` when the document changed and reloaded,
    /// `Ok(None)` when nothing changed or the modification time could not be
    /// read, and `Err` when a changed document failed to load.
    pub fn poll(&mut self) -> Result<Option<Deck>, DeckError> {
        let modified = match self.source.modified() {
            Ok(time) => time,
            Err(e) => {
                debug!("Stat of {} failed, retrying next tick: {}", self.source.describe(), e);
                return Ok(None);
            }
        };

        if self.baseline == Some(modified) {
            return Ok(None);
        }

        let deck = self.source.load()?;
        self.baseline = Some(modified);
        info!("Reloaded {} ({} slide(s))", self.source.describe(), deck.len());
        Ok(Some(deck))
    }
}
