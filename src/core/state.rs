//! # Application State
//!
//! Everything the presenter knows, in one place. No terminal types here;
//! the `tui` module reads this state to compose frames.
//!
//! ```text
//! App
//! ├── deck: Deck              // slides of the current document
//! ├── cursor: Cursor          // index of the visible slide
//! ├── watcher: Watcher        // change detection + its mtime baseline
//! ├── viewport: Option<Viewport> // None until the first resize
//! └── metadata: Metadata      // author + date, fixed at startup
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::deck::Deck;
use crate::core::navigation::Cursor;
use crate::core::watch::Watcher;

/// Terminal area available for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Shown in the status bar. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub author: String,
    pub date: String,
}

pub struct App {
    pub deck: Deck,
    pub cursor: Cursor,
    pub watcher: Watcher,
    pub viewport: Option<Viewport>,
    pub metadata: Metadata,
}

impl App {
    pub fn new(deck: Deck, watcher: Watcher, metadata: Metadata) -> Self {
        Self {
            deck,
            cursor: Cursor::new(),
            watcher,
            viewport: None,
            metadata,
        }
    }

    pub fn current_slide(&self) -> &str {
        // The cursor is kept inside the deck, and decks are never empty
        self.deck.get(self.cursor.index()).unwrap_or_default()
    }

    /// Swap in a freshly loaded deck, clamping the cursor if it shrank.
    pub fn replace_deck(&mut self, deck: Deck) {
        self.deck = deck;
        self.cursor.clamp(self.deck.len());
    }
}
