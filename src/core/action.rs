//! # Actions
//!
//! Everything that can happen while presenting becomes an `Action`.
//! Right arrow pressed? That is `Action::Next`. Timer fired? `Action::Tick`.
//!
//! The `update()` function applies one action to the state and tells the
//! runtime what to do next:
//!
//! ```text
//! State + Action  →  update()  →  Effect (or a fatal DeckError)
//! ```
//!
//! Actions arrive one at a time from a single channel, so `update` never
//! races with itself.

use log::info;

use crate::core::deck::DeckError;
use crate::core::state::{App, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Next,
    Previous,
    Resize { width: u16, height: u16 },
    /// Periodic file check.
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Compose and present a new frame.
    Render,
    Quit,
}

/// Apply `action` to `app`.
///
/// A reload failure on `Tick` is returned as `Err`; the run loop treats it as
/// fatal rather than keep showing a deck that no longer matches the file.
pub fn update(app: &mut App, action: Action) -> Result<Effect, DeckError> {
    match action {
        Action::Quit => {
            info!("Quit requested");
            return Ok(Effect::Quit);
        }
        Action::Next => app.cursor.advance(app.deck.len()),
        Action::Previous => app.cursor.retreat(),
        Action::Resize { width, height } => {
            info!("Viewport resized to {}x{}", width, height);
            app.viewport = Some(Viewport { width, height });
        }
        Action::Tick => {
            if let Some(deck) = app.watcher.poll()? {
                app.replace_deck(deck);
            }
        }
    }
    Ok(Effect::Render)
}
