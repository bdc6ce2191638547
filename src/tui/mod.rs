//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders frames, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event flow
//!
//! Two producers feed one channel, and [`run_loop`] is its only consumer:
//!
//! ```text
//! input thread (crossterm) ──┐
//!                            ├──► mpsc::Receiver<Action> ──► update() ──► compose() ──► draw
//! tick task (tokio interval) ┘
//! ```
//!
//! Actions are handled strictly one at a time, so a reload triggered by a
//! tick can never interleave with a keypress.

pub mod component;
pub mod composer;
mod event;
pub mod markdown;
pub mod theme;
mod wrap;

use log::{error, info};
use std::fmt;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{ConfigError, ResolvedConfig, ThemeChoice};
use crate::core::deck::DeckError;
use crate::core::state::App;
use crate::core::watch::{FileSource, POLL_INTERVAL, Watcher};
use crate::tui::component::Component;
use crate::tui::composer::{Composition, SlideView, compose};
use crate::tui::event::spawn_input_pump;
use crate::tui::markdown::{MarkdownRenderer, RenderError, SlideRenderer};
use crate::tui::theme::{Theme, ThemeError};

// ============================================================================
// Error Type
// ============================================================================

/// Anything that ends a presentation with a non-zero exit.
#[derive(Debug)]
pub enum PresentError {
    Config(ConfigError),
    Theme(ThemeError),
    Deck(DeckError),
    Render(RenderError),
    Terminal(io::Error),
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::Config(e) => write!(f, "{e}"),
            PresentError::Theme(e) => write!(f, "{e}"),
            PresentError::Deck(e) => write!(f, "{e}"),
            PresentError::Render(e) => write!(f, "{e}"),
            PresentError::Terminal(e) => write!(f, "terminal error: {e}"),
        }
    }
}

impl std::error::Error for PresentError {}

impl From<ConfigError> for PresentError {
    fn from(e: ConfigError) -> Self {
        PresentError::Config(e)
    }
}

impl From<ThemeError> for PresentError {
    fn from(e: ThemeError) -> Self {
        PresentError::Theme(e)
    }
}

impl From<DeckError> for PresentError {
    fn from(e: DeckError) -> Self {
        PresentError::Deck(e)
    }
}

impl From<RenderError> for PresentError {
    fn from(e: RenderError) -> Self {
        PresentError::Render(e)
    }
}

impl From<io::Error> for PresentError {
    fn from(e: io::Error) -> Self {
        PresentError::Terminal(e)
    }
}

// ============================================================================
// Startup
// ============================================================================

pub fn load_theme(choice: &ThemeChoice) -> Result<Theme, ThemeError> {
    match choice {
        ThemeChoice::Explicit(path) | ThemeChoice::Local(path) => Theme::load(path),
        ThemeChoice::Builtin => {
            info!("No theme file, using built-in theme");
            Ok(Theme::default())
        }
    }
}

/// Present the document named in `config` until the user quits.
///
/// Everything that can fail before the first frame (theme, initial load) is
/// done before the terminal switches to the alternate screen, so those
/// errors print on a normal terminal.
///
/// Must be called from inside a tokio runtime; the tick timer is a tokio task.
pub fn run(config: ResolvedConfig) -> Result<(), PresentError> {
    let renderer = MarkdownRenderer::new(load_theme(&config.theme)?);
    let (watcher, deck) = Watcher::open(FileSource::new(&config.document))?;
    let mut app = App::new(deck, watcher, config.metadata());

    // First frame needs a size; later ones arrive as resize events
    let (width, height) = crossterm::terminal::size()?;
    let (tx, rx) = mpsc::channel();
    tx.send(Action::Resize { width, height }).ok();

    let mut terminal = ratatui::init();
    spawn_input_pump(tx.clone());
    let ticker = spawn_ticker(tx, POLL_INTERVAL);

    let result = run_loop(&mut app, &renderer, &rx, |composition| {
        terminal
            .draw(|f| composition.render(f, f.area()))
            .map(|_| ())
    });

    ticker.abort();
    ratatui::restore();
    if let Err(e) = &result {
        error!("Presentation stopped: {}", e);
    }
    result
}

/// Send `Action::Tick` every `period` until the receiver goes away.
pub fn spawn_ticker(tx: Sender<Action>, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; the deck was just loaded
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(Action::Tick).is_err() {
                break;
            }
        }
    })
}

// ============================================================================
// Event loop
// ============================================================================

/// Handle actions from `rx` until quit, a fatal error, or every sender is gone.
///
/// After each action a frame is composed from the new state and handed to
/// `present`. Nothing is drawn until the first `Resize` sets the viewport.
pub fn run_loop<R, P>(
    app: &mut App,
    renderer: &R,
    rx: &Receiver<Action>,
    mut present: P,
) -> Result<(), PresentError>
where
    R: SlideRenderer + ?Sized,
    P: FnMut(&mut Composition) -> io::Result<()>,
{
    for action in rx.iter() {
        if update(app, action)? == Effect::Quit {
            return Ok(());
        }
        if let Some(viewport) = app.viewport {
            let mut composition = compose(&SlideView::from_app(app), renderer, viewport)?;
            present(&mut composition)?;
        }
    }
    info!("Event channel closed");
    Ok(())
}
