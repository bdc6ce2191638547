//! # Core Presenter Logic
//!
//! This module contains the presenter's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Deck (slides)        │
//!                    │  • Watcher (reloads)    │
//!                    │  • State + Action       │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`deck`]: Splitting a document into slides
//! - [`watch`]: Modification-time polling and hot reload
//! - [`navigation`]: The saturating slide cursor
//! - [`state`]: The `App` struct, all presenter state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod deck;
pub mod navigation;
pub mod state;
pub mod watch;
