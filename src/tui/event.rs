use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use std::sync::mpsc::Sender;
use std::thread;

use crate::core::action::Action;

/// Map a terminal event to a presenter action. Unbound keys map to `None`.
pub fn translate(event: Event) -> Option<Action> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<Action> {
    // Releases and repeats arrive when keyboard enhancement is on
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Action::Quit),
        (_, KeyCode::Left) => Some(Action::Previous),
        (_, KeyCode::Right) => Some(Action::Next),
        (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Action::Next),
        _ => None,
    }
}

/// Read terminal events on a dedicated thread and forward them as actions.
///
/// The thread exits once the receiving side of `tx` is gone or the terminal
/// stops delivering events.
pub fn spawn_input_pump(tx: Sender<Action>) {
    thread::spawn(move || {
        loop {
            match crossterm::event::read() {
                Ok(event) => {
                    if let Some(action) = translate(event)
                        && tx.send(action).is_err()
                    {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Terminal input failed: {}", e);
                    break;
                }
            }
        }
    });
}
