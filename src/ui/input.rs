/// Keyboard input.
///
/// Drains every pending terminal event once per frame and translates key
/// presses into `Action`s, in arrival order. Order matters: several
/// direction presses may land between two ticks, and the overlay must see
/// all of them to keep only the latest valid one.
///
/// Releases, unmapped keys, mouse, focus and resize events produce nothing.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::grid::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Turn(Direction),
    /// Enter / Space: Replay or Close on the result panel.
    Confirm,
    /// Esc: close the overlay. Ignored on the host screen.
    Close,
    /// Hidden trigger on the host screen.
    Open,
    Quit,
    /// Ctrl+C: leave from anywhere.
    Interrupt,
}

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_OPEN: &[KeyCode] = &[KeyCode::Char('g'), KeyCode::Char('G')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q')];

pub struct InputState {
    /// Actions collected during the most recent `drain_events()`.
    pub actions: Vec<Action>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { actions: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame, before the simulation tick.
    pub fn drain_events(&mut self) {
        self.actions.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(ev) => {
                    if let Some(action) = action_for_event(&ev) {
                        self.actions.push(action);
                    }
                }
                Err(e) => {
                    log::debug!("dropped unreadable terminal event: {e}");
                }
            }
        }
    }
}

pub fn action_for_event(ev: &Event) -> Option<Action> {
    match ev {
        Event::Key(key) => action_for_key(key),
        _ => None,
    }
}

pub fn action_for_key(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Interrupt),
            _ => None,
        };
    }

    let code = key.code;
    if KEYS_UP.contains(&code) {
        Some(Action::Turn(Direction::Up))
    } else if KEYS_DOWN.contains(&code) {
        Some(Action::Turn(Direction::Down))
    } else if KEYS_LEFT.contains(&code) {
        Some(Action::Turn(Direction::Left))
    } else if KEYS_RIGHT.contains(&code) {
        Some(Action::Turn(Direction::Right))
    } else if KEYS_CONFIRM.contains(&code) {
        Some(Action::Confirm)
    } else if code == KeyCode::Esc {
        Some(Action::Close)
    } else if KEYS_OPEN.contains(&code) {
        Some(Action::Open)
    } else if KEYS_QUIT.contains(&code) {
        Some(Action::Quit)
    } else {
        None
    }
}
