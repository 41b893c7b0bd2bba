/// The host screen: mounts the overlay from a hidden trigger and unmounts it
/// when the overlay's dismiss callback fires.
///
/// Input routing: Ctrl+C always ends the program. Otherwise, while an
/// overlay is mounted every action goes to it and none is seen by the host.
/// On the host screen only `q` quits; Close (Esc, gamepad cancel) is ignored.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::info;

use crate::sim::event::GameEvent;
use crate::ui::input::Action;
use crate::ui::overlay::Overlay;

pub struct Host {
    pub overlay: Option<Overlay>,
    /// Set by the overlay's dismiss callback; checked after every action.
    dismiss_requested: Rc<Cell<bool>>,
    tick_interval: Duration,
    pub quit: bool,
    /// How many times the overlay has been opened this run.
    pub openings: u32,
}

impl Host {
    pub fn new(tick_interval: Duration) -> Self {
        Host {
            overlay: None,
            dismiss_requested: Rc::new(Cell::new(false)),
            tick_interval,
            quit: false,
            openings: 0,
        }
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) -> Vec<GameEvent> {
        if action == Action::Interrupt {
            self.quit = true;
            return vec![];
        }

        let events = match self.overlay.as_mut() {
            Some(overlay) => overlay.handle_action(action, now),
            None => {
                match action {
                    Action::Open => self.open(now),
                    Action::Quit => self.quit = true,
                    _ => {}
                }
                vec![]
            }
        };

        self.unmount_if_dismissed();
        events
    }

    pub fn advance(&mut self, now: Instant) -> Vec<GameEvent> {
        match self.overlay.as_mut() {
            Some(overlay) if !overlay.is_dismissed() => overlay.advance(now),
            _ => vec![],
        }
    }

    fn open(&mut self, now: Instant) {
        self.dismiss_requested.set(false);
        let flag = Rc::clone(&self.dismiss_requested);
        let seed = rand::random::<u64>();
        self.overlay = Some(Overlay::mount(
            seed,
            self.tick_interval,
            now,
            Box::new(move || flag.set(true)),
        ));
        self.openings += 1;
    }

    fn unmount_if_dismissed(&mut self) {
        if self.dismiss_requested.replace(false) {
            // Dropping the overlay drops its session and tick timer.
            self.overlay = None;
            info!("overlay unmounted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::{Direction, Position};
    use crate::sim::world::GameState;

    const TICK: Duration = Duration::from_millis(150);

    #[test]
    fn trigger_mounts_fresh_session() {
        let mut host = Host::new(TICK);
        let t0 = Instant::now();
        assert!(host.overlay.is_none());
        host.handle_action(Action::Open, t0);
        let overlay = host.overlay.as_ref().unwrap();
        assert_eq!(overlay.session().state, GameState::Running);
        assert_eq!(overlay.session().snake.head(), Position::new(10, 10));
        assert_eq!(host.openings, 1);
    }

    #[test]
    fn close_unmounts_and_stops_ticks() {
        let mut host = Host::new(TICK);
        let t0 = Instant::now();
        host.handle_action(Action::Open, t0);
        host.handle_action(Action::Close, t0);
        assert!(host.overlay.is_none());
        assert!(!host.quit);
        assert!(host.advance(t0 + TICK * 5).is_empty());
    }

    #[test]
    fn overlay_captures_host_keys() {
        let mut host = Host::new(TICK);
        let t0 = Instant::now();
        host.handle_action(Action::Open, t0);
        host.handle_action(Action::Quit, t0);
        host.handle_action(Action::Open, t0);
        assert!(!host.quit);
        assert_eq!(host.openings, 1);
        assert!(host.overlay.is_some());
    }

    #[test]
    fn state_discarded_between_openings() {
        let mut host = Host::new(TICK);
        let t0 = Instant::now();
        host.handle_action(Action::Open, t0);
        host.handle_action(Action::Turn(Direction::Down), t0);
        host.advance(t0 + TICK);
        host.handle_action(Action::Close, t0 + TICK);

        host.handle_action(Action::Open, t0 + TICK * 2);
        let overlay = host.overlay.as_ref().unwrap();
        assert_eq!(overlay.session().snake.head(), Position::new(10, 10));
        assert_eq!(overlay.session().pending, Direction::Right);
        assert_eq!(host.openings, 2);
    }

    #[test]
    fn host_quit_keys() {
        let mut host = Host::new(TICK);
        host.handle_action(Action::Quit, Instant::now());
        assert!(host.quit);

        let mut host = Host::new(TICK);
        host.handle_action(Action::Open, Instant::now());
        host.handle_action(Action::Interrupt, Instant::now());
        assert!(host.quit);
    }

    #[test]
    fn repeated_close_stays_on_host_screen() {
        let mut host = Host::new(TICK);
        let t0 = Instant::now();
        host.handle_action(Action::Open, t0);
        host.handle_action(Action::Close, t0);
        host.handle_action(Action::Close, t0);
        assert!(host.overlay.is_none());
        assert!(!host.quit);

        // held key, later frames
        host.handle_action(Action::Close, t0 + TICK);
        assert!(!host.quit);
        host.handle_action(Action::Open, t0 + TICK);
        assert!(host.overlay.is_some());
    }

    #[test]
    fn turns_ignored_on_host_screen() {
        let mut host = Host::new(TICK);
        assert!(host.handle_action(Action::Turn(Direction::Up), Instant::now()).is_empty());
        assert!(host.overlay.is_none());
        assert!(!host.quit);
    }
}
