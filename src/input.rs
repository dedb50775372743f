//! Keyboard state sampled once per tick.
//!
//! Terminals do not report held keys directly. `KeyTracker` records the frame
//! on which each key was last pressed or repeated and treats it as held while
//! that frame is recent. Terminals with keyboard enhancement also report
//! releases, which drop the key at once; classic terminals only send repeated
//! presses, so keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key is considered held if its last press/repeat arrived within this many
/// frames. OS key repeat runs at 15 Hz or faster, well inside the window.
pub const HOLD_WINDOW: u64 = 8;

/// Everything the game reads from the keyboard in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub quit: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Enter was pressed since the previous tick.
    pub confirm: bool,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    quit: bool,
    confirm: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event observed during `frame`.
    pub fn handle_event(&mut self, event: &Event, frame: u64) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(*code, frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    KeyCode::Enter => self.confirm = true,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(*code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(code);
            }
        }
    }

    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&k| self.is_held(k, frame))
    }

    /// Snapshot for `frame`. One-shot signals (quit, confirm) are consumed.
    pub fn take_input(&mut self, frame: u64) -> TickInput {
        let input = TickInput {
            quit: self.quit,
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            fire: self.is_held(KeyCode::Char(' '), frame),
            confirm: self.confirm,
        };
        self.quit = false;
        self.confirm = false;
        input
    }
}
