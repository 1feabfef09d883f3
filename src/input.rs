//! Keyboard input: turns `crossterm` key events into one `TickInput` per tick.
//!
//! Held keys are tracked by the timestamp of their last press or repeat event
//! rather than by individual events, so a direction and Space can be held at
//! the same time.  This works on two classes of terminal:
//!
//! * **Keyboard-enhancement capable** (kitty protocol): real `Release` events
//!   remove the key immediately.
//! * **Classic terminals**: only `Press` events arrive (OS key repeat shows up
//!   as repeated presses).  A key expires after `HOLD_WINDOW_MS` of silence,
//!   which outlasts the gap between OS key-repeat events.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::compute::TickInput;

/// A key stays held this long (ms) after its last press or repeat event.
pub const HOLD_WINDOW_MS: u64 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

fn direction_of(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn is_action(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Char(' ') | KeyCode::Enter)
}

/// Accumulates key events between ticks.
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held direction → timestamp (ms) it was last seen.
    held: HashMap<Direction, u64>,
    /// Action presses (Space / Enter) since the last `take_input`.
    presses: u32,
    quit: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one terminal event observed at `now` (ms).
    pub fn handle(&mut self, event: &Event, now: u64) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };

        match kind {
            KeyEventKind::Press => {
                if is_quit(code, *modifiers) {
                    self.quit = true;
                } else if is_action(code) {
                    self.presses += 1;
                } else if let Some(dir) = direction_of(code) {
                    self.held.insert(dir, now);
                }
            }
            // Repeats refresh held directions but never count as a new cast.
            KeyEventKind::Repeat => {
                if let Some(dir) = direction_of(code) {
                    self.held.insert(dir, now);
                }
            }
            KeyEventKind::Release => {
                if let Some(dir) = direction_of(code) {
                    self.held.remove(&dir);
                }
            }
        }
    }

    fn is_held(&self, dir: Direction, now: u64) -> bool {
        self.held
            .get(&dir)
            .map(|&last| now.saturating_sub(last) <= HOLD_WINDOW_MS)
            .unwrap_or(false)
    }

    /// Build the input for the tick at `now` and clear the edge-triggered
    /// signals.  Every action press counts as both a cast and a start; the
    /// active phase decides which one it uses.
    pub fn take_input(&mut self, now: u64) -> TickInput {
        self.held
            .retain(|_, &mut last| now.saturating_sub(last) <= HOLD_WINDOW_MS);

        let input = TickInput {
            up: self.is_held(Direction::Up, now),
            down: self.is_held(Direction::Down, now),
            left: self.is_held(Direction::Left, now),
            right: self.is_held(Direction::Right, now),
            casts: self.presses,
            start: self.presses > 0,
            quit: self.quit,
        };
        self.presses = 0;
        self.quit = false;
        input
    }
}
