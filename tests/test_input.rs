use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use mystic_quest::compute::TickInput;
use mystic_quest::input::*;

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn with_kind(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

#[test]
fn no_events_means_idle_input() {
    let mut keys = KeyTracker::new();
    assert_eq!(keys.take_input(0), TickInput::default());
}

#[test]
fn each_action_press_is_one_cast() {
    let mut keys = KeyTracker::new();
    keys.handle(&press(KeyCode::Char(' ')), 0);
    keys.handle(&press(KeyCode::Enter), 1);
    let input = keys.take_input(2);
    assert_eq!(input.casts, 2);
    assert!(input.start);

    // Edge-triggered: consumed by the first take
    let input = keys.take_input(3);
    assert_eq!(input.casts, 0);
    assert!(!input.start);
}

#[test]
fn repeat_events_do_not_cast() {
    let mut keys = KeyTracker::new();
    keys.handle(&with_kind(KeyCode::Char(' '), KeyEventKind::Repeat), 0);
    assert_eq!(keys.take_input(0).casts, 0);
}

#[test]
fn arrows_and_wasd_are_held_directions() {
    let mut keys = KeyTracker::new();
    keys.handle(&press(KeyCode::Up), 0);
    keys.handle(&press(KeyCode::Char('d')), 0);
    let input = keys.take_input(10);
    assert!(input.up);
    assert!(input.right);
    assert!(!input.down);
    assert!(!input.left);

    // Still held on the next tick without new events
    let input = keys.take_input(20);
    assert!(input.up && input.right);
}

#[test]
fn held_direction_expires_after_hold_window() {
    let mut keys = KeyTracker::new();
    keys.handle(&press(KeyCode::Left), 0);
    assert!(keys.take_input(HOLD_WINDOW_MS).left);
    assert!(!keys.take_input(HOLD_WINDOW_MS + 1).left);
}

#[test]
fn repeat_refreshes_a_held_direction() {
    let mut keys = KeyTracker::new();
    keys.handle(&press(KeyCode::Down), 0);
    keys.handle(&with_kind(KeyCode::Down, KeyEventKind::Repeat), 100);
    assert!(keys.take_input(200).down);
}

#[test]
fn release_drops_a_direction_immediately() {
    let mut keys = KeyTracker::new();
    keys.handle(&press(KeyCode::Char('a')), 0);
    keys.handle(&with_kind(KeyCode::Char('a'), KeyEventKind::Release), 5);
    assert!(!keys.take_input(6).left);
}

#[test]
fn quit_keys() {
    for event in [
        press(KeyCode::Char('q')),
        press(KeyCode::Char('Q')),
        press(KeyCode::Esc),
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    ] {
        let mut keys = KeyTracker::new();
        keys.handle(&event, 0);
        assert!(keys.take_input(0).quit, "{event:?} should quit");
    }

    let mut keys = KeyTracker::new();
    keys.handle(&press(KeyCode::Char('c')), 0);
    assert!(!keys.take_input(0).quit);
}

#[test]
fn non_key_events_are_ignored() {
    let mut keys = KeyTracker::new();
    keys.handle(&Event::Resize(80, 24), 0);
    keys.handle(&Event::FocusLost, 0);
    assert_eq!(keys.take_input(0), TickInput::default());
}
