use rand::rngs::StdRng;
use rand::SeedableRng;

use mystic_quest::compute::TickInput;
use mystic_quest::entities::{Projectile, MatchState};
use mystic_quest::state::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn start() -> TickInput {
    TickInput {
        start: true,
        casts: 1,
        ..Default::default()
    }
}

fn quit() -> TickInput {
    TickInput {
        quit: true,
        ..Default::default()
    }
}

fn playing(game: &mut Game) -> &mut MatchState {
    match &mut game.phase {
        Phase::Playing(state) => state,
        other => panic!("expected playing, got {}", other.name()),
    }
}

/// Start a session at t=100 and kill the player on the next frame at t=200.
fn game_over_at_200(rng: &mut StdRng) -> Game {
    let mut game = Game::new();
    game.update(&start(), 100, rng);
    let state = playing(&mut game);
    state.player.health = 10;
    state.score = 7;
    let id = state.ids.next_id();
    let center = state.player.rect.center();
    state
        .projectiles
        .push(Projectile::new(id, center, glam::Vec2::new(-1.0, 0.0)));
    assert_eq!(game.update(&TickInput::default(), 200, rng), Flow::Continue);
    game
}

#[test]
fn game_begins_at_the_menu() {
    assert!(matches!(Game::new().phase, Phase::Menu));
    assert!(matches!(Game::default().phase, Phase::Menu));
}

#[test]
fn menu_waits_for_start() {
    let mut game = Game::new();
    let mut rng = seeded_rng();
    assert_eq!(game.update(&TickInput::default(), 0, &mut rng), Flow::Continue);
    assert!(matches!(game.phase, Phase::Menu));
}

#[test]
fn start_opens_a_fresh_session() {
    let mut game = Game::new();
    let mut rng = seeded_rng();
    assert_eq!(game.update(&start(), 100, &mut rng), Flow::Continue);
    let state = playing(&mut game);
    assert_eq!(state.started_at, 100);
    assert_eq!(state.player.health, 200);
    // The start press is not also a cast
    assert!(state.spells.is_empty());
}

#[test]
fn quit_works_from_every_phase() {
    let mut rng = seeded_rng();

    let mut menu = Game::new();
    assert_eq!(menu.update(&quit(), 0, &mut rng), Flow::Quit);

    let mut game = Game::new();
    game.update(&start(), 0, &mut rng);
    assert_eq!(game.update(&quit(), 16, &mut rng), Flow::Quit);

    let mut over = game_over_at_200(&mut rng);
    assert_eq!(over.update(&quit(), 300, &mut rng), Flow::Quit);
}

#[test]
fn player_death_moves_to_game_over() {
    let mut rng = seeded_rng();
    let game = game_over_at_200(&mut rng);
    match game.phase {
        Phase::GameOver { since, final_score } => {
            assert_eq!(since, 200);
            assert_eq!(final_score, 7);
        }
        other => panic!("expected game over, got {}", other.name()),
    }
}

#[test]
fn game_over_returns_to_menu_after_the_flashes() {
    let mut rng = seeded_rng();
    let mut game = game_over_at_200(&mut rng);

    // Input is ignored while flashing
    game.update(&start(), 1000, &mut rng);
    assert!(matches!(game.phase, Phase::GameOver { .. }));
    game.update(&TickInput::default(), 200 + GAME_OVER_DURATION_MS - 1, &mut rng);
    assert!(matches!(game.phase, Phase::GameOver { .. }));

    game.update(&TickInput::default(), 200 + GAME_OVER_DURATION_MS, &mut rng);
    assert!(matches!(game.phase, Phase::Menu));
}

#[test]
fn a_new_session_can_start_after_game_over() {
    let mut rng = seeded_rng();
    let mut game = game_over_at_200(&mut rng);
    game.update(&TickInput::default(), 5000, &mut rng);
    game.update(&start(), 6000, &mut rng);
    let state = playing(&mut game);
    assert_eq!(state.started_at, 6000);
    assert_eq!(state.score, 0);
    assert_eq!(state.player.health, 200);
}

#[test]
fn flashes_alternate_every_half_period() {
    assert_eq!(GAME_OVER_DURATION_MS, 3000);
    assert!(flash_visible(0, 0));
    assert!(flash_visible(0, 499));
    assert!(!flash_visible(0, 500));
    assert!(!flash_visible(0, 999));
    assert!(flash_visible(0, 1000));
    assert!(!flash_visible(1000, 2500));
}
