//! Top-level game phases: menu, playing, game over.
//!
//! The whole program is one `Game` value advanced by `Game::update` once per
//! frame.  Returning to the menu is a phase change, not a new call frame.

use log::{debug, info};
use rand::Rng;

use crate::compute::{init_state, tick, TickInput, TickOutcome};
use crate::entities::MatchState;

/// Length of each half (shown / hidden) of a game-over flash.
pub const FLASH_HALF_PERIOD_MS: u64 = 500;
pub const GAME_OVER_FLASHES: u64 = 3;
/// Time spent on the game-over screen before returning to the menu.
pub const GAME_OVER_DURATION_MS: u64 = GAME_OVER_FLASHES * 2 * FLASH_HALF_PERIOD_MS;

#[derive(Clone, Debug)]
pub enum Phase {
    Menu,
    Playing(MatchState),
    GameOver { since: u64, final_score: u32 },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing(_) => "playing",
            Phase::GameOver { .. } => "game-over",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Whether the "GAME OVER" text is shown at `now` for a game over that began
/// at `since`.  Each flash shows the text for the first half period.
pub fn flash_visible(since: u64, now: u64) -> bool {
    (now.saturating_sub(since) / FLASH_HALF_PERIOD_MS) % 2 == 0
}

#[derive(Clone, Debug)]
pub struct Game {
    pub phase: Phase,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self { phase: Phase::Menu }
    }

    /// Advance whichever phase is active by one frame.  Quit ends the game
    /// from any phase.
    pub fn update(&mut self, input: &TickInput, now: u64, rng: &mut impl Rng) -> Flow {
        let next = match &mut self.phase {
            Phase::Menu => {
                if input.quit {
                    return Flow::Quit;
                }
                if !input.start {
                    return Flow::Continue;
                }
                info!("session started");
                Phase::Playing(init_state(now))
            }
            Phase::Playing(state) => match tick(state, input, now, rng).outcome {
                TickOutcome::Quit => return Flow::Quit,
                TickOutcome::Continue => return Flow::Continue,
                TickOutcome::PlayerDied => {
                    info!(
                        "game over: score {} after {} ms",
                        state.score,
                        now.saturating_sub(state.started_at)
                    );
                    Phase::GameOver {
                        since: now,
                        final_score: state.score,
                    }
                }
            },
            Phase::GameOver { since, .. } => {
                if input.quit {
                    return Flow::Quit;
                }
                if now.saturating_sub(*since) < GAME_OVER_DURATION_MS {
                    return Flow::Continue;
                }
                Phase::Menu
            }
        };
        debug!("phase {} -> {}", self.phase.name(), next.name());
        self.phase = next;
        Flow::Continue
    }
}
