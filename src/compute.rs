//! The per-tick combat loop.
//!
//! `tick` mutates a `MatchState` in a fixed order: spawn, input, movement,
//! collisions, enemy fire, projectile motion, terminal check.  The caller
//! supplies the timestamp (read once per tick) and the RNG, so a seeded RNG
//! and a scripted clock make every run reproducible.

use log::{debug, trace};
use rand::Rng;

use crate::collision::{resolve_projectile_hits, resolve_spell_hits, Hitbox, SpellHits};
use crate::difficulty::{spawn_enemy, Difficulty};
use crate::entities::{Damageable, EntityId, IdAllocator, MatchState, Player};

// ── Input contract ───────────────────────────────────────────────────────────

/// Signals sampled for one tick.
///
/// Directions are held state.  `casts` counts Cast key presses seen since the
/// previous tick; each press produces exactly one spell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub casts: u32,
    pub start: bool,
    pub quit: bool,
}

impl TickInput {
    /// Collapse held keys into a step.  Down wins over Up and Right over
    /// Left when both are held.
    pub fn direction(&self) -> (i8, i8) {
        let dx = if self.right {
            1
        } else if self.left {
            -1
        } else {
            0
        };
        let dy = if self.down {
            1
        } else if self.up {
            -1
        } else {
            0
        };
        (dx, dy)
    }
}

// ── Tick results ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    PlayerDied,
    Quit,
}

/// Everything one tick did, for logging and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub spawned: Option<EntityId>,
    pub spells_cast: u32,
    pub spell_hits: SpellHits,
    pub projectile_hits: u32,
    pub shots_fired: u32,
    /// Spells and projectiles dropped for leaving the arena.
    pub despawned: usize,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh session starting at timestamp `now` (ms).
pub fn init_state(now: u64) -> MatchState {
    MatchState {
        player: Player::spawn(),
        enemies: Vec::new(),
        spells: Vec::new(),
        projectiles: Vec::new(),
        score: 0,
        difficulty: Difficulty::new(now),
        ids: IdAllocator::default(),
        started_at: now,
    }
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance the session by one tick at timestamp `now`.
///
/// A quit signal does not cut the tick short; it is reported once every step
/// has run.  Spells cast this tick only become eligible for collision on the
/// next tick.
pub fn tick(
    state: &mut MatchState,
    input: &TickInput,
    now: u64,
    rng: &mut impl Rng,
) -> TickReport {
    // ── 1. Spawn ─────────────────────────────────────────────────────────────
    let spawned = spawn_enemy(state, now, rng);

    // ── 2. Pending input events ──────────────────────────────────────────────
    // New spells join the live set only after this tick's collision pass.
    let cast: Vec<_> = (0..input.casts)
        .map(|_| state.player.cast_spell(&mut state.ids))
        .collect();

    // ── 3. Held movement ─────────────────────────────────────────────────────
    let (dx, dy) = input.direction();
    state.player.move_by(dx, dy);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    let spell_hits = resolve_spell_hits(state);
    let projectile_hits = resolve_projectile_hits(state);
    state.spells.extend(cast);

    // ── 5. Enemy fire ────────────────────────────────────────────────────────
    let target = state.player.rect.center();
    let mut shots_fired = 0;
    for enemy in &mut state.enemies {
        if let Some(projectile) = enemy.shoot(target, now, &mut state.ids) {
            state.projectiles.push(projectile);
            shots_fired += 1;
        }
    }

    // ── 6. Motion & off-arena cleanup ────────────────────────────────────────
    let despawned = advance_missiles(state);

    // ── 7. Terminal condition ────────────────────────────────────────────────
    let outcome = if input.quit {
        TickOutcome::Quit
    } else if state.player.is_dead() {
        debug!("player died at score {}", state.score);
        TickOutcome::PlayerDied
    } else {
        TickOutcome::Continue
    };

    let report = TickReport {
        outcome,
        spawned,
        spells_cast: input.casts,
        spell_hits,
        projectile_hits,
        shots_fired,
        despawned,
    };
    trace!("tick @{now}ms: {report:?}");
    report
}

/// Move every spell and projectile one step and drop the ones that have left
/// the arena completely.  Returns how many were dropped.
fn advance_missiles(state: &mut MatchState) -> usize {
    let before = state.spells.len() + state.projectiles.len();

    for spell in &mut state.spells {
        spell.advance();
    }
    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    state.spells.retain(|spell| !spell.is_outside_arena());
    state.projectiles.retain(|projectile| !projectile.is_outside_arena());

    before - (state.spells.len() + state.projectiles.len())
}
