//! Time-driven enemy spawning and score-driven difficulty.
//!
//! All intervals are milliseconds compared against the tick timestamp, so the
//! pace of the game does not depend on the frame rate.

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::entities::{EntityId, Enemy, MatchState, ARENA_HEIGHT, ARENA_WIDTH};

// ── Difficulty table ──────────────────────────────────────────────────────────

pub const INITIAL_SPAWN_RATE: u64 = 5000;
pub const MIN_SPAWN_RATE: u64 = 1000;
/// Spawn-rate reduction per checkpoint.
pub const SPAWN_RATE_STEP: u64 = 500;

pub const INITIAL_SHOOT_INTERVAL: u64 = 3000;
pub const MIN_SHOOT_INTERVAL: u64 = 1000;
/// Shoot-interval reduction per checkpoint.
pub const SHOOT_INTERVAL_STEP: u64 = 300;

/// Points between checkpoints.
pub const CHECKPOINT_SPAN: u32 = 10;

/// Enemies enter with their center this far from the right edge.
pub const SPAWN_INSET_X: f32 = 60.0;
/// Enemies never spawn closer than this to the top or bottom edge.
pub const SPAWN_MARGIN_Y: f32 = 50.0;

/// Shoot interval for an enemy given the current score.
pub fn shoot_interval_for(score: u32) -> u64 {
    let steps = u64::from(score / CHECKPOINT_SPAN);
    INITIAL_SHOOT_INTERVAL
        .saturating_sub(SHOOT_INTERVAL_STEP * steps)
        .max(MIN_SHOOT_INTERVAL)
}

// ── Controller state ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Difficulty {
    /// Minimum gap between spawns, in milliseconds.
    pub current_spawn_rate: u64,
    pub last_spawn_time: u64,
    /// `score / CHECKPOINT_SPAN` at the last difficulty increase.
    pub last_score_checkpoint: u32,
}

impl Difficulty {
    /// The first enemy arrives one full spawn period after `now`.
    pub fn new(now: u64) -> Self {
        Self {
            current_spawn_rate: INITIAL_SPAWN_RATE,
            last_spawn_time: now,
            last_score_checkpoint: 0,
        }
    }

    pub fn should_spawn(&self, now: u64) -> bool {
        now.saturating_sub(self.last_spawn_time) > self.current_spawn_rate
    }

    /// Apply the checkpoint rule after the score changed.
    ///
    /// Fires only when `score / CHECKPOINT_SPAN` exceeds the stored
    /// checkpoint, so calling it again for the same checkpoint is a no-op.
    /// Returns `true` if the difficulty went up.
    pub fn register_score(&mut self, score: u32, enemies: &mut [Enemy]) -> bool {
        let checkpoint = score / CHECKPOINT_SPAN;
        if checkpoint <= self.last_score_checkpoint {
            return false;
        }
        self.last_score_checkpoint = checkpoint;
        self.current_spawn_rate = self
            .current_spawn_rate
            .saturating_sub(SPAWN_RATE_STEP)
            .max(MIN_SPAWN_RATE);

        let interval = shoot_interval_for(score);
        for enemy in enemies.iter_mut() {
            enemy.shoot_interval = interval;
        }
        debug!(
            "checkpoint {checkpoint}: spawn rate {} ms, shoot interval {interval} ms",
            self.current_spawn_rate
        );
        true
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawn one enemy at the right edge if the spawn period has elapsed.
/// All randomness comes through `rng`.
pub fn spawn_enemy(state: &mut MatchState, now: u64, rng: &mut impl Rng) -> Option<EntityId> {
    if !state.difficulty.should_spawn(now) {
        return None;
    }
    state.difficulty.last_spawn_time = now;

    let y = rng.gen_range(SPAWN_MARGIN_Y as i32..=(ARENA_HEIGHT - SPAWN_MARGIN_Y) as i32);
    let center = Vec2::new(ARENA_WIDTH - SPAWN_INSET_X, y as f32);
    let id = state.ids.next_id();
    let interval = shoot_interval_for(state.score);
    state.enemies.push(Enemy::new(id, center, interval, now));
    debug!("spawned enemy {id:?} at y={y} (shoot interval {interval} ms)");
    Some(id)
}
