//! Read-only views the renderer consumes: the health bar, the HUD and the
//! list of visible sprites.

use crate::entities::{MatchState, Rect, PLAYER_MAX_HEALTH};

/// Health strictly above this shows green.
pub const GREEN_ABOVE: i32 = 70;
/// Health strictly above this (and not green) shows yellow.
pub const YELLOW_ABOVE: i32 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorTier {
    Green,
    Yellow,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    /// Portion of the bar to fill, always within `[0, 1]`.
    pub fill_ratio: f32,
    pub tier: ColorTier,
}

/// Map raw health to a bar.
///
/// The colour thresholds compare the raw health value, not a percentage of
/// `max_health`.
pub fn health_bar(health: i32, max_health: i32) -> HealthBar {
    let fill_ratio = if max_health > 0 {
        (health as f32 / max_health as f32).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let tier = if health > GREEN_ABOVE {
        ColorTier::Green
    } else if health > YELLOW_ABOVE {
        ColorTier::Yellow
    } else {
        ColorTier::Red
    };
    HealthBar { fill_ratio, tier }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    pub health: HealthBar,
    pub score: u32,
}

impl Hud {
    pub fn from_state(state: &MatchState) -> Self {
        Self {
            health: health_bar(state.player.health, PLAYER_MAX_HEALTH),
            score: state.score,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
    Spell,
    Projectile,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

/// Every visible entity, back to front: enemies, spells, projectiles, then
/// the player on top.
pub fn sprites(state: &MatchState) -> Vec<Sprite> {
    let mut out =
        Vec::with_capacity(1 + state.enemies.len() + state.spells.len() + state.projectiles.len());
    out.extend(state.enemies.iter().map(|e| Sprite {
        kind: SpriteKind::Enemy,
        rect: e.rect,
    }));
    out.extend(state.spells.iter().map(|s| Sprite {
        kind: SpriteKind::Spell,
        rect: s.rect,
    }));
    out.extend(state.projectiles.iter().map(|p| Sprite {
        kind: SpriteKind::Projectile,
        rect: p.rect,
    }));
    out.push(Sprite {
        kind: SpriteKind::Player,
        rect: state.player.rect,
    });
    out
}
