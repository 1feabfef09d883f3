//! Game entity types and their per-type update rules.
//!
//! Cross-entity rules (spawning, collision, scoring) live in `difficulty`,
//! `collision` and `compute`; everything here only touches its own entity.

use glam::Vec2;

use crate::difficulty::Difficulty;

// ── Arena ─────────────────────────────────────────────────────────────────────

pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Player and enemy sprites are scaled to a 50×50 square.
pub const SPRITE_SIZE: f32 = 50.0;

pub const PLAYER_MAX_HEALTH: i32 = 200;
/// World units moved per tick per axis.
pub const PLAYER_SPEED: f32 = 5.0;

pub const ENEMY_MAX_HEALTH: i32 = 300;

pub const SPELL_SIZE: Vec2 = Vec2::new(10.0, 5.0);
pub const SPELL_SPEED: f32 = 10.0;

pub const PROJECTILE_SIZE: Vec2 = Vec2::new(5.0, 10.0);
pub const PROJECTILE_SPEED: f32 = 7.0;

/// Damage dealt by `Damageable::take_default_damage`.
pub const DEFAULT_DAMAGE: i32 = 5;

/// Aim used when an enemy and the player share the same center.
pub const FALLBACK_AIM: Vec2 = Vec2::new(-1.0, 0.0);

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// Hands out ids in creation order.  Collections are kept in the same order,
/// so ids double as a stable tie-breaker for collision resolution.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Axis-aligned rectangle in world units, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    pub fn arena() -> Self {
        Self::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && other.pos.x < self.right()
            && self.pos.y < other.bottom()
            && other.pos.y < self.bottom()
    }
}

// ── Health ────────────────────────────────────────────────────────────────────

/// An entity with integer health that is removed once health reaches zero.
pub trait Damageable {
    fn health(&self) -> i32;
    fn health_mut(&mut self) -> &mut i32;

    fn is_dead(&self) -> bool {
        self.health() <= 0
    }

    /// Subtract `amount` and report whether the entity is now dead.  Health
    /// may go negative; owners remove dead entities before their next use.
    fn take_damage(&mut self, amount: i32) -> bool {
        *self.health_mut() -= amount;
        self.is_dead()
    }

    fn take_default_damage(&mut self) -> bool {
        self.take_damage(DEFAULT_DAMAGE)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub health: i32,
}

impl Player {
    /// A fresh player near the left edge, vertically centered.
    pub fn spawn() -> Self {
        Self {
            rect: Rect::from_center(
                Vec2::new(50.0, ARENA_HEIGHT / 2.0),
                Vec2::splat(SPRITE_SIZE),
            ),
            health: PLAYER_MAX_HEALTH,
        }
    }

    /// Step by `(dx, dy)` (each in -1..=1) and keep the whole sprite inside
    /// the arena.
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        debug_assert!((-1..=1).contains(&dx) && (-1..=1).contains(&dy));
        let step = Vec2::new(f32::from(dx), f32::from(dy)) * PLAYER_SPEED;
        let max = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT) - self.rect.size;
        self.rect.pos = (self.rect.pos + step).clamp(Vec2::ZERO, max);
    }

    /// Spells leave from the player's center and always fly forward.
    pub fn cast_spell(&self, ids: &mut IdAllocator) -> Spell {
        Spell::new(ids.next_id(), self.rect.center(), Facing::Right)
    }
}

impl Damageable for Player {
    fn health(&self) -> i32 {
        self.health
    }

    fn health_mut(&mut self) -> &mut i32 {
        &mut self.health
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EntityId,
    pub rect: Rect,
    pub health: i32,
    /// Minimum gap between shots, in milliseconds.
    pub shoot_interval: u64,
    /// Timestamp (ms) of the last shot, or of the spawn if it never fired.
    pub last_shot: u64,
}

impl Enemy {
    pub fn new(id: EntityId, center: Vec2, shoot_interval: u64, now: u64) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, Vec2::splat(SPRITE_SIZE)),
            health: ENEMY_MAX_HEALTH,
            shoot_interval,
            last_shot: now,
        }
    }

    /// Fire at `target` if more than `shoot_interval` ms have passed since
    /// the last shot.  The projectile keeps this aim for its whole life.
    pub fn shoot(&mut self, target: Vec2, now: u64, ids: &mut IdAllocator) -> Option<Projectile> {
        if now.saturating_sub(self.last_shot) <= self.shoot_interval {
            return None;
        }
        self.last_shot = now;
        let origin = self.rect.center();
        Some(Projectile::new(ids.next_id(), origin, aim(origin, target)))
    }
}

impl Damageable for Enemy {
    fn health(&self) -> i32 {
        self.health
    }

    fn health_mut(&mut self) -> &mut i32 {
        &mut self.health
    }
}

/// Unit vector from `from` toward `to`, or `FALLBACK_AIM` when they coincide.
pub fn aim(from: Vec2, to: Vec2) -> Vec2 {
    debug_assert!(from.is_finite() && to.is_finite());
    (to - from).try_normalize().unwrap_or(FALLBACK_AIM)
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player's attack.  Travels along one axis only.
#[derive(Clone, Debug)]
pub struct Spell {
    pub id: EntityId,
    pub rect: Rect,
    pub facing: Facing,
}

impl Spell {
    pub fn new(id: EntityId, center: Vec2, facing: Facing) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, SPELL_SIZE),
            facing,
        }
    }

    pub fn advance(&mut self) {
        self.rect.pos.x += self.facing.sign() * SPELL_SPEED;
    }
}

/// An enemy shot.  `direction` is a unit vector fixed at creation.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: EntityId,
    pub rect: Rect,
    pub direction: Vec2,
}

impl Projectile {
    pub fn new(id: EntityId, center: Vec2, direction: Vec2) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, PROJECTILE_SIZE),
            direction,
        }
    }

    pub fn advance(&mut self) {
        self.rect.pos += self.direction * PROJECTILE_SPEED;
    }
}

// ── Match state ───────────────────────────────────────────────────────────────

/// Everything one play session mutates.  Step functions in `compute`,
/// `collision` and `difficulty` take it by `&mut`.
#[derive(Clone, Debug)]
pub struct MatchState {
    pub player: Player,
    /// Live enemies in spawn order.
    pub enemies: Vec<Enemy>,
    /// Live spells in cast order.
    pub spells: Vec<Spell>,
    /// Live enemy projectiles in firing order.
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub difficulty: Difficulty,
    pub ids: IdAllocator,
    /// Timestamp (ms) the session started at.
    pub started_at: u64,
}
