//! Pixel-precise hit testing and hit resolution.
//!
//! `collides` works on any two `Hitbox`es: the bounding rectangles are snapped
//! to the pixel grid and, where they overlap, the two masks are compared bit
//! by bit.  No rendering surface is involved.

use std::sync::OnceLock;

use log::debug;

use crate::entities::{
    Damageable, Enemy, MatchState, Player, Projectile, Rect, Spell, PROJECTILE_SIZE, SPELL_SIZE,
    SPRITE_SIZE,
};

/// Damage one spell deals to an enemy.
pub const SPELL_DAMAGE: i32 = 100;
/// Damage one enemy projectile deals to the player.
pub const PROJECTILE_DAMAGE: i32 = 10;

// ── Masks ─────────────────────────────────────────────────────────────────────

/// Per-pixel occupancy of a sprite, stored as rows of 64-bit words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    pub fn from_fn(width: u32, height: u32, mut set: impl FnMut(u32, u32) -> bool) -> Self {
        let words_per_row = (width as usize).div_ceil(64);
        let mut bits = vec![0u64; words_per_row * height as usize];
        for y in 0..height {
            for x in 0..width {
                if set(x, y) {
                    bits[y as usize * words_per_row + (x / 64) as usize] |= 1u64 << (x % 64);
                }
            }
        }
        Self {
            width,
            height,
            words_per_row,
            bits,
        }
    }

    /// A fully opaque `width`×`height` mask.
    pub fn solid(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Out-of-range coordinates read as empty.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        let word = self.bits[y as usize * self.words_per_row + (x / 64) as usize];
        word & (1u64 << (x % 64)) != 0
    }
}

fn solid_mask(cell: &'static OnceLock<Mask>, w: f32, h: f32) -> &'static Mask {
    cell.get_or_init(|| Mask::solid(w as u32, h as u32))
}

static SPRITE_MASK: OnceLock<Mask> = OnceLock::new();
static SPELL_MASK: OnceLock<Mask> = OnceLock::new();
static PROJECTILE_MASK: OnceLock<Mask> = OnceLock::new();

// ── Hitbox ────────────────────────────────────────────────────────────────────

/// Anything that can take part in a hit test.
pub trait Hitbox {
    fn rect(&self) -> Rect;
    /// Mask aligned with the top-left corner of `rect()`.
    fn mask(&self) -> &Mask;

    /// True once the entity no longer overlaps the arena at all.
    fn is_outside_arena(&self) -> bool {
        !self.rect().overlaps(&Rect::arena())
    }
}

impl Hitbox for Player {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn mask(&self) -> &Mask {
        solid_mask(&SPRITE_MASK, SPRITE_SIZE, SPRITE_SIZE)
    }
}

impl Hitbox for Enemy {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn mask(&self) -> &Mask {
        solid_mask(&SPRITE_MASK, SPRITE_SIZE, SPRITE_SIZE)
    }
}

impl Hitbox for Spell {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn mask(&self) -> &Mask {
        solid_mask(&SPELL_MASK, SPELL_SIZE.x, SPELL_SIZE.y)
    }
}

impl Hitbox for Projectile {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn mask(&self) -> &Mask {
        solid_mask(&PROJECTILE_MASK, PROJECTILE_SIZE.x, PROJECTILE_SIZE.y)
    }
}

// ── Hit test ──────────────────────────────────────────────────────────────────

/// Integer pixel footprint of a hitbox: snapped corner plus mask extent.
#[derive(Clone, Copy, Debug)]
struct PixelRect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl PixelRect {
    fn of<H: Hitbox + ?Sized>(hitbox: &H) -> Self {
        let rect = hitbox.rect();
        let mask = hitbox.mask();
        Self {
            x: rect.pos.x.floor() as i32,
            y: rect.pos.y.floor() as i32,
            w: mask.width() as i32,
            h: mask.height() as i32,
        }
    }
}

/// Precise intersection test between two hitboxes.
pub fn collides<A, B>(a: &A, b: &B) -> bool
where
    A: Hitbox + ?Sized,
    B: Hitbox + ?Sized,
{
    let ra = PixelRect::of(a);
    let rb = PixelRect::of(b);

    let left = ra.x.max(rb.x);
    let right = (ra.x + ra.w).min(rb.x + rb.w);
    let top = ra.y.max(rb.y);
    let bottom = (ra.y + ra.h).min(rb.y + rb.h);
    if left >= right || top >= bottom {
        return false;
    }

    let (ma, mb) = (a.mask(), b.mask());
    (top..bottom).any(|y| {
        (left..right).any(|x| ma.get(x - ra.x, y - ra.y) && mb.get(x - rb.x, y - rb.y))
    })
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// What one spell-versus-enemy pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpellHits {
    pub hits: u32,
    pub kills: u32,
    /// Difficulty checkpoints crossed during the pass.
    pub checkpoints: u32,
}

/// Resolve spells against enemies.
///
/// Spells are visited in cast order; each is consumed by the first live enemy
/// (spawn order) it touches.  Every hit scores a point and immediately feeds
/// the checkpoint rule.  Enemies killed here are removed before the next
/// spell is tested.
pub fn resolve_spell_hits(state: &mut MatchState) -> SpellHits {
    let mut report = SpellHits::default();

    for spell in std::mem::take(&mut state.spells) {
        let Some(index) = state.enemies.iter().position(|enemy| collides(&spell, enemy)) else {
            state.spells.push(spell);
            continue;
        };

        report.hits += 1;
        if state.enemies[index].take_damage(SPELL_DAMAGE) {
            let enemy = state.enemies.remove(index);
            report.kills += 1;
            debug!("enemy {:?} destroyed by spell {:?}", enemy.id, spell.id);
        }

        state.score += 1;
        if state.difficulty.register_score(state.score, &mut state.enemies) {
            report.checkpoints += 1;
        }
    }

    report
}

/// Resolve enemy projectiles against the player.  Returns the number of hits.
pub fn resolve_projectile_hits(state: &mut MatchState) -> u32 {
    let player = &mut state.player;
    let mut hits = 0;
    state.projectiles.retain(|projectile| {
        if !collides(projectile, &*player) {
            return true;
        }
        player.take_damage(PROJECTILE_DAMAGE);
        hits += 1;
        false
    });
    hits
}
