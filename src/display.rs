//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a writer and an immutable view of the game.  No
//! game logic runs here; world coordinates are only scaled into the terminal
//! grid and drawn with queued `crossterm` commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{MatchState, Rect, ARENA_HEIGHT, ARENA_WIDTH, PLAYER_MAX_HEALTH};
use crate::hud::{sprites, ColorTier, Hud, SpriteKind};
use crate::state::{flash_visible, Game, Phase};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::White;
const C_HUD_SCORE: Color = Color::White;
const C_BAR_OUTLINE: Color = Color::White;
const C_PLAYER: Color = Color::Cyan;
const C_ENEMY: Color = Color::Magenta;
const C_SPELL: Color = Color::Blue;
const C_PROJECTILE: Color = Color::Red;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const HEALTH_BAR_CELLS: u16 = 20;
const CONTROLS_HINT: &str = "Arrows / WASD : Move   SPACE : Cast   Q : Quit";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal cells a world-space rectangle covers, clipped to the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

/// The arena's interior inside the border: rows 2..height-2, columns
/// 1..width-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub left: u16,
    pub top: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn for_terminal(width: u16, height: u16) -> Self {
        Self {
            left: 1,
            top: 2,
            cols: width.saturating_sub(2),
            rows: height.saturating_sub(4),
        }
    }

    /// Scale `rect` into terminal cells.  Anything overlapping the arena
    /// covers at least one cell; anything fully outside yields `None`.
    pub fn project(&self, rect: &Rect) -> Option<CellSpan> {
        let sx = f32::from(self.cols) / ARENA_WIDTH;
        let sy = f32::from(self.rows) / ARENA_HEIGHT;

        let x0 = (rect.pos.x * sx).floor().max(0.0);
        let x1 = (rect.right() * sx).ceil().min(f32::from(self.cols));
        let y0 = (rect.pos.y * sy).floor().max(0.0);
        let y1 = (rect.bottom() * sy).ceil().min(f32::from(self.rows));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(CellSpan {
            col: self.left + x0 as u16,
            row: self.top + y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whichever phase is active.
pub fn render<W: Write>(
    out: &mut W,
    game: &Game,
    now: u64,
    (width, height): (u16, u16),
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match &game.phase {
        Phase::Menu => draw_menu(out, width, height)?,
        Phase::Playing(state) => draw_match(out, state, width, height)?,
        Phase::GameOver { since, final_score } => {
            if flash_visible(*since, now) {
                draw_game_over(out, *final_score, width, height)?;
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    let lines: &[(&str, Color, u16)] = &[
        ("Mystic Quest Remastered", C_TITLE, cy.saturating_sub(3)),
        ("Press SPACE to start", C_TITLE, cy.saturating_sub(1)),
        (CONTROLS_HINT, C_HINT, cy + 2),
    ];
    for (text, color, row) in lines {
        draw_centered(out, text, *color, width, *row)?;
    }
    Ok(())
}

// ── Playing ───────────────────────────────────────────────────────────────────

fn draw_match<W: Write>(
    out: &mut W,
    state: &MatchState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    draw_border(out, width, height)?;
    draw_hud(out, &Hud::from_state(state), state.player.health)?;

    let viewport = Viewport::for_terminal(width, height);
    for sprite in sprites(state) {
        let Some(span) = viewport.project(&sprite.rect) else {
            continue;
        };
        let (glyph, color) = match sprite.kind {
            SpriteKind::Player => ('█', C_PLAYER),
            SpriteKind::Enemy => ('▓', C_ENEMY),
            SpriteKind::Spell => ('═', C_SPELL),
            SpriteKind::Projectile => ('●', C_PROJECTILE),
        };
        fill_span(out, span, glyph, color)?;
    }

    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, health: i32) -> std::io::Result<()> {
    let filled = (hud.health.fill_ratio * f32::from(HEALTH_BAR_CELLS)).round() as u16;
    let bar_color = match hud.health.tier {
        ColorTier::Green => Color::Green,
        ColorTier::Yellow => Color::Yellow,
        ColorTier::Red => Color::Red,
    };

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_BAR_OUTLINE))?;
    out.queue(Print("["))?;
    out.queue(style::SetForegroundColor(bar_color))?;
    out.queue(Print("█".repeat(filled as usize)))?;
    out.queue(Print(" ".repeat((HEALTH_BAR_CELLS - filled) as usize)))?;
    out.queue(style::SetForegroundColor(C_BAR_OUTLINE))?;
    out.queue(Print(format!("] {:>3}/{}", health.max(0), PLAYER_MAX_HEALTH)))?;

    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("   Score: {}", hud.score)))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    final_score: u32,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let cy = height / 2;
    draw_centered(out, "GAME OVER", C_GAME_OVER, width, cy)?;
    draw_centered(
        out,
        &format!("Final Score: {final_score}"),
        C_TITLE,
        width,
        cy + 2,
    )?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    text: &str,
    color: Color,
    width: u16,
    row: u16,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn fill_span<W: Write>(out: &mut W, span: CellSpan, glyph: char, color: Color) -> std::io::Result<()> {
    let line: String = std::iter::repeat(glyph).take(span.width as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in span.row..span.row + span.height {
        out.queue(cursor::MoveTo(span.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}
