//! Mystic Quest Remastered: a real-time arena shooter for the terminal.
//!
//! Core modules:
//! - `entities`: player, enemies, spells, projectiles and the match state
//! - `collision`: pixel-mask hit testing and hit resolution
//! - `difficulty`: timed spawning and score checkpoints
//! - `compute`: the per-tick combat loop
//! - `state`: menu / playing / game-over phases
//! - `hud`: health bar and render snapshot
//! - `input`, `display`: terminal input and output
//! - `config`: command-line settings

pub mod collision;
pub mod compute;
pub mod config;
pub mod difficulty;
pub mod display;
pub mod entities;
pub mod hud;
pub mod input;
pub mod state;
