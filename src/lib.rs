//! Skele-Hero - A tile-grid arcade melee game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, combat, round state)
//! - `renderer`: Render seam (surface trait, GPU-ready vertices)
//! - `config`: Data-driven round tuning
//! - `error`: Setup failures

pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, PlayField};
pub use error::SetupError;

/// Game configuration constants
pub mod consts {
    /// Fixed logical frame rate
    pub const TICKS_PER_SECOND: u32 = 20;
    /// Round countdown in seconds
    pub const ROUND_SECONDS: u32 = 20;
    /// Enemies per wave
    pub const ENEMY_COUNT: usize = 4;

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;
    /// Map tile edge (pixels)
    pub const TILE_SIZE: f32 = 16.0;

    /// Player movement per tick (pixels)
    pub const PLAYER_STEP: f32 = 10.0;
    pub const PLAYER_MAX_HP: u32 = 10;
    pub const ENEMY_MAX_HP: u32 = 3;

    /// Source frame edge for every sheet in the game
    pub const FRAME_SIZE: f32 = 64.0;
    /// Render scale applied to sliced frames
    pub const SPRITE_SCALE: f32 = 1.5;

    /// Player sheets
    pub const WALK_COLUMNS: u32 = 9;
    pub const SLASH_COLUMNS: u32 = 6;
    pub const DIRECTION_ROWS: u32 = 4;

    /// Explosion sheet is a single strip
    pub const EXPLOSION_COLUMNS: u32 = 12;

    /// Seconds between enemy locomotion frames
    pub const ENEMY_ANIMATION_SECONDS: f32 = 0.2;
    /// Seconds between explosion frames
    pub const EXPLOSION_ANIMATION_SECONDS: f32 = 0.05;

    /// Fixed HUD placement of the player's health bar
    pub const PLAYER_BAR_X: f32 = 400.0;
    pub const PLAYER_BAR_Y: f32 = 80.0;
    pub const PLAYER_BAR_WIDTH: f32 = 200.0;
    pub const PLAYER_BAR_HEIGHT: f32 = 20.0;

    /// Enemy health bar size, drawn above the sprite
    pub const ENEMY_BAR_WIDTH: f32 = 50.0;
    pub const ENEMY_BAR_HEIGHT: f32 = 10.0;
}
