//! Round tuning
//!
//! Loaded from a JSON file by the native driver; every field has a default so
//! partial files work.

use std::fs;
use std::path::Path;

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SetupError;
use crate::sim::{Aabb, Direction};

/// Screen-space limits the player pair may walk within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayField {
    pub min_x: f32,
    pub min_y: f32,
    /// Gap kept between the sprite's right edge and the screen edge
    pub right_margin: f32,
    /// Gap kept between the sprite's bottom edge and the screen edge
    pub bottom_margin: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            min_x: -10.0,
            min_y: -35.0,
            right_margin: 50.0,
            bottom_margin: 100.0,
        }
    }
}

impl PlayField {
    /// Whether a step in `dir` may start from `pos`.
    ///
    /// Only the starting position is checked, so the sprite can end a step
    /// slightly past a limit.
    pub fn permits(&self, pos: Vec2, dir: Direction, frame: Vec2, screen: Vec2) -> bool {
        match dir {
            Direction::Left => pos.x > self.min_x,
            Direction::Right => pos.x < screen.x - frame.x - self.right_margin,
            Direction::Up => pos.y > self.min_y,
            Direction::Down => pos.y < screen.y - frame.y - self.bottom_margin,
        }
    }

    /// Area a hitbox of size `frame` can cover when walking from `start` in
    /// whole steps of `step`
    pub fn reach(&self, start: Vec2, step: f32, frame: Vec2, screen: Vec2) -> Aabb {
        if step <= 0.0 {
            return Aabb::new(start, frame);
        }
        let far = Vec2::new(
            screen.x - frame.x - self.right_margin,
            screen.y - frame.y - self.bottom_margin,
        );
        let lo = Vec2::new(
            last_stop_below(start.x, self.min_x, step),
            last_stop_below(start.y, self.min_y, step),
        );
        let hi = Vec2::new(
            last_stop_above(start.x, far.x, step),
            last_stop_above(start.y, far.y, step),
        );
        Aabb::new(lo, hi - lo + frame)
    }
}

/// Where stepping down from `start` stops once a step starts at or below `limit`
fn last_stop_below(start: f32, limit: f32, step: f32) -> f32 {
    if start <= limit {
        return start;
    }
    start - ((start - limit) / step).ceil() * step
}

fn last_stop_above(start: f32, limit: f32, step: f32) -> f32 {
    if start >= limit {
        return start;
    }
    start + ((limit - start) / step).ceil() * step
}

/// Tunable round parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ticks_per_second: u32,
    pub round_seconds: u32,
    pub enemy_count: usize,

    pub screen_width: f32,
    pub screen_height: f32,
    pub tile_size: f32,
    /// Chebyshev radius (in cells) kept free around the player's start cell
    pub spawn_exclusion_radius: u32,

    pub player_step: f32,
    pub player_max_hp: u32,
    pub enemy_max_hp: u32,

    pub enemy_animation_seconds: f32,
    pub explosion_animation_seconds: f32,

    pub play_field: PlayField,
    /// Fixed RNG seed; a fresh one is drawn per run when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            round_seconds: ROUND_SECONDS,
            enemy_count: ENEMY_COUNT,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tile_size: TILE_SIZE,
            spawn_exclusion_radius: 3,

            player_step: PLAYER_STEP,
            player_max_hp: PLAYER_MAX_HP,
            enemy_max_hp: ENEMY_MAX_HP,

            enemy_animation_seconds: ENEMY_ANIMATION_SECONDS,
            explosion_animation_seconds: EXPLOSION_ANIMATION_SECONDS,

            play_field: PlayField::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Read a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SetupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&json).map_err(|source| SetupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Defaults unless a path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SetupError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SetupError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SetupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SetupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })
    }

    #[inline]
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Map size in whole tiles
    pub fn grid_size(&self) -> UVec2 {
        UVec2::new(
            (self.screen_width / self.tile_size) as u32,
            (self.screen_height / self.tile_size) as u32,
        )
    }

    /// Top-left of the player sprite at round start
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0 - 40.0, self.screen_height / 2.0 - 50.0)
    }

    /// Grid cell under the centre of the player's starting hitbox
    pub fn player_start_cell(&self) -> UVec2 {
        let center = self.player_start() + Vec2::splat(FRAME_SIZE / 2.0);
        (center / self.tile_size).max(Vec2::ZERO).as_uvec2()
    }

    /// Everything the player's hitbox can touch over a round
    pub fn player_reach(&self) -> Aabb {
        self.play_field
            .reach(self.player_start(), self.player_step, Vec2::splat(FRAME_SIZE), self.screen())
    }

    pub fn round_ticks_per_second(&self) -> u32 {
        self.ticks_per_second.max(1)
    }

    pub fn enemy_frame_interval_ticks(&self) -> u32 {
        self.seconds_to_ticks(self.enemy_animation_seconds)
    }

    pub fn explosion_frame_interval_ticks(&self) -> u32 {
        self.seconds_to_ticks(self.explosion_animation_seconds)
    }

    fn seconds_to_ticks(&self, seconds: f32) -> u32 {
        ((seconds * self.round_ticks_per_second() as f32).round() as u32).max(1)
    }
}
