//! Wave placement
//!
//! Enemies land on distinct grid cells drawn from a shuffled list of every
//! cell outside the zone kept clear around the player's start. Cells whose
//! enemy the player could never walk into are left out too.

use glam::{UVec2, Vec2};
use rand::Rng;
use rand::seq::SliceRandom;

use super::enemy::{Archetype, ENEMY_ROWS, Enemy};
use crate::config::GameConfig;
use crate::error::SetupError;

/// Cells available for spawning, row-major, before shuffling
pub fn free_cells(grid: UVec2, excluded_center: UVec2, radius: u32) -> Vec<UVec2> {
    let mut cells = Vec::with_capacity((grid.x * grid.y) as usize);
    for y in 0..grid.y {
        for x in 0..grid.x {
            let near = x.abs_diff(excluded_center.x) <= radius && y.abs_diff(excluded_center.y) <= radius;
            if !near {
                cells.push(UVec2::new(x, y));
            }
        }
    }
    cells
}

fn cell_origin(cell: UVec2, tile_size: f32) -> Vec2 {
    cell.as_vec2() * tile_size
}

/// Place `count` enemies of one archetype.
///
/// Each enemy also gets a random starting row so a wave doesn't animate in
/// lockstep. Fails without placing anything if there aren't enough cells.
pub fn spawn_wave<R: Rng>(
    archetype: Archetype,
    count: usize,
    grid: UVec2,
    excluded_center: UVec2,
    config: &GameConfig,
    rng: &mut R,
) -> Result<Vec<Enemy>, SetupError> {
    let reach = config.player_reach();
    let mut cells = free_cells(grid, excluded_center, config.spawn_exclusion_radius);
    cells.retain(|cell| Enemy::hitbox_at(cell_origin(*cell, config.tile_size)).overlaps(&reach));
    if cells.is_empty() && count > 0 {
        return Err(SetupError::EmptyGrid);
    }
    if count > cells.len() {
        return Err(SetupError::TooManyEnemies {
            requested: count,
            available: cells.len(),
        });
    }

    cells.shuffle(rng);
    let enemies = cells
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, cell)| {
            let pos = cell_origin(*cell, config.tile_size);
            let quadrant = rng.random_range(0..ENEMY_ROWS as usize);
            Enemy::new(i as u32 + 1, archetype, pos, quadrant, config)
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "Spawned {} {} enemies on a {}x{} grid",
        enemies.len(),
        archetype,
        grid.x,
        grid.y
    );
    Ok(enemies)
}
