//! Enemy archetypes and their animation-driven behaviour
//!
//! Enemies never move. They loop one row of their sheet and, on the
//! archetype's hit frame, bite the player if the two hitboxes overlap. A
//! lethal hit from the player swaps the loop for an explosion strip, after
//! which the enemy reports itself finished.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clip::{AnimationClipSet, ClipKey, Frame, SheetId, SheetLayout};
use super::entity::{Combatant, Entity};
use super::geometry::Aabb;
use super::health::Health;
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::SetupError;

/// Rows (phase quadrants) in every enemy sheet
pub const ENEMY_ROWS: u32 = 4;

/// Explosion sprite is drawn shifted from the enemy's anchor
pub const EXPLOSION_OFFSET: Vec2 = Vec2::new(-30.0, -20.0);

/// Enemy template chosen on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    #[default]
    Eyeball,
    Pumpking,
    Bee,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Archetype::Eyeball, Archetype::Pumpking, Archetype::Bee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Eyeball => "eyeball",
            Archetype::Pumpking => "pumpking",
            Archetype::Bee => "bee",
        }
    }

    pub fn layout(&self) -> SheetLayout {
        match self {
            Archetype::Eyeball => SheetLayout::new(SheetId::Eyeball, 7, ENEMY_ROWS),
            Archetype::Pumpking => SheetLayout::new(SheetId::Pumpking, 6, ENEMY_ROWS),
            Archetype::Bee => SheetLayout::new(SheetId::Bee, 6, ENEMY_ROWS),
        }
    }

    /// Cycle index of the strike pose
    pub fn hit_frame(&self) -> usize {
        4
    }

    /// Health bar placement relative to the enemy's anchor
    pub fn bar_offset(&self) -> Vec2 {
        match self {
            Archetype::Bee => Vec2::new(0.0, -20.0),
            Archetype::Eyeball | Archetype::Pumpking => Vec2::new(22.0, -20.0),
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SetupError::UnknownArchetype(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Locomotion,
    Exploding,
}

/// What an enemy did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyTick {
    Idle,
    /// Dealt one damage to the player
    StruckPlayer,
    /// Explosion finished; remove from the round
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub archetype: Archetype,
    pos: Vec2,
    state: EnemyState,
    /// Locomotion row picked at spawn
    cycle: ClipKey,
    frame: usize,
    /// Ticks since the last frame change
    elapsed: u32,
    walk_interval: u32,
    explode_interval: u32,
    clips: AnimationClipSet,
    health: Option<Health>,
}

impl Enemy {
    /// Spawn at `pos` looping row `quadrant` (0..4) of the archetype sheet
    pub fn new(
        id: u32,
        archetype: Archetype,
        pos: Vec2,
        quadrant: usize,
        config: &GameConfig,
    ) -> Result<Self, SetupError> {
        let clips = AnimationClipSet::enemy(
            archetype.layout(),
            SheetLayout::new(SheetId::Explosion, EXPLOSION_COLUMNS, 1),
            SPRITE_SCALE,
        )?;
        let health = Health::new(
            pos + archetype.bar_offset(),
            Vec2::new(ENEMY_BAR_WIDTH, ENEMY_BAR_HEIGHT),
            config.enemy_max_hp,
        );
        Ok(Self {
            id,
            archetype,
            pos,
            state: EnemyState::Locomotion,
            cycle: ClipKey::Row(quadrant % ENEMY_ROWS as usize),
            frame: 0,
            elapsed: 0,
            walk_interval: config.enemy_frame_interval_ticks(),
            explode_interval: config.explosion_frame_interval_ticks(),
            clips,
            health: Some(health),
        })
    }

    /// Hitbox an enemy anchored at `pos` would have
    pub fn hitbox_at(pos: Vec2) -> Aabb {
        Aabb::new(pos, Vec2::splat(FRAME_SIZE))
    }

    #[inline]
    pub fn state(&self) -> EnemyState {
        self.state
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.state == EnemyState::Exploding
    }

    #[inline]
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn cycle(&self) -> ClipKey {
        self.cycle
    }

    fn current_clip(&self) -> ClipKey {
        match self.state {
            EnemyState::Locomotion => self.cycle,
            EnemyState::Exploding => ClipKey::Explosion,
        }
    }

    /// Switch to the explosion strip and drop the health bar.
    ///
    /// Only the lethal-hit path calls this; it must not be called twice.
    pub fn explode(&mut self) {
        debug_assert!(!self.is_exploding(), "enemy {} exploded twice", self.id);
        self.state = EnemyState::Exploding;
        self.frame = 0;
        self.elapsed = 0;
        self.health = None;
        log::debug!("Enemy {} exploding", self.id);
    }

    /// Advance one fixed tick against the player
    pub fn tick(&mut self, player: &mut impl Combatant) -> EnemyTick {
        self.elapsed += 1;
        match self.state {
            EnemyState::Locomotion => {
                if let Some(health) = self.health.as_mut() {
                    health.set_position(self.pos + self.archetype.bar_offset());
                }
                if self.elapsed < self.walk_interval {
                    return EnemyTick::Idle;
                }
                self.elapsed = 0;
                let len = self.clips.clip_len(self.cycle).max(1);
                self.frame = (self.frame + 1) % len;
                if self.frame == self.archetype.hit_frame() && self.try_strike(player) {
                    return EnemyTick::StruckPlayer;
                }
                EnemyTick::Idle
            }
            EnemyState::Exploding => {
                if self.elapsed < self.explode_interval {
                    return EnemyTick::Idle;
                }
                self.elapsed = 0;
                self.frame += 1;
                if self.frame >= self.clips.clip_len(ClipKey::Explosion) {
                    EnemyTick::Finished
                } else {
                    EnemyTick::Idle
                }
            }
        }
    }

    fn try_strike(&self, player: &mut impl Combatant) -> bool {
        if !self.hitbox().overlaps(&player.hitbox()) {
            return false;
        }
        match player.health_mut() {
            Some(health) if !health.is_depleted() => {
                health.apply_damage(1);
                true
            }
            _ => false,
        }
    }
}

impl Entity for Enemy {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn hitbox(&self) -> Aabb {
        Self::hitbox_at(self.pos)
    }

    fn sprite(&self) -> Option<&Frame> {
        self.clips.frame(self.current_clip(), self.frame)
    }

    fn sprite_origin(&self) -> Vec2 {
        match self.state {
            EnemyState::Locomotion => self.pos,
            EnemyState::Exploding => self.pos + EXPLOSION_OFFSET,
        }
    }
}

impl Combatant for Enemy {
    fn health(&self) -> Option<&Health> {
        self.health.as_ref()
    }

    fn health_mut(&mut self) -> Option<&mut Health> {
        self.health.as_mut()
    }

    fn on_defeated(&mut self) {
        self.explode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::avatar::Avatar;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    /// Enemy sitting right on the player's start position
    fn overlapping(archetype: Archetype) -> (Enemy, Avatar) {
        let cfg = config();
        let player = Avatar::player(&cfg).unwrap();
        let enemy = Enemy::new(1, archetype, cfg.player_start(), 0, &cfg).unwrap();
        (enemy, player)
    }

    #[test]
    fn test_archetype_parse_and_display() {
        assert_eq!("PumpKing".parse::<Archetype>().unwrap(), Archetype::Pumpking);
        assert_eq!(Archetype::Bee.to_string(), "bee");
        assert!(matches!(
            "dragon".parse::<Archetype>(),
            Err(SetupError::UnknownArchetype(_))
        ));
    }

    #[test]
    fn test_frame_advances_every_interval() {
        let (mut enemy, mut player) = overlapping(Archetype::Eyeball);
        enemy.pos = Vec2::new(0.0, 0.0);
        for _ in 0..3 {
            enemy.tick(&mut player);
        }
        assert_eq!(enemy.frame(), 0);
        enemy.tick(&mut player);
        assert_eq!(enemy.frame(), 1);
    }

    #[test]
    fn test_strikes_once_per_cycle() {
        let (mut enemy, mut player) = overlapping(Archetype::Eyeball);
        // eyeball cycle is 7 frames, 4 ticks each
        let mut strikes = Vec::new();
        for t in 1..=56 {
            if enemy.tick(&mut player) == EnemyTick::StruckPlayer {
                strikes.push(t);
            }
        }
        assert_eq!(strikes, vec![16, 44]);
        assert_eq!(player.health().unwrap().current(), PLAYER_MAX_HP - 2);
    }

    #[test]
    fn test_no_strike_without_overlap() {
        let (mut enemy, mut player) = overlapping(Archetype::Bee);
        player.translate(Vec2::new(200.0, 0.0));
        for _ in 0..40 {
            assert_ne!(enemy.tick(&mut player), EnemyTick::StruckPlayer);
        }
        assert_eq!(player.health().unwrap().current(), PLAYER_MAX_HP);
    }

    #[test]
    fn test_no_strike_on_depleted_player() {
        let (mut enemy, mut player) = overlapping(Archetype::Pumpking);
        player.health_mut().unwrap().apply_damage(PLAYER_MAX_HP);
        for _ in 0..40 {
            assert_ne!(enemy.tick(&mut player), EnemyTick::StruckPlayer);
        }
    }

    #[test]
    fn test_explosion_finishes_after_twelve_ticks() {
        let (mut enemy, mut player) = overlapping(Archetype::Eyeball);
        enemy.explode();
        assert!(enemy.health().is_none());
        assert_eq!(enemy.sprite().unwrap().sheet, SheetId::Explosion);
        assert_eq!(enemy.sprite_origin(), enemy.position() + EXPLOSION_OFFSET);
        for _ in 0..11 {
            assert_eq!(enemy.tick(&mut player), EnemyTick::Idle);
        }
        assert_eq!(enemy.tick(&mut player), EnemyTick::Finished);
        // exploding enemies never bite
        assert_eq!(player.health().unwrap().current(), PLAYER_MAX_HP);
    }

    #[test]
    fn test_bar_follows_archetype_offset() {
        let cfg = config();
        let bee = Enemy::new(1, Archetype::Bee, Vec2::new(100.0, 100.0), 2, &cfg).unwrap();
        assert_eq!(bee.health().unwrap().pos, Vec2::new(100.0, 80.0));
        let eye = Enemy::new(2, Archetype::Eyeball, Vec2::new(100.0, 100.0), 5, &cfg).unwrap();
        assert_eq!(eye.health().unwrap().pos, Vec2::new(122.0, 80.0));
        assert_eq!(eye.cycle(), ClipKey::Row(1));
    }

    #[test]
    fn test_bar_tracks_enemy_every_tick() {
        let (mut enemy, mut player) = overlapping(Archetype::Eyeball);
        for step in 1..=3 {
            enemy.pos += Vec2::new(7.0, -3.0);
            // mid-interval ticks still move the bar
            assert_eq!(enemy.tick(&mut player), EnemyTick::Idle);
            assert_eq!(enemy.frame(), 0, "tick {step} changed the frame");
            assert_eq!(
                enemy.health().unwrap().pos,
                enemy.position() + Archetype::Eyeball.bar_offset()
            );
        }
    }

    #[test]
    fn test_every_archetype_parses_from_its_name() {
        for archetype in Archetype::ALL {
            assert_eq!(archetype.as_str().to_uppercase().parse::<Archetype>().unwrap(), archetype);
        }
    }
}
