//! Player-controlled avatar: the skeleton body and the weapon drawn over it
//!
//! Both halves run the same state machine. The round feeds them identical
//! intents so they stay frame-locked; only the body carries health and only
//! the body's swing is resolved against enemies.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clip::{AnimationClipSet, ClipKey, Frame, SheetId, SheetLayout};
use super::entity::{Combatant, Entity};
use super::geometry::{Aabb, Direction};
use super::health::Health;
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::SetupError;

/// Offset of the weapon overlay from the body
pub const WEAPON_OFFSET: Vec2 = Vec2::ZERO;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarKind {
    Body,
    Weapon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarState {
    Locomotion,
    /// `frame` is the next attack frame to show
    Attacking { frame: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub kind: AvatarKind,
    pos: Vec2,
    facing: Direction,
    state: AvatarState,
    /// Index into the current walk clip
    walk_frame: usize,
    /// Clip and index of the frame on screen
    shown: (ClipKey, usize),
    clips: AnimationClipSet,
    health: Option<Health>,
}

impl Avatar {
    fn new(kind: AvatarKind, pos: Vec2, clips: AnimationClipSet, health: Option<Health>) -> Self {
        Self {
            kind,
            pos,
            facing: Direction::Up,
            state: AvatarState::Locomotion,
            walk_frame: 0,
            shown: (ClipKey::Walk(Direction::Up), 0),
            clips,
            health,
        }
    }

    /// Skeleton body at the start position with a full HUD health bar
    pub fn player(config: &GameConfig) -> Result<Self, SetupError> {
        let clips = AnimationClipSet::directional(
            SheetLayout::new(SheetId::BodyWalk, WALK_COLUMNS, DIRECTION_ROWS),
            SheetLayout::new(SheetId::BodySlash, SLASH_COLUMNS, DIRECTION_ROWS),
            SPRITE_SCALE,
        )?;
        let health = Health::new(
            Vec2::new(PLAYER_BAR_X, PLAYER_BAR_Y),
            Vec2::new(PLAYER_BAR_WIDTH, PLAYER_BAR_HEIGHT),
            config.player_max_hp,
        );
        Ok(Self::new(AvatarKind::Body, config.player_start(), clips, Some(health)))
    }

    /// Weapon overlay; never hurt and never resolves hits itself
    pub fn weapon(config: &GameConfig) -> Result<Self, SetupError> {
        let clips = AnimationClipSet::directional(
            SheetLayout::new(SheetId::WeaponWalk, WALK_COLUMNS, DIRECTION_ROWS),
            SheetLayout::new(SheetId::WeaponSlash, SLASH_COLUMNS, DIRECTION_ROWS),
            SPRITE_SCALE,
        )?;
        Ok(Self::new(
            AvatarKind::Weapon,
            config.player_start() + WEAPON_OFFSET,
            clips,
            None,
        ))
    }

    #[inline]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    #[inline]
    pub fn state(&self) -> AvatarState {
        self.state
    }

    #[inline]
    pub fn is_attacking(&self) -> bool {
        matches!(self.state, AvatarState::Attacking { .. })
    }

    /// Attack frame counter, `None` in locomotion
    pub fn attack_frame(&self) -> Option<usize> {
        match self.state {
            AvatarState::Attacking { frame } => Some(frame),
            AvatarState::Locomotion => None,
        }
    }

    #[inline]
    pub fn walk_frame(&self) -> usize {
        self.walk_frame
    }

    /// Frames an attack lasts in the current facing
    pub fn attack_duration(&self) -> usize {
        self.clips.clip_len(ClipKey::Attack(self.facing))
    }

    pub fn clips(&self) -> &AnimationClipSet {
        &self.clips
    }

    /// Shift position; allowed in any state
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Walk animation step toward `dir`. Ignored mid-attack.
    pub fn step_animation(&mut self, dir: Direction) {
        if self.is_attacking() {
            return;
        }
        let key = ClipKey::Walk(dir);
        let len = self.clips.clip_len(key).max(1);
        self.facing = dir;
        self.walk_frame = (self.walk_frame + 1) % len;
        self.shown = (key, self.walk_frame);
    }

    /// Start a swing. Returns false (and changes nothing) if already swinging.
    pub fn begin_attack(&mut self) -> bool {
        if self.is_attacking() {
            return false;
        }
        self.state = AvatarState::Attacking { frame: 0 };
        true
    }

    /// Per-tick update: shows the next attack frame and ends the swing after the last
    pub fn advance(&mut self) {
        let AvatarState::Attacking { frame } = self.state else {
            return;
        };
        self.shown = (ClipKey::Attack(self.facing), frame);
        let next = frame + 1;
        self.state = if next >= self.attack_duration() {
            AvatarState::Locomotion
        } else {
            AvatarState::Attacking { frame: next }
        };
    }
}

impl Entity for Avatar {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(FRAME_SIZE))
    }

    fn sprite(&self) -> Option<&Frame> {
        self.clips.frame(self.shown.0, self.shown.1)
    }
}

impl Combatant for Avatar {
    fn health(&self) -> Option<&Health> {
        self.health.as_ref()
    }

    fn health_mut(&mut self) -> Option<&mut Health> {
        self.health.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Avatar {
        Avatar::player(&GameConfig::default()).unwrap()
    }

    #[test]
    fn test_starts_facing_up_at_start() {
        let p = player();
        assert_eq!(p.facing(), Direction::Up);
        assert_eq!(p.position(), Vec2::new(280.0, 190.0));
        assert_eq!(p.health().unwrap().current(), PLAYER_MAX_HP);
        assert_eq!(p.sprite().unwrap().sheet, SheetId::BodyWalk);
    }

    #[test]
    fn test_walk_frame_wraps() {
        let mut p = player();
        for _ in 0..9 {
            p.step_animation(Direction::Left);
        }
        assert_eq!(p.facing(), Direction::Left);
        assert_eq!(p.walk_frame(), 0);
        p.step_animation(Direction::Right);
        assert_eq!(p.walk_frame(), 1);
        let shown = p.sprite().unwrap();
        assert_eq!(shown.source.min, Vec2::new(64.0, 192.0));
    }

    #[test]
    fn test_attack_not_reentrant() {
        let mut p = player();
        assert!(p.begin_attack());
        p.advance();
        p.advance();
        assert_eq!(p.attack_frame(), Some(2));
        assert!(!p.begin_attack());
        assert_eq!(p.attack_frame(), Some(2));
        p.advance();
        assert_eq!(p.attack_frame(), Some(3));
    }

    #[test]
    fn test_attack_ends_after_duration() {
        let mut p = player();
        p.step_animation(Direction::Down);
        p.begin_attack();
        assert_eq!(p.attack_duration(), 6);
        for i in 0..6 {
            assert!(p.is_attacking(), "still swinging at frame {i}");
            p.advance();
        }
        assert_eq!(p.state(), AvatarState::Locomotion);
        // last attack frame stays on screen until the next walk step
        let shown = p.sprite().unwrap();
        assert_eq!(shown.sheet, SheetId::BodySlash);
        assert_eq!(shown.source.min, Vec2::new(320.0, 128.0));
    }

    #[test]
    fn test_facing_frozen_while_attacking() {
        let mut p = player();
        p.begin_attack();
        p.step_animation(Direction::Right);
        assert_eq!(p.facing(), Direction::Up);
        assert_eq!(p.walk_frame(), 0);
    }

    #[test]
    fn test_weapon_has_no_health() {
        let w = Avatar::weapon(&GameConfig::default()).unwrap();
        assert!(w.health().is_none());
        assert_eq!(w.kind, AvatarKind::Weapon);
        assert_eq!(w.sprite().unwrap().sheet, SheetId::WeaponWalk);
    }
}
