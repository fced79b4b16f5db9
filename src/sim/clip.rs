//! Animation clips sliced from sprite sheets
//!
//! A sheet is cut into `columns * rows` frames in row-major order. Runs of
//! consecutive frames are then named as clips. Directional sheets always
//! have rows in the order up, left, down, right ([`Direction::ALL`]); the
//! controllers index clips by that order.

use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Direction};
use crate::consts::*;
use crate::error::SetupError;

/// Every sprite sheet the game draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetId {
    BodyWalk,
    BodySlash,
    WeaponWalk,
    WeaponSlash,
    Eyeball,
    Pumpking,
    Bee,
    Explosion,
}

/// How a sheet divides into frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub sheet: SheetId,
    pub columns: u32,
    pub rows: u32,
    /// Source size of one frame in sheet pixels
    pub frame_size: Vec2,
}

impl SheetLayout {
    pub fn new(sheet: SheetId, columns: u32, rows: u32) -> Self {
        Self {
            sheet,
            columns,
            rows,
            frame_size: Vec2::splat(FRAME_SIZE),
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }
}

/// One frame: where it lives in its sheet and how big it is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub sheet: SheetId,
    pub source: Aabb,
    /// Drawn size after scaling
    pub size: Vec2,
}

/// Cut a sheet into frames, row-major, each scaled uniformly
pub fn slice(layout: &SheetLayout, scale: f32) -> Result<Vec<Frame>, SetupError> {
    if layout.columns == 0 || layout.rows == 0 {
        return Err(SetupError::InvalidSheet {
            columns: layout.columns,
            rows: layout.rows,
        });
    }

    let w = layout.frame_size.x;
    let h = layout.frame_size.y;
    let mut frames = Vec::with_capacity(layout.frame_count());
    for row in 0..layout.rows {
        for col in 0..layout.columns {
            frames.push(Frame {
                sheet: layout.sheet,
                source: Aabb::new(Vec2::new(w * col as f32, h * row as f32), layout.frame_size),
                size: layout.frame_size * scale,
            });
        }
    }
    Ok(frames)
}

/// Name of a contiguous run of frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClipKey {
    Walk(Direction),
    Attack(Direction),
    /// One full row of an enemy sheet (a locomotion cycle phase)
    Row(usize),
    Explosion,
}

/// Frames plus their fixed partition into named clips
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClipSet {
    frames: Vec<Frame>,
    clips: Vec<(ClipKey, Range<usize>)>,
}

impl AnimationClipSet {
    /// Walk sheet then attack sheet, one clip per row in direction order
    pub fn directional(walk: SheetLayout, attack: SheetLayout, scale: f32) -> Result<Self, SetupError> {
        ClipSetBuilder::default()
            .sheet(&walk, scale, &Direction::ALL.map(ClipKey::Walk))?
            .sheet(&attack, scale, &Direction::ALL.map(ClipKey::Attack))?
            .build()
    }

    /// Enemy body rows followed by a single explosion strip
    pub fn enemy(body: SheetLayout, explosion: SheetLayout, scale: f32) -> Result<Self, SetupError> {
        let rows: Vec<ClipKey> = (0..body.rows as usize).map(ClipKey::Row).collect();
        ClipSetBuilder::default()
            .sheet(&body, scale, &rows)?
            .sheet(&explosion, scale, &[ClipKey::Explosion])?
            .build()
    }

    /// Frames of a clip; empty if the set has no such clip
    pub fn clip(&self, key: ClipKey) -> &[Frame] {
        self.clips
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, range)| &self.frames[range.clone()])
            .unwrap_or(&[])
    }

    /// Frame `index` of a clip
    pub fn frame(&self, key: ClipKey, index: usize) -> Option<&Frame> {
        self.clip(key).get(index)
    }

    #[inline]
    pub fn clip_len(&self, key: ClipKey) -> usize {
        self.clip(key).len()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Accumulates sheets; the partition is frozen by [`ClipSetBuilder::build`]
#[derive(Debug, Default)]
pub struct ClipSetBuilder {
    frames: Vec<Frame>,
    clips: Vec<(ClipKey, Range<usize>)>,
}

impl ClipSetBuilder {
    /// Slice a sheet and split its frames evenly across `keys`, in order
    pub fn sheet(mut self, layout: &SheetLayout, scale: f32, keys: &[ClipKey]) -> Result<Self, SetupError> {
        let frames = slice(layout, scale)?;
        if keys.is_empty() || frames.len() % keys.len() != 0 {
            return Err(SetupError::InvalidSheet {
                columns: layout.columns,
                rows: layout.rows,
            });
        }

        let start = self.frames.len();
        let per_clip = frames.len() / keys.len();
        for (i, key) in keys.iter().enumerate() {
            let from = start + i * per_clip;
            self.clips.push((*key, from..from + per_clip));
        }
        self.frames.extend(frames);
        Ok(self)
    }

    pub fn build(self) -> Result<AnimationClipSet, SetupError> {
        if self.frames.is_empty() {
            return Err(SetupError::InvalidSheet { columns: 0, rows: 0 });
        }
        Ok(AnimationClipSet {
            frames: self.frames,
            clips: self.clips,
        })
    }
}
