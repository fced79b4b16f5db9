//! Screen-space geometry for hit detection
//!
//! Everything collides as an axis-aligned box anchored at its top-left
//! corner, the way sprites are placed on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Cardinal facing / movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Sheet row order: up, left, down, right
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    /// Row of this direction within a directional sheet
    #[inline]
    pub fn row(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Left => 1,
            Direction::Down => 2,
            Direction::Right => 3,
        }
    }

    /// Unit step in screen space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap; boxes that only share an edge do not touch
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(64.0));
        let b = Aabb::new(Vec2::new(32.0, 32.0), Vec2::splat(64.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(64.0));
        let b = Aabb::new(Vec2::new(64.0, 0.0), Vec2::splat(64.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_disjoint() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(100.0, 100.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_direction_rows_follow_sheet_order() {
        let rows: Vec<usize> = Direction::ALL.iter().map(|d| d.row()).collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);
        assert_eq!(Direction::Up.unit(), Vec2::new(0.0, -1.0));
    }
}
