//! Hit points and the bar that shows them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::{Surface, colors};

/// Outline thickness of a health bar
const BAR_BORDER: f32 = 2.0;

/// Current/maximum hit points plus the on-screen bar placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    /// Top-left of the bar
    pub pos: Vec2,
    pub size: Vec2,
    current: u32,
    max: u32,
}

impl Health {
    /// Full health. `max_hp` of zero is bumped to one so the bar ratio is defined.
    pub fn new(pos: Vec2, size: Vec2, max_hp: u32) -> Self {
        let max = max_hp.max(1);
        Self {
            pos,
            size,
            current: max,
            max,
        }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Remove hit points, stopping at zero. No-op once depleted.
    pub fn apply_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Filled fraction in [0, 1]
    pub fn ratio(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    /// Move the bar to follow its owner
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Draw a bordered bar; the filled part fades from red to green left to right
    pub fn render(&self, surface: &mut impl Surface) {
        surface.fill_rect(self.pos, self.size, colors::WHITE);

        let filled = (self.size.x * self.ratio()) as u32;
        for i in 0..filled {
            let t = i as f32 / filled as f32;
            surface.fill_rect(
                Vec2::new(self.pos.x + i as f32, self.pos.y),
                Vec2::new(1.0, self.size.y),
                gradient(t),
            );
        }

        surface.stroke_rect(self.pos, self.size, BAR_BORDER, colors::WHITE);
    }
}

fn gradient(t: f32) -> [f32; 4] {
    let lo = colors::HEALTH_LOW;
    let hi = colors::HEALTH_HIGH;
    [
        lo[0] + (hi[0] - lo[0]) * t,
        lo[1] + (hi[1] - lo[1]) * t,
        lo[2] + (hi[2] - lo[2]) * t,
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexSurface;
    use proptest::prelude::*;

    fn bar(max_hp: u32) -> Health {
        Health::new(Vec2::ZERO, Vec2::new(50.0, 10.0), max_hp)
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut hp = bar(3);
        hp.apply_damage(2);
        assert_eq!(hp.current(), 1);
        hp.apply_damage(5);
        assert_eq!(hp.current(), 0);
        assert!(hp.is_depleted());
        hp.apply_damage(1);
        assert_eq!(hp.current(), 0);
    }

    #[test]
    fn test_zero_max_is_bumped() {
        let hp = bar(0);
        assert_eq!(hp.max(), 1);
        assert!(!hp.is_depleted());
    }

    #[test]
    fn test_render_full_bar() {
        let hp = bar(3);
        let mut surface = VertexSurface::new();
        hp.render(&mut surface);
        // background + 50 gradient columns + 4 border strips
        assert_eq!(surface.quad_count(), 1 + 50 + 4);
        // first column is pure red, last is nearly green
        let first = surface.vertices[6].color;
        assert_eq!(first, [1.0, 0.0, 0.0, 1.0]);
        let last = surface.vertices[50 * 6].color;
        assert!(last[1] > 0.95 && last[0] < 0.05);
    }

    #[test]
    fn test_render_depleted_bar_has_no_fill() {
        let mut hp = bar(3);
        hp.apply_damage(3);
        let mut surface = VertexSurface::new();
        hp.render(&mut surface);
        assert_eq!(surface.quad_count(), 1 + 4);
    }

    #[test]
    fn test_render_partial_bar() {
        let mut hp = bar(3);
        hp.apply_damage(1);
        let mut surface = VertexSurface::new();
        hp.render(&mut surface);
        // 50 * 2/3 = 33.3 -> 33 columns
        assert_eq!(surface.quad_count(), 1 + 33 + 4);
    }

    proptest! {
        #[test]
        fn prop_hp_stays_in_range(max in 1u32..50, hits in proptest::collection::vec(0u32..10, 0..40)) {
            let mut hp = bar(max);
            for amount in hits {
                hp.apply_damage(amount);
                prop_assert!(hp.current() <= hp.max());
                prop_assert!((0.0..=1.0).contains(&hp.ratio()));
            }
        }
    }
}
