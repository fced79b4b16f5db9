//! Render seam
//!
//! The simulation never talks to a display. It draws through [`Surface`], and
//! [`VertexSurface`] turns those calls into GPU-ready triangles.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use shapes::VertexSurface;
pub use vertex::{Vertex, colors};

/// A 2D target that can be filled with solid rectangles
pub trait Surface {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: [f32; 4]);

    /// Outline drawn inside the rectangle's bounds
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) {
        let t = thickness.min(size.x / 2.0).min(size.y / 2.0);
        self.fill_rect(min, Vec2::new(size.x, t), color);
        self.fill_rect(Vec2::new(min.x, min.y + size.y - t), Vec2::new(size.x, t), color);
        self.fill_rect(Vec2::new(min.x, min.y + t), Vec2::new(t, size.y - 2.0 * t), color);
        self.fill_rect(
            Vec2::new(min.x + size.x - t, min.y + t),
            Vec2::new(t, size.y - 2.0 * t),
            color,
        );
    }
}
