//! Shape generation for 2D primitives

use glam::Vec2;

use super::Surface;
use super::vertex::Vertex;

/// Generate the two triangles covering an axis-aligned rectangle
pub fn quad(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Surface that records draw calls as a triangle list
#[derive(Debug, Default)]
pub struct VertexSurface {
    pub vertices: Vec<Vertex>,
}

impl VertexSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rectangles drawn so far
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl Surface for VertexSurface {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: [f32; 4]) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        self.vertices.extend_from_slice(&quad(min, size, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_quad_corners() {
        let verts = quad(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), colors::WHITE);
        assert_eq!(verts[0].position, [1.0, 2.0]);
        assert_eq!(verts[5].position, [4.0, 6.0]);
    }

    #[test]
    fn test_degenerate_rect_skipped() {
        let mut surface = VertexSurface::new();
        surface.fill_rect(Vec2::ZERO, Vec2::new(0.0, 10.0), colors::WHITE);
        assert_eq!(surface.quad_count(), 0);
    }

    #[test]
    fn test_stroke_is_four_quads() {
        let mut surface = VertexSurface::new();
        surface.stroke_rect(Vec2::ZERO, Vec2::new(50.0, 10.0), 2.0, colors::WHITE);
        assert_eq!(surface.quad_count(), 4);
    }
}
