//! Bounding sphere over a vertex buffer.

use glam::Vec3;

use crate::export::vertex::UvVertex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Axis-aligned bounding sphere: center is the midpoint of the per-axis
/// min/max, radius is the largest per-axis half-extent doubled.
///
/// That radius is deliberately the full largest-axis extent rather than the
/// tight diagonal sphere. The consuming engine was built against this
/// approximation, so it is preserved as-is.
pub fn bounding_sphere(vertices: &[UvVertex]) -> BoundingSphere {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for vertex in vertices {
        min = min.min(vertex.position);
        max = max.max(vertex.position);
    }
    if vertices.is_empty() {
        return BoundingSphere {
            center: Vec3::ZERO,
            radius: 0.0,
        };
    }
    let half_extent = (max - min) / 2.0;
    BoundingSphere {
        center: min + half_extent,
        radius: half_extent.max_element() * 2.0,
    }
}
