//! Vertex identity and deduplication.
//!
//! Two loop vertices are the same wire vertex when position, normal and UV
//! are bit-identical. The tangent is carried along but deliberately excluded
//! from identity: whichever tangent arrived first sticks. The consuming
//! engine depends on this exact policy, so it is not "fixed" here.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use glam::{Vec2, Vec3};

/// One deduplicated vertex as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub tangent: Vec3,
}

/// Bit-pattern key over position + normal + UV. Exact float equality, no
/// quantization, so NaNs and -0.0/0.0 are distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey([u32; 8]);

impl UvVertex {
    fn key(&self) -> VertexKey {
        VertexKey([
            self.position.x.to_bits(),
            self.position.y.to_bits(),
            self.position.z.to_bits(),
            self.normal.x.to_bits(),
            self.normal.y.to_bits(),
            self.normal.z.to_bits(),
            self.uv.x.to_bits(),
            self.uv.y.to_bits(),
        ])
    }
}

/// Insertion-ordered vertex buffer builder. Indices handed out are positions
/// in the final buffer, so output order depends only on first-seen order
/// during face traversal.
#[derive(Debug, Default)]
pub struct VertexPool {
    index_of: HashMap<VertexKey, u32>,
    vertices: Vec<UvVertex>,
}

impl VertexPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `vertex`, inserting it if unseen.
    pub fn insert(&mut self, vertex: UvVertex) -> u32 {
        match self.index_of.entry(vertex.key()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let index = self.vertices.len() as u32;
                self.vertices.push(vertex);
                entry.insert(index);
                index
            }
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn into_vertices(self) -> Vec<UvVertex> {
        self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, tangent_x: f32) -> UvVertex {
        UvVertex {
            position: Vec3::new(x, 0.0, 0.0),
            normal: Vec3::Z,
            uv: Vec2::new(0.5, 0.5),
            tangent: Vec3::new(tangent_x, 0.0, 0.0),
        }
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let mut pool = VertexPool::new();
        let a = pool.insert(vertex(1.0, 1.0));
        let b = pool.insert(vertex(1.0, 1.0));
        assert_eq!(a, b);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_tangent_excluded_from_identity() {
        let mut pool = VertexPool::new();
        let a = pool.insert(vertex(1.0, 1.0));
        let b = pool.insert(vertex(1.0, -1.0));
        assert_eq!(a, b);
        let vertices = pool.into_vertices();
        assert_eq!(vertices.len(), 1);
        // First-inserted tangent wins.
        assert_eq!(vertices[0].tangent.x, 1.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut pool = VertexPool::new();
        pool.insert(vertex(3.0, 0.0));
        pool.insert(vertex(1.0, 0.0));
        pool.insert(vertex(3.0, 0.0));
        pool.insert(vertex(2.0, 0.0));
        let vertices = pool.into_vertices();
        let xs: Vec<f32> = vertices.iter().map(|v| v.position.x).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_uv_change_is_a_new_vertex() {
        let mut pool = VertexPool::new();
        let a = pool.insert(vertex(1.0, 0.0));
        let mut other = vertex(1.0, 0.0);
        other.uv = Vec2::new(0.25, 0.5);
        let b = pool.insert(other);
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
    }
}
