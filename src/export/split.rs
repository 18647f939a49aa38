//! Re-partition material groups whose vertex buffers exceed the 16-bit index
//! ceiling of the wire format.

use std::collections::HashMap;

use tracing::debug;

use crate::export::groups::MeshGroup;

/// Vertex buffer ceiling imposed by the format's 16-bit indices.
pub const VERTEX_LIMIT: usize = 1 << 16;

/// Margin below the limit at which a sub-group is closed, so the triangle in
/// flight always fits.
const SPLIT_MARGIN: usize = 3;

/// Split any group with more than [`VERTEX_LIMIT`] vertices into sub-groups
/// that each fit the index ceiling.
///
/// Indices are consumed three at a time; every vertex a triangle touches is
/// remapped to a fresh local index on first occurrence, and the sub-group is
/// closed once its vertex count reaches the limit minus the margin. A
/// triangle is never divided across sub-groups. Groups already within the
/// limit pass through untouched.
pub fn split_for_vertex_limit(groups: Vec<MeshGroup>) -> Vec<MeshGroup> {
    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        if group.vertices.len() <= VERTEX_LIMIT {
            out.push(group);
            continue;
        }

        debug!(
            vertices = group.vertices.len(),
            triangles = group.indices.len() / 3,
            "splitting oversized group"
        );
        let mut start = 0;
        while start < group.indices.len() {
            let mut mapping: HashMap<u32, u32> = HashMap::new();
            let mut seen_order: Vec<u32> = Vec::new();
            let mut indices = Vec::new();
            for triangle in group.indices[start..].chunks_exact(3) {
                start += 3;
                for &source in triangle {
                    let next = mapping.len() as u32;
                    let local = *mapping.entry(source).or_insert_with(|| {
                        seen_order.push(source);
                        next
                    });
                    indices.push(local);
                }
                if mapping.len() >= VERTEX_LIMIT - SPLIT_MARGIN {
                    break;
                }
            }
            let vertices = seen_order
                .iter()
                .map(|&source| group.vertices[source as usize])
                .collect();
            out.push(MeshGroup {
                material_id: group.material_id,
                vertices,
                indices,
            });
        }
    }
    out
}
