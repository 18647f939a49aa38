//! Partition a mesh by material into independently indexed vertex/index
//! buffers, baking world transforms and fixing winding for the target
//! coordinate convention.

use std::collections::BTreeSet;

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::export::MaterialTable;
use crate::export::vertex::{UvVertex, VertexPool};
use crate::scene::{EvaluatedMesh, SceneObject};

/// Names carrying this prefix are kept out of the export entirely; a used
/// material with it is an input error.
pub const EXCLUDE_PREFIX: &str = "__";

/// One (object, material) bucket: a deduplicated vertex buffer plus a
/// triangle index list into it.
#[derive(Debug, Clone)]
pub struct MeshGroup {
    /// Resolved material id, or `None` when the material was never registered
    /// (written as 0 with a warning).
    pub material_id: Option<u32>,
    pub vertices: Vec<UvVertex>,
    /// Three indices per triangle. Values stay below 2^16 after splitting.
    pub indices: Vec<u32>,
}

/// Build one [`MeshGroup`] per material actually referenced by a face.
///
/// Groups come out in ascending material-slot order so reruns are
/// byte-identical.
pub fn split_by_materials(
    object: &SceneObject,
    mesh: &EvaluatedMesh,
    materials: &MaterialTable,
) -> ExportResult<Vec<MeshGroup>> {
    if mesh.material_slots.is_empty() {
        return Err(ExportError::NoMaterials {
            object: object.name.clone(),
        });
    }

    let used: BTreeSet<u32> = mesh.faces.iter().map(|face| face.material_index).collect();
    let mut groups = Vec::with_capacity(used.len());

    for material_index in used {
        let slot = mesh.material_slots.get(material_index as usize);
        let Some(Some(material_name)) = slot else {
            return Err(ExportError::EmptyMaterialSlot {
                slot: material_index,
                object: object.name.clone(),
            });
        };
        if material_name.starts_with(EXCLUDE_PREFIX) {
            return Err(ExportError::ExcludedMaterial {
                material: material_name.clone(),
                object: object.name.clone(),
            });
        }

        let mut pool = VertexPool::new();
        let mut indices = Vec::new();
        for face in &mesh.faces {
            if face.material_index != material_index {
                continue;
            }
            let mut face_indices = Vec::with_capacity(face.loops.len());
            for &loop_index in &face.loops {
                let mesh_loop = &mesh.loops[loop_index as usize];
                let position = object
                    .world_transform
                    .transform_point3(mesh.positions[mesh_loop.vertex as usize]);
                let uv = match &mesh.uv_layer {
                    // The engine's V axis points the other way.
                    Some(layer) => {
                        let uv = layer[loop_index as usize];
                        Vec2::new(uv.x, -uv.y)
                    }
                    None => planar_uv(object, mesh, position),
                };
                face_indices.push(pool.insert(UvVertex {
                    position,
                    normal: mesh_loop.normal,
                    uv,
                    tangent: mesh_loop.tangent,
                }));
            }
            // Loop order is wound for the source convention; the target wants
            // the (1,2,0) rotation. A quad becomes two triangles sharing the
            // 2-0 diagonal.
            indices.extend([face_indices[1], face_indices[2], face_indices[0]]);
            if face_indices.len() == 4 {
                indices.extend([face_indices[2], face_indices[3], face_indices[0]]);
            }
        }

        let material_id = materials.resolve(material_name);
        debug!(
            object = %object.name,
            material = %material_name,
            vertices = pool.len(),
            triangles = indices.len() / 3,
            "built material group"
        );
        groups.push(MeshGroup {
            material_id,
            vertices: pool.into_vertices(),
            indices,
        });
    }

    Ok(groups)
}

/// UV fallback for meshes without a UV layer: project the world-space
/// position onto the XY plane, normalized by the object's bounding
/// dimensions, then run it through the active texture's mapping (identity if
/// the material has no texture).
fn planar_uv(object: &SceneObject, mesh: &EvaluatedMesh, position: Vec3) -> Vec2 {
    let mut u = position.x / object.dimensions.x;
    let mut v = position.y / object.dimensions.y;
    if let Some(mapping) = &mesh.texture_mapping {
        u = u * mapping.scale.x + mapping.translation.x;
        v = v * mapping.scale.y + mapping.translation.y;
    }
    Vec2::new(u, v)
}
