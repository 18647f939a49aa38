//! Depth-first serialization of the object hierarchy into framed node
//! records.
//!
//! Every record declares its child count up front and the children follow
//! positionally, so the consumer can rebuild the tree without any offsets.
//! Objects whose name starts with `__` are kept out of the stream along with
//! their whole subtree.

use std::io::Write;

use glam::Mat4;
use itertools::Itertools;
use regex::Regex;
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::export::bounds::bounding_sphere;
use crate::export::groups::{EXCLUDE_PREFIX, MeshGroup, split_by_materials};
use crate::export::primitives::PrimitiveWriter;
use crate::export::settings::{ExportSettings, NodeProperties, NodeSettingRule};
use crate::export::split::{VERTEX_LIMIT, split_for_vertex_limit};
use crate::export::{MaterialTable, Warnings};
use crate::scene::{EvaluatedMesh, ObjectKind, Scene, SceneObject};

/// Wire tags for node classes. Skinned meshes are reserved by the format but
/// never produced here.
const CLASS_NODE: u32 = 1;
const CLASS_MESH: u32 = 2;

/// Serialize the whole scene into the container's node section.
///
/// This is the single entry point of the export pass: the hierarchy walk
/// drives material grouping, vertex-limit splitting and bounding volume
/// computation per mesh object, and appends every record to `out`. Non-fatal
/// issues land in `warnings`; any returned error means the output is not
/// usable.
pub fn export_nodes(
    scene: &Scene,
    materials: &MaterialTable,
    settings: &ExportSettings,
    warnings: &mut Warnings,
    out: &mut impl Write,
) -> ExportResult<()> {
    let known_objects = settings.compile_known_objects()?;
    let mut exporter = NodeExporter {
        writer: PrimitiveWriter::new(out),
        materials,
        rules: &settings.rules,
        known_objects,
        warnings,
    };
    exporter.write_scene(scene)
}

struct NodeExporter<'a, W: Write> {
    writer: PrimitiveWriter<W>,
    materials: &'a MaterialTable,
    rules: &'a [NodeSettingRule],
    known_objects: Vec<Regex>,
    warnings: &'a mut Warnings,
}

impl<W: Write> NodeExporter<'_, W> {
    fn write_scene(&mut self, scene: &Scene) -> ExportResult<()> {
        let root_children = scene.roots.iter().filter(|o| exportable(o)).count();
        debug!(scene = %scene.name, roots = root_children, "writing node section");

        self.write_node_record(&scene.name, root_children as u32, &Mat4::IDENTITY)?;
        // Objects with fewer children go first; the sort is stable so ties
        // keep host order.
        for root in scene
            .roots
            .iter()
            .filter(|o| exportable(o))
            .sorted_by_key(|o| o.children.len())
        {
            self.write_object(root, None)?;
        }
        Ok(())
    }

    fn write_object(
        &mut self,
        object: &SceneObject,
        parent: Option<&SceneObject>,
    ) -> ExportResult<()> {
        if !exportable(object) {
            return Ok(());
        }
        if let (ObjectKind::Mesh, Some(mesh)) = (object.kind, object.mesh.as_ref()) {
            if !object.children.is_empty() {
                return Err(ExportError::MeshHasChildren {
                    object: object.name.clone(),
                });
            }
            self.write_mesh_object(object, parent, mesh)?;
        } else {
            self.write_plain_object(object)?;
        }
        for child in &object.children {
            if child.visible {
                self.write_object(child, Some(object))?;
            }
        }
        Ok(())
    }

    fn write_plain_object(&mut self, object: &SceneObject) -> ExportResult<()> {
        if !self.is_known_object(&object.name) && !any_descendant_renders(object) {
            self.warnings.push(format!(
                "Unknown logical object '{name}' might prevent other objects from loading. \
                 Rename it to '__{name}' if you do not want to export it.",
                name = object.name
            ));
        }
        let child_count = object.children.iter().filter(|c| exportable(c)).count();
        self.write_node_record(&object.name, child_count as u32, &object.local_transform)
    }

    fn write_mesh_object(
        &mut self,
        object: &SceneObject,
        parent: Option<&SceneObject>,
        mesh: &EvaluatedMesh,
    ) -> ExportResult<()> {
        let groups = split_by_materials(object, mesh, self.materials)?;
        let groups = split_for_vertex_limit(groups);
        debug!(object = %object.name, groups = groups.len(), "writing mesh object");

        // A mesh that sits under a parent, or that split into several groups,
        // needs a wrapping node to carry the transform and child count. A
        // lone top-level group is written directly.
        if parent.is_some() || groups.len() > 1 {
            let transform = parent
                .map(|p| p.world_transform.inverse())
                .unwrap_or(Mat4::IDENTITY);
            self.write_node_record(&object.name, groups.len() as u32, &transform)?;
        }

        let mut properties = NodeProperties::default();
        if let Some(overrides) = &object.properties {
            overrides.apply_to(&mut properties);
        }
        for rule in self.rules {
            if rule.matches(&object.name) {
                rule.overrides().apply_to(&mut properties);
            }
        }

        for group in &groups {
            self.write_mesh_record(object, group, &properties)?;
        }
        Ok(())
    }

    fn write_node_record(
        &mut self,
        name: &str,
        child_count: u32,
        transform: &Mat4,
    ) -> ExportResult<()> {
        self.writer.write_u32(CLASS_NODE)?;
        self.writer.write_str(name)?;
        self.writer.write_u32(child_count)?;
        self.writer.write_bool(true)?;
        self.writer.write_mat4(transform)
    }

    fn write_mesh_record(
        &mut self,
        object: &SceneObject,
        group: &MeshGroup,
        properties: &NodeProperties,
    ) -> ExportResult<()> {
        if group.vertices.len() > VERTEX_LIMIT {
            return Err(ExportError::VertexLimitExceeded {
                object: object.name.clone(),
                count: group.vertices.len(),
                limit: VERTEX_LIMIT,
            });
        }

        self.writer.write_u32(CLASS_MESH)?;
        self.writer.write_str(&object.name)?;
        // Mesh records never carry node children.
        self.writer.write_u32(0)?;
        self.writer.write_bool(true)?;
        self.writer.write_bool(properties.cast_shadows)?;
        self.writer.write_bool(properties.visible)?;
        self.writer.write_bool(properties.transparent)?;

        self.writer.write_u32(group.vertices.len() as u32)?;
        for vertex in &group.vertices {
            self.writer.write_vec3(vertex.position)?;
            self.writer.write_vec3(vertex.normal)?;
            self.writer.write_vec2(vertex.uv)?;
            self.writer.write_vec3(vertex.tangent)?;
        }
        self.writer.write_u32(group.indices.len() as u32)?;
        for &index in &group.indices {
            self.writer.write_u16(index as u16)?;
        }

        match group.material_id {
            Some(id) => self.writer.write_u32(id)?,
            None => {
                self.warnings
                    .push(format!("No material to mesh '{}' assigned", object.name));
                self.writer.write_u32(0)?;
            }
        }
        self.writer.write_u32(properties.layer)?;
        self.writer.write_f32(properties.lod_in)?;
        self.writer.write_f32(properties.lod_out)?;
        let sphere = bounding_sphere(&group.vertices);
        self.writer.write_vec3(sphere.center)?;
        self.writer.write_f32(sphere.radius)?;
        self.writer.write_bool(properties.renderable)
    }

    fn is_known_object(&self, name: &str) -> bool {
        self.known_objects.iter().any(|regex| regex.is_match(name))
    }
}

fn exportable(object: &SceneObject) -> bool {
    object.visible && !object.name.starts_with(EXCLUDE_PREFIX)
}

/// Whether anything below `object` will produce geometry. Curves count: the
/// host turns them into meshes in other export modes, and a holder of curves
/// is not suspicious.
fn any_descendant_renders(object: &SceneObject) -> bool {
    object.children.iter().any(|child| {
        matches!(child.kind, ObjectKind::Mesh | ObjectKind::Curve) || any_descendant_renders(child)
    })
}
