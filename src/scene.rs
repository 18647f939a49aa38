use glam::{Mat4, Vec2, Vec3};

use crate::export::settings::NodeOverrides;

/// The evaluated object hierarchy handed over by the host adapter.
///
/// Transforms arrive already converted to the target engine's coordinate
/// convention; the exporter never re-derives axes. The synthetic root node of
/// the output stream takes `name`.
#[derive(Debug, Default)]
pub struct Scene {
    pub name: String,
    pub roots: Vec<SceneObject>,
}

/// What kind of thing an object is, as far as the node section cares.
///
/// Only `Mesh` objects produce geometry records. `Curve` matters solely for
/// the "has a renderable descendant" heuristic that suppresses the
/// unknown-object warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Empty,
    Mesh,
    Curve,
    Other,
}

/// One object in the hierarchy.
#[derive(Debug)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub visible: bool,
    pub local_transform: Mat4,
    pub world_transform: Mat4,
    /// Object-space bounding dimensions, used by the planar UV fallback.
    pub dimensions: Vec3,
    /// Per-object attribute overrides set in the host tool, applied before
    /// any name-pattern rules.
    pub properties: Option<NodeOverrides>,
    pub mesh: Option<EvaluatedMesh>,
    pub children: Vec<SceneObject>,
}

impl SceneObject {
    /// A plain object with no geometry and sensible defaults. Tests and host
    /// adapters fill in the rest field by field.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Empty,
            visible: true,
            local_transform: Mat4::IDENTITY,
            world_transform: Mat4::IDENTITY,
            dimensions: Vec3::ONE,
            properties: None,
            mesh: None,
            children: Vec::new(),
        }
    }
}

/// Triangle-level mesh data for one object, modifiers already applied and
/// faces reduced to triangles or quads upstream.
#[derive(Debug, Default)]
pub struct EvaluatedMesh {
    /// Object-space vertex positions, indexed by [`MeshLoop::vertex`].
    pub positions: Vec<Vec3>,
    /// Per-corner data; faces reference loops by index.
    pub loops: Vec<MeshLoop>,
    pub faces: Vec<MeshFace>,
    /// Active UV layer, one entry per loop. `None` switches the exporter to
    /// the planar-projection fallback.
    pub uv_layer: Option<Vec<Vec2>>,
    /// Material slot names in slot order; `None` marks an empty slot.
    pub material_slots: Vec<Option<String>>,
    /// Mapping of the active texture on the object's material, consumed by
    /// the planar UV fallback only.
    pub texture_mapping: Option<TextureMapping>,
}

/// One face corner: which vertex it uses plus the split normal/tangent
/// computed for this corner.
#[derive(Debug, Clone, Copy)]
pub struct MeshLoop {
    pub vertex: u32,
    pub normal: Vec3,
    pub tangent: Vec3,
}

/// A triangle or quad, referencing 3 or 4 entries of [`EvaluatedMesh::loops`].
#[derive(Debug, Clone)]
pub struct MeshFace {
    pub material_index: u32,
    pub loops: Vec<u32>,
}

/// Scale/translation of the active texture's mapping node.
#[derive(Debug, Clone, Copy)]
pub struct TextureMapping {
    pub scale: Vec2,
    pub translation: Vec2,
}
