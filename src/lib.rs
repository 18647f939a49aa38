/// Error definitions
pub mod error;
/// Serialization of the scene graph into the container's node section
pub mod export;
/// Input scene data model (objects, evaluated meshes, texture mapping)
pub mod scene;

pub use export::nodes::export_nodes;
pub use export::{MaterialTable, Warnings};
