use thiserror::Error;

/// Errors that abort an export.
///
/// Anything recoverable is reported through [`crate::export::Warnings`]
/// instead; an `ExportError` means no usable output was produced.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("a mesh cannot contain children ('{object}')")]
    MeshHasChildren { object: String },
    #[error("object '{object}' has no material assigned")]
    NoMaterials { object: String },
    #[error("material slot {slot} for object '{object}' has no material assigned")]
    EmptyMaterialSlot { slot: u32, object: String },
    #[error("material '{material}' is ignored but is used by object '{object}'")]
    ExcludedMaterial { material: String, object: String },
    #[error("only {limit} vertices per mesh allowed ('{object}' has {count})")]
    VertexLimitExceeded {
        object: String,
        count: usize,
        limit: usize,
    },
    #[error("invalid node setting pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
