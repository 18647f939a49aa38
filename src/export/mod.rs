use std::collections::HashMap;

pub mod bounds;
pub mod groups;
pub mod nodes;
pub mod primitives;
pub mod settings;
pub mod split;
pub mod vertex;

pub use nodes::export_nodes;

/// Material name → id mapping assigned when the container's material section
/// was written. Shared read-only across the whole node pass.
#[derive(Debug, Default, Clone)]
pub struct MaterialTable {
    positions: HashMap<String, u32>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: u32) {
        self.positions.insert(name.into(), id);
    }

    /// `None` means the material was never registered; the caller writes id 0
    /// and records a warning.
    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.positions.get(name).copied()
    }
}

impl FromIterator<(String, u32)> for MaterialTable {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Append-only sink for non-fatal diagnostics, drained by the caller after
/// the export finishes. Messages are mirrored to `tracing` as they arrive.
#[derive(Debug, Default)]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.messages.push(message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}
