//! Render attributes attached to mesh records, and the rule machinery that
//! overrides them by object name.

use bon::Builder;
use regex::Regex;

use crate::error::{ExportError, ExportResult};

/// Per-mesh render attributes written into every mesh record.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProperties {
    pub lod_in: f32,
    pub lod_out: f32,
    pub layer: u32,
    pub cast_shadows: bool,
    pub visible: bool,
    pub transparent: bool,
    pub renderable: bool,
}

impl Default for NodeProperties {
    fn default() -> Self {
        Self {
            lod_in: 0.0,
            lod_out: 1000.0,
            layer: 0,
            cast_shadows: true,
            visible: true,
            transparent: false,
            renderable: true,
        }
    }
}

/// Partial overlay over [`NodeProperties`]; unset fields leave the current
/// value alone.
#[derive(Debug, Clone, Default, Builder)]
pub struct NodeOverrides {
    pub lod_in: Option<f32>,
    pub lod_out: Option<f32>,
    pub layer: Option<u32>,
    pub cast_shadows: Option<bool>,
    pub visible: Option<bool>,
    pub transparent: Option<bool>,
    pub renderable: Option<bool>,
}

impl NodeOverrides {
    pub fn apply_to(&self, properties: &mut NodeProperties) {
        if let Some(v) = self.lod_in {
            properties.lod_in = v;
        }
        if let Some(v) = self.lod_out {
            properties.lod_out = v;
        }
        if let Some(v) = self.layer {
            properties.layer = v;
        }
        if let Some(v) = self.cast_shadows {
            properties.cast_shadows = v;
        }
        if let Some(v) = self.visible {
            properties.visible = v;
        }
        if let Some(v) = self.transparent {
            properties.transparent = v;
        }
        if let Some(v) = self.renderable {
            properties.renderable = v;
        }
    }
}

/// One (name pattern, overrides) pair. Rules apply in declaration order, so a
/// later rule wins for any attribute both specify.
#[derive(Debug, Clone)]
pub struct NodeSettingRule {
    pattern: Regex,
    overrides: NodeOverrides,
}

impl NodeSettingRule {
    pub fn new(pattern: &str, overrides: NodeOverrides) -> ExportResult<Self> {
        let pattern = Regex::new(pattern).map_err(|source| ExportError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern, overrides })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    pub fn overrides(&self) -> &NodeOverrides {
        &self.overrides
    }
}

/// Export-wide configuration: the ordered setting rules plus the names of
/// engine-significant objects that should not trigger the unknown-object
/// warning.
#[derive(Debug, Clone, Default, Builder)]
pub struct ExportSettings {
    #[builder(default)]
    pub rules: Vec<NodeSettingRule>,
    #[builder(default)]
    pub known_objects: Vec<String>,
}

impl ExportSettings {
    /// Compile the known-object names into anchored full-name patterns.
    pub(crate) fn compile_known_objects(&self) -> ExportResult<Vec<Regex>> {
        self.known_objects
            .iter()
            .map(|name| {
                let pattern = format!("^{name}$");
                Regex::new(&pattern).map_err(|source| ExportError::InvalidPattern {
                    pattern,
                    source,
                })
            })
            .collect()
    }
}
