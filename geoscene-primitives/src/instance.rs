//! Geometry instances and their per-instance attributes

use geoscene_core::{Color, Geometry};
use serde::{Deserialize, Serialize};

/// Stable identity of a geometry instance, shared with the dynamic object
/// it visualizes
pub type InstanceId = String;

/// Mutable per-instance render attributes.
///
/// One slot per instance lives on the owning primitive; batches patch the
/// show channel each frame without rebuilding the primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstanceAttributes {
    /// Whether the instance is drawn
    pub show: bool,
    /// Per-instance color override, when the appearance supports one
    pub color: Option<Color>,
}

impl Default for InstanceAttributes {
    fn default() -> Self {
        Self {
            show: true,
            color: None,
        }
    }
}

/// An immutable (geometry, id, initial attributes) tuple submitted to the
/// renderer.
///
/// The id must round-trip through `Primitive::attribute_index` so callers
/// can find the instance's attribute slot after baking.
#[derive(Debug, Clone)]
pub struct GeometryInstance {
    id: InstanceId,
    geometry: Geometry,
    attributes: InstanceAttributes,
}

impl GeometryInstance {
    pub fn new(id: impl Into<InstanceId>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            attributes: InstanceAttributes::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: InstanceAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn initial_attributes(&self) -> InstanceAttributes {
        self.attributes
    }
}
