//! Primitives baked from groups of geometry instances

use crate::appearance::Appearance;
use crate::instance::{GeometryInstance, InstanceAttributes};
use geoscene_core::{Color, ColoredVertex, Vector3f};

/// Index of an instance's attribute slot within its primitive.
///
/// Only valid for the primitive it was resolved from; callers caching one
/// must drop it when that primitive is replaced.
pub type AttributeIndex = usize;

/// Half-open range of baked indices belonging to one instance
#[derive(Debug, Clone, Copy)]
struct InstanceRange {
    index_start: usize,
    index_end: usize,
}

/// A draw primitive baked from one or more geometry instances sharing an
/// appearance.
///
/// Baking flattens every instance geometry into a single vertex/index
/// buffer, recording per-instance index ranges so attribute edits can be
/// scoped to one instance. The buffers are immutable after construction;
/// only the appearance material and the per-instance attributes change.
#[derive(Debug)]
pub struct Primitive {
    ids: Vec<String>,
    ranges: Vec<InstanceRange>,
    attributes: Vec<InstanceAttributes>,
    vertices: Vec<ColoredVertex>,
    indices: Vec<u32>,
    appearance: Appearance,
}

impl Primitive {
    /// Bake `instances` into a single primitive with the given appearance
    pub fn new(instances: &[GeometryInstance], appearance: Appearance) -> Self {
        let mut ids = Vec::with_capacity(instances.len());
        let mut ranges = Vec::with_capacity(instances.len());
        let mut attributes = Vec::with_capacity(instances.len());
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for instance in instances {
            let geometry = instance.geometry();
            let initial = instance.initial_attributes();
            let color = initial.color.unwrap_or(Color::WHITE).to_bytes();
            let base = vertices.len() as u32;
            let index_start = indices.len();

            let fallback_normal = Vector3f::new(0.0, 0.0, 1.0);
            for (i, position) in geometry.vertices.iter().enumerate() {
                let normal = geometry
                    .normals
                    .as_ref()
                    .and_then(|n| n.get(i).copied())
                    .unwrap_or(fallback_normal);
                vertices.push(ColoredVertex {
                    position: *position,
                    normal,
                    color,
                });
            }
            for face in &geometry.faces {
                indices.push(base + face[0] as u32);
                indices.push(base + face[1] as u32);
                indices.push(base + face[2] as u32);
            }

            ids.push(instance.id().to_owned());
            ranges.push(InstanceRange {
                index_start,
                index_end: indices.len(),
            });
            attributes.push(initial);
        }

        Self {
            ids,
            ranges,
            attributes,
            vertices,
            indices,
            appearance,
        }
    }

    /// Number of instances baked into this primitive
    pub fn instance_count(&self) -> usize {
        self.ids.len()
    }

    /// Total baked vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Total baked index count
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of indices belonging to the instance at `index`
    pub fn instance_index_count(&self, index: AttributeIndex) -> usize {
        let range = self.ranges[index];
        range.index_end - range.index_start
    }

    /// The baked vertex buffer
    pub fn vertices(&self) -> &[ColoredVertex] {
        &self.vertices
    }

    /// The baked vertex buffer as raw bytes, ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The baked index buffer
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    /// Resolve the attribute slot of the instance with the given id
    pub fn attribute_index(&self, id: &str) -> Option<AttributeIndex> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    pub fn attributes(&self, index: AttributeIndex) -> &InstanceAttributes {
        &self.attributes[index]
    }

    pub fn attributes_mut(&mut self, index: AttributeIndex) -> &mut InstanceAttributes {
        &mut self.attributes[index]
    }
}
