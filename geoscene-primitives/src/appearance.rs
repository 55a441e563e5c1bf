//! Appearance types attached to primitives

use crate::material::Material;
use serde::{Deserialize, Serialize};

/// The full appearance of a primitive: a material plus render flags.
///
/// `material` is the only part that changes after construction; batches
/// reassign it every frame from the sampled material property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub material: Material,
    pub translucent: bool,
    pub closed: bool,
    pub face_forward: bool,
}

/// The kind of appearance a batch constructs for its primitives.
///
/// A batch set is built for exactly one kind; it stamps out a fresh
/// `Appearance` with the sampled material whenever a primitive is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppearanceKind {
    /// Lit, closed surface geometry (ellipsoids and other volumes)
    Shaded,
    /// Unlit surface geometry (polygons draped on terrain)
    Flat,
}

impl AppearanceKind {
    /// Construct an appearance of this kind carrying `material`
    pub fn appearance(&self, material: Material) -> Appearance {
        match self {
            AppearanceKind::Shaded => Appearance {
                material,
                translucent: true,
                closed: true,
                face_forward: true,
            },
            AppearanceKind::Flat => Appearance {
                material,
                translucent: true,
                closed: false,
                face_forward: false,
            },
        }
    }
}
