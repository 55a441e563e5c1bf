//! Renderable material values

use geoscene_core::Color;
use serde::{Deserialize, Serialize};

/// A concrete material, the value a material property samples to at a
/// given time.
///
/// Shader translation happens downstream; here a material is plain data
/// assigned onto a primitive's appearance each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// A single uniform color
    Color(Color),
    /// A two-color checkerboard with the given repeat counts
    Checkerboard {
        even: Color,
        odd: Color,
        repeat: [u32; 2],
    },
}

impl Material {
    /// Uniform color material
    pub fn from_color(color: Color) -> Self {
        Material::Color(color)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::Color(Color::WHITE)
    }
}
