//! Time-varying material providers

use crate::property::{property_eq, ConstantProperty, Property, PropertyRef};
use geoscene_core::{Color, SceneTime};
use geoscene_primitives::Material;
use std::any::Any;
use std::rc::Rc;

/// A time-parameterized provider of a renderable material.
///
/// Batches group updaters by `equals`, so two providers that would render
/// identically for all time must compare equal; providers of different
/// concrete kinds never do.
pub trait MaterialProperty: 'static {
    /// Sample a concrete material at `time`, or `None` when the provider
    /// has nothing to offer and the caller's fallback should be used
    fn sample(&self, time: SceneTime) -> Option<Material>;

    /// Semantic equality against another provider of any concrete kind
    fn equals(&self, other: &dyn MaterialProperty) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a material property
pub type MaterialPropertyRef = Rc<dyn MaterialProperty>;

/// Sample `property` at `time`, falling back to `fallback` when the
/// property is absent or yields nothing. Never mutates its inputs.
pub fn sample_material(
    time: SceneTime,
    property: Option<&dyn MaterialProperty>,
    fallback: &Material,
) -> Material {
    property
        .and_then(|p| p.sample(time))
        .unwrap_or_else(|| fallback.clone())
}

/// A uniform-color material driven by a color property
pub struct ColorMaterialProperty {
    color: Option<PropertyRef<Color>>,
}

impl ColorMaterialProperty {
    pub fn new(color: PropertyRef<Color>) -> Self {
        Self { color: Some(color) }
    }

    /// A color material with no color assigned yet; samples to nothing
    pub fn unspecified() -> Self {
        Self { color: None }
    }

    /// Constant-color convenience constructor
    pub fn from_color(color: Color) -> Self {
        Self::new(ConstantProperty::shared(color))
    }
}

impl MaterialProperty for ColorMaterialProperty {
    fn sample(&self, time: SceneTime) -> Option<Material> {
        let color = self.color.as_ref()?.sample(time)?;
        Some(Material::from_color(color))
    }

    fn equals(&self, other: &dyn MaterialProperty) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        match (&self.color, &other.color) {
            (None, None) => true,
            (Some(a), Some(b)) => property_eq(a, b),
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A two-color checkerboard material
pub struct CheckerboardMaterialProperty {
    even: PropertyRef<Color>,
    odd: PropertyRef<Color>,
    repeat: [u32; 2],
}

impl CheckerboardMaterialProperty {
    pub fn new(even: PropertyRef<Color>, odd: PropertyRef<Color>, repeat: [u32; 2]) -> Self {
        Self { even, odd, repeat }
    }
}

impl MaterialProperty for CheckerboardMaterialProperty {
    fn sample(&self, time: SceneTime) -> Option<Material> {
        Some(Material::Checkerboard {
            even: self.even.sample(time)?,
            odd: self.odd.sample(time)?,
            repeat: self.repeat,
        })
    }

    fn equals(&self, other: &dyn MaterialProperty) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        self.repeat == other.repeat
            && property_eq(&self.even, &other.even)
            && property_eq(&self.odd, &other.odd)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
