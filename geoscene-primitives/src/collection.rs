//! Shared collection of live primitives

use crate::primitive::Primitive;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a primitive in a `PrimitiveCollection`
    pub struct PrimitiveKey;
}

/// The set of primitives currently submitted for drawing.
///
/// Keys stay valid across unrelated insertions and removals, and a key
/// whose primitive was removed simply resolves to `None`, so holders of
/// stale keys fail soft.
#[derive(Debug, Default)]
pub struct PrimitiveCollection {
    primitives: SlotMap<PrimitiveKey, Primitive>,
}

impl PrimitiveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive, returning its handle
    pub fn add(&mut self, primitive: Primitive) -> PrimitiveKey {
        self.primitives.insert(primitive)
    }

    /// Remove a primitive by handle, returning it if it was present
    pub fn remove(&mut self, key: PrimitiveKey) -> Option<Primitive> {
        self.primitives.remove(key)
    }

    pub fn get(&self, key: PrimitiveKey) -> Option<&Primitive> {
        self.primitives.get(key)
    }

    pub fn get_mut(&mut self, key: PrimitiveKey) -> Option<&mut Primitive> {
        self.primitives.get_mut(key)
    }

    pub fn contains(&self, key: PrimitiveKey) -> bool {
        self.primitives.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveKey, &Primitive)> {
        self.primitives.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = PrimitiveKey> + '_ {
        self.primitives.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::AppearanceKind;
    use crate::instance::GeometryInstance;
    use crate::material::Material;
    use geoscene_core::{Geometry, Point3f};

    fn some_primitive() -> Primitive {
        let geometry = Geometry::polygon(&[
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        let instance = GeometryInstance::new("x", geometry);
        Primitive::new(
            &[instance],
            AppearanceKind::Flat.appearance(Material::default()),
        )
    }

    #[test]
    fn keys_survive_unrelated_removals() {
        let mut collection = PrimitiveCollection::new();
        let first = collection.add(some_primitive());
        let second = collection.add(some_primitive());
        collection.remove(first);
        assert!(collection.get(second).is_some());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn stale_keys_resolve_to_none() {
        let mut collection = PrimitiveCollection::new();
        let key = collection.add(some_primitive());
        assert!(collection.remove(key).is_some());
        assert!(collection.get(key).is_none());
        assert!(collection.remove(key).is_none());
    }
}
