//! The dynamic object data model

use crate::material_property::MaterialPropertyRef;
use crate::property::PropertyRef;
use geoscene_core::{Point3f, Vector3f};
use std::cell::RefCell;
use std::rc::Rc;

/// An optionally time-dynamic ellipsoid descriptor
#[derive(Clone, Default)]
pub struct DynamicEllipsoid {
    /// Visibility of the ellipsoid
    pub show: Option<PropertyRef<bool>>,
    /// Radii along the x, y and z axes
    pub radii: Option<PropertyRef<Vector3f>>,
    /// Surface material
    pub material: Option<MaterialPropertyRef>,
    /// Whether the ellipsoid is filled
    pub fill: Option<PropertyRef<bool>>,
}

/// An optionally time-dynamic polygon descriptor
#[derive(Clone, Default)]
pub struct DynamicPolygon {
    /// Visibility of the polygon
    pub show: Option<PropertyRef<bool>>,
    /// The polygon's boundary ring
    pub ring: Option<PropertyRef<Vec<Point3f>>>,
    /// Surface material
    pub material: Option<MaterialPropertyRef>,
    /// Whether the polygon is filled
    pub fill: Option<PropertyRef<bool>>,
}

/// A named scene entity whose typed property bags may change over time.
///
/// Assigning a property bag bumps the revision counter; visualizers
/// compare revisions during `update` to decide when an object's updater
/// must be rebuilt.
pub struct DynamicObject {
    id: String,
    ellipsoid: Option<DynamicEllipsoid>,
    polygon: Option<DynamicPolygon>,
    revision: u64,
}

impl DynamicObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ellipsoid: None,
            polygon: None,
            revision: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Monotonic counter of definition changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn ellipsoid(&self) -> Option<&DynamicEllipsoid> {
        self.ellipsoid.as_ref()
    }

    pub fn set_ellipsoid(&mut self, ellipsoid: Option<DynamicEllipsoid>) {
        self.ellipsoid = ellipsoid;
        self.revision += 1;
    }

    pub fn polygon(&self) -> Option<&DynamicPolygon> {
        self.polygon.as_ref()
    }

    pub fn set_polygon(&mut self, polygon: Option<DynamicPolygon>) {
        self.polygon = polygon;
        self.revision += 1;
    }
}

/// Shared handle to a dynamic object
pub type DynamicObjectRef = Rc<RefCell<DynamicObject>>;

/// An ordered collection of dynamic objects, keyed by id
#[derive(Default)]
pub struct DynamicObjectCollection {
    objects: Vec<DynamicObjectRef>,
}

impl DynamicObjectCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an object by id, creating and appending it if absent
    pub fn get_or_create(&mut self, id: &str) -> DynamicObjectRef {
        if let Some(object) = self.get(id) {
            return object;
        }
        let object = Rc::new(RefCell::new(DynamicObject::new(id)));
        self.objects.push(object.clone());
        object
    }

    pub fn get(&self, id: &str) -> Option<DynamicObjectRef> {
        self.objects
            .iter()
            .find(|o| o.borrow().id() == id)
            .cloned()
    }

    /// Remove an object by id; returns whether it was present
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.borrow().id() != id);
        self.objects.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &DynamicObjectRef> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
