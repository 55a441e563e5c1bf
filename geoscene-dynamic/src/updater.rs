//! Per-object geometry updaters

use crate::material_property::MaterialPropertyRef;
use crate::object::DynamicObject;
use crate::property::PropertyRef;
use geoscene_core::{Geometry, Result, SceneTime};
use geoscene_primitives::{AttributeIndex, GeometryInstance};
use std::cell::RefCell;
use std::rc::Rc;

/// Adapter between one dynamic object's geometry-relevant state and the
/// batching layer. One updater exists per object per geometry kind while
/// the object exposes that kind.
///
/// An updater belongs to at most one batch at a time. The attribute cache
/// is written by the owning batch once its primitive exists and is cleared
/// by the batch whenever that primitive is rebuilt.
pub trait GeometryUpdater {
    /// Stable identity, shared with the dynamic object
    fn id(&self) -> &str;

    /// Build the immutable geometry instance submitted to the renderer
    fn create_geometry_instance(&self) -> GeometryInstance;

    /// The material this updater renders with, used for batch grouping.
    /// `None` means no material has been assigned yet.
    fn material_property(&self) -> Option<&MaterialPropertyRef>;

    /// Per-frame visibility, when the object carries one
    fn show_property(&self) -> Option<&PropertyRef<bool>>;

    /// Cached attribute slot within the owning batch's primitive
    fn attributes(&self) -> Option<AttributeIndex>;

    fn set_attributes(&mut self, index: Option<AttributeIndex>);
}

/// Shared handle to an updater; the visualizer keeps one for lifecycle
/// decisions while the owning batch mutates the attribute cache
pub type UpdaterRef = Rc<RefCell<dyn GeometryUpdater>>;

/// Tessellation used for ellipsoid updaters
const ELLIPSOID_STACKS: usize = 16;
const ELLIPSOID_SLICES: usize = 32;

/// Whether fill geometry should be built: an absent fill property means
/// filled, a present one gates on its sampled value
fn sample_fill(fill: &Option<PropertyRef<bool>>, time: SceneTime) -> bool {
    fill.as_ref()
        .and_then(|f| f.sample(time))
        .unwrap_or(true)
}

/// Updater for objects exposing an ellipsoid descriptor
pub struct EllipsoidGeometryUpdater {
    id: String,
    geometry: Geometry,
    material: Option<MaterialPropertyRef>,
    show: Option<PropertyRef<bool>>,
    attributes: Option<AttributeIndex>,
}

impl EllipsoidGeometryUpdater {
    /// Build an updater for `object` if it exposes a well-defined, filled
    /// ellipsoid at `time`; `Ok(None)` when it does not qualify.
    pub fn from_object(object: &DynamicObject, time: SceneTime) -> Result<Option<UpdaterRef>> {
        let Some(ellipsoid) = object.ellipsoid() else {
            return Ok(None);
        };
        if !sample_fill(&ellipsoid.fill, time) {
            return Ok(None);
        }
        let Some(radii) = ellipsoid.radii.as_ref().and_then(|r| r.sample(time)) else {
            return Ok(None);
        };
        let geometry = Geometry::ellipsoid(radii, ELLIPSOID_STACKS, ELLIPSOID_SLICES)?;
        Ok(Some(Rc::new(RefCell::new(Self {
            id: object.id().to_owned(),
            geometry,
            material: ellipsoid.material.clone(),
            show: ellipsoid.show.clone(),
            attributes: None,
        }))))
    }
}

impl GeometryUpdater for EllipsoidGeometryUpdater {
    fn id(&self) -> &str {
        &self.id
    }

    fn create_geometry_instance(&self) -> GeometryInstance {
        GeometryInstance::new(self.id.clone(), self.geometry.clone())
    }

    fn material_property(&self) -> Option<&MaterialPropertyRef> {
        self.material.as_ref()
    }

    fn show_property(&self) -> Option<&PropertyRef<bool>> {
        self.show.as_ref()
    }

    fn attributes(&self) -> Option<AttributeIndex> {
        self.attributes
    }

    fn set_attributes(&mut self, index: Option<AttributeIndex>) {
        self.attributes = index;
    }
}

/// Updater for objects exposing a polygon descriptor
pub struct PolygonGeometryUpdater {
    id: String,
    geometry: Geometry,
    material: Option<MaterialPropertyRef>,
    show: Option<PropertyRef<bool>>,
    attributes: Option<AttributeIndex>,
}

impl PolygonGeometryUpdater {
    /// Build an updater for `object` if it exposes a filled polygon with
    /// a well-defined boundary ring at `time`
    pub fn from_object(object: &DynamicObject, time: SceneTime) -> Result<Option<UpdaterRef>> {
        let Some(polygon) = object.polygon() else {
            return Ok(None);
        };
        if !sample_fill(&polygon.fill, time) {
            return Ok(None);
        }
        let Some(ring) = polygon.ring.as_ref().and_then(|r| r.sample(time)) else {
            return Ok(None);
        };
        let geometry = Geometry::polygon(&ring)?;
        Ok(Some(Rc::new(RefCell::new(Self {
            id: object.id().to_owned(),
            geometry,
            material: polygon.material.clone(),
            show: polygon.show.clone(),
            attributes: None,
        }))))
    }
}

impl GeometryUpdater for PolygonGeometryUpdater {
    fn id(&self) -> &str {
        &self.id
    }

    fn create_geometry_instance(&self) -> GeometryInstance {
        GeometryInstance::new(self.id.clone(), self.geometry.clone())
    }

    fn material_property(&self) -> Option<&MaterialPropertyRef> {
        self.material.as_ref()
    }

    fn show_property(&self) -> Option<&PropertyRef<bool>> {
        self.show.as_ref()
    }

    fn attributes(&self) -> Option<AttributeIndex> {
        self.attributes
    }

    fn set_attributes(&mut self, index: Option<AttributeIndex>) {
        self.attributes = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{DynamicEllipsoid, DynamicPolygon};
    use crate::property::ConstantProperty;
    use geoscene_core::{Point3f, Vector3f};

    #[test]
    fn object_without_ellipsoid_does_not_qualify() {
        let object = DynamicObject::new("a");
        assert!(EllipsoidGeometryUpdater::from_object(&object, SceneTime::EPOCH)
            .unwrap()
            .is_none());
    }

    #[test]
    fn ellipsoid_without_radii_does_not_qualify() {
        let mut object = DynamicObject::new("a");
        object.set_ellipsoid(Some(DynamicEllipsoid::default()));
        assert!(EllipsoidGeometryUpdater::from_object(&object, SceneTime::EPOCH)
            .unwrap()
            .is_none());
    }

    #[test]
    fn qualifying_ellipsoid_builds_an_instance() {
        let mut object = DynamicObject::new("a");
        object.set_ellipsoid(Some(DynamicEllipsoid {
            radii: Some(ConstantProperty::shared(Vector3f::new(1.0, 2.0, 3.0))),
            ..Default::default()
        }));
        let updater = EllipsoidGeometryUpdater::from_object(&object, SceneTime::EPOCH)
            .unwrap()
            .unwrap();
        let instance = updater.borrow().create_geometry_instance();
        assert_eq!(instance.id(), "a");
        assert!(!instance.geometry().is_empty());
    }

    #[test]
    fn unfilled_ellipsoid_does_not_qualify() {
        let mut object = DynamicObject::new("a");
        object.set_ellipsoid(Some(DynamicEllipsoid {
            radii: Some(ConstantProperty::shared(Vector3f::new(1.0, 1.0, 1.0))),
            fill: Some(ConstantProperty::shared(false)),
            ..Default::default()
        }));
        assert!(EllipsoidGeometryUpdater::from_object(&object, SceneTime::EPOCH)
            .unwrap()
            .is_none());
    }

    #[test]
    fn explicitly_filled_polygon_qualifies() {
        let mut object = DynamicObject::new("a");
        object.set_polygon(Some(DynamicPolygon {
            ring: Some(ConstantProperty::shared(vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ])),
            fill: Some(ConstantProperty::shared(true)),
            ..Default::default()
        }));
        assert!(PolygonGeometryUpdater::from_object(&object, SceneTime::EPOCH)
            .unwrap()
            .is_some());
    }

    #[test]
    fn degenerate_polygon_ring_is_an_error() {
        let mut object = DynamicObject::new("a");
        object.set_polygon(Some(DynamicPolygon {
            ring: Some(ConstantProperty::shared(vec![
                Point3f::origin(),
                Point3f::new(1.0, 0.0, 0.0),
            ])),
            ..Default::default()
        }));
        assert!(PolygonGeometryUpdater::from_object(&object, SceneTime::EPOCH).is_err());
    }
}
