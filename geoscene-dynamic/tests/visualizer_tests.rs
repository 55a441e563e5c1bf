//! Integration tests for the geometry visualizer driving the batch set
//! from a dynamic object collection

use geoscene_core::{Color, Point3f, SceneTime, Vector3f};
use geoscene_dynamic::*;
use geoscene_primitives::{AppearanceKind, PrimitiveCollection};
use std::cell::RefCell;
use std::rc::Rc;

fn shared_primitives() -> Rc<RefCell<PrimitiveCollection>> {
    Rc::new(RefCell::new(PrimitiveCollection::new()))
}

fn shared_objects() -> Rc<RefCell<DynamicObjectCollection>> {
    Rc::new(RefCell::new(DynamicObjectCollection::new()))
}

fn polygon_visualizer(
    primitives: &Rc<RefCell<PrimitiveCollection>>,
    objects: &Rc<RefCell<DynamicObjectCollection>>,
) -> GeometryVisualizer {
    GeometryVisualizer::new(
        primitives.clone(),
        AppearanceKind::Flat,
        objects.clone(),
        PolygonGeometryUpdater::from_object,
    )
}

fn triangle_polygon(material: Option<MaterialPropertyRef>) -> DynamicPolygon {
    DynamicPolygon {
        ring: Some(ConstantProperty::shared(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ])),
        material,
        show: None,
        fill: None,
    }
}

#[test]
fn object_without_polygon_creates_no_primitive() {
    let primitives = shared_primitives();
    let objects = shared_objects();
    objects.borrow_mut().get_or_create("test");

    let mut visualizer = polygon_visualizer(&primitives, &objects);
    visualizer.update(SceneTime::EPOCH).unwrap();
    assert!(primitives.borrow().is_empty());
}

#[test]
fn polygon_without_ring_creates_no_primitive() {
    let primitives = shared_primitives();
    let objects = shared_objects();
    let object = objects.borrow_mut().get_or_create("test");
    object.borrow_mut().set_polygon(Some(DynamicPolygon {
        show: Some(ConstantProperty::shared(true)),
        ..Default::default()
    }));

    let mut visualizer = polygon_visualizer(&primitives, &objects);
    visualizer.update(SceneTime::EPOCH).unwrap();
    assert!(primitives.borrow().is_empty());
}

#[test]
fn unfilled_polygon_creates_no_primitive() {
    let primitives = shared_primitives();
    let objects = shared_objects();
    let object = objects.borrow_mut().get_or_create("test");
    let mut polygon = triangle_polygon(None);
    polygon.fill = Some(ConstantProperty::shared(false));
    object.borrow_mut().set_polygon(Some(polygon));

    let mut visualizer = polygon_visualizer(&primitives, &objects);
    visualizer.update(SceneTime::EPOCH).unwrap();
    assert!(primitives.borrow().is_empty());

    // filling the polygon back in makes it qualify again
    let mut polygon = triangle_polygon(None);
    polygon.fill = Some(ConstantProperty::shared(true));
    object.borrow_mut().set_polygon(Some(polygon));
    visualizer.update(SceneTime::EPOCH).unwrap();
    assert_eq!(primitives.borrow().len(), 1);
}

#[test]
fn qualifying_polygon_creates_and_patches_a_primitive() {
    let t0 = SceneTime::EPOCH;
    let primitives = shared_primitives();
    let objects = shared_objects();
    let object = objects.borrow_mut().get_or_create("test");

    let mut show = IntervalProperty::new();
    show.add_interval(t0, true);
    show.add_interval(t0.offset(10.0), false);
    let mut polygon = triangle_polygon(Some(Rc::new(ColorMaterialProperty::from_color(
        Color::GREEN,
    ))));
    polygon.show = Some(Rc::new(show));
    object.borrow_mut().set_polygon(Some(polygon));

    let mut visualizer = polygon_visualizer(&primitives, &objects);
    visualizer.update(t0).unwrap();
    assert_eq!(primitives.borrow().len(), 1);

    // the next frame patches the show attribute in place
    visualizer.update(t0.offset(10.0)).unwrap();
    let collection = primitives.borrow();
    let (_, primitive) = collection.iter().next().unwrap();
    let index = primitive.attribute_index("test").unwrap();
    assert!(!primitive.attributes(index).show);
}

#[test]
fn removing_the_object_removes_its_primitive() {
    let primitives = shared_primitives();
    let objects = shared_objects();
    let object = objects.borrow_mut().get_or_create("test");
    object
        .borrow_mut()
        .set_polygon(Some(triangle_polygon(None)));

    let mut visualizer = polygon_visualizer(&primitives, &objects);
    visualizer.update(SceneTime::EPOCH).unwrap();
    assert_eq!(primitives.borrow().len(), 1);

    objects.borrow_mut().remove("test");
    visualizer.update(SceneTime::EPOCH).unwrap();
    assert!(primitives.borrow().is_empty());
}

#[test]
fn redefining_the_polygon_rebuilds_its_updater() {
    let primitives = shared_primitives();
    let objects = shared_objects();
    let object = objects.borrow_mut().get_or_create("test");
    object.borrow_mut().set_polygon(Some(triangle_polygon(Some(
        Rc::new(ColorMaterialProperty::from_color(Color::RED)),
    ))));

    let mut visualizer = polygon_visualizer(&primitives, &objects);
    visualizer.update(SceneTime::EPOCH).unwrap();
    assert_eq!(primitives.borrow().len(), 1);

    // assigning a new material moves the object into a different batch
    object.borrow_mut().set_polygon(Some(triangle_polygon(Some(
        Rc::new(ColorMaterialProperty::from_color(Color::BLUE)),
    ))));
    visualizer.update(SceneTime::EPOCH).unwrap();

    assert_eq!(primitives.borrow().len(), 1);
    let batches = visualizer.batches().batches();
    assert_eq!(batches.len(), 2);
    assert!(batches[0].is_empty());
    assert!(batches[1].contains("test"));
}

#[test]
fn updater_factory_errors_propagate() {
    let primitives = shared_primitives();
    let objects = shared_objects();
    let object = objects.borrow_mut().get_or_create("test");
    object.borrow_mut().set_polygon(Some(DynamicPolygon {
        ring: Some(ConstantProperty::shared(vec![
            Point3f::origin(),
            Point3f::new(1.0, 0.0, 0.0),
        ])),
        ..Default::default()
    }));

    let mut visualizer = polygon_visualizer(&primitives, &objects);
    assert!(visualizer.update(SceneTime::EPOCH).is_err());
}

#[test]
fn ellipsoid_visualizer_works_end_to_end() {
    let primitives = shared_primitives();
    let objects = shared_objects();
    let object = objects.borrow_mut().get_or_create("globe");
    object.borrow_mut().set_ellipsoid(Some(DynamicEllipsoid {
        radii: Some(ConstantProperty::shared(Vector3f::new(2.0, 2.0, 1.0))),
        material: Some(Rc::new(ColorMaterialProperty::from_color(Color::BLUE))),
        ..Default::default()
    }));

    let mut visualizer = GeometryVisualizer::new(
        primitives.clone(),
        AppearanceKind::Shaded,
        objects.clone(),
        EllipsoidGeometryUpdater::from_object,
    );
    visualizer.update(SceneTime::EPOCH).unwrap();

    let collection = primitives.borrow();
    assert_eq!(collection.len(), 1);
    let (_, primitive) = collection.iter().next().unwrap();
    assert_eq!(primitive.instance_count(), 1);
    assert!(primitive.vertex_count() > 0);
    assert!(primitive.appearance().closed);
}

#[test]
fn destroy_detaches_everything() {
    let primitives = shared_primitives();
    let objects = shared_objects();
    let object = objects.borrow_mut().get_or_create("test");
    object
        .borrow_mut()
        .set_polygon(Some(triangle_polygon(None)));

    let mut visualizer = polygon_visualizer(&primitives, &objects);
    visualizer.update(SceneTime::EPOCH).unwrap();
    assert_eq!(primitives.borrow().len(), 1);

    visualizer.destroy();
    assert!(primitives.borrow().is_empty());
}
