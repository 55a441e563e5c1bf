//! Drives a small time-dynamic scene through the batching pipeline and
//! prints what the renderer would see each frame.
//!
//! Run with `RUST_LOG=debug` to watch batch rebuilds happen.

use geoscene_core::{Color, Point3f, SceneTime, Vector3f};
use geoscene_dynamic::{
    ColorMaterialProperty, ConstantProperty, DynamicEllipsoid, DynamicObjectCollection,
    DynamicPolygon, EllipsoidGeometryUpdater, GeometryVisualizer, IntervalProperty,
    PolygonGeometryUpdater,
};
use geoscene_primitives::{AppearanceKind, PrimitiveCollection};
use std::cell::RefCell;
use std::rc::Rc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let primitives = Rc::new(RefCell::new(PrimitiveCollection::new()));
    let objects = Rc::new(RefCell::new(DynamicObjectCollection::new()));

    // a red triangle that blinks off at t=5
    let mut blink = IntervalProperty::new();
    blink.add_interval(SceneTime::from_seconds(0.0), true);
    blink.add_interval(SceneTime::from_seconds(5.0), false);
    {
        let mut collection = objects.borrow_mut();
        let triangle = collection.get_or_create("triangle");
        triangle.borrow_mut().set_polygon(Some(DynamicPolygon {
            ring: Some(ConstantProperty::shared(vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(10.0, 0.0, 0.0),
                Point3f::new(0.0, 10.0, 0.0),
            ])),
            material: Some(Rc::new(ColorMaterialProperty::from_color(Color::RED))),
            show: Some(Rc::new(blink)),
            fill: None,
        }));

        let globe = collection.get_or_create("globe");
        globe.borrow_mut().set_ellipsoid(Some(DynamicEllipsoid {
            radii: Some(ConstantProperty::shared(Vector3f::new(3.0, 3.0, 2.0))),
            material: Some(Rc::new(ColorMaterialProperty::from_color(Color::BLUE))),
            ..Default::default()
        }));
    }

    let mut polygons = GeometryVisualizer::new(
        primitives.clone(),
        AppearanceKind::Flat,
        objects.clone(),
        PolygonGeometryUpdater::from_object,
    );
    let mut ellipsoids = GeometryVisualizer::new(
        primitives.clone(),
        AppearanceKind::Shaded,
        objects.clone(),
        EllipsoidGeometryUpdater::from_object,
    );

    for frame in 0..8 {
        let time = SceneTime::from_seconds(frame as f64);
        polygons.update(time)?;
        ellipsoids.update(time)?;

        let collection = primitives.borrow();
        let visible: usize = collection
            .iter()
            .map(|(_, p)| {
                (0..p.instance_count())
                    .filter(|&i| p.attributes(i).show)
                    .count()
            })
            .sum();
        println!(
            "t={:>4.1}s  primitives={}  visible instances={}",
            time.seconds(),
            collection.len(),
            visible
        );
    }

    polygons.destroy();
    ellipsoids.destroy();
    Ok(())
}
