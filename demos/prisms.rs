//! Two perfume bottles stacked from cylinders, lit by a small white box.
//!
//! W/S move the light, A/D pan the camera, Enter toggles world rotation and
//! a left click toggles random face colors.

use revolve::gfx::geometry::{Color, Cuboid, Cylinder, Point3};
use revolve::gfx::scene::{GeometryObject, Scene};
use revolve::RenderConfig;

const CREAM: Color = Color::new(0.9, 0.75, 0.54, 1.0);
const BLACK: Color = Color::new(0.01, 0.01, 0.01, 1.0);
const RED: Color = Color::new(200.0 / 255.0, 10.0 / 255.0, 75.0 / 255.0, 1.0);

/// (z offset, height, color, lower radius, upper radius)
const BOTTLE: [(f32, f32, Color, f32, Option<f32>); 7] = [
    (0.6845, 0.115, CREAM, 0.1, None),
    (0.49575, 0.2625, CREAM, 0.2625, None),
    (0.3410635, 0.015625, BLACK, 0.2325, Some(0.225)),
    (0.264125, 0.1, RED, 0.375, None),
    (0.014125, 0.4, RED, 0.375, None),
    (-0.285875, 0.2, RED, 0.375, None),
    (-0.385875, 0.99, RED, 0.375, None),
];

fn bottle(position: Point3, specular: f32, rotation: Point3) -> GeometryObject {
    let mut object = GeometryObject::new(position, specular, Some(rotation));
    for (dz, height, color, lower, upper) in BOTTLE {
        let center = position + Point3::new(0.0, 0.0, dz);
        object.add_geometry(Cylinder::new(center, height, color, lower, upper));
    }
    object
}

fn main() -> anyhow::Result<()> {
    let config = RenderConfig::default().with_title("Perfume bottles");
    let mut scene = Scene::new(&config);

    scene.add_object(bottle(
        Point3::new(-1.0, 0.0, 0.0),
        8.0,
        Point3::new(0.0, -65.0, -90.0),
    ));
    scene.add_object(bottle(
        Point3::new(1.0, 0.0, 0.0),
        150.0,
        Point3::new(-90.0, -45.0, 0.0),
    ));
    let light = scene.add_object(Cuboid::new(Point3::ZERO, 0.25, Color::WHITE, 1.0));
    scene.set_light_marker(light);

    revolve::run(config, scene)
}
