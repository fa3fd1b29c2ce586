use revolve::gfx::geometry::{Color, Cuboid, Cylinder, Mesh, Point3, RegularPolygonPrism};
use revolve::gfx::scene::{GeometryObject, Scene, SceneCommand};
use revolve::{MeshError, RenderConfig, RenderError};

fn bottle(position: Point3, specular: f32, rotation: Point3) -> GeometryObject {
    GeometryObject::new(position, specular, Some(rotation))
        .with_geometry(Cylinder::new(position, 0.4, Color::WHITE, 0.375, None))
        .with_geometry(Cylinder::new(
            position + Point3::new(0.0, 0.0, 0.5),
            0.2,
            Color::BLACK,
            0.2,
            Some(0.1),
        ))
}

fn demo_scene() -> Scene {
    let mut scene = Scene::new(&RenderConfig::default());
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
    scene
}

#[test]
fn test_scene_streams_line_up() {
    let scene = demo_scene();
    let streams = scene.streams().unwrap();

    let per_bottle = 2 * 12 * Cylinder::SIDES as usize;
    let expected = 2 * per_bottle + 36;
    assert_eq!(streams.vertex_count() as usize, expected);
    assert_eq!(streams.positions.len(), expected * 3);
    assert_eq!(streams.normals.len(), expected * 3);
    assert_eq!(streams.colors.len(), expected * 4);
    assert_eq!(streams.specular.len(), expected);
    assert!(streams.validate().is_ok());

    assert_eq!(streams.specular[0], 8.0);
    assert_eq!(streams.specular[per_bottle], 150.0);
    assert_eq!(streams.specular[expected - 1], 1.0);
}

#[test]
fn test_light_move_only_shifts_the_marker() {
    let mut scene = demo_scene();
    let mut streams = scene.streams().unwrap();
    let before = streams.clone();

    scene.push_command(SceneCommand::MoveLight(Point3::new(0.0, 0.05, 0.0)));
    let update = scene.tick();
    scene.refresh_streams(&mut streams, update).unwrap();

    let marker_start = (streams.vertex_count() as usize - 36) * 3;
    assert_eq!(
        streams.positions[..marker_start],
        before.positions[..marker_start]
    );
    for (moved, original) in streams.positions[marker_start..]
        .chunks(3)
        .zip(before.positions[marker_start..].chunks(3))
    {
        assert_eq!(moved[0], original[0]);
        assert!((moved[1] - original[1] - 0.05).abs() < 1e-5);
        assert_eq!(moved[2], original[2]);
    }
    assert_eq!(streams.colors, before.colors);
}

#[test]
fn test_rotated_bottle_keeps_its_pivot() {
    let position = Point3::new(1.0, 0.0, 0.0);
    let plain = GeometryObject::new(position, 1.0, None)
        .with_geometry(Cylinder::new(position, 0.4, Color::WHITE, 0.375, None));
    let rotated = GeometryObject::new(position, 1.0, Some(Point3::new(-90.0, -45.0, 0.0)))
        .with_geometry(Cylinder::new(position, 0.4, Color::WHITE, 0.375, None));

    // Rotation preserves each point's distance from the pivot
    for (a, b) in plain.face_vertices().iter().zip(rotated.face_vertices().iter()) {
        let da = *a - position;
        let db = *b - position;
        assert!((da.dot(da) - db.dot(db)).abs() < 1e-4);
    }
}

#[test]
fn test_too_few_sides_is_rejected() {
    let result = RegularPolygonPrism::new(Point3::ZERO, 1.0, 2, Color::WHITE, 1.0, None);
    assert!(matches!(result, Err(MeshError::TooFewSides(2))));
}

#[test]
fn test_empty_scene_has_no_vertices() {
    let scene = Scene::new(&RenderConfig::default());
    let streams = scene.streams().unwrap();
    assert!(streams.is_empty());
    assert_eq!(streams.vertex_count(), 0);
}

#[test]
fn test_render_error_wraps_mesh_error() {
    let error = RenderError::Mesh {
        object: 2,
        source: MeshError::TooFewSides(2),
    };
    assert!(error.to_string().contains('2'));
}
