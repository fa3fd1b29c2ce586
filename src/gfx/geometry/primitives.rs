//! # Primitive Shape Generation
//!
//! Generators for the closed solids the scene is assembled from. Each
//! generator owns a [`Geometry`] and rebuilds its control points in place when
//! translated, so the topology (the index list) is generated only once.

use std::borrow::Cow;

use super::{Color, Geometry, Mesh, NormalLayout, Point3, RenderMode};
use crate::error::MeshError;

/// Closed N-sided prism centered on `position`, or a frustum when the two
/// ring radii differ.
///
/// Control point layout for `n` sides:
///
/// | Index        | Point                                      |
/// |--------------|--------------------------------------------|
/// | `0`          | top center, `z + height / 2`               |
/// | `1..=n`      | top ring (upper radius), `z + height / 2`  |
/// | `n + 1`      | bottom center, `z - height / 4`            |
/// | `n + 2..`    | bottom ring (lower radius), `z - height / 2` |
///
/// Ring point `k` sits at angle `k * 360 / n` degrees measured from +Y
/// towards +X (`x = r sin`, `y = r cos`). Four-sided prisms are turned by 45
/// degrees so they come out axis aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularPolygonPrism {
    position: Point3,
    height: f32,
    sides: u32,
    lower_radius: f32,
    upper_radius: f32,
    geometry: Geometry,
}

impl RegularPolygonPrism {
    /// Builds the prism. `upper_radius` defaults to `lower_radius`.
    pub fn new(
        position: Point3,
        height: f32,
        sides: u32,
        color: Color,
        lower_radius: f32,
        upper_radius: Option<f32>,
    ) -> Result<Self, MeshError> {
        if sides < 3 {
            return Err(MeshError::TooFewSides(sides));
        }
        Ok(Self::build(
            position,
            height,
            sides,
            color,
            lower_radius,
            upper_radius.unwrap_or(lower_radius),
        ))
    }

    fn build(
        position: Point3,
        height: f32,
        sides: u32,
        color: Color,
        lower_radius: f32,
        upper_radius: f32,
    ) -> Self {
        let mut prism = Self {
            position,
            height,
            sides,
            lower_radius,
            upper_radius,
            geometry: Geometry::new(color, NormalLayout::PerQuad),
        };
        prism.build_vertices();
        prism.build_indices();
        prism.geometry.compute_flat_normals();
        prism
    }

    /// Sets the shininess exponent used for every face vertex.
    pub fn with_specular(mut self, specular: f32) -> Self {
        self.geometry.set_specular(specular);
        self
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn lower_radius(&self) -> f32 {
        self.lower_radius
    }

    pub fn upper_radius(&self) -> f32 {
        self.upper_radius
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Moves the prism and regenerates its control points and normals.
    pub fn translate(&mut self, delta: Point3) {
        self.position += delta;
        self.geometry.clear_positions();
        self.build_vertices();
        self.geometry.compute_flat_normals();
    }

    fn ring_point(&self, step: u32, radius: f32, z: f32) -> Point3 {
        let offset = if self.sides == 4 { 45.0 } else { 0.0 };
        let degrees = step as f32 * 360.0 / self.sides as f32 + offset;
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point3::new(
            self.position.x + radius * sin,
            self.position.y + radius * cos,
            z,
        )
    }

    fn build_vertices(&mut self) {
        let top = self.position.z + self.height / 2.0;
        let bottom = self.position.z - self.height / 2.0;

        self.geometry
            .add_vertex(Point3::new(self.position.x, self.position.y, top));
        for step in 0..self.sides {
            let point = self.ring_point(step, self.upper_radius, top);
            self.geometry.add_vertex(point);
        }

        self.geometry.add_vertex(Point3::new(
            self.position.x,
            self.position.y,
            self.position.z - self.height / 4.0,
        ));
        for step in 0..self.sides {
            let point = self.ring_point(step, self.lower_radius, bottom);
            self.geometry.add_vertex(point);
        }
    }

    fn build_indices(&mut self) {
        let n = self.sides;
        let bottom_center = n + 1;

        // Top cap
        for v in 1..n {
            self.geometry.add_indices(&[0, v, v + 1]);
        }
        self.geometry.add_indices(&[0, n, 1]);

        // Bottom cap
        for v in 1..n {
            self.geometry
                .add_indices(&[bottom_center, bottom_center + v, bottom_center + v + 1]);
        }
        self.geometry
            .add_indices(&[bottom_center, 2 * n + 1, bottom_center + 1]);

        // Side walls
        for f in 1..n {
            self.geometry.add_indices(&[f, f + 1, n + 1 + f]);
            self.geometry.add_indices(&[f + 1, n + 1 + f, n + 2 + f]);
        }
        self.geometry.add_indices(&[n, 1, 2 * n + 1]);
        self.geometry.add_indices(&[1, n + 2, 2 * n + 1]);
    }
}

/// Smooth-looking cylinder or cone frustum: a prism with [`Cylinder::SIDES`]
/// sides.
pub struct Cylinder;

impl Cylinder {
    pub const SIDES: u32 = 240;

    pub fn new(
        position: Point3,
        height: f32,
        color: Color,
        lower_radius: f32,
        upper_radius: Option<f32>,
    ) -> RegularPolygonPrism {
        RegularPolygonPrism::build(
            position,
            height,
            Self::SIDES,
            color,
            lower_radius,
            upper_radius.unwrap_or(lower_radius),
        )
    }
}

/// Axis-aligned cube with one flat normal per triangle.
///
/// Normals face the cube center, so a light placed inside the cube (the
/// light marker use case) shades every face.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    position: Point3,
    side: f32,
    geometry: Geometry,
}

impl Cuboid {
    /// Magnitude of the stored normals.
    pub const NORMAL_SCALE: f32 = 1000.0;

    const INDICES: [u32; 36] = [
        0, 1, 2, 0, 3, 2, // top
        0, 4, 5, 0, 1, 5, // +y
        1, 5, 6, 1, 2, 6, // +x
        5, 4, 7, 5, 6, 7, // bottom
        0, 4, 7, 0, 3, 7, // -x
        3, 2, 6, 3, 7, 6, // -y
    ];

    pub fn new(position: Point3, side: f32, color: Color, specular: f32) -> Self {
        let mut geometry = Geometry::new(color, NormalLayout::PerTriangle);
        geometry.set_specular(specular);
        geometry.add_indices(&Self::INDICES);

        let s = Self::NORMAL_SCALE;
        for normal in [
            Point3::new(0.0, 0.0, -s),
            Point3::new(0.0, -s, 0.0),
            Point3::new(-s, 0.0, 0.0),
            Point3::new(0.0, 0.0, s),
            Point3::new(s, 0.0, 0.0),
            Point3::new(0.0, s, 0.0),
        ] {
            geometry.add_normal(normal);
            geometry.add_normal(normal);
        }

        let mut cuboid = Self {
            position,
            side,
            geometry,
        };
        cuboid.build_vertices();
        cuboid
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn side(&self) -> f32 {
        self.side
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Moves the cube. Normals are directions and stay untouched.
    pub fn translate(&mut self, delta: Point3) {
        self.position += delta;
        self.build_vertices();
    }

    fn build_vertices(&mut self) {
        let h = self.side / 2.0;
        let Point3 { x, y, z } = self.position;
        let corners = [
            Point3::new(x - h, y + h, z + h),
            Point3::new(x + h, y + h, z + h),
            Point3::new(x + h, y - h, z + h),
            Point3::new(x - h, y - h, z + h),
            Point3::new(x - h, y + h, z - h),
            Point3::new(x + h, y + h, z - h),
            Point3::new(x + h, y - h, z - h),
            Point3::new(x - h, y - h, z - h),
        ];
        self.geometry.clear_vertices();
        self.geometry.add_vertices(&corners);
    }
}

/// Closed set of primitive shapes a composite object can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Prism(RegularPolygonPrism),
    Cuboid(Cuboid),
}

impl Primitive {
    pub fn geometry(&self) -> &Geometry {
        match self {
            Primitive::Prism(prism) => prism.geometry(),
            Primitive::Cuboid(cuboid) => cuboid.geometry(),
        }
    }

    pub fn position(&self) -> Point3 {
        match self {
            Primitive::Prism(prism) => prism.position(),
            Primitive::Cuboid(cuboid) => cuboid.position(),
        }
    }

    pub fn translate(&mut self, delta: Point3) {
        match self {
            Primitive::Prism(prism) => prism.translate(delta),
            Primitive::Cuboid(cuboid) => cuboid.translate(delta),
        }
    }
}

impl From<RegularPolygonPrism> for Primitive {
    fn from(prism: RegularPolygonPrism) -> Self {
        Primitive::Prism(prism)
    }
}

impl From<Cuboid> for Primitive {
    fn from(cuboid: Cuboid) -> Self {
        Primitive::Cuboid(cuboid)
    }
}

macro_rules! mesh_via_geometry {
    ($($ty:ty),*) => {
        $(
            impl Mesh for $ty {
                fn face_vertices(&self) -> Cow<'_, [Point3]> {
                    Cow::Owned(self.geometry().face_vertices())
                }

                fn face_normals(&self) -> Cow<'_, [Point3]> {
                    Cow::Owned(self.geometry().face_normals())
                }

                fn face_colors(&self, mode: RenderMode) -> Vec<Color> {
                    self.geometry().face_colors(mode)
                }

                fn face_specular(&self) -> Vec<f32> {
                    self.geometry().face_specular()
                }

                fn face_vertex_count(&self) -> usize {
                    self.geometry().indices().len()
                }

                fn validate(&self) -> Result<(), MeshError> {
                    self.geometry().validate()
                }
            }
        )*
    };
}

mesh_via_geometry!(RegularPolygonPrism, Cuboid, Primitive);

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn prism(sides: u32) -> RegularPolygonPrism {
        RegularPolygonPrism::new(Point3::ZERO, 2.0, sides, Color::WHITE, 1.0, None).unwrap()
    }

    #[test]
    fn test_prism_triangle_counts() {
        for sides in [3, 4, 5, 8, 17, Cylinder::SIDES] {
            let prism = prism(sides);
            let geometry = prism.geometry();
            let n = sides as usize;
            assert_eq!(geometry.vertices().len(), 2 * n + 2);
            assert_eq!(geometry.indices().len(), 12 * n);
            assert_eq!(geometry.triangle_count(), 4 * n);
            assert_eq!(geometry.normals().len(), 2 * n);
            assert!(geometry.indices().iter().all(|&i| (i as usize) < 2 * n + 2));
            assert!(prism.validate().is_ok());
        }
    }

    #[test]
    fn test_prism_rejects_too_few_sides() {
        let result = RegularPolygonPrism::new(Point3::ZERO, 1.0, 2, Color::WHITE, 1.0, None);
        assert_eq!(result, Err(MeshError::TooFewSides(2)));
    }

    #[test]
    fn test_square_prism_is_axis_aligned() {
        let prism = prism(4);
        let vertex = prism.geometry().vertices()[1];
        let expected = Point3::new(45f32.to_radians().sin(), 45f32.to_radians().cos(), 1.0);
        assert!(vertex.approx_eq(expected, EPS));
        assert!(vertex.approx_eq(Point3::new(0.7071, 0.7071, 1.0), EPS));
    }

    #[test]
    fn test_ring_layout() {
        let prism = RegularPolygonPrism::new(
            Point3::new(1.0, 2.0, 3.0),
            4.0,
            6,
            Color::WHITE,
            2.0,
            Some(0.5),
        )
        .unwrap();
        let vertices = prism.geometry().vertices();

        assert_eq!(vertices[0], Point3::new(1.0, 2.0, 5.0));
        // Angle zero points along +Y
        assert!(vertices[1].approx_eq(Point3::new(1.0, 2.5, 5.0), EPS));
        // Bottom center sits a quarter height below the center
        assert_eq!(vertices[7], Point3::new(1.0, 2.0, 2.0));
        assert!(vertices[8].approx_eq(Point3::new(1.0, 4.0, 1.0), EPS));
        // Second step turns towards +X
        assert!(vertices[9].x > 1.0);
        for v in &vertices[8..] {
            let r = ((v.x - 1.0).powi(2) + (v.y - 2.0).powi(2)).sqrt();
            assert!((r - 2.0).abs() < EPS);
        }
    }

    #[test]
    fn test_face_vertices_match_indices() {
        let prism = prism(7);
        let faces = prism.face_vertices();
        let geometry = prism.geometry();
        assert_eq!(faces.len(), geometry.indices().len());
        for (face, &index) in faces.iter().zip(geometry.indices()) {
            assert_eq!(*face, geometry.vertices()[index as usize]);
        }
    }

    #[test]
    fn test_stream_lengths_agree() {
        let prism = prism(9).with_specular(16.0);
        let count = prism.face_vertex_count();
        assert_eq!(prism.face_normals().len(), count);
        assert_eq!(prism.face_colors(RenderMode::default()).len(), count);
        assert_eq!(prism.face_specular(), vec![16.0; count]);
    }

    #[test]
    fn test_normals_point_away_from_the_solid() {
        let prism = prism(8);
        let normals = prism.geometry().normals();
        // Groups of 6 indices: n/2 top groups, n/2 bottom groups, n wall groups
        assert!(normals[..4].iter().all(|n| n.z > 0.0));
        assert!(normals[4..8].iter().all(|n| n.z < 0.0));
        for (group, normal) in normals[8..].iter().enumerate() {
            let first_index = prism.geometry().indices()[(8 + group) * 6];
            let vertex = prism.geometry().vertices()[first_index as usize];
            let radial = Point3::new(vertex.x, vertex.y, 0.0);
            assert!(normal.dot(radial) > 0.0, "wall group {group} points inward");
        }
    }

    #[test]
    fn test_translate_rebuilds_vertices() {
        let mut prism = prism(5);
        let before = prism.face_vertices().into_owned();
        let delta = Point3::new(0.5, -1.0, 2.0);
        prism.translate(delta);

        assert_eq!(prism.position(), delta);
        let after = prism.face_vertices();
        assert_eq!(after.len(), before.len());
        for (a, b) in after.iter().zip(&before) {
            assert!(a.approx_eq(*b + delta, EPS));
        }
        assert_eq!(prism.geometry().normals().len(), 10);
    }

    #[test]
    fn test_cylinder_preset() {
        let cylinder = Cylinder::new(Point3::ZERO, 1.0, Color::BLACK, 0.3, Some(0.1));
        assert_eq!(cylinder.sides(), 240);
        assert_eq!(cylinder.upper_radius(), 0.1);
        assert_eq!(cylinder.face_vertex_count(), 12 * 240);
    }

    #[test]
    fn test_cuboid_layout() {
        let cube = Cuboid::new(Point3::new(0.0, 1.0, 0.0), 0.1, Color::WHITE, 32.0);
        let geometry = cube.geometry();
        assert_eq!(geometry.vertices().len(), 8);
        assert_eq!(geometry.triangle_count(), 12);
        assert_eq!(geometry.normals().len(), 12);
        assert!(cube.validate().is_ok());
        assert!(geometry.vertices()[0].approx_eq(Point3::new(-0.05, 1.05, 0.05), EPS));
        assert!(geometry.vertices()[6].approx_eq(Point3::new(0.05, 0.95, -0.05), EPS));
        assert_eq!(cube.face_specular(), vec![32.0; 36]);
    }

    #[test]
    fn test_cuboid_normals_face_center() {
        let cube = Cuboid::new(Point3::new(3.0, -2.0, 1.0), 2.0, Color::WHITE, 1.0);
        let faces = cube.face_vertices();
        let normals = cube.face_normals();
        for (triangle, normal) in faces.chunks(3).zip(normals.chunks(3)) {
            let centroid = (triangle[0] + triangle[1] + triangle[2]) * (1.0 / 3.0);
            let to_center = cube.position() - centroid;
            assert!(normal[0].dot(to_center) > 0.0);
            assert!(normal.iter().all(|n| *n == normal[0]));
        }
    }

    #[test]
    fn test_cuboid_translate_keeps_normals() {
        let mut cube = Cuboid::new(Point3::ZERO, 1.0, Color::WHITE, 1.0);
        let normals = cube.geometry().normals().to_vec();
        cube.translate(Point3::new(0.0, 0.05, 0.0));
        assert_eq!(cube.geometry().normals(), normals.as_slice());
        assert!(cube.geometry().vertices()[0].approx_eq(Point3::new(-0.5, 0.55, 0.5), EPS));
    }

    #[test]
    fn test_cuboid_translate_twice_keeps_normal_count() {
        let mut cube = Cuboid::new(Point3::ZERO, 1.0, Color::WHITE, 1.0);
        cube.translate(Point3::new(0.0, 0.05, 0.0));
        cube.translate(Point3::new(0.0, -0.05, 0.0));
        assert_eq!(cube.geometry().vertices().len(), 8);
        assert_eq!(cube.geometry().normals().len(), 12);
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn test_primitive_dispatch() {
        let mut primitive: Primitive = prism(4).into();
        primitive.translate(Point3::new(1.0, 0.0, 0.0));
        assert_eq!(primitive.position(), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(primitive.face_vertex_count(), 48);

        let cube: Primitive = Cuboid::new(Point3::ZERO, 1.0, Color::WHITE, 1.0).into();
        assert_eq!(cube.face_vertex_count(), 36);
    }
}
