//! # Composite Objects
//!
//! A [`GeometryObject`] groups primitives under one position and an optional
//! Euler rotation. Its face vertex and face normal streams are expensive to
//! build (a 240-sided cylinder alone yields 2880 face vertices) so both are
//! cached until the next mutation.

use std::borrow::Cow;
use std::cell::OnceCell;

use crate::error::MeshError;
use crate::gfx::geometry::{Color, Mesh, Point3, Primitive, RenderMode};
use crate::gfx::math::Mat3;

/// Primitives sharing a position, a rotation and a shininess exponent.
///
/// The rotation pivots around `position`: every face point `p` becomes
/// `R * (p - position) + position`. Normals go through the same mapping.
#[derive(Debug, Clone)]
pub struct GeometryObject {
    position: Point3,
    rotation: Option<Point3>,
    rotation_matrix: Mat3,
    specular: f32,
    children: Vec<Primitive>,
    vertex_cache: OnceCell<Vec<Point3>>,
    normal_cache: OnceCell<Vec<Point3>>,
}

impl GeometryObject {
    /// Creates an empty composite. `rotation` holds Euler angles in degrees
    /// (x, y, z); `None` leaves the children unrotated.
    pub fn new(position: Point3, specular: f32, rotation: Option<Point3>) -> Self {
        Self {
            position,
            rotation,
            rotation_matrix: rotation.map(Mat3::from_euler_degrees).unwrap_or_default(),
            specular,
            children: Vec::new(),
            vertex_cache: OnceCell::new(),
            normal_cache: OnceCell::new(),
        }
    }

    /// Builder-style variant of [`GeometryObject::add_geometry`].
    pub fn with_geometry(mut self, primitive: impl Into<Primitive>) -> Self {
        self.add_geometry(primitive);
        self
    }

    pub fn add_geometry(&mut self, primitive: impl Into<Primitive>) {
        self.children.push(primitive.into());
        self.invalidate();
    }

    pub fn children(&self) -> &[Primitive] {
        &self.children
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn rotation(&self) -> Option<Point3> {
        self.rotation
    }

    pub fn rotation_matrix(&self) -> &Mat3 {
        &self.rotation_matrix
    }

    pub fn specular(&self) -> f32 {
        self.specular
    }

    /// Moves the pivot and every child by `delta`.
    pub fn translate(&mut self, delta: Point3) {
        self.position += delta;
        for child in &mut self.children {
            child.translate(delta);
        }
        self.invalidate();
    }

    /// Replaces the Euler rotation (degrees).
    pub fn set_rotation(&mut self, rotation: Point3) {
        self.rotation = Some(rotation);
        self.rotation_matrix = Mat3::from_euler_degrees(rotation);
        self.invalidate();
    }

    /// Adds `delta` degrees to the current Euler rotation. An unrotated
    /// object starts from zero.
    pub fn rotate(&mut self, delta: Point3) {
        let rotation = self.rotation.unwrap_or(Point3::ZERO) + delta;
        self.set_rotation(rotation);
    }

    /// Whether both face caches are currently filled.
    pub fn is_cached(&self) -> bool {
        self.vertex_cache.get().is_some() && self.normal_cache.get().is_some()
    }

    fn invalidate(&mut self) {
        self.vertex_cache.take();
        self.normal_cache.take();
    }

    fn pivot(&self, mut points: Vec<Point3>) -> Vec<Point3> {
        if self.rotation.is_some() {
            for point in &mut points {
                *point = self.rotation_matrix.transform(*point - self.position) + self.position;
            }
        }
        points
    }

    fn collect_vertices(&self) -> Vec<Point3> {
        log::trace!("rebuilding face vertices for {} children", self.children.len());
        let mut points = Vec::with_capacity(self.face_vertex_count());
        for child in &self.children {
            points.extend_from_slice(&child.face_vertices());
        }
        self.pivot(points)
    }

    fn collect_normals(&self) -> Vec<Point3> {
        let mut normals = Vec::with_capacity(self.face_vertex_count());
        for child in &self.children {
            normals.extend_from_slice(&child.face_normals());
        }
        self.pivot(normals)
    }
}

impl Mesh for GeometryObject {
    fn face_vertices(&self) -> Cow<'_, [Point3]> {
        Cow::Borrowed(self.vertex_cache.get_or_init(|| self.collect_vertices()))
    }

    fn face_normals(&self) -> Cow<'_, [Point3]> {
        Cow::Borrowed(self.normal_cache.get_or_init(|| self.collect_normals()))
    }

    fn face_colors(&self, mode: RenderMode) -> Vec<Color> {
        self.children
            .iter()
            .flat_map(|child| child.face_colors(mode))
            .collect()
    }

    fn face_specular(&self) -> Vec<f32> {
        vec![self.specular; self.face_vertex_count()]
    }

    fn face_vertex_count(&self) -> usize {
        self.children.iter().map(Mesh::face_vertex_count).sum()
    }

    fn validate(&self) -> Result<(), MeshError> {
        self.children.iter().try_for_each(Mesh::validate)
    }
}
