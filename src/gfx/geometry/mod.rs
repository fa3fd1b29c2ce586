//! # Procedural Geometry
//!
//! This module holds the mesh primitive base shared by every generated shape,
//! the [`Mesh`] capability the render streams are built from, and the
//! generators themselves.
//!
//! ## Supported Primitives
//!
//! - **Regular polygon prism**: N-gon prism or frustum, see [`RegularPolygonPrism`]
//! - **Cylinder**: a 240-sided prism preset
//! - **Cuboid**: axis-aligned box with one flat normal per triangle
//!
//! ## Usage
//!
//! ```rust
//! use revolve::gfx::geometry::{Color, Mesh, Point3, RegularPolygonPrism};
//!
//! let prism = RegularPolygonPrism::new(Point3::ZERO, 2.0, 6, Color::WHITE, 1.0, None)
//!     .expect("six sides is a valid prism");
//!
//! // One face vertex per index: 4 * 6 triangles
//! assert_eq!(prism.face_vertices().len(), 72);
//! ```

pub mod primitives;
pub mod types;

use std::borrow::Cow;

pub use primitives::*;
pub use types::{Color, Point3};

use crate::error::MeshError;

/// Scale applied to computed flat normals. Only direction matters.
pub const NORMAL_SCALE: f32 = 1_000_000.0;

/// Per-frame rendering switches passed explicitly into color generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderMode {
    /// Replace every face-vertex color with an independent random color.
    pub random_colors: bool,
}

impl RenderMode {
    pub fn toggled_random_colors(self) -> Self {
        Self {
            random_colors: !self.random_colors,
        }
    }
}

/// How the stored normals map onto indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalLayout {
    /// One normal per triangle (3 indices).
    PerTriangle,
    /// One normal per pair of triangles (6 indices), as produced by
    /// [`Geometry::compute_flat_normals`].
    PerQuad,
}

impl NormalLayout {
    /// Number of consecutive indices sharing one normal.
    pub fn indices_per_normal(self) -> usize {
        match self {
            NormalLayout::PerTriangle => 3,
            NormalLayout::PerQuad => 6,
        }
    }
}

/// Anything that can be expanded into per-face-vertex streams.
///
/// Every stream holds one entry per index of the underlying triangle list,
/// so all four always have the same length for a valid mesh.
pub trait Mesh {
    /// Vertex positions expanded along the index list.
    fn face_vertices(&self) -> Cow<'_, [Point3]>;

    /// Flat normals expanded along the index list.
    fn face_normals(&self) -> Cow<'_, [Point3]>;

    /// One color per face vertex.
    fn face_colors(&self, mode: RenderMode) -> Vec<Color>;

    /// One shininess exponent per face vertex.
    fn face_specular(&self) -> Vec<f32>;

    /// Number of entries in each stream.
    fn face_vertex_count(&self) -> usize;

    /// Checks the index invariants of every contained primitive.
    fn validate(&self) -> Result<(), MeshError>;
}

/// Mesh primitive base: unique control points, a triangle index list and
/// flat normals, with one color and one shininess value for the whole shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<Point3>,
    normals: Vec<Point3>,
    indices: Vec<u32>,
    color: Color,
    specular: f32,
    normal_layout: NormalLayout,
}

impl Geometry {
    pub fn new(color: Color, normal_layout: NormalLayout) -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            color,
            specular: 1.0,
            normal_layout,
        }
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Point3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn specular(&self) -> f32 {
        self.specular
    }

    pub fn set_specular(&mut self, specular: f32) {
        self.specular = specular;
    }

    pub fn normal_layout(&self) -> NormalLayout {
        self.normal_layout
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn add_vertex(&mut self, vertex: Point3) {
        self.vertices.push(vertex);
    }

    pub fn add_vertices(&mut self, vertices: &[Point3]) {
        self.vertices.extend_from_slice(vertices);
    }

    pub fn add_normal(&mut self, normal: Point3) {
        self.normals.push(normal);
    }

    pub fn add_index(&mut self, index: u32) {
        self.indices.push(index);
    }

    pub fn add_indices(&mut self, indices: &[u32]) {
        self.indices.extend_from_slice(indices);
    }

    /// Drops vertices ahead of a rebuild at a new position. Normals and
    /// indices are kept.
    pub(crate) fn clear_vertices(&mut self) {
        self.vertices.clear();
    }

    /// Drops vertices and normals ahead of a rebuild at a new position.
    /// Indices are kept since the topology does not move.
    pub(crate) fn clear_positions(&mut self) {
        self.clear_vertices();
        self.normals.clear();
    }

    /// Recomputes flat normals from the index list.
    ///
    /// Indices are consumed in groups of 6 and the first triangle of each
    /// group decides the normal. When all three sampled points share a z
    /// value (a flat cap) the edge operands are swapped, which flips the sign
    /// relative to the side walls.
    pub fn compute_flat_normals(&mut self) {
        self.normals.clear();
        for group in self.indices.chunks(6) {
            if group.len() < 3 {
                break;
            }
            let p1 = self.vertices[group[0] as usize];
            let p2 = self.vertices[group[1] as usize];
            let p3 = self.vertices[group[2] as usize];

            let edge1 = p2 - p1;
            let edge2 = p3 - p1;
            let normal = if p1.z == p2.z && p2.z == p3.z {
                edge2.cross(edge1)
            } else {
                edge1.cross(edge2)
            };
            self.normals.push(normal * NORMAL_SCALE);
        }
    }

    /// Checks index range, triangle alignment and normal coverage.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndicesNotTriangles(self.indices.len()));
        }
        let vertex_count = self.vertices.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }
        let per_normal = self.normal_layout.indices_per_normal();
        let needed = self.indices.len().div_ceil(per_normal);
        if self.normals.len() < needed {
            return Err(MeshError::MissingNormals {
                index_count: self.indices.len(),
                needed,
                found: self.normals.len(),
            });
        }
        Ok(())
    }

    /// `vertices[indices[i]]` for every index, in index order.
    ///
    /// # Panics
    /// Panics if an index is out of range; call [`Geometry::validate`] first
    /// for a recoverable check.
    pub fn face_vertices(&self) -> Vec<Point3> {
        self.indices
            .iter()
            .map(|&index| self.vertices[index as usize])
            .collect()
    }

    /// The normal of the triangle (or quad group) each index belongs to.
    ///
    /// # Panics
    /// Panics if fewer normals are stored than the layout requires.
    pub fn face_normals(&self) -> Vec<Point3> {
        let per_normal = self.normal_layout.indices_per_normal();
        (0..self.indices.len())
            .map(|i| self.normals[i / per_normal])
            .collect()
    }

    /// The fixed color per index, or a fresh random opaque color per index
    /// in random-color mode.
    pub fn face_colors(&self, mode: RenderMode) -> Vec<Color> {
        if mode.random_colors {
            let mut rng = rand::rng();
            (0..self.indices.len())
                .map(|_| Color::random_opaque(&mut rng))
                .collect()
        } else {
            vec![self.color; self.indices.len()]
        }
    }

    pub fn face_specular(&self) -> Vec<f32> {
        vec![self.specular; self.indices.len()]
    }
}

impl Mesh for Geometry {
    fn face_vertices(&self) -> Cow<'_, [Point3]> {
        Cow::Owned(Geometry::face_vertices(self))
    }

    fn face_normals(&self) -> Cow<'_, [Point3]> {
        Cow::Owned(Geometry::face_normals(self))
    }

    fn face_colors(&self, mode: RenderMode) -> Vec<Color> {
        Geometry::face_colors(self, mode)
    }

    fn face_specular(&self) -> Vec<f32> {
        Geometry::face_specular(self)
    }

    fn face_vertex_count(&self) -> usize {
        self.indices.len()
    }

    fn validate(&self) -> Result<(), MeshError> {
        Geometry::validate(self)
    }
}
