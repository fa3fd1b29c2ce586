//! # Frame Streams
//!
//! CPU-side vertex attribute arrays, flattened and concatenated over every
//! scene object in registration order. The render engine uploads each array
//! into its own vertex buffer.

use crate::error::RenderError;
use crate::gfx::geometry::{Color, Mesh, Point3, RenderMode};

/// Four parallel per-vertex streams for one unindexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStreams {
    /// 3 floats per vertex.
    pub positions: Vec<f32>,
    /// 4 floats per vertex.
    pub colors: Vec<f32>,
    /// 3 floats per vertex.
    pub normals: Vec<f32>,
    /// 1 float per vertex.
    pub specular: Vec<f32>,
}

impl FrameStreams {
    /// Validates every object and gathers all four streams.
    pub fn collect<'a, M, I>(objects: I, mode: RenderMode) -> Result<Self, RenderError>
    where
        M: Mesh + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        let mut streams = FrameStreams::default();
        for (index, object) in objects.into_iter().enumerate() {
            object
                .validate()
                .map_err(|source| RenderError::Mesh { object: index, source })?;
            streams.push_geometry(object);
            streams.colors.extend(Color::flatten(&object.face_colors(mode)));
        }
        streams.validate()?;
        Ok(streams)
    }

    /// Regathers positions, normals and specular values, keeping colors.
    pub fn refresh_geometry<'a, M, I>(&mut self, objects: I) -> Result<(), RenderError>
    where
        M: Mesh + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        self.positions.clear();
        self.normals.clear();
        self.specular.clear();
        for object in objects {
            self.push_geometry(object);
        }
        self.validate()
    }

    /// Regathers colors only, for example after toggling random colors.
    pub fn refresh_colors<'a, M, I>(&mut self, objects: I, mode: RenderMode) -> Result<(), RenderError>
    where
        M: Mesh + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        self.colors.clear();
        for object in objects {
            self.colors.extend(Color::flatten(&object.face_colors(mode)));
        }
        self.validate()
    }

    fn push_geometry<M: Mesh + ?Sized>(&mut self, object: &M) {
        self.positions
            .extend(Point3::flatten(&object.face_vertices()));
        self.normals.extend(Point3::flatten(&object.face_normals()));
        self.specular.extend(object.face_specular());
    }

    /// Number of vertices the draw call covers.
    pub fn vertex_count(&self) -> u32 {
        (self.positions.len() / 3) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Fails unless all four streams describe the same number of vertices.
    pub fn validate(&self) -> Result<(), RenderError> {
        let positions = self.positions.len() / 3;
        let colors = self.colors.len() / 4;
        let normals = self.normals.len() / 3;
        let specular = self.specular.len();

        let whole = self.positions.len() % 3 == 0
            && self.colors.len() % 4 == 0
            && self.normals.len() % 3 == 0;
        if whole && positions == colors && positions == normals && positions == specular {
            Ok(())
        } else {
            Err(RenderError::StreamLengthMismatch {
                positions,
                colors,
                normals,
                specular,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::gfx::geometry::{Cuboid, Geometry, NormalLayout, Primitive, RegularPolygonPrism};

    fn meshes() -> Vec<Primitive> {
        vec![
            RegularPolygonPrism::new(Point3::ZERO, 1.0, 5, Color::WHITE, 1.0, None)
                .unwrap()
                .into(),
            Cuboid::new(Point3::new(0.0, 2.0, 0.0), 0.5, Color::BLACK, 2.0).into(),
        ]
    }

    #[test]
    fn test_collect_concatenates_in_order() {
        let meshes = meshes();
        let streams = FrameStreams::collect(&meshes, RenderMode::default()).unwrap();

        assert_eq!(streams.vertex_count(), 60 + 36);
        assert_eq!(streams.colors.len(), 96 * 4);
        assert_eq!(streams.normals.len(), 96 * 3);
        assert_eq!(streams.specular.len(), 96);
        // White prism first, then the black cube
        assert_eq!(&streams.colors[..4], &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(&streams.colors[60 * 4..61 * 4], &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(streams.specular[95], 2.0);
    }

    #[test]
    fn test_empty_scene_yields_empty_streams() {
        let meshes: Vec<Primitive> = Vec::new();
        let streams = FrameStreams::collect(&meshes, RenderMode::default()).unwrap();
        assert!(streams.is_empty());
        assert_eq!(streams.vertex_count(), 0);
    }

    #[test]
    fn test_refresh_colors_keeps_geometry() {
        let meshes = meshes();
        let mut streams = FrameStreams::collect(&meshes, RenderMode::default()).unwrap();
        let positions = streams.positions.clone();
        let fixed = streams.colors.clone();

        let mode = RenderMode::default().toggled_random_colors();
        streams.refresh_colors(&meshes, mode).unwrap();
        assert_eq!(streams.positions, positions);
        assert_eq!(streams.colors.len(), fixed.len());
        assert_ne!(streams.colors, fixed);
    }

    #[test]
    fn test_refresh_geometry_follows_translation() {
        let mut meshes = meshes();
        let mut streams = FrameStreams::collect(&meshes, RenderMode::default()).unwrap();
        let before = streams.positions[1];
        meshes[0].translate(Point3::new(0.0, 0.25, 0.0));
        streams.refresh_geometry(&meshes).unwrap();
        assert!((streams.positions[1] - (before + 0.25)).abs() < 1e-5);
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let streams = FrameStreams {
            positions: vec![0.0; 9],
            colors: vec![1.0; 12],
            normals: vec![0.0; 9],
            specular: vec![1.0; 2],
        };
        assert!(matches!(
            streams.validate(),
            Err(RenderError::StreamLengthMismatch {
                positions: 3,
                specular: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_mesh_is_reported_with_its_position() {
        let mut broken = Geometry::new(Color::WHITE, NormalLayout::PerTriangle);
        broken.add_vertices(&[Point3::ZERO; 3]);
        broken.add_indices(&[0, 1, 5]);
        broken.add_normal(Point3::ZERO);

        let good = Geometry::new(Color::WHITE, NormalLayout::PerTriangle);
        let result = FrameStreams::collect(&[good, broken], RenderMode::default());
        match result {
            Err(RenderError::Mesh { object, source }) => {
                assert_eq!(object, 1);
                assert!(matches!(source, MeshError::IndexOutOfRange { index: 5, .. }));
            }
            other => panic!("expected a mesh error, got {other:?}"),
        }
    }
}
