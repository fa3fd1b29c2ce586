//! # Scene
//!
//! Ordered top-level objects plus the camera, world rotation, light and
//! render mode the frame uniforms are built from. Input arrives as
//! [`SceneCommand`] values and is applied once per frame by [`Scene::tick`].

use std::borrow::Cow;

use crate::config::RenderConfig;
use crate::error::{MeshError, RenderError};
use crate::gfx::geometry::{Color, Cuboid, Mesh, Point3, Primitive, RegularPolygonPrism, RenderMode};
use crate::gfx::math::{Mat3, Mat4};

use super::object::GeometryObject;
use super::streams::FrameStreams;

/// Handle to an object registered with [`Scene::add_object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// A top-level scene entry: a bare primitive or a composite object.
#[derive(Debug, Clone)]
pub enum SceneObject {
    Primitive(Primitive),
    Object(GeometryObject),
}

impl SceneObject {
    pub fn translate(&mut self, delta: Point3) {
        match self {
            SceneObject::Primitive(primitive) => primitive.translate(delta),
            SceneObject::Object(object) => object.translate(delta),
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut GeometryObject> {
        match self {
            SceneObject::Object(object) => Some(object),
            SceneObject::Primitive(_) => None,
        }
    }
}

impl From<Primitive> for SceneObject {
    fn from(primitive: Primitive) -> Self {
        SceneObject::Primitive(primitive)
    }
}

impl From<RegularPolygonPrism> for SceneObject {
    fn from(prism: RegularPolygonPrism) -> Self {
        SceneObject::Primitive(prism.into())
    }
}

impl From<Cuboid> for SceneObject {
    fn from(cuboid: Cuboid) -> Self {
        SceneObject::Primitive(cuboid.into())
    }
}

impl From<GeometryObject> for SceneObject {
    fn from(object: GeometryObject) -> Self {
        SceneObject::Object(object)
    }
}

impl Mesh for SceneObject {
    fn face_vertices(&self) -> Cow<'_, [Point3]> {
        match self {
            SceneObject::Primitive(primitive) => primitive.face_vertices(),
            SceneObject::Object(object) => object.face_vertices(),
        }
    }

    fn face_normals(&self) -> Cow<'_, [Point3]> {
        match self {
            SceneObject::Primitive(primitive) => primitive.face_normals(),
            SceneObject::Object(object) => object.face_normals(),
        }
    }

    fn face_colors(&self, mode: RenderMode) -> Vec<Color> {
        match self {
            SceneObject::Primitive(primitive) => primitive.face_colors(mode),
            SceneObject::Object(object) => object.face_colors(mode),
        }
    }

    fn face_specular(&self) -> Vec<f32> {
        match self {
            SceneObject::Primitive(primitive) => primitive.face_specular(),
            SceneObject::Object(object) => object.face_specular(),
        }
    }

    fn face_vertex_count(&self) -> usize {
        match self {
            SceneObject::Primitive(primitive) => primitive.face_vertex_count(),
            SceneObject::Object(object) => object.face_vertex_count(),
        }
    }

    fn validate(&self) -> Result<(), MeshError> {
        match self {
            SceneObject::Primitive(primitive) => primitive.validate(),
            SceneObject::Object(object) => object.validate(),
        }
    }
}

/// Discrete mutations fed into the scene by the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    /// Moves the light and its marker object.
    MoveLight(Point3),
    /// Moves camera and look-at target along x.
    PanCamera(f32),
    ToggleWorldRotation,
    ToggleRandomColors,
}

/// Which CPU-side data changed during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameUpdate {
    /// Positions, normals and specular values need re-uploading.
    pub geometry_changed: bool,
    pub colors_changed: bool,
    /// The view matrix was rebuilt.
    pub view_changed: bool,
}

impl FrameUpdate {
    pub fn merge(self, other: FrameUpdate) -> FrameUpdate {
        FrameUpdate {
            geometry_changed: self.geometry_changed || other.geometry_changed,
            colors_changed: self.colors_changed || other.colors_changed,
            view_changed: self.view_changed || other.view_changed,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.geometry_changed || self.colors_changed || self.view_changed)
    }
}

/// Scene state consumed by the render engine: the ordered object list,
/// camera, world rotation, light and render mode.
pub struct Scene {
    objects: Vec<SceneObject>,
    camera_eye: Point3,
    camera_target: Point3,
    camera_up: Point3,
    projection: Mat4,
    view: Mat4,
    world_rotation: Mat4,
    light_position: Point3,
    translate: Point3,
    render_mode: RenderMode,
    rotate_world: bool,
    light_marker: Option<ObjectId>,
    pending: Vec<SceneCommand>,
    world_rotation_step: f32,
}

impl Scene {
    pub fn new(config: &RenderConfig) -> Self {
        let view = Mat4::look_at(config.camera_eye, config.camera_target, config.camera_up);
        Self {
            objects: Vec::new(),
            camera_eye: config.camera_eye,
            camera_target: config.camera_target,
            camera_up: config.camera_up,
            projection: Mat4::projection(
                config.fov_degrees,
                config.z_near,
                config.z_far,
                config.aspect_ratio(),
            ),
            view,
            world_rotation: Mat4::IDENTITY,
            light_position: config.light_position,
            translate: Point3::ZERO,
            render_mode: RenderMode::default(),
            rotate_world: false,
            light_marker: None,
            pending: Vec::new(),
            world_rotation_step: config.world_rotation_step,
        }
    }

    /// Appends an object. Stream order follows registration order.
    pub fn add_object(&mut self, object: impl Into<SceneObject>) -> ObjectId {
        self.objects.push(object.into());
        ObjectId(self.objects.len() - 1)
    }

    /// Marks the object that travels with the light on [`SceneCommand::MoveLight`].
    pub fn set_light_marker(&mut self, id: ObjectId) {
        if id.0 < self.objects.len() {
            self.light_marker = Some(id);
        } else {
            log::warn!("ignoring light marker {:?}: no such object", id);
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn world_rotation(&self) -> &Mat4 {
        &self.world_rotation
    }

    /// Inverse transpose of the world rotation, for normals.
    pub fn normal_rotation(&self) -> Mat3 {
        self.world_rotation.normal_matrix()
    }

    pub fn camera_eye(&self) -> Point3 {
        self.camera_eye
    }

    pub fn camera_target(&self) -> Point3 {
        self.camera_target
    }

    pub fn light_position(&self) -> Point3 {
        self.light_position
    }

    /// Flat offset added to every vertex before the world rotation.
    pub fn translate(&self) -> Point3 {
        self.translate
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn is_rotating(&self) -> bool {
        self.rotate_world
    }

    /// Queues a command for the next [`Scene::tick`].
    pub fn push_command(&mut self, command: SceneCommand) {
        self.pending.push(command);
    }

    /// Applies one command right away.
    pub fn apply(&mut self, command: SceneCommand) -> FrameUpdate {
        log::debug!("applying {:?}", command);
        match command {
            SceneCommand::MoveLight(delta) => {
                self.light_position += delta;
                if let Some(marker) = self.light_marker.and_then(|id| self.objects.get_mut(id.0)) {
                    marker.translate(delta);
                }
                FrameUpdate {
                    geometry_changed: true,
                    ..Default::default()
                }
            }
            SceneCommand::PanCamera(dx) => {
                let delta = Point3::new(dx, 0.0, 0.0);
                self.camera_eye += delta;
                self.camera_target += delta;
                self.view = Mat4::look_at(self.camera_eye, self.camera_target, self.camera_up);
                FrameUpdate {
                    view_changed: true,
                    ..Default::default()
                }
            }
            SceneCommand::ToggleWorldRotation => {
                self.rotate_world = !self.rotate_world;
                FrameUpdate::default()
            }
            SceneCommand::ToggleRandomColors => {
                self.render_mode = self.render_mode.toggled_random_colors();
                FrameUpdate {
                    colors_changed: true,
                    ..Default::default()
                }
            }
        }
    }

    /// Drains pending commands, then advances the world rotation by one
    /// step about Z, Y and X in that order when rotation is enabled.
    pub fn tick(&mut self) -> FrameUpdate {
        let pending = std::mem::take(&mut self.pending);
        let update = pending
            .into_iter()
            .fold(FrameUpdate::default(), |update, command| update.merge(self.apply(command)));

        if self.rotate_world {
            let step = self.world_rotation_step;
            self.world_rotation.rotate_z(step);
            self.world_rotation.rotate_y(step);
            self.world_rotation.rotate_x(step);
        }
        update
    }

    /// Gathers all four vertex streams for the current render mode.
    pub fn streams(&self) -> Result<FrameStreams, RenderError> {
        FrameStreams::collect(&self.objects, self.render_mode)
    }

    /// Brings `streams` up to date with the changes reported by a tick.
    pub fn refresh_streams(
        &self,
        streams: &mut FrameStreams,
        update: FrameUpdate,
    ) -> Result<(), RenderError> {
        if update.geometry_changed {
            streams.refresh_geometry(&self.objects)?;
        }
        if update.colors_changed {
            streams.refresh_colors(&self.objects, self.render_mode)?;
        }
        Ok(())
    }
}
