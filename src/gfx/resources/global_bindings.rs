//! Global uniform bindings for camera, world rotation and lighting
//!
//! One uniform block at group 0, binding 0 carries every per-frame value the
//! Phong shader reads. It is rewritten every frame.

use crate::{
    config::RenderConfig,
    gfx::scene::Scene,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in `shader.wgsl` exactly. Matrices are
/// column major; the 3×3 normal matrix is stored as three padded columns.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    projection: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    rotation: [[f32; 4]; 4],
    normal_rotation: [[f32; 4]; 3],

    light_color: [f32; 3],
    ambient: f32,
    light_position: [f32; 3],
    _padding0: f32,
    translate: [f32; 3],
    _padding1: f32,
    camera_position: [f32; 3],
    _padding2: f32,
}
// Total: 3*64 + 48 + 4*16 = 304 bytes

/// Light parameters that do not change while the scene runs
#[derive(Copy, Clone, Debug)]
pub struct LightConfig {
    pub color: [f32; 3],
    pub ambient: f32,
}

impl From<&RenderConfig> for LightConfig {
    fn from(config: &RenderConfig) -> Self {
        Self {
            color: config.light_color,
            ambient: config.ambient_intensity,
        }
    }
}

impl GlobalUBOContent {
    /// Snapshot of the scene's matrices, light and camera for one frame
    pub fn from_scene(scene: &Scene, light: LightConfig) -> Self {
        Self {
            projection: scene.projection().to_cols_array_2d(),
            view: scene.view().to_cols_array_2d(),
            rotation: scene.world_rotation().to_cols_array_2d(),
            normal_rotation: scene.normal_rotation().to_padded_columns(),
            light_color: light.color,
            ambient: light.ambient,
            light_position: scene.light_position().to_array(),
            _padding0: 0.0,
            translate: scene.translate().to_array(),
            _padding1: 0.0,
            camera_position: scene.camera_eye().to_array(),
            _padding2: 0.0,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Writes this frame's globals, unconditionally
pub fn update_global_ubo(ubo: &GlobalUBO, queue: &wgpu::Queue, scene: &Scene, light: LightConfig) {
    ubo.write(queue, GlobalUBOContent::from_scene(scene, light));
}

/// Bind group layout and bind group for the global uniforms (group 0)
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform_sized::<GlobalUBOContent>())
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating the render pipeline layout
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::Point3;
    use crate::gfx::scene::SceneCommand;

    #[test]
    fn test_layout_is_uniform_compatible() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 304);
        assert_eq!(std::mem::size_of::<GlobalUBOContent>() % 16, 0);
    }

    #[test]
    fn test_content_tracks_scene() {
        let config = RenderConfig::default();
        let mut scene = Scene::new(&config);
        scene.apply(SceneCommand::MoveLight(Point3::new(0.0, 0.5, 0.0)));
        scene.apply(SceneCommand::PanCamera(0.25));

        let content = GlobalUBOContent::from_scene(&scene, LightConfig::from(&config));
        assert_eq!(content.light_position, [0.0, 0.5, 0.0]);
        assert_eq!(content.camera_position, [0.25, 0.0, 3.0]);
        assert_eq!(content.ambient, 0.218);
        assert_eq!(content.rotation[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(content.normal_rotation[2], [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(content.projection[2][3], -1.0);
    }
}
