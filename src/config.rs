//! Render and interaction settings
//!
//! Every constant the scene and the render engine read lives here, with the
//! defaults of the reference scene. Adjust with the `with_*` builder methods:
//!
//! ```rust
//! use revolve::config::RenderConfig;
//!
//! let config = RenderConfig::default()
//!     .with_window_size(800, 800)
//!     .with_movement_speed(0.1);
//! assert_eq!(config.movement_speed, 0.1);
//! ```

use crate::gfx::geometry::{Color, Point3};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub title: String,
    pub window_size: (u32, u32),
    pub clear_color: Color,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub ambient_intensity: f32,
    pub light_color: [f32; 3],
    pub light_position: Point3,
    pub camera_eye: Point3,
    pub camera_target: Point3,
    pub camera_up: Point3,
    /// Light step per W/S press.
    pub movement_speed: f32,
    /// Camera step per A/D press.
    pub camera_pan_step: f32,
    /// Radians added about each axis per frame while the world rotates.
    pub world_rotation_step: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "Revolve".to_string(),
            window_size: (800, 800),
            clear_color: Color::new(0.263, 0.5, 0.5, 1.0),
            fov_degrees: 45.0,
            z_near: 1.0,
            z_far: 10.0,
            ambient_intensity: 0.218,
            light_color: [1.0, 1.0, 1.0],
            light_position: Point3::ZERO,
            camera_eye: Point3::new(0.0, 0.0, 3.0),
            camera_target: Point3::ZERO,
            camera_up: Point3::new(0.0, 1.0, 0.0),
            movement_speed: 0.05,
            camera_pan_step: 0.01,
            world_rotation_step: 0.002,
        }
    }
}

impl RenderConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Sets the projection parameters (builder pattern)
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view
    /// * `z_near`, `z_far` - Clip range, both positive
    pub fn with_projection(mut self, fov_degrees: f32, z_near: f32, z_far: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }

    pub fn with_ambient_intensity(mut self, ambient: f32) -> Self {
        self.ambient_intensity = ambient;
        self
    }

    pub fn with_light(mut self, position: Point3, color: [f32; 3]) -> Self {
        self.light_position = position;
        self.light_color = color;
        self
    }

    pub fn with_camera(mut self, eye: Point3, target: Point3) -> Self {
        self.camera_eye = eye;
        self.camera_target = target;
        self
    }

    pub fn with_movement_speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }

    pub fn with_camera_pan_step(mut self, step: f32) -> Self {
        self.camera_pan_step = step;
        self
    }

    pub fn with_world_rotation_step(mut self, radians: f32) -> Self {
        self.world_rotation_step = radians;
        self
    }

    /// Width over height of the configured window.
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.window_size;
        width as f32 / height.max(1) as f32
    }
}
