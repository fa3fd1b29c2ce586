//! # Scene Module
//!
//! Composite objects, the scene they are registered with, and the flattened
//! vertex streams the render engine uploads.
//!
//! ## Key Components
//!
//! - [`GeometryObject`] - Primitives grouped under one position and rotation
//! - [`Scene`] - Ordered objects plus camera, light, world rotation and render mode
//! - [`SceneCommand`] - Input-level mutations applied on [`Scene::tick`]
//! - [`FrameStreams`] - Position, color, normal and specular arrays for one draw
//! - [`vertex`] - Vertex buffer layouts for the four streams
//!
//! ## Usage
//!
//! ```rust
//! use revolve::config::RenderConfig;
//! use revolve::gfx::geometry::{Color, Cylinder, Point3};
//! use revolve::gfx::scene::{GeometryObject, Scene, SceneCommand};
//!
//! let mut scene = Scene::new(&RenderConfig::default());
//! let object = GeometryObject::new(Point3::ZERO, 8.0, Some(Point3::new(0.0, -65.0, -90.0)))
//!     .with_geometry(Cylinder::new(Point3::ZERO, 0.4, Color::WHITE, 0.375, None));
//! scene.add_object(object);
//!
//! scene.push_command(SceneCommand::ToggleRandomColors);
//! let update = scene.tick();
//! assert!(update.colors_changed);
//!
//! let streams = scene.streams().unwrap();
//! assert_eq!(streams.vertex_count(), 12 * 240);
//! ```

pub mod object;
pub mod scene;
pub mod streams;
pub mod vertex;

// Re-export main types
pub use object::GeometryObject;
pub use scene::{FrameUpdate, ObjectId, Scene, SceneCommand, SceneObject};
pub use streams::FrameStreams;
