//! # Graphics Module
//!
//! Geometry generation, composite objects, scene state and the wgpu
//! renderer that draws them.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Points, colors, prisms, cylinders and boxes
//! - **Math** ([`math`]) - Small row/column major matrices for camera and rotation
//! - **Scene** ([`scene`]) - Composite objects, commands and flattened vertex streams
//! - **Resources** ([`resources`]) - Depth buffer and the global uniform block
//! - **Rendering** ([`rendering`]) - Pipeline creation and the per-frame draw
//!
//! ## Usage
//!
//! ```no_run
//! use revolve::gfx::{geometry::{Color, Point3}, scene::{Scene, GeometryObject}, geometry::Cylinder};
//! use revolve::RenderConfig;
//!
//! let config = RenderConfig::default();
//! let mut scene = Scene::new(&config);
//! let bottle = GeometryObject::new(Point3::ZERO, 8.0, None)
//!     .with_geometry(Cylinder::new(Point3::ZERO, 0.5, Color::WHITE, 0.2, None));
//! scene.add_object(bottle);
//! // revolve::run(config, scene) opens the window
//! ```

pub mod geometry;
pub mod math;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use rendering::render_engine::RenderEngine;
