// src/lib.rs
//! Revolve
//!
//! Procedural prisms, cylinders and boxes grouped into rotatable composite
//! objects, rendered with Phong shading on wgpu and winit.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{run, RevolveApp};
pub use config::RenderConfig;
pub use error::{MeshError, RenderError};
