// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Pipeline creation, stream uploads and frame rendering.

pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use pipeline_manager::{create_render_pipeline, PipelineConfig};
pub use render_engine::RenderEngine;
