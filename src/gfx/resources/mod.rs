// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Depth buffer and the global uniform block.

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, GlobalUBOContent, LightConfig};
pub use texture_resource::TextureResource;
