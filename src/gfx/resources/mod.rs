// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles textures, materials, uniform buffers and bind groups for rendering.

pub mod global_bindings;
pub mod layouts;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUniform, ShadowPassUniform};
pub use layouts::SceneLayouts;
pub use material::{Material, MaterialId, MaterialManager, Side};
pub use texture_resource::{TextureLibrary, TextureResource};
