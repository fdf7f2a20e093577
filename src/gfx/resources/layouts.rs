//! Bind group layouts shared between the renderer and scene resources

use crate::wgpu_utils::{
    binding_builder::{BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
};

/// Layouts for every bind group slot except the global uniforms
pub struct SceneLayouts {
    /// Slot 1: per-object uniform
    pub object: BindGroupLayoutWithDesc,
    /// Slot 2: material uniform, colour map, sampler
    pub material: BindGroupLayoutWithDesc,
    /// Slot 3: directional and spot shadow maps plus comparison sampler
    pub shadow: BindGroupLayoutWithDesc,
    /// Slot 0 of the shadow passes: light view-projection
    pub shadow_pass: BindGroupLayoutWithDesc,
    /// Slot 1 of the background pass: background texture and sampler
    pub background: BindGroupLayoutWithDesc,
}

impl SceneLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let object = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Object Bind Group Layout");

        let material = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Material Bind Group Layout");

        let shadow = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_depth_2d())
            .next_binding_fragment(binding_types::texture_depth_2d())
            .next_binding_fragment(binding_types::sampler(
                wgpu::SamplerBindingType::Comparison,
            ))
            .create(device, "Shadow Bind Group Layout");

        let shadow_pass = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(device, "Shadow Pass Bind Group Layout");

        let background = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Background Bind Group Layout");

        Self {
            object,
            material,
            shadow,
            shadow_pass,
            background,
        }
    }
}
