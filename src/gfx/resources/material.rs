//! Material system
//!
//! Standard lit materials with an optional colour map. Materials are stored in
//! [`MaterialManager`] and objects reference them by ID.

use std::collections::HashMap;
use wgpu::Device;

use super::texture_resource::TextureLibrary;
use crate::gfx::color::Color;
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutWithDesc},
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// Which faces of a surface are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Linear base colour, alpha in w
    pub color: [f32; 4],
    /// x = roughness, y = metalness, z = has colour map
    pub params: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

struct MaterialGpu {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
    /// Texture bound in `bind_group`, None for the white fallback
    bound_map: Option<String>,
}

/// Standard material: base colour times an optional colour map
pub struct Material {
    pub name: String,
    pub color: Color,
    pub map: Option<String>,
    pub wireframe: bool,
    pub side: Side,
    pub roughness: f32,
    pub metalness: f32,
    gpu: Option<MaterialGpu>,
}

impl Default for Material {
    fn default() -> Self {
        Self::standard("default", Color::WHITE)
    }
}

impl Material {
    pub fn standard(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
            map: None,
            wireframe: false,
            side: Side::Front,
            roughness: 1.0,
            metalness: 0.0,
            gpu: None,
        }
    }

    pub fn with_map(mut self, texture: &str) -> Self {
        self.map = Some(texture.to_string());
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn uniform(&self, has_map: bool) -> MaterialUniform {
        MaterialUniform {
            color: [self.color.r, self.color.g, self.color.b, 1.0],
            params: [
                self.roughness.clamp(0.0, 1.0),
                self.metalness.clamp(0.0, 1.0),
                if has_map { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }

    /// Creates or refreshes the uniform buffer and bind group
    ///
    /// The bind group is rebuilt only when the bound colour map changes.
    pub fn sync_gpu(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
        textures: &TextureLibrary,
    ) {
        let wanted = self
            .map
            .as_deref()
            .filter(|name| textures.gpu(name).is_some())
            .map(str::to_string);

        if let (Some(name), None) = (self.map.as_deref(), wanted.as_deref()) {
            if self.gpu.is_none() {
                log::warn!(
                    "material '{}' references missing texture '{}', using white",
                    self.name,
                    name
                );
            }
        }

        let uniform = self.uniform(wanted.is_some());
        let stale = self
            .gpu
            .as_ref()
            .map_or(true, |gpu| gpu.bound_map != wanted);

        if stale {
            let Some(texture) = textures.gpu_or_white(wanted.as_deref()) else {
                return; // textures not uploaded yet
            };
            let ubo = MaterialUBO::new_with_data(device, &uniform);
            let bind_group = BindGroupBuilder::new(layout)
                .resource(ubo.binding_resource())
                .texture(&texture.view)
                .sampler(&texture.sampler)
                .create(device, &format!("{} Material Bind Group", self.name));
            log::debug!("material '{}' bound to {:?}", self.name, wanted);
            self.gpu = Some(MaterialGpu {
                ubo,
                bind_group,
                bound_map: wanted,
            });
        } else if let Some(gpu) = self.gpu.as_mut() {
            gpu.ubo.update_content(queue, uniform);
        }
    }

    /// Gets the bind group for rendering
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Manages all materials of a scene
///
/// Objects reference materials by ID; unknown IDs fall back to a white
/// default material.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::default(),
        }
    }

    /// Adds a material, replacing any material with the same name
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = material.name.clone();
        self.materials.insert(id.clone(), material);
        id
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Material for an object, falling back to the default material
    pub fn get_material_for_object(&self, id: &str) -> &Material {
        self.materials.get(id).unwrap_or(&self.default_material)
    }

    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    /// Syncs GPU resources of every material, including the default
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
        textures: &TextureLibrary,
    ) {
        self.default_material
            .sync_gpu(device, queue, layout, textures);
        for material in self.materials.values_mut() {
            material.sync_gpu(device, queue, layout, textures);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_material_is_fully_rough_dielectric() {
        let material = Material::standard("box", Color::linear(0.0, 1.0, 0.0));
        let uniform = material.uniform(false);
        assert_eq!(uniform.color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(uniform.params, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(material.side, Side::Front);
        assert!(!material.wireframe);
    }

    #[test]
    fn map_flag_follows_binding() {
        let material = Material::standard("sphere", Color::WHITE).with_map("earth");
        assert_eq!(material.uniform(true).params[2], 1.0);
        assert_eq!(material.map.as_deref(), Some("earth"));
    }

    #[test]
    fn unknown_material_falls_back_to_default() {
        let mut manager = MaterialManager::new();
        let id = manager.add_material(
            Material::standard("plane", Color::WHITE).with_side(Side::Double),
        );
        assert_eq!(id, "plane");
        assert_eq!(manager.get_material_for_object("plane").side, Side::Double);
        assert_eq!(manager.get_material_for_object("missing").name, "default");
        assert_eq!(manager.list_materials().len(), 1);
    }

    #[test]
    fn wireframe_is_editable_through_the_manager() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::standard("sphere", Color::WHITE));
        if let Some(material) = manager.get_material_mut("sphere") {
            material.wireframe = true;
        }
        assert!(manager.get_material_for_object("sphere").wireframe);
        assert!(manager.get_material_for_object("sphere").bind_group().is_none());
    }
}
