use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    color::Color,
    resources::{
        layouts::SceneLayouts,
        material::{Material, MaterialId, MaterialManager},
        texture_resource::TextureLibrary,
    },
};

use super::{
    helpers::Helper,
    light::SceneLights,
    object::Object,
    vertex::LineVertex,
};

/// Index of an object in [`Scene::objects`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Index of a helper in [`Scene::helpers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HelperId(pub usize);

/// What is drawn behind the scene
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Color(Color),
    /// Name of a texture in the scene's [`TextureLibrary`], stretched over the viewport
    Texture(String),
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(Color::BLACK)
    }
}

/// Main scene containing objects, materials, lights, helpers and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
    pub textures: TextureLibrary,
    pub lights: SceneLights,
    pub helpers: Vec<Helper>,
    pub background: Background,
    /// Renderer-wide shadow switch; individual lights still opt in
    pub shadow_map_enabled: bool,
}

impl Scene {
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            textures: TextureLibrary::new(),
            lights: SceneLights::default(),
            helpers: Vec::new(),
            background: Background::default(),
            shadow_map_enabled: false,
        }
    }

    /// Updates the scene (camera matrices, light shadow cameras)
    pub fn update(&mut self) {
        self.camera_manager.update();
        self.lights.update();
    }

    pub fn add_object(&mut self, object: Object) -> ObjectId {
        if self.material_manager.get_material(&object.material).is_none() {
            log::warn!(
                "object '{}' uses unknown material '{}', the default material will be used",
                object.name,
                object.material
            );
        }
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.0)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.material_manager.add_material(material)
    }

    pub fn material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.material_manager.get_material_mut(id)
    }

    /// Gets material for rendering an object
    ///
    /// Returns the material assigned to the object, or the default material
    /// if the assigned material doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(&object.material)
    }

    pub fn add_texture(&mut self, name: &str, image: image::RgbaImage) {
        self.textures.insert(name, image);
    }

    pub fn add_helper(&mut self, helper: Helper) -> HelperId {
        self.helpers.push(helper);
        HelperId(self.helpers.len() - 1)
    }

    pub fn helper(&self, id: HelperId) -> Option<&Helper> {
        self.helpers.get(id.0)
    }

    pub fn helper_mut(&mut self, id: HelperId) -> Option<&mut Helper> {
        self.helpers.get_mut(id.0)
    }

    /// Line vertices of every visible helper, regenerated from current light state
    pub fn helper_lines(&self) -> Vec<LineVertex> {
        self.helpers
            .iter()
            .flat_map(|helper| helper.lines(&self.lights))
            .collect()
    }

    /// Initializes GPU resources for all objects, textures and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layouts: &SceneLayouts,
    ) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, &layouts.object);
        }
        self.sync_gpu(device, queue, layouts);

        let stats = self.get_statistics();
        log::info!(
            "scene ready: {} objects, {} materials, {} textures, {} triangles",
            stats.object_count,
            stats.material_count,
            self.textures.len(),
            stats.total_triangles
        );
    }

    /// Pushes this frame's transforms and material edits to the GPU
    pub fn sync_gpu(&mut self, device: &Device, queue: &wgpu::Queue, layouts: &SceneLayouts) {
        self.textures.upload_pending(device, queue);
        self.material_manager
            .update_all_gpu_resources(device, queue, &layouts.material, &self.textures);
        for object in &mut self.objects {
            object.update_gpu(queue);
        }
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let total_triangles: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.index_count / 3).sum::<u32>())
            .sum();

        let total_vertices: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.vertex_count).sum::<u32>())
            .sum();

        SceneStatistics {
            object_count: self.objects.len(),
            material_count: self.material_manager.list_materials().len(),
            helper_count: self.helpers.len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub helper_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, OrbitCamera},
        geometry::primitives::generate_box,
        scene::helpers::HelperKind,
    };
    use cgmath::{Vector3, Zero};

    fn scene() -> Scene {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 5.0, 10.0), Vector3::zero(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::default()))
    }

    #[test]
    fn objects_are_addressed_by_id() {
        let mut scene = scene();
        scene.add_material(Material::standard("box", Color::WHITE));
        let id = scene.add_object(Object::new("box", &generate_box(2.0, 2.0, 2.0), "box"));
        assert_eq!(id, ObjectId(0));
        if let Some(object) = scene.object_mut(id) {
            object.transform.rotation.x = 1.0;
        }
        assert_eq!(scene.object(id).map(|o| o.transform.rotation.x), Some(1.0));
        assert!(scene.object(ObjectId(7)).is_none());

        let stats = scene.get_statistics();
        assert_eq!(stats.object_count, 1);
        assert_eq!(stats.total_triangles, 12);
        assert_eq!(stats.total_vertices, 24);
    }

    #[test]
    fn hidden_helpers_contribute_no_lines() {
        let mut scene = scene();
        let axes = scene.add_helper(Helper::new("axes", HelperKind::Axes { size: 2.0 }));
        assert_eq!(scene.helper_lines().len(), 6);
        if let Some(helper) = scene.helper_mut(axes) {
            helper.visible = false;
        }
        assert!(scene.helper_lines().is_empty());
    }

    #[test]
    fn defaults_are_a_black_unshadowed_scene() {
        let scene = scene();
        assert_eq!(scene.background, Background::Color(Color::BLACK));
        assert!(!scene.shadow_map_enabled);
        assert!(scene.lights.directional.is_none());
    }
}
