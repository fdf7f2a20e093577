//! Box, plane and bouncing earth under ambient, directional and spot light
//!
//! [`Demo::build_scene`] assembles the scene in a fixed order, the control
//! panel in [`controls`] edits the option records, and [`Demo::animate`]
//! applies them once per frame.

pub mod controls;
pub mod options;

use std::path::PathBuf;

use cgmath::{Deg, Point3, Vector3, Zero};
use image::RgbaImage;

use crate::{
    animation::Animation,
    assets::{self, EARTH_TEXTURE, SPACE_TEXTURE},
    gfx::{
        camera::OrbitCamera,
        color::Color,
        geometry::primitives::{generate_box, generate_plane, generate_sphere},
        resources::{Material, MaterialId, Side},
        scene::{
            AmbientLight, Background, DirectionalLight, Helper, HelperId, HelperKind, LightRef,
            Object, ObjectId, Scene, ShadowCamera, SpotLight,
        },
    },
};

use options::{LightColorOptions, SphereOptions, SpotLightOptions};

/// Peak height and depth of the sphere bounce
const BOUNCE: f32 = 10.0;
/// Per-frame spin of the box around X and Y
const BOX_SPIN: f32 = 0.01;
const STARFIELD_SEED: u64 = 0x5eed;

/// Where the demo placed the things it animates and edits
#[derive(Debug, Clone)]
pub struct DemoHandles {
    pub cube: ObjectId,
    pub plane: ObjectId,
    pub sphere: ObjectId,
    pub sphere_material: MaterialId,
    pub directional_helper: HelperId,
    pub directional_shadow_helper: HelperId,
    pub spot_helper: HelperId,
}

pub struct Demo {
    asset_dir: PathBuf,
    pub sphere_options: SphereOptions,
    pub light_colors: LightColorOptions,
    pub spot_options: SpotLightOptions,
    step: f32,
    handles: Option<DemoHandles>,
}

impl Demo {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            sphere_options: SphereOptions::default(),
            light_colors: LightColorOptions::default(),
            spot_options: SpotLightOptions::default(),
            step: 0.0,
            handles: None,
        }
    }

    pub fn handles(&self) -> Option<&DemoHandles> {
        self.handles.as_ref()
    }

    /// Populates `scene` with the demo content using the given textures
    pub fn build_scene(
        &mut self,
        scene: &mut Scene,
        earth: RgbaImage,
        space: RgbaImage,
    ) -> DemoHandles {
        let origin = Point3::new(0.0, 0.0, 0.0);

        scene.shadow_map_enabled = true;

        scene.add_texture(SPACE_TEXTURE, space);
        scene.background = Background::Texture(SPACE_TEXTURE.to_string());

        let aspect = scene.camera_manager.camera.aspect;
        scene.camera_manager.camera =
            OrbitCamera::looking_at(Vector3::new(-10.0, 30.0, 30.0), Vector3::zero(), aspect)
                .with_perspective(Deg(45.0), 0.1, 1000.0);

        scene.add_helper(Helper::new("Axes", HelperKind::Axes { size: 2.0 }));

        scene.add_material(Material::standard("box", Color::from_hex(0x00ff00)));
        let cube = scene.add_object(
            Object::new("Box", &generate_box(2.0, 2.0, 2.0), "box").with_position(0.0, 1.0, 0.0),
        );

        scene.add_material(
            Material::standard("plane", Color::from_hex(0xffffff)).with_side(Side::Double),
        );
        let plane = scene.add_object(
            Object::new("Plane", &generate_plane(30.0, 30.0, 1, 1), "plane")
                .with_rotation(-0.5 * std::f32::consts::PI, 0.0, 0.0)
                .with_receive_shadow(true),
        );

        scene.add_helper(Helper::new(
            "Grid",
            HelperKind::Grid {
                size: 30.0,
                divisions: 10,
            },
        ));

        scene.add_texture(EARTH_TEXTURE, earth);
        let sphere_material = scene.add_material(
            Material::standard("sphere", Color::WHITE)
                .with_map(EARTH_TEXTURE)
                .with_wireframe(self.sphere_options.wireframe),
        );
        let sphere = scene.add_object(
            Object::new("Sphere", &generate_sphere(4.0, 50, 50), "sphere")
                .with_position(-10.0, 10.0, 0.0)
                .with_cast_shadow(true),
        );

        scene.lights.ambient = AmbientLight::new(self.light_colors.ambient_light_color);

        let mut directional = DirectionalLight::new(self.light_colors.directional_light_color, 1.0)
            .with_position(-30.0, 50.0, 0.0)
            .looking_at(origin);
        directional.cast_shadow = true;
        if let ShadowCamera::Orthographic { bottom, .. } = &mut directional.shadow.camera {
            *bottom = -12.0;
        }
        directional.shadow.map_size = 1024;
        directional.shadow.near = 0.5;
        directional.shadow.far = 500.0;
        directional.shadow.bias = -0.001;
        scene.lights.directional = Some(directional);

        let directional_helper = scene.add_helper(Helper::new(
            "Directional Light Helper",
            HelperKind::DirectionalLight { size: 5.0 },
        ));
        let directional_shadow_helper = scene.add_helper(Helper::new(
            "Directional Light Shadow Helper",
            HelperKind::ShadowCamera(LightRef::Directional),
        ));

        let mut spot = SpotLight::new(Color::WHITE, self.spot_options.intensity)
            .with_angle(self.spot_options.angle)
            .with_position(-100.0, 100.0, 0.0)
            .looking_at(origin);
        spot.penumbra = self.spot_options.penumbra;
        spot.cast_shadow = true;
        scene.lights.spot = Some(spot);
        let spot_helper = scene.add_helper(Helper::new("SpotLight Helper", HelperKind::SpotLight));

        let handles = DemoHandles {
            cube,
            plane,
            sphere,
            sphere_material,
            directional_helper,
            directional_shadow_helper,
            spot_helper,
        };
        self.handles = Some(handles.clone());
        self.step = 0.0;
        handles
    }

    /// One frame of motion plus the spot light settings
    pub fn animate(&mut self, scene: &mut Scene) {
        let Some(handles) = self.handles.as_ref() else {
            return;
        };

        if let Some(cube) = scene.object_mut(handles.cube) {
            cube.transform.rotation.x += BOX_SPIN;
            cube.transform.rotation.y += BOX_SPIN;
        }

        self.step += self.sphere_options.speed;
        let bounce = BOUNCE * self.step.cos().abs();
        if let Some(sphere) = scene.object_mut(handles.sphere) {
            sphere.transform.position.z = bounce;
            sphere.transform.position.y = bounce;
            sphere.transform.rotation.z = bounce;
        }

        if let Some(spot) = scene.lights.spot.as_mut() {
            spot.angle = self.spot_options.angle;
            spot.penumbra = self.spot_options.penumbra;
            spot.intensity = self.spot_options.intensity;
        }
    }

    /// Applies the wireframe toggle to the sphere material
    pub fn set_wireframe(&mut self, scene: &mut Scene, wireframe: bool) {
        self.sphere_options.wireframe = wireframe;
        let Some(handles) = self.handles.as_ref() else {
            return;
        };
        if let Some(material) = scene.material_mut(&handles.sphere_material) {
            material.wireframe = wireframe;
        }
    }

    pub fn set_ambient_color(&mut self, scene: &mut Scene, color: Color) {
        self.light_colors.ambient_light_color = color;
        scene.lights.ambient.color = color;
    }

    pub fn set_directional_color(&mut self, scene: &mut Scene, color: Color) {
        self.light_colors.directional_light_color = color;
        if let Some(light) = scene.lights.directional.as_mut() {
            light.color = color;
        }
    }

    fn load_textures(&self) -> (RgbaImage, RgbaImage) {
        let earth = assets::load_or_else(&self.asset_dir.join(EARTH_TEXTURE), || {
            assets::procedural_earth(1024, 512)
        });
        let space = assets::load_or_else(&self.asset_dir.join(SPACE_TEXTURE), || {
            assets::starfield(2048, 1024, STARFIELD_SEED)
        });
        (earth, space)
    }
}

impl Animation for Demo {
    fn initialize(&mut self, scene: &mut Scene) {
        let (earth, space) = self.load_textures();
        self.build_scene(scene, earth, space);

        let stats = scene.get_statistics();
        log::info!(
            "{}: {} objects, {} helpers, {} triangles",
            self.name(),
            stats.object_count,
            stats.helper_count,
            stats.total_triangles
        );
    }

    fn update(&mut self, scene: &mut Scene) {
        self.animate(scene);
    }

    fn render_ui(&mut self, ui: &imgui::Ui, scene: &mut Scene) {
        controls::draw(ui, self, scene);
    }

    fn name(&self) -> &str {
        "shadowbox demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager};
    use cgmath::InnerSpace;

    fn built() -> (Demo, Scene, DemoHandles) {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), 1.5);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::default()));
        let mut demo = Demo::new("missing-assets");
        let handles = demo.build_scene(
            &mut scene,
            assets::procedural_earth(16, 8),
            assets::starfield(16, 8, 1),
        );
        (demo, scene, handles)
    }

    #[test]
    fn composition_places_everything() {
        let (_, scene, handles) = built();

        assert!(scene.shadow_map_enabled);
        assert_eq!(scene.background, Background::Texture(SPACE_TEXTURE.to_string()));
        assert_eq!(scene.objects.len(), 3);
        assert_eq!(scene.helpers.len(), 5);

        let camera = &scene.camera_manager.camera;
        assert!((camera.eye - Vector3::new(-10.0, 30.0, 30.0)).magnitude() < 1e-3);
        assert!((camera.aspect - 1.5).abs() < f32::EPSILON);
        assert_eq!(camera.zfar, 1000.0);
        assert_eq!(camera.bounds.min_distance, Some(1.0));

        let cube = scene.object(handles.cube).unwrap();
        assert_eq!(cube.transform.position, Vector3::new(0.0, 1.0, 0.0));
        assert!(!cube.cast_shadow);

        let plane = scene.object(handles.plane).unwrap();
        assert!(plane.receive_shadow);
        assert_eq!(scene.get_material_for_object(plane).side, Side::Double);

        let sphere = scene.object(handles.sphere).unwrap();
        assert!(sphere.cast_shadow);
        assert_eq!(sphere.transform.position, Vector3::new(-10.0, 10.0, 0.0));
        let material = scene.get_material_for_object(sphere);
        assert_eq!(material.map.as_deref(), Some(EARTH_TEXTURE));
        assert!(!material.wireframe);
    }

    #[test]
    fn lights_use_the_configured_shadows() {
        let (_, scene, _) = built();

        assert_eq!(scene.lights.ambient.color.to_css_hex(), "#333333");

        let directional = scene.lights.directional.unwrap();
        assert!(directional.cast_shadow);
        assert_eq!(directional.shadow.map_size, 1024);
        assert_eq!(directional.shadow.bias, -0.001);
        assert_eq!(
            directional.shadow.camera,
            ShadowCamera::Orthographic {
                left: -5.0,
                right: 5.0,
                bottom: -12.0,
                top: 5.0
            }
        );

        let spot = scene.lights.spot.unwrap();
        assert!(spot.cast_shadow);
        assert_eq!(spot.angle, 0.203);
        assert_eq!(spot.position, Point3::new(-100.0, 100.0, 0.0));
        assert_eq!(spot.shadow.map_size, 512);
    }

    #[test]
    fn animate_spins_the_box_and_bounces_the_sphere() {
        let (mut demo, mut scene, handles) = built();
        demo.animate(&mut scene);
        demo.animate(&mut scene);

        let cube = scene.object(handles.cube).unwrap();
        assert!((cube.transform.rotation.x - 0.02).abs() < 1e-6);
        assert!((cube.transform.rotation.y - 0.02).abs() < 1e-6);

        let expected = 10.0 * 0.02f32.cos().abs();
        let sphere = scene.object(handles.sphere).unwrap();
        assert!((sphere.transform.position.y - expected).abs() < 1e-5);
        assert!((sphere.transform.position.z - expected).abs() < 1e-5);
        assert!((sphere.transform.rotation.z - expected).abs() < 1e-5);
        assert_eq!(sphere.transform.position.x, -10.0);
    }

    #[test]
    fn zero_speed_freezes_the_sphere() {
        let (mut demo, mut scene, handles) = built();
        demo.sphere_options.speed = 0.0;
        demo.animate(&mut scene);
        let first = scene.object(handles.sphere).unwrap().transform;
        for _ in 0..10 {
            demo.animate(&mut scene);
        }
        let later = scene.object(handles.sphere).unwrap().transform;
        assert_eq!(first.position, later.position);
        assert_eq!(later.position.y, 10.0);
    }

    #[test]
    fn spot_options_reach_the_light_each_frame() {
        let (mut demo, mut scene, _) = built();
        demo.spot_options = SpotLightOptions {
            angle: 0.5,
            penumbra: 0.25,
            intensity: 0.4,
        };
        demo.animate(&mut scene);
        let spot = scene.lights.spot.unwrap();
        assert_eq!((spot.angle, spot.penumbra, spot.intensity), (0.5, 0.25, 0.4));
    }

    #[test]
    fn wireframe_toggle_reaches_the_sphere_material() {
        let (mut demo, mut scene, handles) = built();
        demo.set_wireframe(&mut scene, true);
        let sphere = scene.object(handles.sphere).unwrap();
        assert!(scene.get_material_for_object(sphere).wireframe);

        demo.set_wireframe(&mut scene, false);
        let sphere = scene.object(handles.sphere).unwrap();
        assert!(!scene.get_material_for_object(sphere).wireframe);
    }

    #[test]
    fn colour_pickers_update_the_lights() {
        let (mut demo, mut scene, _) = built();
        demo.set_ambient_color(&mut scene, Color::from_hex(0x112233));
        demo.set_directional_color(&mut scene, Color::from_hex(0xff0000));
        assert_eq!(scene.lights.ambient.color.to_css_hex(), "#112233");
        assert_eq!(
            scene.lights.directional.map(|l| l.color.to_css_hex()),
            Some("#ff0000".to_string())
        );
    }

    #[test]
    fn animate_before_build_is_a_no_op() {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), 1.0);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::default()));
        let mut demo = Demo::new("assets");
        demo.animate(&mut scene);
        assert!(scene.objects.is_empty());
    }
}
