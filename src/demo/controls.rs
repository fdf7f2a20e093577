//! Control panel for the demo
//!
//! Mirrors the option records into ImGui widgets. Light colours are applied
//! as soon as they change; spot light values are picked up by the animation.

use cgmath::Vector3;
use imgui::{Condition, TreeNodeFlags, Ui};

use super::Demo;
use crate::gfx::{
    color::Color,
    scene::{HelperId, Scene},
};

const TAU: f32 = std::f32::consts::TAU;

/// Builds the "Controls" window for this frame
pub fn draw(ui: &Ui, demo: &mut Demo, scene: &mut Scene) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Controls")
        .position([display_size[0] - 340.0, 10.0], Condition::FirstUseEver)
        .size([330.0, 0.0], Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            sphere_controls(ui, demo, scene);
            light_color_controls(ui, demo, scene);
            ui.separator();
            spot_light_folder(ui, demo);
            helpers_folder(ui, demo, scene);
            box_folder(ui, demo, scene);
        });
}

fn sphere_controls(ui: &Ui, demo: &mut Demo, scene: &mut Scene) {
    let mut wireframe = demo.sphere_options.wireframe;
    if ui.checkbox("wireframe", &mut wireframe) {
        demo.set_wireframe(scene, wireframe);
    }
    ui.slider("speed", 0.0, 0.1, &mut demo.sphere_options.speed);
}

fn light_color_controls(ui: &Ui, demo: &mut Demo, scene: &mut Scene) {
    let mut ambient = demo.light_colors.ambient_light_color.to_srgb();
    if ui.color_edit3("ambientLightColor", &mut ambient) {
        demo.set_ambient_color(scene, Color::from_srgb(ambient));
    }

    let mut directional = demo.light_colors.directional_light_color.to_srgb();
    if ui.color_edit3("directionalLightColor", &mut directional) {
        demo.set_directional_color(scene, Color::from_srgb(directional));
    }
}

fn spot_light_folder(ui: &Ui, demo: &mut Demo) {
    if ui.collapsing_header("SpotLight", TreeNodeFlags::DEFAULT_OPEN) {
        let spot = &mut demo.spot_options;
        ui.slider("angle", 0.0, 1.0, &mut spot.angle);
        ui.slider("penumbra", 0.0, 1.0, &mut spot.penumbra);
        ui.slider("intensity", 0.0, 1.0, &mut spot.intensity);
    }
}

/// Helpers listed in the Helpers folder, in panel order
fn toggled_helpers(demo: &Demo) -> Vec<HelperId> {
    demo.handles()
        .map(|h| {
            vec![
                h.directional_helper,
                h.directional_shadow_helper,
                h.spot_helper,
            ]
        })
        .unwrap_or_default()
}

/// Euler angles the Box sliders edit
fn box_rotation<'a>(demo: &Demo, scene: &'a mut Scene) -> Option<&'a mut Vector3<f32>> {
    let cube = demo.handles()?.cube;
    scene
        .object_mut(cube)
        .map(|object| &mut object.transform.rotation)
}

fn helpers_folder(ui: &Ui, demo: &Demo, scene: &mut Scene) {
    if !ui.collapsing_header("Helpers", TreeNodeFlags::empty()) {
        return;
    }

    for id in toggled_helpers(demo) {
        if let Some(helper) = scene.helper_mut(id) {
            ui.checkbox(&helper.name, &mut helper.visible);
        }
    }
}

fn box_folder(ui: &Ui, demo: &Demo, scene: &mut Scene) {
    if !ui.collapsing_header("Box", TreeNodeFlags::DEFAULT_OPEN) {
        return;
    }
    let Some(rotation) = box_rotation(demo, scene) else {
        return;
    };

    ui.slider("x", 0.0, TAU, &mut rotation.x);
    ui.slider("y", 0.0, TAU, &mut rotation.y);
    ui.slider("z", 0.0, TAU, &mut rotation.z);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets,
        gfx::camera::{CameraController, CameraManager, OrbitCamera},
    };
    use cgmath::Zero;

    fn demo_scene() -> (Demo, Scene) {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), 1.5);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::default()));
        let mut demo = Demo::new("missing-assets");
        demo.build_scene(
            &mut scene,
            assets::procedural_earth(16, 8),
            assets::starfield(16, 8, 1),
        );
        (demo, scene)
    }

    #[test]
    fn helper_toggles_name_the_light_helpers() {
        let (demo, scene) = demo_scene();
        let names: Vec<&str> = toggled_helpers(&demo)
            .into_iter()
            .filter_map(|id| scene.helper(id))
            .map(|helper| helper.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "Directional Light Helper",
                "Directional Light Shadow Helper",
                "SpotLight Helper"
            ]
        );
    }

    #[test]
    fn box_sliders_edit_the_cube() {
        let (demo, mut scene) = demo_scene();
        let cube = demo.handles().map(|h| h.cube).unwrap();

        let rotation = box_rotation(&demo, &mut scene).unwrap();
        rotation.x = 1.0;
        rotation.z = 2.0;

        let object = scene.object(cube).unwrap();
        assert_eq!(object.name, "Box");
        assert_eq!(object.transform.rotation, Vector3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn nothing_to_edit_before_the_scene_exists() {
        let demo = Demo::new("missing-assets");
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), 1.0);
        let mut scene = Scene::new(CameraManager::new(camera, CameraController::default()));
        assert!(toggled_helpers(&demo).is_empty());
        assert!(box_rotation(&demo, &mut scene).is_none());
    }

    // ImGui allows one live context per process, so this is the only test
    // that creates one.
    #[test]
    fn panel_draws_headless_without_changing_the_scene() {
        let (mut demo, mut scene) = demo_scene();
        let handles = demo.handles().cloned().unwrap();
        scene.helper_mut(handles.spot_helper).unwrap().visible = false;

        let mut imgui = imgui::Context::create();
        imgui.set_ini_filename(None);
        imgui.io_mut().display_size = [1200.0, 800.0];
        imgui.io_mut().delta_time = 1.0 / 60.0;
        let _ = imgui.fonts().build_rgba32_texture();

        let mut draw_lists = 0;
        for _ in 0..3 {
            let ui = imgui.new_frame();
            draw(ui, &mut demo, &mut scene);
            draw_lists = imgui.render().draw_lists_count();
        }

        assert!(draw_lists > 0);
        assert!(!scene.helper(handles.spot_helper).unwrap().visible);
        assert!(scene.helper(handles.directional_helper).unwrap().visible);
        assert_eq!(
            scene.object(handles.cube).unwrap().transform.rotation,
            Vector3::zero()
        );
        assert!(!demo.sphere_options.wireframe);
    }
}
