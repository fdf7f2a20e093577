//! Global uniform bindings for camera and lighting data
//!
//! Manages the uniform buffer and bind group for per-frame state shared by
//! every draw: camera matrices, the three lights and their shadow cameras.

use cgmath::{Matrix4, SquareMatrix};

use crate::{
    gfx::{camera::camera_utils::CameraUniform, scene::light::SceneLights},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content
///
/// MUST match the `GlobalUniform` struct in the shaders exactly. Every field
/// is a vec4 or mat4 so no padding is needed.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    /// x = 1 when shaders must gamma-encode their output
    pub frame: [f32; 4],
    pub ambient_color: [f32; 4],

    /// xyz = travel direction, w = enabled
    pub dir_direction: [f32; 4],
    /// rgb = radiance, w = casts shadow
    pub dir_color: [f32; 4],
    pub dir_view_proj: [[f32; 4]; 4],
    /// x = bias, y = map size
    pub dir_shadow: [f32; 4],

    /// xyz = position, w = enabled
    pub spot_position: [f32; 4],
    pub spot_direction: [f32; 4],
    /// rgb = radiance, w = casts shadow
    pub spot_color: [f32; 4],
    /// x = cos outer, y = cos inner
    pub spot_cone: [f32; 4],
    pub spot_view_proj: [[f32; 4]; 4],
    /// x = bias, y = map size
    pub spot_shadow: [f32; 4],
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn identity() -> [[f32; 4]; 4] {
    Matrix4::<f32>::identity().into()
}

impl GlobalUniform {
    /// Packs camera and light state
    ///
    /// # Arguments
    /// * `camera` - Camera uniform of the current frame
    /// * `lights` - Scene lights
    /// * `shadows_enabled` - Renderer-wide shadow switch; lights only cast when set
    /// * `encode_srgb` - Whether the render target expects gamma-encoded values
    pub fn from_scene(
        camera: &CameraUniform,
        lights: &SceneLights,
        shadows_enabled: bool,
        encode_srgb: bool,
    ) -> Self {
        let ambient = lights.ambient.radiance();
        let mut content = Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            frame: [flag(encode_srgb), 0.0, 0.0, 0.0],
            ambient_color: [ambient.r, ambient.g, ambient.b, 1.0],
            dir_direction: [0.0, -1.0, 0.0, 0.0],
            dir_color: [0.0; 4],
            dir_view_proj: identity(),
            dir_shadow: [0.0; 4],
            spot_position: [0.0; 4],
            spot_direction: [0.0, -1.0, 0.0, 0.0],
            spot_color: [0.0; 4],
            spot_cone: [1.0, 1.0, 0.0, 0.0],
            spot_view_proj: identity(),
            spot_shadow: [0.0; 4],
        };

        if let Some(light) = &lights.directional {
            let d = light.direction();
            let c = light.radiance();
            content.dir_direction = [d.x, d.y, d.z, 1.0];
            content.dir_color = [c.r, c.g, c.b, flag(shadows_enabled && light.cast_shadow)];
            content.dir_view_proj = light.shadow_view_proj().into();
            content.dir_shadow = [light.shadow.bias, light.shadow.map_size as f32, 0.0, 0.0];
        }

        if let Some(light) = &lights.spot {
            let d = light.direction();
            let c = light.radiance();
            let (cos_outer, cos_inner) = light.cone_cosines();
            content.spot_position = [light.position.x, light.position.y, light.position.z, 1.0];
            content.spot_direction = [d.x, d.y, d.z, 0.0];
            content.spot_color = [c.r, c.g, c.b, flag(shadows_enabled && light.cast_shadow)];
            content.spot_cone = [cos_outer, cos_inner, light.distance, 0.0];
            content.spot_view_proj = light.shadow_view_proj().into();
            content.spot_shadow = [light.shadow.bias, light.shadow.map_size as f32, 0.0, 0.0];
        }

        content
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUniform>;

/// View-projection of the light a shadow pass renders from
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadowPassUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Layout and bind group for global uniforms, bound to slot 0
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        color::Color,
        scene::light::{AmbientLight, DirectionalLight, SpotLight},
    };
    use cgmath::{EuclideanSpace, Point3};

    fn lights() -> SceneLights {
        let mut directional = DirectionalLight::new(Color::WHITE, 1.0)
            .with_position(-30.0, 50.0, 0.0)
            .looking_at(Point3::origin());
        directional.cast_shadow = true;
        directional.shadow.bias = -0.001;
        directional.shadow.map_size = 1024;
        let mut spot = SpotLight::new(Color::WHITE, 0.5)
            .with_position(-100.0, 100.0, 0.0)
            .with_angle(0.203)
            .looking_at(Point3::origin());
        spot.cast_shadow = true;
        SceneLights {
            ambient: AmbientLight::new(Color::from_hex(0x333333)),
            directional: Some(directional),
            spot: Some(spot),
        }
    }

    #[test]
    fn uniform_size_is_a_multiple_of_sixteen() {
        assert_eq!(std::mem::size_of::<GlobalUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 23 * 16);
    }

    #[test]
    fn lights_are_packed() {
        let content = GlobalUniform::from_scene(&CameraUniform::default(), &lights(), true, true);
        assert_eq!(content.frame[0], 1.0);
        assert!((content.ambient_color[0] - 0.0331).abs() < 1e-3);
        assert_eq!(content.dir_direction[3], 1.0);
        assert_eq!(content.dir_color[3], 1.0);
        assert_eq!(content.dir_shadow, [-0.001, 1024.0, 0.0, 0.0]);
        assert_eq!(content.spot_color[0], 0.5);
        assert_eq!(content.spot_position, [-100.0, 100.0, 0.0, 1.0]);
        assert_eq!(content.spot_shadow[1], 512.0);
    }

    #[test]
    fn shadows_need_the_renderer_switch() {
        let content = GlobalUniform::from_scene(&CameraUniform::default(), &lights(), false, false);
        assert_eq!(content.dir_color[3], 0.0);
        assert_eq!(content.spot_color[3], 0.0);
        assert_eq!(content.frame[0], 0.0);
    }

    #[test]
    fn missing_lights_are_disabled() {
        let content = GlobalUniform::from_scene(
            &CameraUniform::default(),
            &SceneLights::default(),
            true,
            true,
        );
        assert_eq!(content.dir_direction[3], 0.0);
        assert_eq!(content.spot_position[3], 0.0);
        assert_eq!(content.ambient_color, [0.0, 0.0, 0.0, 1.0]);
    }
}
