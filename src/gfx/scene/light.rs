//! Scene lights
//!
//! Ambient, directional and spot lights. Directional and spot lights can cast
//! shadows; each owns a [`LightShadow`] describing the camera its shadow map
//! is rendered from.

use cgmath::{ortho, perspective, InnerSpace, Matrix4, Point3, Rad, Vector3};

use crate::gfx::{camera::orbit_camera::OPENGL_TO_WGPU_MATRIX, color::Color};

/// Smallest field of view a spot shadow camera may use
const MIN_SHADOW_FOV: f32 = 1.0e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowCamera {
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    },
    Perspective {
        fovy: Rad<f32>,
        aspect: f32,
    },
}

/// Shadow map parameters of a light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightShadow {
    pub camera: ShadowCamera,
    pub near: f32,
    pub far: f32,
    /// Width and height of the square shadow map
    pub map_size: u32,
    /// Added to the receiver's light-space depth before comparison
    pub bias: f32,
}

impl LightShadow {
    pub fn orthographic() -> Self {
        Self {
            camera: ShadowCamera::Orthographic {
                left: -5.0,
                right: 5.0,
                bottom: -5.0,
                top: 5.0,
            },
            near: 0.5,
            far: 500.0,
            map_size: 512,
            bias: 0.0,
        }
    }

    pub fn perspective() -> Self {
        Self {
            camera: ShadowCamera::Perspective {
                fovy: Rad(50f32.to_radians()),
                aspect: 1.0,
            },
            near: 0.5,
            far: 500.0,
            map_size: 512,
            bias: 0.0,
        }
    }

    /// Projection into wgpu clip space (depth 0..1)
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let projection = match self.camera {
            ShadowCamera::Orthographic {
                left,
                right,
                bottom,
                top,
            } => ortho(left, right, bottom, top, self.near, self.far),
            ShadowCamera::Perspective { fovy, aspect } => {
                perspective(Rad(fovy.0.max(MIN_SHADOW_FOV)), aspect, self.near, self.far)
            }
        };
        OPENGL_TO_WGPU_MATRIX * projection
    }
}

/// View matrix of a light at `position` looking at `target`, Y up
pub fn light_view(position: Point3<f32>, target: Point3<f32>) -> Matrix4<f32> {
    let direction = target - position;
    let up = if direction.normalize().y.abs() > 0.999 {
        Vector3::unit_z()
    } else {
        Vector3::unit_y()
    };
    Matrix4::look_at_rh(position, target, up)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            intensity: 1.0,
        }
    }

    pub fn radiance(&self) -> Color {
        self.color.scaled(self.intensity)
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            intensity: 1.0,
        }
    }
}

/// Parallel light travelling from `position` toward `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub cast_shadow: bool,
    pub shadow: LightShadow,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Point3::new(0.0, 1.0, 0.0),
            target: Point3::new(0.0, 0.0, 0.0),
            cast_shadow: false,
            shadow: LightShadow::orthographic(),
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Point3::new(x, y, z);
        self
    }

    pub fn looking_at(mut self, target: Point3<f32>) -> Self {
        self.target = target;
        self
    }

    pub fn radiance(&self) -> Color {
        self.color.scaled(self.intensity)
    }

    /// Unit direction the light travels in
    pub fn direction(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }

    pub fn shadow_view_proj(&self) -> Matrix4<f32> {
        self.shadow.projection_matrix() * light_view(self.position, self.target)
    }
}

/// Cone light with a soft edge; `distance` 0 means unlimited range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    /// Half-angle of the cone in radians
    pub angle: f32,
    /// Fraction of the cone, from the edge inward, that fades out
    pub penumbra: f32,
    pub distance: f32,
    pub cast_shadow: bool,
    pub shadow: LightShadow,
}

impl SpotLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        let mut light = Self {
            color,
            intensity,
            position: Point3::new(0.0, 1.0, 0.0),
            target: Point3::new(0.0, 0.0, 0.0),
            angle: std::f32::consts::FRAC_PI_3,
            penumbra: 0.0,
            distance: 0.0,
            cast_shadow: false,
            shadow: LightShadow::perspective(),
        };
        light.sync_shadow_camera();
        light
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Point3::new(x, y, z);
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self.sync_shadow_camera();
        self
    }

    pub fn looking_at(mut self, target: Point3<f32>) -> Self {
        self.target = target;
        self
    }

    pub fn radiance(&self) -> Color {
        self.color.scaled(self.intensity)
    }

    pub fn direction(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }

    /// Cosines of the outer cone edge and of the start of the penumbra
    pub fn cone_cosines(&self) -> (f32, f32) {
        let outer = self.angle.cos();
        let inner = (self.angle * (1.0 - self.penumbra.clamp(0.0, 1.0))).cos();
        (outer, inner)
    }

    /// Keeps the shadow frustum covering the cone
    pub fn sync_shadow_camera(&mut self) {
        if let ShadowCamera::Perspective { fovy, .. } = &mut self.shadow.camera {
            *fovy = Rad((2.0 * self.angle).max(MIN_SHADOW_FOV));
        }
    }

    pub fn shadow_view_proj(&self) -> Matrix4<f32> {
        self.shadow.projection_matrix() * light_view(self.position, self.target)
    }
}

/// All lights of a scene
#[derive(Debug, Clone, Default)]
pub struct SceneLights {
    pub ambient: AmbientLight,
    pub directional: Option<DirectionalLight>,
    pub spot: Option<SpotLight>,
}

impl SceneLights {
    /// Per-frame bookkeeping after lights were edited
    pub fn update(&mut self) {
        if let Some(spot) = self.spot.as_mut() {
            spot.sync_shadow_camera();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{EuclideanSpace, Vector4};

    fn to_ndc(m: Matrix4<f32>, p: Point3<f32>) -> Vector3<f32> {
        let clip = m * p.to_homogeneous();
        Vector3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
    }

    fn demo_directional() -> DirectionalLight {
        let mut light = DirectionalLight::new(Color::WHITE, 1.0)
            .with_position(-30.0, 50.0, 0.0)
            .looking_at(Point3::origin());
        if let ShadowCamera::Orthographic { bottom, .. } = &mut light.shadow.camera {
            *bottom = -12.0;
        }
        light.shadow.map_size = 1024;
        light.shadow.bias = -0.001;
        light
    }

    #[test]
    fn directional_direction_points_at_target() {
        let light = demo_directional();
        let d = light.direction();
        assert!((d.magnitude() - 1.0).abs() < 1e-6);
        assert!(d.x > 0.0 && d.y < 0.0 && d.z.abs() < 1e-6);
    }

    #[test]
    fn directional_shadow_camera_sees_its_target() {
        let light = demo_directional();
        let ndc = to_ndc(light.shadow_view_proj(), Point3::origin());
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn directional_shadow_bottom_extends_further() {
        let light = demo_directional();
        let view_proj = light.shadow_view_proj();
        // light-space y of -12 is the bottom edge, +5 the top
        let inverse = cgmath::SquareMatrix::invert(&view_proj).unwrap();
        let bottom = inverse * Vector4::new(0.0, -1.0, 0.5, 1.0);
        let top = inverse * Vector4::new(0.0, 1.0, 0.5, 1.0);
        let view = light_view(light.position, light.target);
        let bottom_view = view * bottom;
        let top_view = view * top;
        assert!((bottom_view.y / bottom_view.w + 12.0).abs() < 1e-3);
        assert!((top_view.y / top_view.w - 5.0).abs() < 1e-3);
    }

    #[test]
    fn orthographic_depth_runs_from_near_to_far() {
        let light = demo_directional();
        let view_proj = light.shadow_view_proj();
        let distance = (light.target - light.position).magnitude();
        let expected = (distance - 0.5) / (500.0 - 0.5);
        let ndc = to_ndc(view_proj, Point3::origin());
        assert!((ndc.z - expected).abs() < 1e-4, "origin depth {}", ndc.z);

        let projection = light.shadow.projection_matrix();
        let near = projection * Vector4::new(0.0, 0.0, -0.5, 1.0);
        let far = projection * Vector4::new(0.0, 0.0, -500.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn spot_cone_without_penumbra_is_hard() {
        let spot = SpotLight::new(Color::WHITE, 1.0).with_angle(0.203);
        let (outer, inner) = spot.cone_cosines();
        assert_eq!(outer, inner);
        assert!((outer - 0.203f32.cos()).abs() < 1e-6);
    }

    #[test]
    fn spot_penumbra_widens_the_fade() {
        let mut spot = SpotLight::new(Color::WHITE, 1.0).with_angle(0.5);
        spot.penumbra = 1.0;
        let (outer, inner) = spot.cone_cosines();
        assert_eq!(inner, 1.0);
        assert!(outer < inner);
    }

    #[test]
    fn spot_shadow_fov_follows_angle() {
        let mut lights = SceneLights {
            spot: Some(SpotLight::new(Color::WHITE, 1.0).with_angle(0.203)),
            ..SceneLights::default()
        };
        lights.spot.as_mut().unwrap().angle = 0.4;
        lights.update();
        let spot = lights.spot.unwrap();
        assert_eq!(
            spot.shadow.camera,
            ShadowCamera::Perspective {
                fovy: Rad(0.8),
                aspect: 1.0
            }
        );
    }

    #[test]
    fn spot_with_zero_angle_still_projects() {
        let spot = SpotLight::new(Color::WHITE, 1.0)
            .with_position(-100.0, 100.0, 0.0)
            .with_angle(0.0)
            .looking_at(Point3::origin());
        let ndc = to_ndc(spot.shadow_view_proj(), Point3::origin());
        assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3);
        assert!(ndc.z.is_finite());
    }

    #[test]
    fn vertical_light_uses_a_valid_up_vector() {
        let view = light_view(Point3::new(0.0, 10.0, 0.0), Point3::origin());
        let p = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p.z + 10.0).abs() < 1e-4);
    }
}
