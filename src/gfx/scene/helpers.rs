//! Debug helpers drawn as unlit coloured lines
//!
//! Helpers that visualise a light are regenerated from that light every
//! frame, so they follow animated light parameters without manual updates.

use cgmath::{InnerSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4};

use super::light::SceneLights;
use super::vertex::LineVertex;
use crate::gfx::color::Color;

/// Which light a light helper visualises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightRef {
    Directional,
    Spot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HelperKind {
    /// RGB lines along +X, +Y and +Z
    Axes { size: f32 },
    /// Square grid in the XZ plane
    Grid { size: f32, divisions: u32 },
    /// Square facing the light direction plus a line to the target
    DirectionalLight { size: f32 },
    /// Frustum of a light's shadow camera
    ShadowCamera(LightRef),
    /// Cone outline of the spot light
    SpotLight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Helper {
    pub name: String,
    pub kind: HelperKind,
    pub visible: bool,
}

impl Helper {
    pub fn new(name: &str, kind: HelperKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            visible: true,
        }
    }

    /// Line-list vertices for this helper, empty when invisible or when the
    /// light it refers to does not exist
    pub fn lines(&self, lights: &SceneLights) -> Vec<LineVertex> {
        if !self.visible {
            return Vec::new();
        }

        match self.kind {
            HelperKind::Axes { size } => axes_lines(size),
            HelperKind::Grid { size, divisions } => grid_lines(
                size,
                divisions,
                Color::from_hex(0x444444),
                Color::from_hex(0x888888),
            ),
            HelperKind::DirectionalLight { size } => lights
                .directional
                .as_ref()
                .map(|light| {
                    directional_light_lines(light.position, light.target, size, light.color)
                })
                .unwrap_or_default(),
            HelperKind::ShadowCamera(LightRef::Directional) => lights
                .directional
                .as_ref()
                .map(|light| shadow_camera_lines(light.shadow_view_proj(), light.position))
                .unwrap_or_default(),
            HelperKind::ShadowCamera(LightRef::Spot) => lights
                .spot
                .as_ref()
                .map(|light| shadow_camera_lines(light.shadow_view_proj(), light.position))
                .unwrap_or_default(),
            HelperKind::SpotLight => lights
                .spot
                .as_ref()
                .map(|light| {
                    let length = if light.distance > 0.0 {
                        light.distance
                    } else {
                        1000.0
                    };
                    spot_light_lines(light.position, light.target, light.angle, length, light.color)
                })
                .unwrap_or_default(),
        }
    }
}

fn segment(out: &mut Vec<LineVertex>, a: Vector3<f32>, b: Vector3<f32>, color: Color) {
    out.push(LineVertex::new(a.into(), color.to_array()));
    out.push(LineVertex::new(b.into(), color.to_array()));
}

/// Orthonormal frame whose +Z points from `position` to `target`
fn look_frame(position: Point3<f32>, target: Point3<f32>) -> Matrix4<f32> {
    let forward = (target - position).normalize();
    let up = if forward.y.abs() > 0.999 {
        Vector3::unit_z()
    } else {
        Vector3::unit_y()
    };
    let right = up.cross(forward).normalize();
    let up = forward.cross(right);
    Matrix4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        forward.extend(0.0),
        Vector4::new(position.x, position.y, position.z, 1.0),
    )
}

fn transform_point(m: &Matrix4<f32>, p: Vector3<f32>) -> Vector3<f32> {
    let h = m * p.extend(1.0);
    h.truncate() / h.w
}

pub fn axes_lines(size: f32) -> Vec<LineVertex> {
    let origin = [0.0, 0.0, 0.0];
    vec![
        LineVertex::new(origin, [1.0, 0.0, 0.0]),
        LineVertex::new([size, 0.0, 0.0], [1.0, 0.6, 0.0]),
        LineVertex::new(origin, [0.0, 1.0, 0.0]),
        LineVertex::new([0.0, size, 0.0], [0.6, 1.0, 0.0]),
        LineVertex::new(origin, [0.0, 0.0, 1.0]),
        LineVertex::new([0.0, 0.0, size], [0.0, 0.6, 1.0]),
    ]
}

pub fn grid_lines(size: f32, divisions: u32, center: Color, grid: Color) -> Vec<LineVertex> {
    let divisions = divisions.max(1);
    let step = size / divisions as f32;
    let half = size / 2.0;

    let mut out = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if i == divisions / 2 { center } else { grid };
        segment(
            &mut out,
            Vector3::new(-half, 0.0, k),
            Vector3::new(half, 0.0, k),
            color,
        );
        segment(
            &mut out,
            Vector3::new(k, 0.0, -half),
            Vector3::new(k, 0.0, half),
            color,
        );
    }
    out
}

pub fn directional_light_lines(
    position: Point3<f32>,
    target: Point3<f32>,
    size: f32,
    color: Color,
) -> Vec<LineVertex> {
    let frame = look_frame(position, target);
    let corners = [
        Vector3::new(-size, size, 0.0),
        Vector3::new(size, size, 0.0),
        Vector3::new(size, -size, 0.0),
        Vector3::new(-size, -size, 0.0),
    ]
    .map(|c| transform_point(&frame, c));

    let mut out = Vec::with_capacity(10);
    for i in 0..4 {
        segment(&mut out, corners[i], corners[(i + 1) % 4], color);
    }
    segment(
        &mut out,
        Vector3::new(position.x, position.y, position.z),
        Vector3::new(target.x, target.y, target.z),
        color,
    );
    out
}

/// Frustum outline of a camera given its view-projection (wgpu depth 0..1)
pub fn shadow_camera_lines(view_proj: Matrix4<f32>, eye: Point3<f32>) -> Vec<LineVertex> {
    let Some(inverse) = view_proj.invert() else {
        return Vec::new();
    };
    let frustum = Color::from_hex(0xffaa00);
    let cone = Color::from_hex(0xff0000);
    let up = Color::from_hex(0x00aaff);
    let target = Color::from_hex(0xffffff);
    let cross = Color::from_hex(0x333333);

    let point = |x: f32, y: f32, z: f32| transform_point(&inverse, Vector3::new(x, y, z));
    let (near, far) = (0.0, 1.0);
    let n = [
        point(-1.0, -1.0, near),
        point(1.0, -1.0, near),
        point(1.0, 1.0, near),
        point(-1.0, 1.0, near),
    ];
    let f = [
        point(-1.0, -1.0, far),
        point(1.0, -1.0, far),
        point(1.0, 1.0, far),
        point(-1.0, 1.0, far),
    ];
    let p = Vector3::new(eye.x, eye.y, eye.z);

    let mut out = Vec::with_capacity(64);
    for i in 0..4 {
        let j = (i + 1) % 4;
        segment(&mut out, n[i], n[j], frustum);
        segment(&mut out, f[i], f[j], frustum);
        segment(&mut out, n[i], f[i], frustum);
        segment(&mut out, p, n[i], cone);
    }

    let u = [
        point(-0.7, 1.1, near),
        point(0.7, 1.1, near),
        point(0.0, 2.0, near),
    ];
    for i in 0..3 {
        segment(&mut out, u[i], u[(i + 1) % 3], up);
    }

    let near_center = point(0.0, 0.0, near);
    segment(&mut out, p, near_center, cone);
    segment(&mut out, near_center, point(0.0, 0.0, far), target);

    for depth in [near, far] {
        segment(&mut out, point(-1.0, 0.0, depth), point(1.0, 0.0, depth), cross);
        segment(&mut out, point(0.0, -1.0, depth), point(0.0, 1.0, depth), cross);
    }
    out
}

pub fn spot_light_lines(
    position: Point3<f32>,
    target: Point3<f32>,
    angle: f32,
    length: f32,
    color: Color,
) -> Vec<LineVertex> {
    const SEGMENTS: usize = 32;

    let width = length * angle.tan();
    let frame = look_frame(position, target)
        * Matrix4::from_nonuniform_scale(width, width, length);
    let local = |x: f32, y: f32, z: f32| transform_point(&frame, Vector3::new(x, y, z));

    let apex = local(0.0, 0.0, 0.0);
    let mut out = Vec::with_capacity(2 * (5 + SEGMENTS));
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)] {
        segment(&mut out, apex, local(x, y, 1.0), color);
    }

    for i in 0..SEGMENTS {
        let a = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
        let b = (i + 1) as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
        segment(
            &mut out,
            local(a.cos(), a.sin(), 1.0),
            local(b.cos(), b.sin(), 1.0),
            color,
        );
    }
    out
}
