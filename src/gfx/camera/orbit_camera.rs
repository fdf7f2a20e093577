use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

/// Remaps OpenGL clip depth [-1, 1] to wgpu's [0, 1]
///
/// `Matrix4::new` is column-major: the last column carries the 0.5 offset.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Spherical placement an orbit camera can be reset to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub target: Vector3<f32>,
}

impl OrbitPose {
    /// Pose that puts the eye at `eye` while looking at `target`
    pub fn looking_at(eye: Vector3<f32>, target: Vector3<f32>) -> Self {
        let offset = eye - target;
        let distance = offset.magnitude().max(f32::EPSILON);
        Self {
            distance,
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            yaw: offset.x.atan2(offset.z),
            target,
        }
    }
}

/// Perspective camera orbiting a target point, Y up
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    home: OrbitPose,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let home = OrbitPose {
            distance,
            pitch,
            yaw,
            target,
        };
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad::from(Deg(45.0)),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
            home,
        };
        camera.update();
        camera
    }

    /// Camera placed at `eye` looking at `target`; this placement becomes the reset pose
    pub fn looking_at(eye: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let pose = OrbitPose::looking_at(eye, target);
        Self::new(pose.distance, pose.pitch, pose.yaw, pose.target, aspect)
    }

    pub fn with_perspective(mut self, fovy: impl Into<Rad<f32>>, znear: f32, zfar: f32) -> Self {
        self.fovy = fovy.into();
        self.znear = znear;
        self.zfar = zfar;
        self
    }

    /// Restores the pose the camera was created with
    pub fn reset_to_default(&mut self) {
        self.distance = self.home.distance;
        self.pitch = self.home.pitch;
        self.yaw = self.home.yaw;
        self.target = self.home.target;

        self.update();
    }

    pub fn home(&self) -> OrbitPose {
        self.home
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.0 + f32::EPSILON)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale pan movement by distance for consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        let total_movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        // Move both eye and target to maintain the view direction
        self.eye += total_movement;
        self.target += total_movement;
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.target),
            self.up,
        )
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(1.0),
            max_distance: Some(500.0),
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-3
    }

    #[test]
    fn looking_at_reproduces_the_eye() {
        let eye = Vector3::new(-10.0, 30.0, 30.0);
        let camera = OrbitCamera::looking_at(eye, Vector3::zero(), 1.5);
        assert!(close(camera.eye, eye));
        assert!((camera.distance - 1900f32.sqrt()).abs() < 1e-4);
        assert_eq!(camera.up, Vector3::unit_y());
    }

    #[test]
    fn reset_returns_to_the_initial_pose() {
        let eye = Vector3::new(-10.0, 30.0, 30.0);
        let mut camera = OrbitCamera::looking_at(eye, Vector3::zero(), 1.0);
        camera.add_yaw(0.7);
        camera.add_pitch(-0.3);
        camera.pan((1.0, 2.0));
        camera.add_distance(5.0);
        assert!(!close(camera.eye, eye));

        camera.reset_to_default();
        assert!(close(camera.eye, eye));
        assert_eq!(camera.target, Vector3::zero());
    }

    #[test]
    fn pitch_and_distance_are_bounded() {
        let mut camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.set_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        camera.set_distance(1.0e6);
        assert_eq!(camera.distance, 500.0);
        camera.set_distance(0.0);
        assert_eq!(camera.distance, 1.0);
    }

    #[test]
    fn pan_moves_eye_and_target_together() {
        let mut camera = OrbitCamera::new(10.0, 0.3, 0.2, Vector3::zero(), 1.0);
        let offset = camera.eye - camera.target;
        camera.pan((0.5, -0.5));
        assert!(camera.target != Vector3::zero());
        assert!(close(camera.eye - camera.target, offset));
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let mut camera =
            OrbitCamera::looking_at(Vector3::new(-10.0, 30.0, 30.0), Vector3::zero(), 1.5);
        camera.update_view_proj();
        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
        assert_eq!(camera.uniform.view_position[3], 1.0);
    }

    #[test]
    fn projection_keeps_fov_and_maps_depth_to_unit_range() {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 10.0), Vector3::zero(), 1.0)
            .with_perspective(Deg(45.0), 0.1, 1000.0);
        let projection = camera.projection_matrix();
        let to_ndc = |p: Vector4<f32>| {
            let clip = projection * p;
            clip.truncate() / clip.w
        };

        let half_height = 10.0 * Rad::from(Deg(22.5_f32)).0.tan();
        let top = to_ndc(Vector4::new(0.0, half_height, -10.0, 1.0));
        assert!((top.y - 1.0).abs() < 1e-4, "top edge at ndc y {}", top.y);

        assert!(to_ndc(Vector4::new(0.0, 0.0, -0.1, 1.0)).z.abs() < 1e-4);
        assert!((to_ndc(Vector4::new(0.0, 0.0, -1000.0, 1.0)).z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.resize_projection(1200, 800);
        assert_eq!(camera.aspect, 1.5);
        camera.resize_projection(100, 0);
        assert_eq!(camera.aspect, 100.0);
    }
}
