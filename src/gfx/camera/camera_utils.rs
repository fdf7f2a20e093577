use cgmath::{Matrix4, SquareMatrix};
use winit::event::{DeviceEvent, WindowEvent};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

/// Scene camera together with the controls driving it
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        self.controller
            .process_window_event(event, &mut self.camera)
    }

    pub fn process_device_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller
            .process_device_event(event, &mut self.camera)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize_projection(width, height);
    }

    pub fn update(&mut self) {
        self.camera.update_view_proj();
    }

    /// Get the view projection matrix from the camera
    pub fn get_view_proj_matrix(&self) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    #[test]
    fn manager_keeps_uniform_in_sync() {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 10.0), Vector3::zero(), 1.0);
        let mut manager = CameraManager::new(camera, CameraController::default());
        manager.resize(800, 400);
        manager.update();
        assert_eq!(manager.camera.aspect, 2.0);
        assert_eq!(
            manager.camera.uniform.view_proj,
            convert_matrix4_to_array(manager.get_view_proj_matrix())
        );
    }

    #[test]
    fn default_uniform_is_identity() {
        let uniform = CameraUniform::default();
        assert_eq!(uniform.view_proj[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(uniform.view_proj[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
