use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Orbit controls: left-drag rotates, right-drag or shift+left-drag pans,
/// the wheel zooms and shift+C returns to the initial pose.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_left_pressed: bool,
    is_right_pressed: bool,
    is_shift_held: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(0.005, 1.0)
    }
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_left_pressed: false,
            is_right_pressed: false,
            is_shift_held: false,
        }
    }

    /// Handles button, wheel and keyboard events. Returns true when the camera moved.
    pub fn process_window_event(&mut self, event: &WindowEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            WindowEvent::MouseInput { button, state, .. } => {
                self.set_button(*button, *state == ElementState::Pressed);
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 / 20.0
                    }
                };
                self.zoom(scroll_amount, camera);
                true
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.is_shift_held = modifiers.state().shift_key();
                false
            }
            WindowEvent::KeyboardInput { event, .. } => self.process_key_event(event, camera),
            WindowEvent::Focused(false) => {
                self.release_all();
                false
            }
            _ => false,
        }
    }

    /// Raw mouse motion drives rotation and panning while a button is held
    pub fn process_device_event(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::MouseMotion { delta } => {
                self.drag(delta.0 as f32, delta.1 as f32, camera)
            }
            _ => false,
        }
    }

    fn process_key_event(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) -> bool {
        match event.physical_key {
            PhysicalKey::Code(code) => {
                self.key(code, event.state == ElementState::Pressed, camera)
            }
            _ => false,
        }
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.is_left_pressed = pressed,
            MouseButton::Right => self.is_right_pressed = pressed,
            _ => {}
        }
    }

    pub fn key(&mut self, code: KeyCode, pressed: bool, camera: &mut OrbitCamera) -> bool {
        match code {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                self.is_shift_held = pressed;
                false
            }
            KeyCode::KeyC if pressed && self.is_shift_held => {
                log::info!("resetting camera to its initial pose");
                camera.reset_to_default();
                true
            }
            _ => false,
        }
    }

    pub fn zoom(&mut self, amount: f32, camera: &mut OrbitCamera) {
        camera.add_distance(amount * self.zoom_speed);
    }

    pub fn drag(&mut self, dx: f32, dy: f32, camera: &mut OrbitCamera) -> bool {
        if self.is_panning() {
            camera.pan((-dx * self.pan_speed, dy * self.pan_speed));
            true
        } else if self.is_rotating() {
            camera.add_yaw(-dx * self.rotate_speed);
            camera.add_pitch(dy * self.rotate_speed);
            true
        } else {
            false
        }
    }

    /// Forgets held buttons, e.g. when the GUI captures the mouse or focus is lost
    pub fn release_all(&mut self) {
        self.is_left_pressed = false;
        self.is_right_pressed = false;
    }

    pub fn is_panning(&self) -> bool {
        self.is_right_pressed || (self.is_left_pressed && self.is_shift_held)
    }

    pub fn is_rotating(&self) -> bool {
        self.is_left_pressed && !self.is_shift_held
    }
}
