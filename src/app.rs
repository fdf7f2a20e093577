use cgmath::{Vector3, Zero};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    animation::Animation,
    config::AppConfig,
    error::{AppError, RenderError},
    gfx::{
        camera::{CameraController, CameraManager, OrbitCamera},
        rendering::RenderEngine,
        scene::Scene,
    },
    ui::UiManager,
};

pub struct ShadowboxApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    animation: Option<Box<dyn Animation>>,
    fatal: Option<AppError>,
}

impl ShadowboxApp {
    /// Create the application; the window opens once `run` starts the event loop
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new()?;

        let aspect = config.width as f32 / config.height.max(1) as f32;
        let camera =
            OrbitCamera::looking_at(Vector3::new(0.0, 5.0, 10.0), Vector3::zero(), aspect);
        let camera_manager = CameraManager::new(camera, CameraController::default());

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                scene: Scene::new(camera_manager),
                animation: None,
                fatal: None,
            },
        })
    }

    /// Attach the animation that builds and drives the scene
    pub fn attach_animation(&mut self, animation: Box<dyn Animation>) {
        log::info!("attached animation '{}'", animation.name());
        self.app_state.animation = Some(animation);
    }

    /// Run the application until the window closes
    pub fn run(self) -> Result<(), AppError> {
        let Self {
            event_loop,
            mut app_state,
        } = self;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut app_state)?;

        match app_state.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.fatal = Some(error);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let vsync = self.config.vsync;
        let surface_window = window.clone();
        let mut renderer = pollster::block_on(async move {
            RenderEngine::new(surface_window, width, height, vsync).await
        })?;
        renderer.set_shadow_debug(self.config.shadow_debug);

        if let Some(animation) = self.animation.as_mut() {
            animation.initialize(&mut self.scene);
        } else {
            log::warn!("no animation attached, rendering an empty scene");
        }
        self.scene.camera_manager.resize(width, height);
        self.scene
            .init_gpu_resources(renderer.device(), renderer.queue(), renderer.layouts());

        let mut ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        log::info!("window ready at {}x{}", width, height);
        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        Ok(())
    }

    /// GUI, animation, GPU sync and drawing for one frame
    fn redraw(&mut self) -> Result<(), RenderError> {
        let Self {
            window,
            render_engine,
            ui_manager,
            scene,
            animation,
            ..
        } = self;
        let (Some(window), Some(render_engine), Some(ui_manager)) =
            (window.as_ref(), render_engine.as_mut(), ui_manager.as_mut())
        else {
            return Ok(());
        };

        ui_manager.update_logic(window, |ui| {
            if let Some(animation) = animation.as_mut() {
                animation.render_ui(ui, scene);
            }
        });
        if let Some(animation) = animation.as_mut() {
            animation.update(scene);
        }

        scene.update();
        scene.sync_gpu(
            render_engine.device(),
            render_engine.queue(),
            render_engine.layouts(),
        );
        render_engine.update(scene);

        render_engine.render_frame(
            scene,
            Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 view: &wgpu::TextureView| {
                    ui_manager.render_display_only(device, queue, encoder, view);
                },
            ),
        )
    }
}

fn is_exit_key(key: PhysicalKey, state: ElementState) -> bool {
    key == PhysicalKey::Code(KeyCode::Escape) && state == ElementState::Pressed
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(error) = self.init_graphics(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.render_engine.is_none() {
            return;
        }
        let Some(window) = self.window.clone() else {
            return;
        };

        // Escape quits even while a widget has keyboard focus
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key,
                    state,
                    ..
                },
            ..
        } = &event
        {
            if is_exit_key(*physical_key, *state) {
                log::info!("escape pressed, exiting");
                event_loop.exit();
                return;
            }
        }

        // UI gets first pick of the rest of the input
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_input(&window, window_id, &event) {
                self.scene.camera_manager.controller.release_all();
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene.camera_manager.resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(error) = self.redraw() {
                    self.fail(event_loop, error.into());
                }
            }
            other => {
                self.scene.camera_manager.process_window_event(&other);
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        // Don't move the camera while the panel is being used
        if self
            .ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_input())
        {
            return;
        }

        self.scene.camera_manager.process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_pressed_escape_exits() {
        let escape = PhysicalKey::Code(KeyCode::Escape);
        assert!(is_exit_key(escape, ElementState::Pressed));
        assert!(!is_exit_key(escape, ElementState::Released));
        assert!(!is_exit_key(
            PhysicalKey::Code(KeyCode::KeyC),
            ElementState::Pressed
        ));
    }
}
