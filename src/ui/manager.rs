// src/ui/manager.rs
//! Dear ImGui on top of winit and wgpu
//!
//! Owns the ImGui context together with its winit platform glue and wgpu
//! renderer. A frame is built with [`UiManager::update_logic`] and drawn over
//! the finished scene with [`UiManager::render_display_only`].

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::{Window, WindowId},
};

/// Font size at a scale factor of 1
const BASE_FONT_SIZE: f32 = 16.0;

/// How a window event relates to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputRoute {
    /// Pointer or key input the panel may keep for itself
    Capturable,
    /// State both the panel and the camera need, never captured
    Shared,
    /// Not UI input
    Ignored,
}

fn route(event: &WindowEvent) -> InputRoute {
    match event {
        WindowEvent::CursorMoved { .. }
        | WindowEvent::CursorLeft { .. }
        | WindowEvent::MouseInput { .. }
        | WindowEvent::MouseWheel { .. }
        | WindowEvent::KeyboardInput { .. } => InputRoute::Capturable,
        WindowEvent::ModifiersChanged(_) | WindowEvent::Focused(_) => InputRoute::Shared,
        _ => InputRoute::Ignored,
    }
}

fn font_size(scale_factor: f64) -> f32 {
    (BASE_FONT_SIZE as f64 * scale_factor.max(0.5)) as f32
}

pub struct UiManager {
    imgui: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
}

impl UiManager {
    /// Creates the context and the renderer drawing into `output_color_format`
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut imgui = Context::create();
        imgui.set_ini_filename(None);

        // DPI is locked; high-DPI screens get a larger font instead
        let mut platform = WinitPlatform::new(&mut imgui);
        platform.attach_window(imgui.io_mut(), window, HiDpiMode::Locked(1.0));

        let size_pixels = font_size(window.scale_factor());
        imgui.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels,
                ..Default::default()
            }),
        }]);

        let renderer = Renderer::new(
            &mut imgui,
            device,
            queue,
            RendererConfig {
                texture_format: output_color_format,
                ..Default::default()
            },
        );
        log::debug!(
            "imgui ready: {:?} target, {}px font",
            output_color_format,
            size_pixels
        );

        Self {
            imgui,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
        }
    }

    pub fn update_display_size(&mut self, width: u32, height: u32) {
        self.imgui.io_mut().display_size = [width as f32, height as f32];
    }

    /// True while a widget is hovered, dragged or being typed into
    pub fn wants_input(&self) -> bool {
        let io = self.imgui.io();
        io.want_capture_mouse || io.want_capture_keyboard
    }

    /// Feeds a window event to ImGui; true when the UI keeps it for itself
    pub fn handle_input(
        &mut self,
        window: &Window,
        window_id: WindowId,
        event: &WindowEvent,
    ) -> bool {
        let route = route(event);
        if route == InputRoute::Ignored {
            return false;
        }

        let event: Event<()> = Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        self.platform
            .handle_event(self.imgui.io_mut(), window, &event);

        route == InputRoute::Capturable && self.wants_input()
    }

    /// Starts a frame and lets `run_ui` build the widgets
    ///
    /// Call once per frame before [`UiManager::render_display_only`].
    /// Returns whether the UI wants input afterwards.
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F) -> bool
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.imgui.io_mut().update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(e) = self.platform.prepare_frame(self.imgui.io_mut(), window) {
            log::warn!("failed to prepare UI frame: {}", e);
        }

        let ui: &imgui::Ui = self.imgui.frame();
        run_ui(ui);

        let cursor = ui.mouse_cursor();
        if self.last_cursor != cursor {
            self.last_cursor = cursor;
            self.platform.prepare_render(ui, window);
        }

        self.wants_input()
    }

    /// Draws the frame built by the last `update_logic()` over `color_attachment`
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        let draw_data = self.imgui.render();
        let [width, height] = draw_data.display_size;
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        // Load keeps the scene underneath
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("UI Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(e) = self.renderer.render(draw_data, queue, device, &mut pass) {
            log::error!("failed to render UI: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::Modifiers;

    #[test]
    fn modifiers_are_shared_with_the_camera() {
        assert_eq!(
            route(&WindowEvent::ModifiersChanged(Modifiers::default())),
            InputRoute::Shared
        );
        assert_eq!(route(&WindowEvent::Focused(false)), InputRoute::Shared);
    }

    #[test]
    fn window_management_is_not_ui_input() {
        assert_eq!(route(&WindowEvent::CloseRequested), InputRoute::Ignored);
        assert_eq!(route(&WindowEvent::RedrawRequested), InputRoute::Ignored);
    }

    #[test]
    fn font_follows_the_scale_factor() {
        assert_eq!(font_size(1.0), 16.0);
        assert_eq!(font_size(2.0), 32.0);
        assert_eq!(font_size(0.0), 8.0);
    }
}
