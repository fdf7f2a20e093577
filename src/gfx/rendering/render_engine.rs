//! WGPU-based rendering engine
//!
//! Owns the surface, device and every per-frame GPU resource. A frame is
//! drawn in up to four passes: one depth-only pass per shadow casting light,
//! an optional background pass, the main lit pass (objects then helper
//! lines) and the UI overlay.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::error::RenderError;
use crate::gfx::{
    color::Color,
    resources::{
        global_bindings::{GlobalBindings, GlobalUBO, GlobalUniform, ShadowPassUniform},
        layouts::SceneLayouts,
        material::{Material, Side},
        texture_resource::TextureResource,
    },
    scene::{
        object::DrawObject,
        scene::{Background, Scene},
    },
};
use crate::wgpu_utils::{binding_builder::BindGroupBuilder, uniform_buffer::UniformBuffer};

use super::line_renderer::LineRenderer;
use super::pipeline_manager::{PipelineConfig, PipelineManager};

const STANDARD: &str = "Standard";
const STANDARD_DOUBLE_SIDED: &str = "StandardDoubleSided";
const STANDARD_WIREFRAME: &str = "StandardWireframe";
const SHADOW: &str = "Shadow";
const SHADOW_WIREFRAME: &str = "ShadowWireframe";
const BACKGROUND: &str = "Background";

/// Depth map a light renders its shadow casters into
struct ShadowTarget {
    label: &'static str,
    map: TextureResource,
    size: u32,
    ubo: UniformBuffer<ShadowPassUniform>,
    bind_group: wgpu::BindGroup,
    /// The light exists, casts shadows and shadows are enabled
    active: bool,
}

impl ShadowTarget {
    fn new(device: &Device, layouts: &SceneLayouts, size: u32, label: &'static str) -> Self {
        let ubo = UniformBuffer::new(device);
        let bind_group = BindGroupBuilder::new(&layouts.shadow_pass)
            .resource(ubo.binding_resource())
            .create(device, &format!("{label} Pass Bind Group"));
        Self {
            label,
            map: TextureResource::create_shadow_map(device, size, label),
            size,
            ubo,
            bind_group,
            active: false,
        }
    }

    /// Recreates the depth map when the light asks for another resolution
    fn ensure_size(&mut self, device: &Device, size: u32) -> bool {
        let size = size.max(1);
        if size == self.size {
            return false;
        }
        log::debug!("{} resized to {}x{}", self.label, size, size);
        self.map = TextureResource::create_shadow_map(device, size, self.label);
        self.size = size;
        true
    }
}

fn shadow_bind_group(
    device: &Device,
    layouts: &SceneLayouts,
    directional: &ShadowTarget,
    spot: &ShadowTarget,
) -> wgpu::BindGroup {
    BindGroupBuilder::new(&layouts.shadow)
        .texture(&directional.map.view)
        .texture(&spot.map.view)
        .sampler(&directional.map.sampler)
        .create(device, "Shadow Bind Group")
}

/// Clear colour of the main pass; the surface stores what is written as is
/// unless it is an sRGB format
fn clear_color(background: &Background, encode_srgb: bool) -> wgpu::Color {
    let color = match background {
        Background::Color(color) => *color,
        Background::Texture(_) => Color::BLACK,
    };
    let [r, g, b] = if encode_srgb {
        color.to_srgb()
    } else {
        color.to_array()
    };
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    layouts: SceneLayouts,

    dir_shadow: ShadowTarget,
    spot_shadow: ShadowTarget,
    shadow_bind_group: wgpu::BindGroup,

    /// Texture name of the current texture background and its bind group,
    /// None while the texture is unavailable
    background: Option<(String, Option<wgpu::BindGroup>)>,
    line_renderer: LineRenderer,
    shadow_debug: bool,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width`, `height` - Initial surface size in pixels
    /// * `vsync` - Present with `Fifo` when set, the fastest supported mode otherwise
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync, &surface_capabilities.present_modes),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "surface configured: {}x{} {:?} {:?}",
            config.width,
            config.height,
            format,
            config.present_mode
        );

        let depth_texture = TextureResource::create_depth_texture(
            &device,
            config.width,
            config.height,
            "Depth Texture",
        );

        let layouts = SceneLayouts::new(&device);
        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let dir_shadow = ShadowTarget::new(&device, &layouts, 1024, "Directional Shadow Map");
        let spot_shadow = ShadowTarget::new(&device, &layouts, 512, "Spot Shadow Map");
        let shadow_bind_group = shadow_bind_group(&device, &layouts, &dir_shadow, &spot_shadow);

        let line_renderer = LineRenderer::new(
            &device,
            format,
            TextureResource::DEPTH_FORMAT,
            global_bindings.bind_group_layout(),
        );

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("standard", include_str!("standard.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shadow_pass.wgsl"));
        pipeline_manager.load_shader("background", include_str!("background.wgsl"));

        let main_layouts = vec![
            global_bindings.bind_group_layout().clone(),
            layouts.object.layout.clone(),
            layouts.material.layout.clone(),
            layouts.shadow.layout.clone(),
        ];
        let standard = PipelineConfig::default_with_shader("standard")
            .with_bind_group_layouts(main_layouts)
            .with_color_format(format)
            .with_depth(TextureResource::DEPTH_FORMAT, true);

        pipeline_manager.register_pipeline(STANDARD, standard.clone().with_label("STANDARD"));
        pipeline_manager.register_pipeline(
            STANDARD_DOUBLE_SIDED,
            standard
                .clone()
                .with_label("STANDARD DOUBLE SIDED")
                .with_cull_mode(None),
        );
        pipeline_manager.register_pipeline(
            STANDARD_WIREFRAME,
            standard
                .with_label("STANDARD WIREFRAME")
                .with_cull_mode(None)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList),
        );

        // No culling, so single-sided casters still occlude from behind
        let shadow = PipelineConfig::default_with_shader("shadow")
            .with_vertex_only()
            .with_cull_mode(None)
            .with_depth(TextureResource::DEPTH_FORMAT, true)
            .with_bind_group_layouts(vec![
                layouts.shadow_pass.layout.clone(),
                layouts.object.layout.clone(),
            ]);
        pipeline_manager.register_pipeline(SHADOW, shadow.clone().with_label("SHADOW"));
        pipeline_manager.register_pipeline(
            SHADOW_WIREFRAME,
            shadow
                .with_label("SHADOW WIREFRAME")
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList),
        );

        pipeline_manager.register_pipeline(
            BACKGROUND,
            PipelineConfig::default_with_shader("background")
                .with_label("BACKGROUND")
                .with_no_vertex_buffers()
                .with_cull_mode(None)
                .with_color_format(format)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    layouts.background.layout.clone(),
                ]),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in errors {
                log::error!("{}", error);
            }
        }
        let stats = pipeline_manager.get_stats();
        log::debug!(
            "{} pipelines from {} shaders, {} pending",
            stats.total_pipelines,
            stats.loaded_shaders,
            stats.pending_pipelines
        );

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            layouts,
            dir_shadow,
            spot_shadow,
            shadow_bind_group,
            background: None,
            line_renderer,
            shadow_debug: false,
        })
    }

    /// Whether shaders must gamma-encode their output themselves
    fn encode_srgb(&self) -> bool {
        !self.format.is_srgb()
    }

    /// Pushes this frame's camera, light, shadow and helper state to the GPU
    ///
    /// Call after [`Scene::update`] and [`Scene::sync_gpu`].
    pub fn update(&mut self, scene: &Scene) {
        let lights = &scene.lights;

        let mut resized = false;
        if let Some(light) = &lights.directional {
            resized |= self.dir_shadow.ensure_size(&self.device, light.shadow.map_size);
            self.dir_shadow.active = scene.shadow_map_enabled && light.cast_shadow;
            self.dir_shadow.ubo.update_content(
                &self.queue,
                ShadowPassUniform {
                    view_proj: light.shadow_view_proj().into(),
                },
            );
        } else {
            self.dir_shadow.active = false;
        }
        if let Some(light) = &lights.spot {
            resized |= self.spot_shadow.ensure_size(&self.device, light.shadow.map_size);
            self.spot_shadow.active = scene.shadow_map_enabled && light.cast_shadow;
            self.spot_shadow.ubo.update_content(
                &self.queue,
                ShadowPassUniform {
                    view_proj: light.shadow_view_proj().into(),
                },
            );
        } else {
            self.spot_shadow.active = false;
        }
        if resized {
            self.shadow_bind_group = shadow_bind_group(
                &self.device,
                &self.layouts,
                &self.dir_shadow,
                &self.spot_shadow,
            );
        }

        let content = GlobalUniform::from_scene(
            &scene.camera_manager.camera.uniform,
            lights,
            scene.shadow_map_enabled,
            self.encode_srgb(),
        );
        self.global_ubo.update_content(&self.queue, content);

        self.update_background(scene);

        let lines = scene.helper_lines();
        self.line_renderer
            .update(&self.device, &self.queue, &lines);
    }

    fn update_background(&mut self, scene: &Scene) {
        let Background::Texture(name) = &scene.background else {
            self.background = None;
            return;
        };
        let bound = self
            .background
            .as_ref()
            .map(|(bound, group)| (bound.as_str(), group.is_some()));
        let already_tried = match background_binding(bound, name) {
            BackgroundBinding::Keep => return,
            BackgroundBinding::Rebuild { already_tried } => already_tried,
        };

        let bind_group = scene.textures.gpu(name).map(|texture| {
            BindGroupBuilder::new(&self.layouts.background)
                .texture(&texture.view)
                .sampler(&texture.sampler)
                .create(&self.device, "Background Bind Group")
        });
        match &bind_group {
            Some(_) => log::debug!("background bound to '{}'", name),
            None if !already_tried => {
                log::warn!("background texture '{}' is not available, clearing to black", name)
            }
            None => {}
        }
        self.background = Some((name.clone(), bind_group));
    }

    /// Renders a frame with optional UI overlay
    ///
    /// # Arguments
    /// * `scene` - Scene containing objects to render
    /// * `ui_callback` - Optional function that records UI draw commands
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped, as
    /// is a frame that timed out. Other surface failures are returned.
    pub fn render_frame<F>(
        &mut self,
        scene: &Scene,
        ui_callback: Option<F>,
    ) -> Result<(), RenderError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface frame timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::Frame(e)),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // PASS 1: shadow maps
        for target in [&self.dir_shadow, &self.spot_shadow] {
            if !target.active {
                continue;
            }
            self.render_shadow_pass(&mut encoder, target, scene);
        }

        // PASS 2: texture background
        let background_drawn = self.render_background_pass(&mut encoder, &surface_texture_view);

        // PASS 3: lit objects and helper lines
        {
            let load = if background_drawn {
                wgpu::LoadOp::Load
            } else {
                wgpu::LoadOp::Clear(clear_color(&scene.background, self.encode_srgb()))
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
            render_pass.set_bind_group(3, &self.shadow_bind_group, &[]);

            for object in scene.objects.iter().filter(|o| o.visible) {
                let material = scene.get_material_for_object(object);
                let (Some(object_bind_group), Some(material_bind_group)) =
                    (object.bind_group(), material.bind_group())
                else {
                    log::trace!(
                        "skipping '{}': GPU resources of it or material '{}' missing",
                        object.name,
                        material.name
                    );
                    continue;
                };

                let Some(pipeline) = self.pipeline_manager.pipeline(lit_pipeline(material)) else {
                    continue;
                };

                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, object_bind_group, &[]);
                render_pass.set_bind_group(2, material_bind_group, &[]);
                if material.wireframe {
                    render_pass.draw_object_edges(object);
                } else {
                    render_pass.draw_object(object);
                }
            }

            self.line_renderer
                .render(&mut render_pass, self.global_bindings.bind_group());
        }

        // PASS 4: UI overlay
        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn render_shadow_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &ShadowTarget,
        scene: &Scene,
    ) {
        let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(target.label),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &target.map.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        shadow_pass.set_bind_group(0, &target.bind_group, &[]);

        let mut casters = 0;
        for object in scene.objects.iter().filter(|o| o.visible && o.cast_shadow) {
            let Some(bind_group) = object.bind_group() else {
                continue;
            };
            let material = scene.get_material_for_object(object);
            let Some(pipeline) = self.pipeline_manager.pipeline(shadow_pipeline(material)) else {
                continue;
            };

            shadow_pass.set_pipeline(pipeline);
            shadow_pass.set_bind_group(1, bind_group, &[]);
            if material.wireframe {
                shadow_pass.draw_object_edges(object);
            } else {
                shadow_pass.draw_object(object);
            }
            casters += 1;
        }

        if self.shadow_debug {
            log::info!("{}: {} casters at {}px", target.label, casters, target.size);
        }
    }

    /// Draws the texture background; false when there is none to draw
    fn render_background_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) -> bool {
        let Some((_, Some(bind_group))) = &self.background else {
            return false;
        };
        let Some(pipeline) = self.pipeline_manager.pipeline(BACKGROUND) else {
            return false;
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Background Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
        pass.set_bind_group(1, bind_group, &[]);
        pass.draw(0..3, 0..1);
        true
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero sizes (minimised windows) are ignored. Shadow maps keep their
    /// resolution.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, width, height, "Depth Texture");
    }

    /// Logs every shadow pass with its caster count
    pub fn set_shadow_debug(&mut self, enable: bool) {
        self.shadow_debug = enable;
    }

    /// Bind group layouts scene resources are created against
    pub fn layouts(&self) -> &SceneLayouts {
        &self.layouts
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Main pass pipeline for objects using `material`
fn lit_pipeline(material: &Material) -> &'static str {
    if material.wireframe {
        STANDARD_WIREFRAME
    } else if material.side == Side::Double {
        STANDARD_DOUBLE_SIDED
    } else {
        STANDARD
    }
}

/// Wireframe casters only shadow with their edges
fn shadow_pipeline(material: &Material) -> &'static str {
    if material.wireframe {
        SHADOW_WIREFRAME
    } else {
        SHADOW
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundBinding {
    Keep,
    /// `already_tried` is set when the same texture was missing last time
    Rebuild { already_tried: bool },
}

/// What to do with the background bind group given what is bound now
fn background_binding(bound: Option<(&str, bool)>, wanted: &str) -> BackgroundBinding {
    match bound {
        Some((name, true)) if name == wanted => BackgroundBinding::Keep,
        Some((name, false)) => BackgroundBinding::Rebuild {
            already_tried: name == wanted,
        },
        Some((_, true)) | None => BackgroundBinding::Rebuild {
            already_tried: false,
        },
    }
}

/// Fifo is always supported; without vsync prefer Immediate, then Mailbox
fn present_mode(vsync: bool, supported: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
        .into_iter()
        .find(|mode| supported.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_selects_fifo() {
        use wgpu::PresentMode::*;
        assert_eq!(present_mode(true, &[Fifo, Immediate]), Fifo);
        assert_eq!(present_mode(false, &[Fifo, Mailbox, Immediate]), Immediate);
        assert_eq!(present_mode(false, &[Fifo, Mailbox]), Mailbox);
        assert_eq!(present_mode(false, &[Fifo]), Fifo);
    }

    #[test]
    fn wireframe_materials_draw_edges_in_every_pass() {
        let solid = Material::standard("sphere", Color::WHITE);
        let wireframe = Material::standard("sphere", Color::WHITE).with_wireframe(true);
        let double = Material::standard("plane", Color::WHITE).with_side(Side::Double);

        assert_eq!(lit_pipeline(&solid), STANDARD);
        assert_eq!(lit_pipeline(&double), STANDARD_DOUBLE_SIDED);
        assert_eq!(lit_pipeline(&wireframe), STANDARD_WIREFRAME);
        assert_eq!(shadow_pipeline(&solid), SHADOW);
        assert_eq!(shadow_pipeline(&double), SHADOW);
        assert_eq!(shadow_pipeline(&wireframe), SHADOW_WIREFRAME);
    }

    #[test]
    fn background_rebinds_when_the_texture_changes() {
        assert_eq!(
            background_binding(Some(("space.jpg", true)), "space.jpg"),
            BackgroundBinding::Keep
        );
        assert_eq!(
            background_binding(Some(("space.jpg", true)), "nebula.jpg"),
            BackgroundBinding::Rebuild {
                already_tried: false
            }
        );
        assert_eq!(
            background_binding(Some(("space.jpg", false)), "space.jpg"),
            BackgroundBinding::Rebuild {
                already_tried: true
            }
        );
        assert_eq!(
            background_binding(None, "space.jpg"),
            BackgroundBinding::Rebuild {
                already_tried: false
            }
        );
    }

    #[test]
    fn clear_colour_is_encoded_for_unorm_surfaces() {
        let background = Background::Color(Color::from_hex(0x808080));
        let encoded = clear_color(&background, true);
        let linear = clear_color(&background, false);
        assert!((encoded.r - 128.0 / 255.0).abs() < 1e-3);
        assert!(linear.r < encoded.r);
        assert_eq!(clear_color(&Background::Texture("space".into()), true).g, 0.0);
    }
}
