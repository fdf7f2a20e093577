//! # Graphics Module
//!
//! Everything needed to put the scene on screen: camera, colour, geometry,
//! scene description, GPU resources and the renderer itself.
//!
//! ## Architecture Overview
//!
//! - **Camera** ([`camera`]) - Orbit camera and the controller driving it
//! - **Colour** ([`color`]) - sRGB hex colours converted to linear space
//! - **Geometry** ([`geometry`]) - Procedural box, plane and sphere
//! - **Scene** ([`scene`]) - Objects, lights, helpers and background
//! - **Resources** ([`resources`]) - Uniforms, materials, textures and bind group layouts
//! - **Rendering** ([`rendering`]) - Shadow passes, background, lit objects and helper lines
//!
//! ## Frame flow
//!
//! The scene is plain data that the application mutates every frame. After
//! mutation, [`Scene::sync_gpu`] uploads what changed and
//! [`RenderEngine::update`] packs camera and lights before
//! [`RenderEngine::render_frame`] records the passes:
//!
//! ```no_run
//! # fn frame(scene: &mut shadowbox::gfx::scene::Scene, engine: &mut shadowbox::gfx::RenderEngine) {
//! scene.update();
//! scene.sync_gpu(engine.device(), engine.queue(), engine.layouts());
//! engine.update(scene);
//! let _ = engine.render_frame(
//!     scene,
//!     None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
//! );
//! # }
//! ```
//!
//! [`Scene::sync_gpu`]: scene::Scene::sync_gpu

pub mod camera;
pub mod color;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use color::Color;
pub use rendering::render_engine::RenderEngine;
