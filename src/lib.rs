// src/lib.rs
//! Shadowbox
//!
//! A box, a plane and a bouncing textured sphere lit by ambient, directional
//! and spot lights with shadow maps, rendered with wgpu and controlled
//! through orbit controls and a Dear ImGui panel.

pub mod animation;
pub mod app;
pub mod assets;
pub mod config;
pub mod demo;
pub mod error;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use animation::Animation;
pub use app::ShadowboxApp;
pub use config::AppConfig;
pub use demo::Demo;

/// Creates the application with the demo attached, configured from the environment
pub fn default() -> Result<ShadowboxApp, error::AppError> {
    let config = AppConfig::from_env();
    let demo = Demo::new(config.asset_dir.clone());
    let mut app = ShadowboxApp::new(config)?;
    app.attach_animation(Box::new(demo));
    Ok(app)
}
