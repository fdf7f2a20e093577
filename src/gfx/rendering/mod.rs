// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles render pipelines, shadow passes, helper lines and frame rendering.

pub mod line_renderer;
pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use line_renderer::LineRenderer;
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
pub use render_engine::RenderEngine;
