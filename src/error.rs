//! Error types for the Shadowbox engine
//!
//! Library code returns these typed errors; the binary wraps them in
//! `anyhow` at the top level.

use std::path::PathBuf;

/// Failures while loading image assets from disk
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read asset '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image '{path}'")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A colour string that is not of the form `#rrggbb` or `#rgb`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex colour '{0}'")]
pub struct ColorParseError(pub String);

/// Failures while setting up or driving the GPU
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create a rendering surface")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to request a graphics device")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("failed to acquire the next surface frame")]
    Frame(#[from] wgpu::SurfaceError),
}

/// Failures while building render pipelines
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("shader '{0}' is not loaded")]
    MissingShader(String),
    #[error("pipeline '{0}' is not registered")]
    UnknownPipeline(String),
}

/// Failures that stop the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop failure")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create the window")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
