//! # User Interface Module
//!
//! Dear ImGui integration: the [`UiManager`] drives ImGui through
//! `imgui-winit-support` for input and `imgui-wgpu` for drawing.
//!
//! Window events reach the manager first. When ImGui wants the mouse or the
//! keyboard (a slider is dragged, a colour picker is open) the event is not
//! forwarded to the orbit controls.

pub mod manager;

// Re-export main types
pub use manager::UiManager;
