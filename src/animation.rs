//! Per-frame scene behaviour
//!
//! An [`Animation`] owns whatever state drives a scene: it builds the scene
//! once, draws its controls every frame and mutates the scene right after.

use crate::gfx::scene::Scene;
use imgui::Ui;

/// Lifecycle hooks the application calls on the attached animation
pub trait Animation {
    /// Populate the scene
    ///
    /// Called once after the window exists and before GPU resources are
    /// created, so everything added here gets uploaded.
    fn initialize(&mut self, scene: &mut Scene);

    /// Advance by one frame
    ///
    /// Called once per redraw, after the UI had a chance to change options.
    fn update(&mut self, scene: &mut Scene);

    /// Build the control panel for this frame
    fn render_ui(&mut self, ui: &Ui, scene: &mut Scene);

    /// Name used for logging
    fn name(&self) -> &str;
}
