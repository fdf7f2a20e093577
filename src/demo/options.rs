//! Option records edited by the control panel
//!
//! The panel writes into these records and the per-frame animation reads
//! them back, so the scene only ever changes from one place.

use crate::gfx::color::Color;

/// Sphere material and bounce settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereOptions {
    pub wireframe: bool,
    /// Phase advance per frame
    pub speed: f32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            wireframe: false,
            speed: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColorOptions {
    pub ambient_light_color: Color,
    pub directional_light_color: Color,
}

impl Default for LightColorOptions {
    fn default() -> Self {
        Self {
            ambient_light_color: Color::from_hex(0x333333),
            directional_light_color: Color::from_hex(0xffffff),
        }
    }
}

/// Spot light cone settings, copied onto the light every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLightOptions {
    /// Cone half-angle in radians
    pub angle: f32,
    pub penumbra: f32,
    pub intensity: f32,
}

impl Default for SpotLightOptions {
    fn default() -> Self {
        Self {
            angle: 0.203,
            penumbra: 0.0,
            intensity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_panel() {
        let sphere = SphereOptions::default();
        assert!(!sphere.wireframe);
        assert_eq!(sphere.speed, 0.01);

        let spot = SpotLightOptions::default();
        assert_eq!((spot.angle, spot.penumbra, spot.intensity), (0.203, 0.0, 1.0));

        let colors = LightColorOptions::default();
        assert_eq!(colors.ambient_light_color.to_css_hex(), "#333333");
        assert_eq!(colors.directional_light_color.to_css_hex(), "#ffffff");
    }
}
