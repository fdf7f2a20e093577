//! Application configuration
//!
//! Plain typed settings with sensible defaults. A handful of them can be
//! overridden through environment variables so the binary needs no CLI.

use std::path::PathBuf;

pub const ENV_ASSET_DIR: &str = "SHADOWBOX_ASSET_DIR";
pub const ENV_VSYNC: &str = "SHADOWBOX_VSYNC";
pub const ENV_SHADOW_DEBUG: &str = "SHADOWBOX_SHADOW_DEBUG";

/// Window, presentation and asset settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Present with vertical sync. The animation advances once per frame,
    /// so turning this off also speeds up the animation.
    pub vsync: bool,
    /// Directory the demo textures are loaded from
    pub asset_dir: PathBuf,
    /// Log every shadow pass
    pub shadow_debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Shadowbox".to_string(),
            width: 1200,
            height: 800,
            vsync: true,
            asset_dir: PathBuf::from("assets"),
            shadow_debug: false,
        }
    }
}

impl AppConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key/value source
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_ASSET_DIR) {
            if !dir.trim().is_empty() {
                self = self.with_asset_dir(dir);
            }
        }
        if let Some(value) = lookup(ENV_VSYNC) {
            match parse_flag(&value) {
                Some(flag) => self = self.with_vsync(flag),
                None => log::warn!("Ignoring {}={:?}: expected 0/1/true/false", ENV_VSYNC, value),
            }
        }
        if let Some(value) = lookup(ENV_SHADOW_DEBUG) {
            // presence alone enables it, like other debug switches
            self.shadow_debug = parse_flag(&value).unwrap_or(true);
        }
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_demo_window() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Shadowbox");
        assert_eq!((config.width, config.height), (1200, 800));
        assert!(config.vsync);
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
        assert!(!config.shadow_debug);
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = AppConfig::default().with_overrides(lookup_from(&[
            (ENV_ASSET_DIR, "/tmp/textures"),
            (ENV_VSYNC, "off"),
            (ENV_SHADOW_DEBUG, ""),
        ]));
        assert_eq!(config.asset_dir, PathBuf::from("/tmp/textures"));
        assert!(!config.vsync);
        assert!(config.shadow_debug);
    }

    #[test]
    fn malformed_vsync_keeps_default() {
        let config = AppConfig::default().with_overrides(lookup_from(&[(ENV_VSYNC, "maybe")]));
        assert!(config.vsync);
    }

    #[test]
    fn builders_set_single_fields() {
        let config = AppConfig::default()
            .with_vsync(false)
            .with_asset_dir("textures");
        assert!(!config.vsync);
        assert_eq!(config.asset_dir, PathBuf::from("textures"));
        assert_eq!(config.title, "Shadowbox");
    }

    #[test]
    fn blank_asset_dir_is_ignored() {
        let config = AppConfig::default().with_overrides(lookup_from(&[(ENV_ASSET_DIR, "  ")]));
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
    }
}
