//! Image assets with procedural fallbacks
//!
//! The demo reads two textures from the asset directory. Neither is required:
//! a missing or broken file is logged and replaced by a generated image.

use std::path::Path;

use image::{Rgba, RgbaImage};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{error::AssetError, gfx::resources::texture_resource::fit_within};

pub const EARTH_TEXTURE: &str = "earth2.jpg";
pub const SPACE_TEXTURE: &str = "space.jpg";

/// Decoding cap; the GPU upload scales further down to the device limit
pub const MAX_TEXTURE_SIZE: u32 = 4096;

/// Reads and decodes an image file into RGBA8
pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let image = match fit_within(&image, MAX_TEXTURE_SIZE) {
        Some(scaled) => {
            log::info!(
                "scaling '{}' ({}x{}) down to fit {}px",
                path.display(),
                image.width(),
                image.height(),
                MAX_TEXTURE_SIZE
            );
            scaled
        }
        None => image,
    };

    log::debug!("loaded '{}' ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

/// Loads `path`, or logs why it could not and returns `fallback()` instead
pub fn load_or_else<F>(path: &Path, fallback: F) -> RgbaImage
where
    F: FnOnce() -> RgbaImage,
{
    match load_image(path) {
        Ok(image) => image,
        Err(e) => {
            let cause = std::error::Error::source(&e)
                .map(|s| format!(": {s}"))
                .unwrap_or_default();
            log::warn!("{e}{cause}; using a generated texture instead");
            fallback()
        }
    }
}

/// Equirectangular earth-like map: banded oceans and continents, white poles
pub fn procedural_earth(width: u32, height: u32) -> RgbaImage {
    let (width, height) = (width.max(2), height.max(2));
    let ocean = [28.0, 72.0, 140.0];
    let shallow = [48.0, 112.0, 170.0];
    let land = [70.0, 120.0, 50.0];
    let desert = [176.0, 150.0, 96.0];

    RgbaImage::from_fn(width, height, |x, y| {
        let u = x as f32 / (width - 1) as f32;
        let v = y as f32 / (height - 1) as f32;
        let lon = u * std::f32::consts::TAU;
        let lat = (0.5 - v) * std::f32::consts::PI;

        if lat.abs() > 1.25 {
            return Rgba([240, 244, 250, 255]);
        }

        let continents = (lon * 2.0).sin() * (lat * 3.0).cos()
            + 0.5 * (lon * 5.0 + 1.3).sin() * (lat * 4.0 + 0.7).sin()
            + 0.25 * (lon * 11.0).cos() * (lat * 9.0).sin();

        let rgb = if continents > 0.35 {
            if lat.abs() < 0.45 {
                mix(land, desert, ((continents - 0.35) * 2.0).min(1.0))
            } else {
                land
            }
        } else if continents > 0.2 {
            shallow
        } else {
            ocean
        };
        Rgba([rgb[0] as u8, rgb[1] as u8, rgb[2] as u8, 255])
    })
}

/// Dark sky scattered with stars of random brightness, reproducible per seed
pub fn starfield(width: u32, height: u32, seed: u64) -> RgbaImage {
    let (width, height) = (width.max(1), height.max(1));
    let mut rng = StdRng::seed_from_u64(seed);
    let mut image = RgbaImage::from_pixel(width, height, Rgba([2, 3, 10, 255]));

    let stars = (width as u64 * height as u64 / 300).max(1);
    for _ in 0..stars {
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        let brightness: f32 = rng.random::<f32>().powi(3);
        let level = (60.0 + brightness * 195.0) as u8;
        let tint = rng.random_range(0..3u8);
        let pixel = match tint {
            0 => [level, level, level],
            1 => [level, level, level.saturating_add(30)],
            _ => [level.saturating_add(20), level, level.saturating_sub(10)],
        };
        image.put_pixel(x, y, Rgba([pixel[0], pixel[1], pixel[2], 255]));
    }

    image
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shadowbox-{}-{}", std::process::id(), name))
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_image(Path::new("definitely/not/here.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let path = temp_path("garbage.jpg");
        std::fs::write(&path, b"not an image at all").unwrap();
        let err = load_image(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn png_round_trips_through_the_loader() {
        let path = temp_path("pixel.png");
        RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let image = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn fallback_is_used_when_loading_fails() {
        let image = load_or_else(Path::new("nowhere/space.jpg"), || starfield(8, 8, 1));
        assert_eq!(image.dimensions(), (8, 8));
    }

    #[test]
    fn starfield_is_deterministic_per_seed() {
        let a = starfield(64, 32, 7);
        let b = starfield(64, 32, 7);
        let c = starfield(64, 32, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.pixels().any(|p| p[0] > 50));
    }

    #[test]
    fn earth_has_polar_caps_and_oceans() {
        let earth = procedural_earth(128, 64);
        assert_eq!(earth.get_pixel(10, 0), &Rgba([240, 244, 250, 255]));
        assert_eq!(earth.get_pixel(10, 63), &Rgba([240, 244, 250, 255]));
        assert!(earth.pixels().any(|p| p[2] > p[1] && p[2] > p[0]));
    }
}
