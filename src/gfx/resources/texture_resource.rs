//! Texture resource management for wgpu
//!
//! Provides utilities for creating GPU textures, views, and samplers: depth
//! buffers, shadow maps and colour textures uploaded from decoded images.

use std::collections::HashMap;

use image::{imageops::FilterType, RgbaImage};

/// Scaled copy of `image` whose sides fit in `max_dimension`, keeping its
/// aspect ratio; None when it already fits
pub fn fit_within(image: &RgbaImage, max_dimension: u32) -> Option<RgbaImage> {
    let (width, height) = image.dimensions();
    let max_dimension = max_dimension.max(1);
    if width <= max_dimension && height <= max_dimension {
        return None;
    }
    let scale = max_dimension as f64 / width.max(height) as f64;
    let scaled = |side: u32| ((side as f64 * scale).floor() as u32).clamp(1, max_dimension);
    Some(image::imageops::resize(
        image,
        scaled(width),
        scaled(height),
        FilterType::Triangle,
    ))
}

/// GPU texture resource containing texture, view, and sampler
#[derive(Clone)]
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TextureResource {
    /// Standard depth buffer format used throughout the engine
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates a depth buffer for the main pass
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating resources
    /// * `width`, `height` - Size in pixels, clamped to at least 1
    /// * `label` - Debug label for the texture
    pub fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        Self::create_depth(device, width.max(1), height.max(1), label)
    }

    /// Creates a square shadow map sampled with a comparison sampler
    pub fn create_shadow_map(device: &wgpu::Device, size: u32, label: &str) -> Self {
        Self::create_depth(device, size.max(1), size.max(1), label)
    }

    fn create_depth(device: &wgpu::Device, width: u32, height: u32, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // comparison sampler, so shaders can use textureSampleCompare
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{label} Sampler")),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            lod_min_clamp: 0.0,
            lod_max_clamp: 100.0,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Creates an sRGB colour texture from raw RGBA8 data
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating resources
    /// * `queue` - WGPU queue for uploading data
    /// * `data` - Raw RGBA8 pixel data (4 bytes per pixel)
    /// * `width`, `height` - Size of the texture in pixels
    /// * `label` - Debug label for the texture
    /// * `filter_mode` - Texture filtering mode
    pub fn create_from_rgba_data_with_filter(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
        label: &str,
        filter_mode: wgpu::FilterMode,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{label} Sampler")),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter_mode,
            min_filter: filter_mode,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Uploads a decoded image with linear filtering
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &image::RgbaImage,
        label: &str,
    ) -> Self {
        let (width, height) = image.dimensions();
        Self::create_from_rgba_data_with_filter(
            device,
            queue,
            image.as_raw(),
            width,
            height,
            label,
            wgpu::FilterMode::Linear,
        )
    }

    /// 1x1 white texture bound when a material has no colour map
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::create_from_rgba_data_with_filter(
            device,
            queue,
            &[255, 255, 255, 255],
            1,
            1,
            "White Texture",
            wgpu::FilterMode::Nearest,
        )
    }
}

/// Named images and their GPU copies
#[derive(Default)]
pub struct TextureLibrary {
    images: HashMap<String, image::RgbaImage>,
    gpu: HashMap<String, TextureResource>,
    white: Option<TextureResource>,
}

impl TextureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an image; a GPU copy is made on the next upload
    pub fn insert(&mut self, name: &str, image: image::RgbaImage) {
        self.gpu.remove(name);
        self.images.insert(name.to_string(), image);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn image(&self, name: &str) -> Option<&image::RgbaImage> {
        self.images.get(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Uploads every image that has no GPU copy yet
    ///
    /// Images larger than the device allows are scaled down first.
    pub fn upload_pending(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        if self.white.is_none() {
            self.white = Some(TextureResource::white(device, queue));
        }
        let max_dimension = device.limits().max_texture_dimension_2d;
        for (name, image) in &self.images {
            if self.gpu.contains_key(name) {
                continue;
            }
            let scaled = fit_within(image, max_dimension);
            if let Some(scaled) = &scaled {
                log::warn!(
                    "texture '{}' ({}x{}) exceeds the {}px device limit, uploading {}x{}",
                    name,
                    image.width(),
                    image.height(),
                    max_dimension,
                    scaled.width(),
                    scaled.height()
                );
            }
            let image = scaled.as_ref().unwrap_or(image);
            log::debug!(
                "uploading texture '{}' ({}x{})",
                name,
                image.width(),
                image.height()
            );
            self.gpu.insert(
                name.clone(),
                TextureResource::from_image(device, queue, image, name),
            );
        }
    }

    pub fn gpu(&self, name: &str) -> Option<&TextureResource> {
        self.gpu.get(name)
    }

    pub fn white(&self) -> Option<&TextureResource> {
        self.white.as_ref()
    }

    /// The named texture, or white when it is missing or not uploaded
    pub fn gpu_or_white(&self, name: Option<&str>) -> Option<&TextureResource> {
        name.and_then(|n| self.gpu.get(n)).or(self.white.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_tracks_images_by_name() {
        let mut library = TextureLibrary::new();
        assert!(library.is_empty());
        library.insert("earth", image::RgbaImage::new(4, 2));
        assert!(library.contains("earth"));
        assert_eq!(library.image("earth").map(|i| i.dimensions()), Some((4, 2)));
        assert!(library.gpu("earth").is_none());
        assert!(library.gpu_or_white(Some("earth")).is_none());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn oversized_images_shrink_to_the_limit() {
        let wide = RgbaImage::new(4096, 2048);
        let scaled = fit_within(&wide, 2048).expect("wider than the limit");
        assert_eq!(scaled.dimensions(), (2048, 1024));

        let tall = RgbaImage::new(10, 3000);
        let scaled = fit_within(&tall, 1000).expect("taller than the limit");
        assert_eq!(scaled.dimensions(), (3, 1000));

        assert!(fit_within(&RgbaImage::new(2048, 2048), 2048).is_none());
    }
}
