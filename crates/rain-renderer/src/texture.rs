//! Glyph atlas loading and GPU upload
//!
//! The atlas is decoded once at startup and never changes. On the GPU it is
//! sampled with repeat wrapping so the tiling math can run past `[0, 1]`,
//! and with nearest filtering and a single mip level so glyph edges stay
//! crisp at any scale.

use std::path::{Path, PathBuf};

use rain_core::{AtlasError, GlyphAtlas};
use thiserror::Error;
use wgpu::util::DeviceExt;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to load glyph atlas {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid glyph atlas: {0}")]
    Atlas(#[from] AtlasError),
}

/// Decoded atlas pixels, RGBA8
#[derive(Debug, Clone)]
pub struct AtlasImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl AtlasImage {
    /// Decode an image file (any format the `image` crate was built with)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("Loaded glyph atlas {:?} ({}x{})", path, width, height);

        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Wrap already-decoded RGBA8 pixels
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 {
            return Err(AtlasError::Empty { width, height }.into());
        }
        if data.len() != expected {
            return Err(AtlasError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// CPU copy for the software renderer
    pub fn to_glyph_atlas(&self) -> Result<GlyphAtlas, AtlasError> {
        GlyphAtlas::from_rgba(self.width, self.height, &self.data)
    }
}

/// Texture layout of the atlas: one mip level, stored as linear RGBA8
pub fn glyph_texture_descriptor(width: u32, height: u32) -> wgpu::TextureDescriptor<'static> {
    wgpu::TextureDescriptor {
        label: Some("Glyph Atlas Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    }
}

/// Repeat on both axes, nearest everywhere
pub fn glyph_sampler_descriptor() -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("Glyph Atlas Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    }
}

/// GPU texture for the glyph atlas
pub struct GlyphTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    _texture: wgpu::Texture,
}

impl GlyphTexture {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, image: &AtlasImage) -> Self {
        let (width, height) = image.dimensions();

        let texture = device.create_texture_with_data(
            queue,
            &glyph_texture_descriptor(width, height),
            wgpu::util::TextureDataOrder::LayerMajor,
            image.data(),
        );
        let view = texture.create_view(&Default::default());
        let sampler = device.create_sampler(&glyph_sampler_descriptor());

        Self {
            view,
            sampler,
            _texture: texture,
        }
    }
}
