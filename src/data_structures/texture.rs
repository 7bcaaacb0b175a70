//! Texture records and the GPU texture wrapper.
//!
//! This module provides [`Texture`], a wrapper around WGPU texture resources,
//! together with the backend-neutral records the texture registry works with:
//! [`TextureId`], [`TextureEntry`], [`DecodedImage`] and [`SamplingParams`].

use anyhow::{Result, anyhow};
use image::{DynamicImage, GenericImageView, Rgba, Rgba32FImage, RgbaImage, imageops};

/// Opaque identifier of a GPU-resident texture, handed out by a texture backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// A registered texture: its tag and the backend handle behind it.
///
/// The position of an entry in the registry is its slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureEntry {
    pub tag: String,
    pub handle: TextureId,
}

/// Raw 8-bit pixel data as returned by an image decoder.
///
/// `pixels` is tightly packed, row-major, `channels` bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl DecodedImage {
    /// Expand 3- or 4-channel data into RGBA8 for upload.
    ///
    /// Returns `None` for any other channel count or when `pixels` does not
    /// match the stated dimensions.
    pub fn to_rgba8(&self) -> Option<RgbaImage> {
        match self.channels {
            4 => RgbaImage::from_raw(self.width, self.height, self.pixels.clone()),
            3 => image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                .map(|rgb| DynamicImage::ImageRgb8(rgb).to_rgba8()),
            _ => None,
        }
    }
}

impl From<DynamicImage> for DecodedImage {
    fn from(img: DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        let channels = img.color().channel_count();
        // Wider sample types are narrowed to 8 bits but keep their channel count.
        let pixels = match channels {
            1 => img.into_luma8().into_raw(),
            2 => img.into_luma_alpha8().into_raw(),
            3 => img.into_rgb8().into_raw(),
            _ => img.into_rgba8().into_raw(),
        };
        Self {
            pixels,
            width,
            height,
            channels,
        }
    }
}

/// Wrap and filter parameters applied to a texture at creation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingParams {
    pub address_mode: wgpu::AddressMode,
    pub min_filter: wgpu::FilterMode,
    pub mag_filter: wgpu::FilterMode,
    pub mipmap_filter: wgpu::FilterMode,
    pub generate_mipmaps: bool,
}

impl SamplingParams {
    /// Repeat wrapping, trilinear minification, linear magnification, full mip chain.
    pub const TRILINEAR_REPEAT: Self = Self {
        address_mode: wgpu::AddressMode::Repeat,
        min_filter: wgpu::FilterMode::Linear,
        mag_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        generate_mipmaps: true,
    };
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::TRILINEAR_REPEAT
    }
}

/// Number of levels in a full mip chain for the given dimensions.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// The base image followed by `levels - 1` successively halved copies.
///
/// Pixels are sRGB encoded, so color channels are filtered in linear space and
/// re-encoded per level. Alpha is filtered as stored.
pub fn mip_chain(base: &RgbaImage, levels: u32) -> Vec<RgbaImage> {
    let mut chain = vec![base.clone()];
    let mut linear = to_linear(base);
    for _ in 1..levels {
        let w = (linear.width() / 2).max(1);
        let h = (linear.height() / 2).max(1);
        linear = imageops::resize(&linear, w, h, imageops::FilterType::Triangle);
        chain.push(to_srgb(&linear));
    }
    chain
}

fn to_linear(image: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        Rgba([
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
            a as f32 / 255.0,
        ])
    })
}

fn to_srgb(image: &Rgba32FImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        Rgba([
            linear_to_srgb(r),
            linear_to_srgb(g),
            linear_to_srgb(b),
            (a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ])
    })
}

fn srgb_to_linear(value: u8) -> f32 {
    let c = value as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(value: f32) -> u8 {
    let c = value.clamp(0.0, 1.0);
    let encoded = if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (encoded * 255.0).round() as u8
}

/// A GPU texture with its view and sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Upload a decoded image, generating the mip chain on the CPU when requested.
    ///
    /// # Arguments
    ///
    /// * `image` must carry 3 or 4 channels
    /// * `label` is used as a debug name for the GPU resource
    /// * `sampling` selects wrap mode, filters and whether mipmaps are built
    pub fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
        sampling: &SamplingParams,
    ) -> Result<Self> {
        let rgba = image.to_rgba8().ok_or_else(|| {
            anyhow!(
                "{label}: {} bytes do not form a {}x{} image with {} channels",
                image.pixels.len(),
                image.width,
                image.height,
                image.channels
            )
        })?;
        let (width, height) = rgba.dimensions();
        let levels = if sampling.generate_mipmaps {
            mip_level_count(width, height)
        } else {
            1
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, data) in (0..).zip(mip_chain(&rgba, levels)) {
            write_level(queue, &texture, level, &data);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, sampling);
        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// A 1x1 opaque white texture bound to texture units nothing else occupies.
    pub fn create_fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("fallback texture"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        write_level(
            queue,
            &texture,
            0,
            &RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255])),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, &SamplingParams::default());
        Self {
            texture,
            view,
            sampler,
        }
    }
}

fn write_level(queue: &wgpu::Queue, texture: &wgpu::Texture, mip_level: u32, data: &RgbaImage) {
    let (width, height) = data.dimensions();
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture,
            mip_level,
            origin: wgpu::Origin3d::ZERO,
        },
        data.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

pub fn create_sampler(device: &wgpu::Device, sampling: &SamplingParams) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: sampling.address_mode,
        address_mode_v: sampling.address_mode,
        address_mode_w: sampling.address_mode,
        mag_filter: sampling.mag_filter,
        min_filter: sampling.min_filter,
        mipmap_filter: sampling.mipmap_filter,
        ..Default::default()
    })
}
