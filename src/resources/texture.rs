//! The texture registry: image files in, tagged GPU textures on stable slots out.
//!
//! Slots are handed out in load order and never reordered, because shaders
//! sample by texture unit, not by tag. The registry owns every texture it
//! creates and is the only place that releases them.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    context::GpuContext,
    data_structures::texture::{
        DecodedImage, SamplingParams, Texture, TextureEntry, TextureId,
    },
    resources::decoder::ImageDecoder,
};

/// Texture units available to a draw call.
pub const MAX_TEXTURE_UNITS: usize = 16;

/// Why a texture did not make it into the registry.
///
/// None of these are fatal: the texture is simply missing from the scene.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextureError {
    #[error("could not load image {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
    #[error("image {} has {channels} channels, only 3 and 4 are supported", .path.display())]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error("a texture tagged {tag:?} is already registered")]
    DuplicateTag { tag: String },
    #[error("no free texture slot for {tag:?}, all {limit} are taken")]
    SlotsExhausted { tag: String, limit: usize },
    #[error("texture {tag:?} could not be created: {reason}")]
    Backend { tag: String, reason: String },
}

/// Creates, binds and destroys GPU textures on behalf of the registry.
pub trait TextureBackend {
    fn create(
        &mut self,
        image: &DecodedImage,
        sampling: &SamplingParams,
        label: &str,
    ) -> anyhow::Result<TextureId>;

    /// Make `handle` the texture sampled through `unit`.
    fn bind(&mut self, unit: usize, handle: TextureId);

    fn release(&mut self, handle: TextureId);
}

pub struct TextureRegistry<B: TextureBackend> {
    backend: B,
    decoder: Box<dyn ImageDecoder>,
    entries: Vec<TextureEntry>,
    slots: HashMap<String, usize>,
    max_units: usize,
    flip_vertically: bool,
}

impl<B: TextureBackend> TextureRegistry<B> {
    pub fn new(backend: B, decoder: Box<dyn ImageDecoder>) -> Self {
        Self {
            backend,
            decoder,
            entries: Vec::new(),
            slots: HashMap::new(),
            max_units: MAX_TEXTURE_UNITS,
            flip_vertically: true,
        }
    }

    /// Lower the slot limit; values above [`MAX_TEXTURE_UNITS`] are clamped.
    pub fn with_max_units(mut self, max_units: usize) -> Self {
        self.max_units = max_units.min(MAX_TEXTURE_UNITS);
        self
    }

    /// Whether images are flipped vertically on load; on by default.
    pub fn with_flip_vertically(mut self, flip_vertically: bool) -> Self {
        self.flip_vertically = flip_vertically;
        self
    }

    pub fn flip_vertically(&self) -> bool {
        self.flip_vertically
    }

    /// Decode `path`, upload it and register it under `tag`.
    ///
    /// Returns the slot the texture occupies. On failure nothing is registered
    /// and no GPU resource is left behind; the error is also logged.
    pub fn load(&mut self, path: impl AsRef<Path>, tag: &str) -> Result<usize, TextureError> {
        let result = self.try_load(path.as_ref(), tag);
        if let Err(e) = &result {
            log::error!("{e}");
        }
        result
    }

    fn try_load(&mut self, path: &Path, tag: &str) -> Result<usize, TextureError> {
        if self.slots.contains_key(tag) {
            return Err(TextureError::DuplicateTag {
                tag: tag.to_string(),
            });
        }
        if self.entries.len() >= self.max_units {
            return Err(TextureError::SlotsExhausted {
                tag: tag.to_string(),
                limit: self.max_units,
            });
        }

        let image = self
            .decoder
            .decode(path, self.flip_vertically)
            .map_err(|e| TextureError::Unreadable {
                path: path.to_path_buf(),
                reason: format!("{e:#}"),
            })?;
        if !matches!(image.channels, 3 | 4) {
            return Err(TextureError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels: image.channels,
            });
        }
        log::info!(
            "Loaded image {}: width {}, height {}, channels {}",
            path.display(),
            image.width,
            image.height,
            image.channels
        );

        let handle = self
            .backend
            .create(&image, &SamplingParams::TRILINEAR_REPEAT, tag)
            .map_err(|e| TextureError::Backend {
                tag: tag.to_string(),
                reason: format!("{e:#}"),
            })?;

        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        self.slots.insert(tag.to_string(), slot);
        Ok(slot)
    }

    /// Bind every texture to the unit matching its slot.
    pub fn bind_all(&mut self) {
        for (slot, entry) in self.entries.iter().take(self.max_units).enumerate() {
            self.backend.bind(slot, entry.handle);
        }
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.slots.get(tag).copied()
    }

    pub fn find_handle(&self, tag: &str) -> Option<TextureId> {
        self.find_slot(tag).map(|slot| self.entries[slot].handle)
    }

    /// Release every texture. Slots start over at 0 afterwards.
    pub fn release_all(&mut self) {
        for entry in self.entries.drain(..) {
            self.backend.release(entry.handle);
        }
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in slot order.
    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

/// [`TextureBackend`] creating wgpu textures.
///
/// wgpu has no global texture units, so `bind` records which texture each
/// unit refers to and [`GpuTextures::bind_group`] turns that into a bind group
/// laid out by [`texture_units_layout`].
pub struct GpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    textures: HashMap<TextureId, Texture>,
    units: [Option<TextureId>; MAX_TEXTURE_UNITS],
    fallback: Texture,
    next_id: u32,
}

impl GpuTextures {
    pub fn new(ctx: &GpuContext) -> Self {
        let fallback = Texture::create_fallback(&ctx.device, &ctx.queue);
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            textures: HashMap::new(),
            units: [None; MAX_TEXTURE_UNITS],
            fallback,
            next_id: 1,
        }
    }

    pub fn get(&self, handle: TextureId) -> Option<&Texture> {
        self.textures.get(&handle)
    }

    pub fn bound(&self, unit: usize) -> Option<TextureId> {
        self.units.get(unit).copied().flatten()
    }

    /// Bind group with a texture at binding `2 * unit` and its sampler at `2 * unit + 1`.
    pub fn bind_group(&self, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        let entries: Vec<wgpu::BindGroupEntry> = self
            .units
            .iter()
            .enumerate()
            .flat_map(|(unit, bound)| {
                let texture = bound
                    .and_then(|id| self.textures.get(&id))
                    .unwrap_or(&self.fallback);
                let binding = 2 * unit as u32;
                [
                    wgpu::BindGroupEntry {
                        binding,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: binding + 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ]
            })
            .collect();
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &entries,
            label: Some("texture_units_bind_group"),
        })
    }
}

impl TextureBackend for GpuTextures {
    fn create(
        &mut self,
        image: &DecodedImage,
        sampling: &SamplingParams,
        label: &str,
    ) -> anyhow::Result<TextureId> {
        let texture = Texture::from_decoded(&self.device, &self.queue, image, label, sampling)?;
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(id, texture);
        Ok(id)
    }

    fn bind(&mut self, unit: usize, handle: TextureId) {
        match self.units.get_mut(unit) {
            Some(slot) => *slot = Some(handle),
            None => log::warn!("texture unit {unit} is out of range"),
        }
    }

    fn release(&mut self, handle: TextureId) {
        if let Some(texture) = self.textures.remove(&handle) {
            texture.texture.destroy();
        }
        for unit in self.units.iter_mut() {
            if *unit == Some(handle) {
                *unit = None;
            }
        }
    }
}

/// Layout matching [`GpuTextures::bind_group`]: one filterable 2D texture and
/// sampler pair per texture unit, visible to the fragment stage.
pub fn texture_units_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let entries: Vec<wgpu::BindGroupLayoutEntry> = (0..MAX_TEXTURE_UNITS as u32)
        .flat_map(|unit| {
            [
                wgpu::BindGroupLayoutEntry {
                    binding: 2 * unit,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2 * unit + 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ]
        })
        .collect();
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("texture_units_layout"),
    })
}
