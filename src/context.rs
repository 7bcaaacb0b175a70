//! Device access and scene configuration.

use std::path::PathBuf;

use crate::{pipelines::light::LightingRig, resources::texture::MAX_TEXTURE_UNITS};

/// Settings a host can change before the scene is prepared.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    /// Directory the scene's texture files are read from.
    pub texture_dir: PathBuf,
    /// Flip images on load so row 0 is the bottom row.
    pub flip_vertically: bool,
    /// Texture slots the registry may hand out, at most [`MAX_TEXTURE_UNITS`].
    pub max_texture_units: usize,
    pub lighting: LightingRig,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
            flip_vertically: true,
            max_texture_units: MAX_TEXTURE_UNITS,
            lighting: LightingRig::default(),
        }
    }
}

/// A wgpu device and queue without a surface.
///
/// Window and surface setup belong to the host application; textures and
/// uniform buffers only need the device.
#[derive(Debug, Clone)]
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    pub async fn request_headless() -> anyhow::Result<Self> {
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("launch-site device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await?;

        Ok(Self { device, queue })
    }

    /// Blocking form of [`GpuContext::request_headless`].
    pub fn headless() -> anyhow::Result<Self> {
        futures::executor::block_on(Self::request_headless())
    }
}
