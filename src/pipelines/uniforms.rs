//! Shader interface vocabulary and the uniform blocks backing it.
//!
//! [`Uniform`] is the fixed set of names the scene writes to. Every component
//! passes these to a [`ShaderUniforms`] implementation; nothing addresses a
//! uniform through a free-standing string.
//!
//! [`UniformBlocks`] is the wgpu-side implementation: it packs the values into
//! two `#[repr(C)]` blocks laid out like the WGSL structs in
//! [`UNIFORM_DECLARATIONS`], ready to be copied into uniform buffers.

use std::fmt;

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, Vector4};
use wgpu::util::DeviceExt;

/// WGSL declarations of [`ObjectUniform`] and [`LightingUniform`].
pub const UNIFORM_DECLARATIONS: &str = include_str!("uniforms.wgsl");

/// Point lights the lighting block has room for.
pub const MAX_POINT_LIGHTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialField {
    DiffuseColor,
    SpecularColor,
    Shininess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightField {
    Direction,
    Position,
    Ambient,
    Diffuse,
    Specular,
    Constant,
    Linear,
    Quadratic,
    Active,
}

/// Every uniform the scene sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    Model,
    ObjectColor,
    ObjectTexture,
    UseTexture,
    UseLighting,
    UvScale,
    Material(MaterialField),
    DirectionalLight(LightField),
    PointLight(usize, LightField),
}

impl fmt::Display for MaterialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MaterialField::DiffuseColor => "diffuseColor",
            MaterialField::SpecularColor => "specularColor",
            MaterialField::Shininess => "shininess",
        })
    }
}

impl fmt::Display for LightField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LightField::Direction => "direction",
            LightField::Position => "position",
            LightField::Ambient => "ambient",
            LightField::Diffuse => "diffuse",
            LightField::Specular => "specular",
            LightField::Constant => "constant",
            LightField::Linear => "linear",
            LightField::Quadratic => "quadratic",
            LightField::Active => "bActive",
        })
    }
}

/// Formats as the name the shader declares, e.g. `pointLights[1].linear`.
impl fmt::Display for Uniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uniform::Model => f.write_str("model"),
            Uniform::ObjectColor => f.write_str("objectColor"),
            Uniform::ObjectTexture => f.write_str("objectTexture"),
            Uniform::UseTexture => f.write_str("bUseTexture"),
            Uniform::UseLighting => f.write_str("bUseLighting"),
            Uniform::UvScale => f.write_str("UVscale"),
            Uniform::Material(field) => write!(f, "material.{field}"),
            Uniform::DirectionalLight(field) => write!(f, "directionalLight.{field}"),
            Uniform::PointLight(index, field) => write!(f, "pointLights[{index}].{field}"),
        }
    }
}

/// Setter interface of the active shader program.
///
/// A value stays in effect for every following draw until it is overwritten.
pub trait ShaderUniforms {
    fn set_float(&mut self, name: Uniform, value: f32);
    fn set_int(&mut self, name: Uniform, value: i32);
    fn set_bool(&mut self, name: Uniform, value: bool);
    fn set_vec2(&mut self, name: Uniform, value: Vector2<f32>);
    fn set_vec3(&mut self, name: Uniform, value: Vector3<f32>);
    fn set_vec4(&mut self, name: Uniform, value: Vector4<f32>);
    fn set_mat4(&mut self, name: Uniform, value: Matrix4<f32>);

    /// Point a sampler at a texture unit.
    fn set_sampler(&mut self, name: Uniform, slot: i32) {
        self.set_int(name, slot);
    }
}

/// Per-draw state: model matrix, surface and material.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub material_diffuse: [f32; 3],
    pub shininess: f32,
    pub material_specular: [f32; 3],
    pub use_texture: u32,
    pub uv_scale: [f32; 2],
    pub texture_slot: i32,
    pub use_lighting: u32,
}

impl Default for ObjectUniform {
    fn default() -> Self {
        Self {
            model: Matrix4::<f32>::identity().into(),
            object_color: [1.0; 4],
            material_diffuse: [1.0; 3],
            shininess: 1.0,
            material_specular: [0.0; 3],
            use_texture: 0,
            uv_scale: [1.0, 1.0],
            texture_slot: 0,
            use_lighting: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightRaw {
    pub direction: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    pub diffuse: [f32; 3],
    _padding2: u32,
    pub specular: [f32; 3],
    _padding3: u32,
}

/// Attenuation terms fill the slot after each color, so no padding is needed.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    pub constant: f32,
    pub diffuse: [f32; 3],
    pub linear: f32,
    pub specular: [f32; 3],
    pub quadratic: f32,
}

/// Scene-wide lights, written once during preparation.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub directional: DirectionalLightRaw,
    pub point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
}

/// CPU mirror of the two uniform blocks.
///
/// Name/type combinations the blocks have no field for are logged and dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformBlocks {
    pub object: ObjectUniform,
    pub lighting: LightingUniform,
}

impl UniformBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn point_light(&mut self, index: usize) -> Option<&mut PointLightRaw> {
        let light = self.lighting.point_lights.get_mut(index);
        if light.is_none() {
            log::warn!(
                "point light {index} exceeds the {MAX_POINT_LIGHTS} lights the lighting block holds"
            );
        }
        light
    }

    fn set_flag(&mut self, name: Uniform, value: bool) {
        let value = value as u32;
        match name {
            Uniform::UseTexture => self.object.use_texture = value,
            Uniform::UseLighting => self.object.use_lighting = value,
            Uniform::DirectionalLight(LightField::Active) => {
                self.lighting.directional.active = value
            }
            Uniform::PointLight(index, LightField::Active) => {
                if let Some(light) = self.point_light(index) {
                    light.active = value;
                }
            }
            other => rejected(other, "bool"),
        }
    }

    /// Copy both blocks into their buffers.
    pub fn write_to_buffers(&self, queue: &wgpu::Queue, buffers: &UniformBuffers) {
        queue.write_buffer(&buffers.object, 0, bytemuck::cast_slice(&[self.object]));
        queue.write_buffer(&buffers.lighting, 0, bytemuck::cast_slice(&[self.lighting]));
    }
}

fn rejected(name: Uniform, kind: &str) {
    log::warn!("uniform {name} does not accept a {kind} value");
}

impl ShaderUniforms for UniformBlocks {
    fn set_float(&mut self, name: Uniform, value: f32) {
        match name {
            Uniform::Material(MaterialField::Shininess) => self.object.shininess = value,
            Uniform::PointLight(index, field) => {
                if let Some(light) = self.point_light(index) {
                    match field {
                        LightField::Constant => light.constant = value,
                        LightField::Linear => light.linear = value,
                        LightField::Quadratic => light.quadratic = value,
                        _ => rejected(name, "float"),
                    }
                }
            }
            other => rejected(other, "float"),
        }
    }

    fn set_int(&mut self, name: Uniform, value: i32) {
        match name {
            Uniform::ObjectTexture => self.object.texture_slot = value,
            Uniform::UseTexture
            | Uniform::UseLighting
            | Uniform::DirectionalLight(LightField::Active)
            | Uniform::PointLight(_, LightField::Active) => self.set_flag(name, value != 0),
            other => rejected(other, "int"),
        }
    }

    fn set_bool(&mut self, name: Uniform, value: bool) {
        self.set_flag(name, value);
    }

    fn set_vec2(&mut self, name: Uniform, value: Vector2<f32>) {
        match name {
            Uniform::UvScale => self.object.uv_scale = value.into(),
            other => rejected(other, "vec2"),
        }
    }

    fn set_vec3(&mut self, name: Uniform, value: Vector3<f32>) {
        let value: [f32; 3] = value.into();
        match name {
            Uniform::Material(MaterialField::DiffuseColor) => self.object.material_diffuse = value,
            Uniform::Material(MaterialField::SpecularColor) => {
                self.object.material_specular = value
            }
            Uniform::DirectionalLight(field) => {
                let light = &mut self.lighting.directional;
                match field {
                    LightField::Direction => light.direction = value,
                    LightField::Ambient => light.ambient = value,
                    LightField::Diffuse => light.diffuse = value,
                    LightField::Specular => light.specular = value,
                    _ => rejected(name, "vec3"),
                }
            }
            Uniform::PointLight(index, field) => {
                if let Some(light) = self.point_light(index) {
                    match field {
                        LightField::Position => light.position = value,
                        LightField::Ambient => light.ambient = value,
                        LightField::Diffuse => light.diffuse = value,
                        LightField::Specular => light.specular = value,
                        _ => rejected(name, "vec3"),
                    }
                }
            }
            other => rejected(other, "vec3"),
        }
    }

    fn set_vec4(&mut self, name: Uniform, value: Vector4<f32>) {
        match name {
            Uniform::ObjectColor => self.object.object_color = value.into(),
            other => rejected(other, "vec4"),
        }
    }

    fn set_mat4(&mut self, name: Uniform, value: Matrix4<f32>) {
        match name {
            Uniform::Model => self.object.model = value.into(),
            other => rejected(other, "mat4"),
        }
    }
}

/// GPU buffers and bind group for [`UniformBlocks`].
///
/// Binding 0 holds the object block, binding 1 the lighting block.
#[derive(Debug)]
pub struct UniformBuffers {
    pub object: wgpu::Buffer,
    pub lighting: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBuffers {
    pub fn new(device: &wgpu::Device, blocks: &UniformBlocks) -> Self {
        let object = mk_buffer(
            device,
            "Object Uniform Buffer",
            bytemuck::cast_slice(&[blocks.object]),
        );
        let lighting = mk_buffer(
            device,
            "Lighting Uniform Buffer",
            bytemuck::cast_slice(&[blocks.lighting]),
        );
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting.as_entire_binding(),
                },
            ],
            label: Some("scene_uniform_bind_group"),
        });
        Self {
            object,
            lighting,
            bind_group_layout,
            bind_group,
        }
    }
}

fn mk_buffer(device: &wgpu::Device, label: &str, contents: &[u8]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let entry = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[entry(0), entry(1)],
        label: Some("scene_uniform_bind_group_layout"),
    })
}
