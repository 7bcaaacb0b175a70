// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::anyhow;
use cgmath::{Matrix4, Vector2, Vector3, Vector4};
use launch_site::{
    context::SceneSettings,
    data_structures::texture::{DecodedImage, SamplingParams, TextureId},
    pipelines::uniforms::{ShaderUniforms, Uniform},
    render::SceneManager,
    resources::{
        decoder::ImageDecoder,
        mesh::{MeshKind, MeshProvider},
        texture::TextureBackend,
    },
    scene::SCENE_TEXTURES,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f32),
    Int(i32),
    Bool(bool),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Set(Uniform, Value),
    Load(MeshKind),
    Draw(MeshKind),
}

pub type OpLog = Rc<RefCell<Vec<Op>>>;

/// Uniform sink appending every write to a shared log.
pub struct RecordingUniforms {
    log: OpLog,
}

impl RecordingUniforms {
    fn push(&self, name: Uniform, value: Value) {
        self.log.borrow_mut().push(Op::Set(name, value));
    }
}

impl ShaderUniforms for RecordingUniforms {
    fn set_float(&mut self, name: Uniform, value: f32) {
        self.push(name, Value::Float(value));
    }
    fn set_int(&mut self, name: Uniform, value: i32) {
        self.push(name, Value::Int(value));
    }
    fn set_bool(&mut self, name: Uniform, value: bool) {
        self.push(name, Value::Bool(value));
    }
    fn set_vec2(&mut self, name: Uniform, value: Vector2<f32>) {
        self.push(name, Value::Vec2(value));
    }
    fn set_vec3(&mut self, name: Uniform, value: Vector3<f32>) {
        self.push(name, Value::Vec3(value));
    }
    fn set_vec4(&mut self, name: Uniform, value: Vector4<f32>) {
        self.push(name, Value::Vec4(value));
    }
    fn set_mat4(&mut self, name: Uniform, value: Matrix4<f32>) {
        self.push(name, Value::Mat4(value));
    }
}

/// Mesh provider appending loads and draws to the same log.
pub struct RecordingMeshes {
    log: OpLog,
}

impl MeshProvider for RecordingMeshes {
    fn load(&mut self, kind: MeshKind) {
        self.log.borrow_mut().push(Op::Load(kind));
    }
    fn draw(&mut self, kind: MeshKind) {
        self.log.borrow_mut().push(Op::Draw(kind));
    }
}

pub fn recorder() -> (RecordingUniforms, RecordingMeshes, OpLog) {
    let log = OpLog::default();
    (
        RecordingUniforms { log: log.clone() },
        RecordingMeshes { log: log.clone() },
        log,
    )
}

/// Drain the log, returning everything recorded so far.
pub fn take(log: &OpLog) -> Vec<Op> {
    std::mem::take(&mut *log.borrow_mut())
}

/// Uniform state in effect at one draw call.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub mesh: MeshKind,
    pub state: HashMap<Uniform, Value>,
}

impl DrawCall {
    pub fn get(&self, name: Uniform) -> Option<Value> {
        self.state.get(&name).copied()
    }
}

/// Replay `ops` and snapshot the accumulated uniform state at every draw.
pub fn draw_calls(ops: &[Op]) -> Vec<DrawCall> {
    let mut state = HashMap::new();
    let mut draws = Vec::new();
    for op in ops {
        match *op {
            Op::Set(name, value) => {
                state.insert(name, value);
            }
            Op::Draw(mesh) => draws.push(DrawCall {
                mesh,
                state: state.clone(),
            }),
            Op::Load(_) => {}
        }
    }
    draws
}

/// Texture backend keeping track of what the registry asked for.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub created: Vec<(TextureId, String, SamplingParams)>,
    pub bound: Vec<(usize, TextureId)>,
    pub released: Vec<TextureId>,
    pub fail_labels: HashSet<String>,
    next_id: u32,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to create textures with this label.
    pub fn failing_on(mut self, label: &str) -> Self {
        self.fail_labels.insert(label.to_string());
        self
    }

    pub fn live(&self) -> usize {
        self.created.len() - self.released.len()
    }
}

impl TextureBackend for FakeBackend {
    fn create(
        &mut self,
        _image: &DecodedImage,
        sampling: &SamplingParams,
        label: &str,
    ) -> anyhow::Result<TextureId> {
        if self.fail_labels.contains(label) {
            return Err(anyhow!("out of texture memory"));
        }
        self.next_id += 1;
        let id = TextureId(self.next_id);
        self.created.push((id, label.to_string(), *sampling));
        Ok(id)
    }

    fn bind(&mut self, unit: usize, handle: TextureId) {
        self.bound.push((unit, handle));
    }

    fn release(&mut self, handle: TextureId) {
        self.released.push(handle);
    }
}

/// Decoder serving in-memory images; any other path is unreadable.
///
/// Every request is logged with its flip flag, shared through [`FakeDecoder::requests`].
#[derive(Debug, Clone, Default)]
pub struct FakeDecoder {
    images: HashMap<PathBuf, DecodedImage>,
    requests: Rc<RefCell<Vec<(PathBuf, bool)>>>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, channels: u8) -> Self {
        self.images.insert(path.into(), image(4, 4, channels));
        self
    }

    /// Handle to the `(path, flip_vertically)` log, usable after the decoder is boxed.
    pub fn requests(&self) -> Rc<RefCell<Vec<(PathBuf, bool)>>> {
        self.requests.clone()
    }

    /// All scene textures under the default texture directory, minus `missing`.
    pub fn scene_textures(missing: &[&str]) -> Self {
        let dir = SceneSettings::default().texture_dir;
        SCENE_TEXTURES
            .iter()
            .filter(|preset| !missing.contains(&preset.tag))
            .fold(Self::new(), |decoder, preset| {
                decoder.with_image(dir.join(preset.file), 3)
            })
    }
}

impl ImageDecoder for FakeDecoder {
    fn decode(&self, path: &Path, flip_vertically: bool) -> anyhow::Result<DecodedImage> {
        self.requests
            .borrow_mut()
            .push((path.to_path_buf(), flip_vertically));
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("No such file or directory"))
    }
}

pub fn image(width: u32, height: u32, channels: u8) -> DecodedImage {
    DecodedImage {
        pixels: vec![128; (width * height * channels as u32) as usize],
        width,
        height,
        channels,
    }
}

/// Scene manager with every scene texture available, except `missing`.
pub fn scene_manager(missing: &[&str]) -> SceneManager<FakeBackend> {
    SceneManager::with_decoder(
        SceneSettings::default(),
        FakeBackend::new(),
        Box::new(FakeDecoder::scene_textures(missing)),
    )
}
