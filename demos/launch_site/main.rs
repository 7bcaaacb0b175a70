//! Prepares the launch site on a headless device and renders one frame into
//! the uniform blocks, logging what each draw would have used.
//!
//! Usage: `cargo run --example launch_site [texture_dir]`

use std::{cell::RefCell, collections::BTreeMap, path::PathBuf, rc::Rc};

use cgmath::{Matrix4, Vector2, Vector3, Vector4};
use launch_site::{
    context::{GpuContext, SceneSettings},
    pipelines::uniforms::{ObjectUniform, ShaderUniforms, Uniform, UniformBlocks, UniformBuffers},
    render::SceneManager,
    resources::{
        mesh::{MeshKind, MeshProvider},
        texture::{GpuTextures, texture_units_layout},
    },
};

/// Uniform blocks shared between the scene and the mesh provider.
#[derive(Clone, Default)]
struct SharedBlocks(Rc<RefCell<UniformBlocks>>);

impl ShaderUniforms for SharedBlocks {
    fn set_float(&mut self, name: Uniform, value: f32) {
        self.0.borrow_mut().set_float(name, value);
    }
    fn set_int(&mut self, name: Uniform, value: i32) {
        self.0.borrow_mut().set_int(name, value);
    }
    fn set_bool(&mut self, name: Uniform, value: bool) {
        self.0.borrow_mut().set_bool(name, value);
    }
    fn set_vec2(&mut self, name: Uniform, value: Vector2<f32>) {
        self.0.borrow_mut().set_vec2(name, value);
    }
    fn set_vec3(&mut self, name: Uniform, value: Vector3<f32>) {
        self.0.borrow_mut().set_vec3(name, value);
    }
    fn set_vec4(&mut self, name: Uniform, value: Vector4<f32>) {
        self.0.borrow_mut().set_vec4(name, value);
    }
    fn set_mat4(&mut self, name: Uniform, value: Matrix4<f32>) {
        self.0.borrow_mut().set_mat4(name, value);
    }
}

/// Stands in for real geometry: keeps the object block each draw would use.
struct SnapshotMeshes {
    blocks: SharedBlocks,
    loaded: Vec<MeshKind>,
    draws: Vec<(MeshKind, ObjectUniform)>,
}

impl MeshProvider for SnapshotMeshes {
    fn load(&mut self, kind: MeshKind) {
        self.loaded.push(kind);
    }

    fn draw(&mut self, kind: MeshKind) {
        let object = self.blocks.0.borrow().object;
        self.draws.push((kind, object));
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let mut settings = SceneSettings::default();
    if let Some(dir) = std::env::args().nth(1) {
        settings.texture_dir = PathBuf::from(dir);
    }

    let ctx = GpuContext::headless()?;
    let mut scene = SceneManager::new(settings, GpuTextures::new(&ctx));
    let mut blocks = SharedBlocks::default();
    let mut meshes = SnapshotMeshes {
        blocks: blocks.clone(),
        loaded: Vec::new(),
        draws: Vec::new(),
    };

    scene.prepare(&mut blocks, &mut meshes);
    scene.render(&mut blocks, &mut meshes);

    let buffers = UniformBuffers::new(&ctx.device, &blocks.0.borrow());
    let layout = texture_units_layout(&ctx.device);
    let _textures = scene.textures().backend().bind_group(&layout);
    // One write holds the state left by the last draw; per-draw blocks are only logged.
    blocks.0.borrow().write_to_buffers(&ctx.queue, &buffers);
    ctx.queue.submit([]);

    let mut per_mesh: BTreeMap<String, usize> = BTreeMap::new();
    let mut textured = 0;
    for (kind, object) in &meshes.draws {
        *per_mesh.entry(format!("{kind:?}")).or_default() += 1;
        textured += object.use_texture as usize;
    }
    log::info!(
        "{} meshes loaded, {} draws ({} textured): {:?}",
        meshes.loaded.len(),
        meshes.draws.len(),
        textured,
        per_mesh
    );

    scene.teardown();
    Ok(())
}
