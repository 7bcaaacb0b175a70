//! Scene preparation and the per-object draw sequence.
//!
//! [`SceneManager`] runs in two phases:
//!
//! - [`SceneManager::prepare`] runs once: textures are loaded and bound,
//!   materials defined, lights written, every mesh kind loaded and the
//!   object list built.
//! - [`SceneManager::render`] runs every frame and walks the object list.
//!   For each object it uploads, strictly in this order, the model matrix,
//!   the texture (or flat color), the material and the UV scale, and then
//!   issues the draw call.
//!
//! Unknown texture or material tags never stop a frame. A missing texture
//! turns texturing off for that object; a missing material leaves whatever
//! material the previous object uploaded in place.

use cgmath::{Vector2, Vector4};

use crate::{
    context::SceneSettings,
    data_structures::{
        material::MaterialTable,
        scene_object::{SceneObject, Surface},
        transform::set_transformations,
    },
    pipelines::uniforms::{ShaderUniforms, Uniform},
    resources::{
        decoder::{ImageDecoder, ImageFileDecoder},
        mesh::{MeshProvider, MeshSet},
        texture::{TextureBackend, TextureRegistry},
    },
    scene::{SCENE_MESHES, SCENE_TEXTURES, define_scene_materials, launch_site::launch_site_objects},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Prepared,
}

pub struct SceneManager<B: TextureBackend> {
    settings: SceneSettings,
    textures: TextureRegistry<B>,
    materials: MaterialTable,
    meshes: MeshSet,
    objects: Vec<SceneObject>,
    phase: Phase,
}

impl<B: TextureBackend> SceneManager<B> {
    /// Scene reading its textures through the `image` crate.
    pub fn new(settings: SceneSettings, backend: B) -> Self {
        Self::with_decoder(settings, backend, Box::new(ImageFileDecoder))
    }

    pub fn with_decoder(
        settings: SceneSettings,
        backend: B,
        decoder: Box<dyn ImageDecoder>,
    ) -> Self {
        let textures = TextureRegistry::new(backend, decoder)
            .with_max_units(settings.max_texture_units)
            .with_flip_vertically(settings.flip_vertically);
        Self {
            settings,
            textures,
            materials: MaterialTable::new(),
            meshes: MeshSet::new(),
            objects: Vec::new(),
            phase: Phase::Created,
        }
    }

    /// Load everything the scene needs. Only the first call does any work.
    pub fn prepare(&mut self, uniforms: &mut dyn ShaderUniforms, meshes: &mut dyn MeshProvider) {
        if self.phase == Phase::Prepared {
            log::warn!("scene is already prepared, ignoring prepare");
            return;
        }

        self.load_scene_textures();
        define_scene_materials(&mut self.materials);
        self.settings.lighting.setup(uniforms);
        // One copy of each mesh serves every draw of that kind.
        self.meshes.load_all(meshes, &SCENE_MESHES);
        self.objects = launch_site_objects();
        self.phase = Phase::Prepared;

        log::info!(
            "scene prepared: {} of {} textures, {} materials, {} objects",
            self.textures.len(),
            SCENE_TEXTURES.len(),
            self.materials.len(),
            self.objects.len()
        );
    }

    fn load_scene_textures(&mut self) {
        for preset in SCENE_TEXTURES {
            let path = self.settings.texture_dir.join(preset.file);
            // Failures are logged by the registry and leave the texture out.
            let _ = self.textures.load(path, preset.tag);
        }
        self.textures.bind_all();
    }

    /// Draw one frame. Drawing the same state twice issues the same calls.
    pub fn render(&self, uniforms: &mut dyn ShaderUniforms, meshes: &mut dyn MeshProvider) {
        if self.phase != Phase::Prepared {
            log::warn!("render called before prepare, nothing drawn");
            return;
        }
        for object in &self.objects {
            self.draw_object(object, uniforms, meshes);
        }
    }

    pub fn draw_object(
        &self,
        object: &SceneObject,
        uniforms: &mut dyn ShaderUniforms,
        meshes: &mut dyn MeshProvider,
    ) {
        set_transformations(uniforms, &object.transform);
        match &object.surface {
            Surface::Textured(tag) => self.set_shader_texture(uniforms, tag),
            Surface::Colored(color) => set_shader_color(uniforms, *color),
        }
        self.set_shader_material(uniforms, &object.material);
        set_texture_uv_scale(uniforms, object.uv_scale);
        self.meshes.draw(meshes, object.mesh);
    }

    /// Sample the texture registered as `tag`, or draw untextured if there is none.
    pub fn set_shader_texture(&self, uniforms: &mut dyn ShaderUniforms, tag: &str) {
        match self.textures.find_slot(tag) {
            Some(slot) => {
                uniforms.set_bool(Uniform::UseTexture, true);
                uniforms.set_sampler(Uniform::ObjectTexture, slot as i32);
            }
            None => {
                log::warn!("no texture tagged {tag:?}, drawing untextured");
                uniforms.set_bool(Uniform::UseTexture, false);
            }
        }
    }

    /// Upload the material defined as `tag`; an unknown tag uploads nothing.
    pub fn set_shader_material(&self, uniforms: &mut dyn ShaderUniforms, tag: &str) {
        match self.materials.find(tag) {
            Some(material) => material.upload(uniforms),
            None => log::warn!("no material tagged {tag:?}, keeping the previous one"),
        }
    }

    /// Release all textures and forget materials and objects.
    ///
    /// Mesh geometry stays with the mesh provider, so a later `prepare` does
    /// not request it again.
    pub fn teardown(&mut self) {
        self.textures.release_all();
        self.materials.clear();
        self.objects.clear();
        self.phase = Phase::Created;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn textures(&self) -> &TextureRegistry<B> {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureRegistry<B> {
        &mut self.textures
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn meshes(&self) -> &MeshSet {
        &self.meshes
    }

    /// The object list in draw order; empty until prepared.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }
}

/// Draw the next object in a flat color instead of a texture.
pub fn set_shader_color(uniforms: &mut dyn ShaderUniforms, color: Vector4<f32>) {
    uniforms.set_bool(Uniform::UseTexture, false);
    uniforms.set_vec4(Uniform::ObjectColor, color);
}

pub fn set_texture_uv_scale(uniforms: &mut dyn ShaderUniforms, uv_scale: Vector2<f32>) {
    uniforms.set_vec2(Uniform::UvScale, uv_scale);
}
