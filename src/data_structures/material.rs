//! Named surface materials.

use cgmath::Vector3;

use crate::pipelines::uniforms::{MaterialField, ShaderUniforms, Uniform};

/// Diffuse/specular response of a surface, referenced by tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    /// Upload all three material uniforms.
    pub fn upload(&self, uniforms: &mut dyn ShaderUniforms) {
        uniforms.set_vec3(
            Uniform::Material(MaterialField::DiffuseColor),
            self.diffuse_color,
        );
        uniforms.set_vec3(
            Uniform::Material(MaterialField::SpecularColor),
            self.specular_color,
        );
        uniforms.set_float(Uniform::Material(MaterialField::Shininess), self.shininess);
    }
}

/// Append-only list of materials, filled once during scene preparation.
///
/// Duplicate tags are accepted; lookups return the first one defined.
#[derive(Clone, Debug, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(
        &mut self,
        tag: &str,
        diffuse_color: impl Into<Vector3<f32>>,
        specular_color: impl Into<Vector3<f32>>,
        shininess: f32,
    ) {
        self.materials.push(Material {
            tag: tag.to_string(),
            diffuse_color: diffuse_color.into(),
            specular_color: specular_color.into(),
            shininess,
        });
    }

    /// First material whose tag matches exactly.
    ///
    /// `None` means the tag is unknown, whether or not the table is empty.
    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn clear(&mut self) {
        self.materials.clear();
    }
}
