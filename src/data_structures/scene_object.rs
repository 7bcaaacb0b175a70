//! Descriptors of single draw calls.

use cgmath::{Vector2, Vector4};

use crate::{data_structures::transform::Transform, resources::mesh::MeshKind};

/// How an object is colored: sampled from a registered texture or flat.
#[derive(Clone, Debug, PartialEq)]
pub enum Surface {
    Textured(String),
    Colored(Vector4<f32>),
}

/// One draw call: where the mesh goes, what it looks like and which mesh it is.
///
/// Texture and material are referenced by tag and resolved at render time.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub transform: Transform,
    pub surface: Surface,
    pub material: String,
    pub uv_scale: Vector2<f32>,
    pub mesh: MeshKind,
}

impl SceneObject {
    pub fn textured(
        mesh: MeshKind,
        transform: Transform,
        texture: &str,
        material: &str,
        uv_scale: impl Into<Vector2<f32>>,
    ) -> Self {
        Self {
            transform,
            surface: Surface::Textured(texture.to_string()),
            material: material.to_string(),
            uv_scale: uv_scale.into(),
            mesh,
        }
    }

    pub fn colored(
        mesh: MeshKind,
        transform: Transform,
        color: impl Into<Vector4<f32>>,
        material: &str,
        uv_scale: impl Into<Vector2<f32>>,
    ) -> Self {
        Self {
            transform,
            surface: Surface::Colored(color.into()),
            material: material.to_string(),
            uv_scale: uv_scale.into(),
            mesh,
        }
    }

    /// Tag of the texture this object samples, if any.
    pub fn texture_tag(&self) -> Option<&str> {
        match &self.surface {
            Surface::Textured(tag) => Some(tag),
            Surface::Colored(_) => None,
        }
    }
}
