//! Loading and owning external resources.
//!
//! - `decoder` decodes image files into [`crate::data_structures::texture::DecodedImage`]
//! - `texture` is the tag/slot texture registry and its GPU backend
//! - `mesh` tracks the primitive meshes requested from the mesh provider

pub mod decoder;
pub mod mesh;
pub mod texture;

use std::path::Path;

use anyhow::Context as _;

pub fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}
