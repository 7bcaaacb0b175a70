//! Scene data: textures, materials, transforms and draw descriptors.
//!
//! - `texture` holds texture records, decoded images and the GPU texture wrapper
//! - `material` is the tag-addressed material table
//! - `transform` composes per-draw model matrices
//! - `scene_object` describes one draw call

pub mod material;
pub mod scene_object;
pub mod texture;
pub mod transform;
