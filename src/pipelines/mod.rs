//! Shader-facing state: the uniform vocabulary and the lighting rig.

pub mod light;
pub mod uniforms;
