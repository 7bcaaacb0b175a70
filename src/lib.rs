//! launch-site
//!
//! Scene composition for a small launch-tower diorama: a rocket standing in
//! a ring on six legs, a lattice tower with catch arms, a tank farm and a
//! grass ground plane. The crate owns the textures, materials and lights the
//! scene needs and drives a per-object draw sequence through a narrow shader
//! uniform interface. Pipelines, windows and mesh geometry stay with the host.
//!
//! High-level modules
//! - `context`: scene settings and a headless wgpu device/queue
//! - `data_structures`: textures, materials, transforms and draw descriptors
//! - `pipelines`: uniform vocabulary, uniform blocks and the lighting rig
//! - `resources`: image decoding, the texture registry and mesh bookkeeping
//! - `scene`: the diorama's textures, materials and object list
//! - `render`: preparation and per-frame drawing of the scene
//!

pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports so hosts build against the same versions.
pub use cgmath;
pub use wgpu;
