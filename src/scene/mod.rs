//! The authored launch-site diorama.
//!
//! Everything here is fixed content: which textures and materials exist, which
//! meshes are needed and where every object goes. The only parametric part is
//! the lattice of the launch tower, see [`tower::TowerLattice`].

pub mod launch_site;
pub mod tower;

use crate::{data_structures::material::MaterialTable, resources::mesh::MeshKind};

/// A texture file and the tag it is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexturePreset {
    pub file: &'static str,
    pub tag: &'static str,
}

/// Load order, and therefore slot order, of the scene textures.
pub const SCENE_TEXTURES: [TexturePreset; 4] = [
    TexturePreset {
        file: "pipe.jpg",
        tag: "pipe",
    },
    TexturePreset {
        file: "grass.jpg",
        tag: "grass",
    },
    TexturePreset {
        file: "concrete.jpg",
        tag: "concrete",
    },
    TexturePreset {
        file: "steel.jpg",
        tag: "steel",
    },
];

/// Every mesh kind the object list draws.
pub const SCENE_MESHES: [MeshKind; 6] = [
    MeshKind::Plane,
    MeshKind::Torus,
    MeshKind::Box,
    MeshKind::Cylinder,
    MeshKind::Sphere,
    MeshKind::Pyramid3,
];

pub fn define_scene_materials(materials: &mut MaterialTable) {
    materials.define("grass1", [0.1, 0.3, 0.1], [0.1, 0.1, 0.1], 0.5);
    materials.define("concrete1", [0.5, 0.5, 0.5], [0.3, 0.3, 0.3], 8.5);
    materials.define("pipe1", [0.4, 0.4, 0.5], [0.8, 0.8, 0.8], 256.0);
    materials.define("steel1", [0.4, 0.4, 0.5], [0.8, 0.8, 0.8], 256.0);
}
