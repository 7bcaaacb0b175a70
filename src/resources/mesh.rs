//! Primitive meshes and the contract with whoever generates their geometry.

/// The primitive shapes the scene is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Plane,
    Box,
    Cylinder,
    Sphere,
    Torus,
    /// Pyramid with a triangular base.
    Pyramid3,
}

impl MeshKind {
    pub const ALL: [MeshKind; 6] = [
        MeshKind::Plane,
        MeshKind::Box,
        MeshKind::Cylinder,
        MeshKind::Sphere,
        MeshKind::Torus,
        MeshKind::Pyramid3,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Builds primitive geometry and draws it with the currently bound state.
///
/// `load` must run once per kind before the first `draw` of that kind.
pub trait MeshProvider {
    fn load(&mut self, kind: MeshKind);
    fn draw(&mut self, kind: MeshKind);
}

/// Remembers which kinds were loaded so each is requested exactly once.
#[derive(Debug, Clone, Default)]
pub struct MeshSet {
    loaded: [bool; MeshKind::ALL.len()],
}

impl MeshSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every kind in `kinds` that is not loaded yet.
    pub fn load_all(&mut self, provider: &mut dyn MeshProvider, kinds: &[MeshKind]) {
        for &kind in kinds {
            if !self.loaded[kind.index()] {
                provider.load(kind);
                self.loaded[kind.index()] = true;
            }
        }
    }

    pub fn is_loaded(&self, kind: MeshKind) -> bool {
        self.loaded[kind.index()]
    }

    /// Draw `kind`, or skip it when its geometry was never loaded.
    pub fn draw(&self, provider: &mut dyn MeshProvider, kind: MeshKind) -> bool {
        if !self.is_loaded(kind) {
            log::error!("{kind:?} mesh drawn before it was loaded, skipping");
            return false;
        }
        provider.draw(kind);
        true
    }
}
