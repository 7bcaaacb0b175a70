use cgmath::{Vector2, Vector3};

use crate::{
    data_structures::{scene_object::SceneObject, transform::Transform},
    resources::mesh::MeshKind,
};

const TEXTURE: &str = "concrete";
const MATERIAL: &str = "concrete1";

/// Stacked square segments of the launch tower.
///
/// Each segment is a cube frame of height `segment_height` whose vertical
/// edges sit `half_size` from the tower axis: four corner posts plus two
/// crossed braces on each of the four faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerLattice {
    pub segments: u32,
    pub segment_height: f32,
    /// Height of the bottom of the first segment.
    pub base_y: f32,
    /// Tower axis on the ground plane, as (x, z).
    pub center: Vector2<f32>,
    pub half_size: f32,
}

impl Default for TowerLattice {
    fn default() -> Self {
        Self {
            segments: 17,
            segment_height: 2.0,
            base_y: 2.0,
            center: Vector2::new(0.0, -6.0),
            half_size: 1.8,
        }
    }
}

impl TowerLattice {
    pub const POSTS_PER_SEGMENT: usize = 4;
    pub const BRACES_PER_SEGMENT: usize = 8;

    pub fn object_count(&self) -> usize {
        self.segments as usize * (Self::POSTS_PER_SEGMENT + Self::BRACES_PER_SEGMENT)
    }

    /// Posts then braces, segment by segment from the bottom up.
    pub fn objects(&self) -> Vec<SceneObject> {
        let mut objects = Vec::with_capacity(self.object_count());
        for segment in 0..self.segments {
            objects.extend(self.posts(segment));
            objects.extend(self.braces(segment));
        }
        objects
    }

    fn mid_height(&self, segment: u32) -> f32 {
        self.base_y + segment as f32 * self.segment_height + self.segment_height / 2.0
    }

    fn posts(&self, segment: u32) -> impl Iterator<Item = SceneObject> {
        let y = self.mid_height(segment);
        let (cx, cz, h) = (self.center.x, self.center.y, self.half_size);
        let scale = Vector3::new(0.2, self.segment_height, 0.2);
        [
            [cx - h, y, cz - h],
            [cx + h, y, cz - h],
            [cx + h, y, cz + h],
            [cx - h, y, cz + h],
        ]
        .into_iter()
        .map(move |corner| {
            SceneObject::textured(
                MeshKind::Box,
                Transform::scaled_at(scale, corner),
                TEXTURE,
                MATERIAL,
                [0.4, 4.0],
            )
        })
    }

    fn braces(&self, segment: u32) -> impl Iterator<Item = SceneObject> {
        let y = self.mid_height(segment);
        let (cx, cz, h) = (self.center.x, self.center.y, self.half_size);
        // Long enough to reach across the face diagonally.
        let scale = Vector3::new(0.15, self.segment_height * 2.35, 0.15);
        let front = [cx, y, cz - h];
        let right = [cx + h, y, cz];
        let back = [cx, y, cz + h];
        let left = [cx - h, y, cz];
        [
            (front, [0.0, 0.0, 45.0]),
            (front, [0.0, 0.0, -45.0]),
            (right, [-45.0, 0.0, 0.0]),
            (right, [45.0, 0.0, 0.0]),
            (back, [0.0, 0.0, -45.0]),
            (back, [0.0, 0.0, 45.0]),
            (left, [45.0, 0.0, 0.0]),
            (left, [-45.0, 0.0, 0.0]),
        ]
        .into_iter()
        .map(move |(position, rotation)| {
            SceneObject::textured(
                MeshKind::Box,
                Transform::new(scale, rotation, position),
                TEXTURE,
                MATERIAL,
                [0.5, 1.8],
            )
        })
    }
}
