//! Object list of the launch-site diorama, in draw order.

use crate::{
    data_structures::{scene_object::SceneObject, transform::Transform},
    resources::mesh::MeshKind,
    scene::tower::TowerLattice,
};

/// Every object of the scene: ground, ring, legs, rocket, tank farm, tower.
pub fn launch_site_objects() -> Vec<SceneObject> {
    let mut objects = Vec::new();
    objects.push(ground());
    objects.push(ring());
    objects.extend(support_legs());
    objects.extend(rocket());
    objects.extend(tank_farm());
    objects.extend(launch_tower(&TowerLattice::default()));
    objects
}

pub fn ground() -> SceneObject {
    SceneObject::textured(
        MeshKind::Plane,
        Transform::scaled_at([100.0, 1.0, 100.0], [0.0, 0.0, 0.0]),
        "grass",
        "grass1",
        [150.0, 150.0],
    )
}

/// Torus the rocket stands in, held up by the support legs.
pub fn ring() -> SceneObject {
    SceneObject::textured(
        MeshKind::Torus,
        Transform::new([2.0, 2.0, 1.0], [90.0, 0.0, 0.0], [0.0, 3.0, 0.0]),
        "concrete",
        "concrete1",
        [20.0, 10.0],
    )
}

/// Six legs spaced 60° apart around the ring, each tilted towards it.
/// The first one carries a pipe.
pub fn support_legs() -> Vec<SceneObject> {
    let leg = |rotation: [f32; 3], position: [f32; 3]| {
        SceneObject::textured(
            MeshKind::Box,
            Transform::new([0.5, 3.0, 0.5], rotation, position),
            "concrete",
            "concrete1",
            [2.0, 8.0],
        )
    };
    vec![
        leg([0.0, 0.0, 15.0], [2.0, 1.5, 0.0]),
        SceneObject::textured(
            MeshKind::Cylinder,
            Transform::new([0.05, 2.8, 0.05], [0.0, 0.0, 15.0], [2.6, 0.2, 0.0]),
            "pipe",
            "pipe1",
            [0.4, 0.4],
        ),
        leg([-15.0, 30.0, 0.0], [1.0, 1.5, 1.7321]),
        leg([15.0, 150.0, 0.0], [-1.0, 1.5, 1.7321]),
        leg([0.0, 90.0, -15.0], [-2.0, 1.5, 0.0]),
        leg([15.0, 30.0, 0.0], [-1.0, 1.5, -1.7321]),
        leg([-15.0, 150.0, 0.0], [1.0, 1.5, -1.7321]),
    ]
}

fn steel(mesh: MeshKind, transform: Transform, uv_scale: [f32; 2]) -> SceneObject {
    SceneObject::textured(mesh, transform, "steel", "steel1", uv_scale)
}

/// Booster with grid fins, interstage, ship with nose and flaps.
pub fn rocket() -> Vec<SceneObject> {
    let mut parts = vec![steel(
        MeshKind::Cylinder,
        Transform::scaled_at([1.5, 18.0, 1.5], [0.0, 3.0, 0.0]),
        [2.0, 8.0],
    )];

    let grid_fin = |position: [f32; 3]| {
        steel(
            MeshKind::Box,
            Transform::scaled_at([0.6, 0.1, 0.6], position),
            [10.0, 10.0],
        )
    };
    parts.extend([
        grid_fin([1.7, 20.5, 0.0]),
        grid_fin([-1.7, 20.5, 0.0]),
        grid_fin([0.0, 20.5, 1.7]),
        grid_fin([0.0, 20.5, -1.7]),
    ]);

    parts.push(steel(
        MeshKind::Cylinder,
        Transform::scaled_at([1.5, 0.5, 1.5], [0.0, 21.0, 0.0]),
        [30.0, 10.0],
    ));
    parts.push(steel(
        MeshKind::Cylinder,
        Transform::scaled_at([1.5, 12.0, 1.5], [0.0, 21.5, 0.0]),
        [2.0, 8.0],
    ));
    parts.push(steel(
        MeshKind::Sphere,
        Transform::scaled_at([1.5, 4.5, 1.5], [0.0, 33.5, 0.0]),
        [2.0, 8.0],
    ));

    // Each flap is a box with a pyramid on top.
    let flap = |panel: Transform, tip: Transform| {
        [
            steel(MeshKind::Box, panel, [0.5, 0.5]),
            steel(MeshKind::Pyramid3, tip, [0.5, 0.5]),
        ]
    };
    for side in [1.0f32, -1.0] {
        parts.extend(flap(
            Transform::scaled_at([1.7, 3.0, 0.1], [2.0 * side, 23.0, 0.0]),
            Transform::scaled_at([3.0, 3.0, 0.1], [1.35 * side, 26.0, 0.0]),
        ));
    }
    for side in [1.0f32, -1.0] {
        let tilt = [0.0, 0.0, 10.0 * side];
        parts.extend(flap(
            Transform::new([1.7, 2.0, 0.1], tilt, [1.48 * side, 34.0, 0.0]),
            Transform::new([2.0, 2.0, 0.1], tilt, [1.0 * side, 35.9, 0.0]),
        ));
    }
    parts
}

/// Four horizontal tanks in a row behind the pad.
pub fn tank_farm() -> Vec<SceneObject> {
    [-35.5f32, -38.5, -41.5, -44.5]
        .into_iter()
        .map(|z| {
            SceneObject::textured(
                MeshKind::Cylinder,
                Transform::new([1.5, 15.0, 1.5], [90.0, 90.0, 0.0], [-7.5, 1.5, z]),
                "concrete",
                "pipe1",
                [2.0, 8.0],
            )
        })
        .collect()
}

/// Base, lattice, top and the two catch arms.
pub fn launch_tower(lattice: &TowerLattice) -> Vec<SceneObject> {
    let concrete = |transform: Transform| {
        SceneObject::textured(MeshKind::Box, transform, "concrete", "concrete1", [2.0, 2.0])
    };
    let mut parts = vec![concrete(Transform::scaled_at([4.0, 2.0, 4.0], [0.0, 1.0, -6.0]))];
    parts.extend(lattice.objects());
    parts.extend([
        concrete(Transform::scaled_at([4.0, 2.0, 4.0], [0.0, 36.0, -6.0])),
        concrete(Transform::scaled_at([2.0, 2.0, 6.0], [0.0, 36.0, -6.0])),
        concrete(Transform::new([0.2, 2.0, 10.0], [0.0, 25.0, 0.0], [3.0, 32.0, -3.0])),
        concrete(Transform::new([0.2, 2.0, 10.0], [0.0, -25.0, 0.0], [-3.0, 32.0, -3.0])),
    ]);
    parts
}
