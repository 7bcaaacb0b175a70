//! Model transforms for single draw calls.
//!
//! A [`Transform`] is recomputed every frame and never stored on the GPU side:
//! it is composed into a model matrix and uploaded right before its draw.

use cgmath::{Deg, Matrix4, Vector3};

use crate::pipelines::uniforms::{ShaderUniforms, Uniform};

/// Scale, per-axis rotation in degrees and translation of one object.
///
/// Rotations are applied about X, then Y, then Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation_degrees: Vector3<f32>,
    pub translation: Vector3<f32>,
}

impl Transform {
    pub fn new(
        scale: impl Into<Vector3<f32>>,
        rotation_degrees: impl Into<Vector3<f32>>,
        translation: impl Into<Vector3<f32>>,
    ) -> Self {
        Self {
            scale: scale.into(),
            rotation_degrees: rotation_degrees.into(),
            translation: translation.into(),
        }
    }

    /// Unrotated transform.
    pub fn scaled_at(scale: impl Into<Vector3<f32>>, translation: impl Into<Vector3<f32>>) -> Self {
        Self::new(scale, [0.0; 3], translation)
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        compose(
            self.scale,
            self.rotation_degrees.x,
            self.rotation_degrees.y,
            self.rotation_degrees.z,
            self.translation,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new([1.0; 3], [0.0; 3], [0.0; 3])
    }
}

/// Build `T * Rz * Ry * Rx * S`.
///
/// Applied to a point this scales first, rotates about X, Y and Z in that
/// order and translates last. Swapping any two factors changes the pose of
/// every non-symmetric object.
pub fn compose(
    scale: Vector3<f32>,
    x_rotation_degrees: f32,
    y_rotation_degrees: f32,
    z_rotation_degrees: f32,
    translation: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(translation)
        * Matrix4::from_angle_z(Deg(z_rotation_degrees))
        * Matrix4::from_angle_y(Deg(y_rotation_degrees))
        * Matrix4::from_angle_x(Deg(x_rotation_degrees))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// Compose `transform` and upload it as the model matrix.
pub fn set_transformations(
    uniforms: &mut dyn ShaderUniforms,
    transform: &Transform,
) -> Matrix4<f32> {
    let model = transform.to_matrix();
    uniforms.set_mat4(Uniform::Model, model);
    model
}
