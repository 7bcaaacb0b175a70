use cgmath::{Deg, Matrix4, SquareMatrix, Vector3, Vector4};
use launch_site::{
    data_structures::transform::{Transform, compose, set_transformations},
    pipelines::uniforms::Uniform,
};

use crate::common::test_utils::{Op, Value, recorder, take};

mod common;

const EPSILON: f32 = 1e-5;
const ONE: Vector3<f32> = Vector3::new(1.0, 1.0, 1.0);
const ZERO: Vector3<f32> = Vector3::new(0.0, 0.0, 0.0);

fn assert_matrix_eq(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    let actual: [[f32; 4]; 4] = actual.into();
    let expected: [[f32; 4]; 4] = expected.into();
    for (a, e) in actual.iter().flatten().zip(expected.iter().flatten()) {
        assert!((a - e).abs() < EPSILON, "{actual:?} != {expected:?}");
    }
}

fn assert_point_eq(actual: Vector4<f32>, expected: [f32; 3]) {
    let actual = [actual.x, actual.y, actual.z];
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < EPSILON, "{actual:?} != {expected:?}");
    }
}

#[test]
fn should_compose_identity_from_neutral_inputs() {
    let model = compose(ONE, 0.0, 0.0, 0.0, ZERO);

    assert_matrix_eq(model, Matrix4::identity());
    assert_matrix_eq(Transform::default().to_matrix(), Matrix4::identity());
}

#[test]
fn should_compose_translate_rotate_z_y_x_scale() {
    let scale = Vector3::new(2.0, 3.0, 0.5);
    let translation = Vector3::new(4.0, -1.0, 7.0);

    let model = compose(scale, 30.0, 45.0, 60.0, translation);

    let expected = Matrix4::from_translation(translation)
        * Matrix4::from_angle_z(Deg(60.0))
        * Matrix4::from_angle_y(Deg(45.0))
        * Matrix4::from_angle_x(Deg(30.0))
        * Matrix4::from_nonuniform_scale(2.0, 3.0, 0.5);
    assert_matrix_eq(model, expected);
}

#[test]
fn should_scale_before_rotating_and_translate_last() {
    // (1, 0, 0) is stretched to (2, 0, 0), turned onto the Y axis, then moved up.
    let stretch_x = Vector3::new(2.0, 1.0, 1.0);
    let up = Vector3::new(0.0, 5.0, 0.0);

    let model = compose(stretch_x, 0.0, 0.0, 90.0, up);

    assert_point_eq(model * Vector4::new(1.0, 0.0, 0.0, 1.0), [0.0, 7.0, 0.0]);
}

#[test]
fn should_rotate_about_x_before_z() {
    // X first: (0, 1, 0) -> (0, 0, 1); Z then leaves it alone.
    let model = compose(ONE, 90.0, 0.0, 90.0, ZERO);

    assert_point_eq(model * Vector4::new(0.0, 1.0, 0.0, 1.0), [0.0, 0.0, 1.0]);
}

#[test]
fn should_compose_transform_fields_in_axis_order() {
    let transform = Transform::new([0.5, 3.0, 0.5], [-15.0, 30.0, 0.0], [1.0, 1.5, 1.7321]);

    assert_matrix_eq(
        transform.to_matrix(),
        compose(transform.scale, -15.0, 30.0, 0.0, transform.translation),
    );
}

#[test]
fn should_upload_the_model_matrix_immediately() {
    let (mut uniforms, _, log) = recorder();
    let transform = Transform::scaled_at([100.0, 1.0, 100.0], [0.0, 0.0, 0.0]);

    let model = set_transformations(&mut uniforms, &transform);

    assert_matrix_eq(model, Matrix4::from_nonuniform_scale(100.0, 1.0, 100.0));
    assert_eq!(take(&log), [Op::Set(Uniform::Model, Value::Mat4(model))]);
}
