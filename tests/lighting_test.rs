use cgmath::{Matrix4, Vector2, Vector3, Vector4};
use launch_site::pipelines::{
    light::{LightingRig, PointLight},
    uniforms::{LightField, MAX_POINT_LIGHTS, MaterialField, ShaderUniforms, Uniform, UniformBlocks},
};

use crate::common::test_utils::{Op, Value, recorder, take};

mod common;

fn value_of(ops: &[Op], name: Uniform) -> Option<Value> {
    ops.iter().rev().find_map(|op| match *op {
        Op::Set(n, value) if n == name => Some(value),
        _ => None,
    })
}

#[test]
fn should_enable_lighting_before_writing_lights() {
    let (mut uniforms, _, log) = recorder();

    LightingRig::default().setup(&mut uniforms);

    let ops = take(&log);
    assert_eq!(ops[0], Op::Set(Uniform::UseLighting, Value::Bool(true)));
}

#[test]
fn should_write_the_sun() {
    let (mut uniforms, _, log) = recorder();

    LightingRig::default().setup(&mut uniforms);

    let ops = take(&log);
    let sun = |field| value_of(&ops, Uniform::DirectionalLight(field));
    assert_eq!(
        sun(LightField::Direction),
        Some(Value::Vec3(Vector3::new(-0.707, -0.707, 0.0)))
    );
    assert_eq!(
        sun(LightField::Ambient),
        Some(Value::Vec3(Vector3::new(0.5, 0.5, 0.5)))
    );
    assert_eq!(
        sun(LightField::Diffuse),
        Some(Value::Vec3(Vector3::new(1.0, 0.95, 0.8)))
    );
    assert_eq!(
        sun(LightField::Specular),
        Some(Value::Vec3(Vector3::new(1.2, 1.1, 0.9)))
    );
    assert_eq!(sun(LightField::Active), Some(Value::Bool(true)));
}

#[test]
fn should_write_two_floodlights() {
    let (mut uniforms, _, log) = recorder();

    LightingRig::default().setup(&mut uniforms);

    let ops = take(&log);
    for (index, x) in [(0, 2.0), (1, -2.0)] {
        let lamp = |field| value_of(&ops, Uniform::PointLight(index, field));
        assert_eq!(
            lamp(LightField::Position),
            Some(Value::Vec3(Vector3::new(x, 4.0, 2.0)))
        );
        assert_eq!(
            lamp(LightField::Ambient),
            Some(Value::Vec3(Vector3::new(0.1, 0.1, 0.1)))
        );
        assert_eq!(
            lamp(LightField::Diffuse),
            Some(Value::Vec3(Vector3::new(0.8, 0.8, 0.8)))
        );
        assert_eq!(
            lamp(LightField::Specular),
            Some(Value::Vec3(Vector3::new(1.0, 1.0, 1.0)))
        );
        assert_eq!(lamp(LightField::Constant), Some(Value::Float(1.0)));
        assert_eq!(lamp(LightField::Linear), Some(Value::Float(0.14)));
        assert_eq!(lamp(LightField::Quadratic), Some(Value::Float(0.07)));
        assert_eq!(lamp(LightField::Active), Some(Value::Bool(true)));
    }
    assert!(value_of(&ops, Uniform::PointLight(2, LightField::Position)).is_none());
}

#[test]
fn should_name_uniforms_like_the_shader() {
    assert_eq!(Uniform::Model.to_string(), "model");
    assert_eq!(Uniform::ObjectColor.to_string(), "objectColor");
    assert_eq!(Uniform::ObjectTexture.to_string(), "objectTexture");
    assert_eq!(Uniform::UseTexture.to_string(), "bUseTexture");
    assert_eq!(Uniform::UseLighting.to_string(), "bUseLighting");
    assert_eq!(Uniform::UvScale.to_string(), "UVscale");
    assert_eq!(
        Uniform::Material(MaterialField::SpecularColor).to_string(),
        "material.specularColor"
    );
    assert_eq!(
        Uniform::DirectionalLight(LightField::Active).to_string(),
        "directionalLight.bActive"
    );
    assert_eq!(
        Uniform::PointLight(1, LightField::Quadratic).to_string(),
        "pointLights[1].quadratic"
    );
}

#[test]
fn should_pack_lights_into_the_lighting_block() {
    let mut blocks = UniformBlocks::new();

    LightingRig::default().setup(&mut blocks);

    assert_eq!(blocks.object.use_lighting, 1);
    let sun = &blocks.lighting.directional;
    assert_eq!(sun.direction, [-0.707, -0.707, 0.0]);
    assert_eq!(sun.specular, [1.2, 1.1, 0.9]);
    assert_eq!(sun.active, 1);
    let lamp = &blocks.lighting.point_lights[1];
    assert_eq!(lamp.position, [-2.0, 4.0, 2.0]);
    assert_eq!(lamp.linear, 0.14);
    assert_eq!(lamp.active, 1);
    assert_eq!(blocks.lighting.point_lights[2].active, 0);
}

#[test]
fn should_ignore_point_lights_past_the_block_capacity() {
    let mut blocks = UniformBlocks::new();
    let rig = LightingRig {
        point_lights: (0..=MAX_POINT_LIGHTS)
            .map(|i| PointLight::floodlight([i as f32, 4.0, 0.0]))
            .collect(),
        ..LightingRig::default()
    };

    rig.setup(&mut blocks);

    let last = &blocks.lighting.point_lights[MAX_POINT_LIGHTS - 1];
    assert_eq!(last.position, [(MAX_POINT_LIGHTS - 1) as f32, 4.0, 0.0]);
}

#[test]
fn should_pack_per_draw_state_into_the_object_block() {
    let mut blocks = UniformBlocks::new();

    blocks.set_mat4(Uniform::Model, Matrix4::from_scale(2.0));
    blocks.set_bool(Uniform::UseTexture, true);
    blocks.set_sampler(Uniform::ObjectTexture, 3);
    blocks.set_vec4(Uniform::ObjectColor, Vector4::new(0.1, 0.2, 0.3, 1.0));
    blocks.set_vec3(
        Uniform::Material(MaterialField::DiffuseColor),
        Vector3::new(0.4, 0.4, 0.5),
    );
    blocks.set_float(Uniform::Material(MaterialField::Shininess), 256.0);
    blocks.set_vec2(Uniform::UvScale, Vector2::new(150.0, 150.0));

    let object = &blocks.object;
    assert_eq!(object.model[0][0], 2.0);
    assert_eq!(object.model[3][3], 1.0);
    assert_eq!(object.use_texture, 1);
    assert_eq!(object.texture_slot, 3);
    assert_eq!(object.object_color, [0.1, 0.2, 0.3, 1.0]);
    assert_eq!(object.material_diffuse, [0.4, 0.4, 0.5]);
    assert_eq!(object.shininess, 256.0);
    assert_eq!(object.uv_scale, [150.0, 150.0]);
}

#[test]
fn should_drop_values_of_the_wrong_type() {
    let mut blocks = UniformBlocks::new();

    blocks.set_float(Uniform::UvScale, 4.0);
    blocks.set_vec3(Uniform::Model, Vector3::new(1.0, 2.0, 3.0));
    blocks.set_int(Uniform::Material(MaterialField::Shininess), 7);

    assert_eq!(blocks, UniformBlocks::default());
}

#[test]
fn should_keep_block_sizes_aligned_to_16_bytes() {
    use launch_site::pipelines::uniforms::{LightingUniform, ObjectUniform};

    assert_eq!(std::mem::size_of::<ObjectUniform>(), 128);
    assert_eq!(std::mem::size_of::<LightingUniform>() % 16, 0);
}
