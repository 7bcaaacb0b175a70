use cgmath::Vector3;

use crate::pipelines::uniforms::{LightField, ShaderUniforms, Uniform};

/// Sun-like light shining along `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

/// Light at `position` falling off with `1 / (constant + linear*d + quadratic*d²)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub active: bool,
}

impl PointLight {
    /// White lamp with the attenuation used for the launch pad floodlights.
    pub fn floodlight(position: impl Into<Vector3<f32>>) -> Self {
        Self {
            position: position.into(),
            ambient: Vector3::new(0.1, 0.1, 0.1),
            diffuse: Vector3::new(0.8, 0.8, 0.8),
            specular: Vector3::new(1.0, 1.0, 1.0),
            constant: 1.0,
            linear: 0.14,
            quadratic: 0.07,
            active: true,
        }
    }
}

/// The static light setup of the scene.
///
/// Lights never move; [`LightingRig::setup`] runs once while the scene is prepared.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingRig {
    pub directional: DirectionalLight,
    pub point_lights: Vec<PointLight>,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            directional: DirectionalLight {
                direction: Vector3::new(-0.707, -0.707, 0.0),
                ambient: Vector3::new(0.5, 0.5, 0.5),
                diffuse: Vector3::new(1.0, 0.95, 0.8),
                specular: Vector3::new(1.2, 1.1, 0.9),
                active: true,
            },
            point_lights: vec![
                PointLight::floodlight([2.0, 4.0, 2.0]),
                PointLight::floodlight([-2.0, 4.0, 2.0]),
            ],
        }
    }
}

impl LightingRig {
    /// Turn lighting on and write every light.
    pub fn setup(&self, uniforms: &mut dyn ShaderUniforms) {
        uniforms.set_bool(Uniform::UseLighting, true);

        let sun = &self.directional;
        let field = Uniform::DirectionalLight;
        uniforms.set_vec3(field(LightField::Direction), sun.direction);
        uniforms.set_vec3(field(LightField::Ambient), sun.ambient);
        uniforms.set_vec3(field(LightField::Diffuse), sun.diffuse);
        uniforms.set_vec3(field(LightField::Specular), sun.specular);
        uniforms.set_bool(field(LightField::Active), sun.active);

        for (index, light) in self.point_lights.iter().enumerate() {
            let field = |f| Uniform::PointLight(index, f);
            uniforms.set_vec3(field(LightField::Position), light.position);
            uniforms.set_vec3(field(LightField::Ambient), light.ambient);
            uniforms.set_vec3(field(LightField::Diffuse), light.diffuse);
            uniforms.set_vec3(field(LightField::Specular), light.specular);
            uniforms.set_float(field(LightField::Constant), light.constant);
            uniforms.set_float(field(LightField::Linear), light.linear);
            uniforms.set_float(field(LightField::Quadratic), light.quadratic);
            uniforms.set_bool(field(LightField::Active), light.active);
        }
        log::debug!(
            "lighting configured: 1 directional, {} point lights",
            self.point_lights.len()
        );
    }
}
