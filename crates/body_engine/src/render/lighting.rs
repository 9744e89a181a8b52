//! Lighting system

use crate::core::LightingConfig;
use crate::foundation::math::Vec3;

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Point light (like a lightbulb)
    Point,
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light type
    pub light_type: LightType,
    /// Light position
    pub position: Vec3,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
    /// Light range; `0.0` means the light never fades
    pub range: f32,
}

impl Light {
    /// Create a point light
    pub fn point(position: Vec3, color: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            color,
            intensity,
            range,
        }
    }
    
    /// Incoming radiance scale at `point`, before the cosine term
    fn attenuation(&self, point: Vec3) -> f32 {
        if self.range <= 0.0 {
            return 1.0;
        }
        let distance = (self.position - point).magnitude();
        (1.0 - distance / self.range).max(0.0)
    }
}

/// Lighting environment containing multiple lights
#[derive(Debug, Clone, PartialEq)]
pub struct LightingEnvironment {
    /// List of lights in the scene
    pub lights: Vec<Light>,
    /// Ambient light color
    pub ambient_color: Vec3,
    /// Ambient light intensity
    pub ambient_intensity: f32,
}

impl LightingEnvironment {
    /// Create a new empty lighting environment
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient_color: Vec3::new(1.0, 1.0, 1.0),
            ambient_intensity: 0.1,
        }
    }

    /// Add a light to the environment
    pub fn add_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Set ambient lighting
    pub fn with_ambient(mut self, color: Vec3, intensity: f32) -> Self {
        self.ambient_color = color;
        self.ambient_intensity = intensity;
        self
    }
    
    /// Build the body lighting rig: one ambient term plus the configured point lights
    pub fn from_config(config: &LightingConfig) -> Self {
        config.point_lights.iter().fold(
            Self::new().with_ambient(color_from_hex(config.ambient_color), 1.0),
            |env, light| {
                env.add_light(Light::point(
                    Vec3::from(light.position),
                    color_from_hex(light.color),
                    light.intensity,
                    light.range,
                ))
            },
        )
    }
    
    /// Lambert shading of a surface point
    ///
    /// Returns the lit colour, clamped to `[0, 1]` per channel.
    pub fn shade(&self, position: Vec3, normal: Vec3, albedo: Vec3) -> Vec3 {
        let normal = normal.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros);
        let mut irradiance = self.ambient_color * self.ambient_intensity;
        
        for light in &self.lights {
            let Some(direction) = (light.position - position).try_normalize(f32::EPSILON) else {
                continue;
            };
            let lambert = normal.dot(&direction).max(0.0);
            irradiance += light.color * (light.intensity * light.attenuation(position) * lambert);
        }
        
        albedo.component_mul(&irradiance).map(|c| c.clamp(0.0, 1.0))
    }
}

impl Default for LightingEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert `0xRRGGBB` to RGB components in `[0, 1]`
pub fn color_from_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}
