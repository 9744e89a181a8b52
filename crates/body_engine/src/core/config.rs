//! # Body Configuration
//!
//! All tunables of the body renderer in one serializable tree. Every section
//! defaults to the values the renderer was designed around, so a config file
//! only needs to mention what it changes.
//!
//! ```toml
//! torso_policy = "Replace"
//!
//! [camera]
//! fov_degrees = 60.0
//! ```

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};

/// What happens to the torso when a new frame arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TorsoPolicy {
    /// Rebuild the torso geometry inside the existing scene node
    #[default]
    UpdateInPlace,
    /// Add a fresh torso node every frame and leave the previous one in the scene
    Replace,
}

/// How signed torso radii that come out negative are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HandednessPolicy {
    /// Clamp to `GeometryConfig::min_radius` and log a warning
    #[default]
    Clamp,
    /// Fail the frame with `InconsistentHandedness`
    Reject,
}

/// # Engine Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter, used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// # Camera Configuration
///
/// Perspective camera placed on the +Z axis looking at the origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Initial distance from the origin along +Z
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 1.0,
            far: 1000.0,
            distance: 1000.0,
        }
    }
}

/// A single point light
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointLightConfig {
    /// World position
    pub position: [f32; 3],
    /// Colour as `0xRRGGBB`
    pub color: u32,
    /// Intensity multiplier
    pub intensity: f32,
    /// Range; `0.0` means unlimited
    pub range: f32,
}

impl PointLightConfig {
    /// White light of intensity 1 with unlimited range
    pub fn white(position: [f32; 3]) -> Self {
        Self {
            position,
            color: 0xffffff,
            intensity: 1.0,
            range: 0.0,
        }
    }
}

/// # Lighting Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient colour as `0xRRGGBB`
    pub ambient_color: u32,
    /// Point lights
    pub point_lights: Vec<PointLightConfig>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0xeeeeee,
            point_lights: vec![
                PointLightConfig::white([0.0, 200.0, 0.0]),
                PointLightConfig::white([100.0, 200.0, 100.0]),
                PointLightConfig::white([-100.0, -200.0, -100.0]),
            ],
        }
    }
}

/// # Geometry Configuration
///
/// Tessellation of the head and torso primitives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Horizontal segments of the head sphere
    pub head_width_segments: u32,
    /// Vertical segments of the head sphere
    pub head_height_segments: u32,
    /// Radial segments of the torso cylinder
    pub torso_radial_segments: u32,
    /// Radius a negative torso radius is clamped to
    pub min_radius: f32,
    /// Surface colour of every body part as `0xRRGGBB`
    pub material_color: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            head_width_segments: 32,
            head_height_segments: 32,
            torso_radial_segments: 32,
            min_radius: 1.0,
            material_color: 0xeeeecc,
        }
    }
}

/// # Limb Configuration
///
/// Canonical limb cylinder. The cylinder spans one segment per bone gap, so
/// with three bones its height is `2 * segment_height`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimbConfig {
    /// Cylinder radius
    pub radius: f32,
    /// Axial distance between two consecutive bones
    pub segment_height: f32,
    /// Radial segments of the cylinder
    pub radial_segments: u32,
    /// Height segments of the cylinder
    pub height_segments: u32,
    /// Leave the cylinder caps off
    pub open_ended: bool,
}

impl LimbConfig {
    /// Total cylinder height
    pub fn height(&self) -> f32 {
        self.segment_height * (crate::rig::BONE_COUNT - 1) as f32
    }
}

impl Default for LimbConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            segment_height: 2.5,
            radial_segments: 5,
            height_segments: 15,
            open_ended: true,
        }
    }
}

/// # Renderer Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Physical pixels per logical pixel of the output surface
    pub pixel_ratio: f32,
    /// Clear to a transparent background instead of black
    pub transparent: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            transparent: true,
        }
    }
}

/// # Complete Body Configuration
///
/// Top-level configuration handed to `Body::new`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BodyConfig {
    /// Engine-wide settings
    pub engine: EngineConfig,
    /// Camera setup
    pub camera: CameraConfig,
    /// Scene lights
    pub lighting: LightingConfig,
    /// Head and torso tessellation
    pub geometry: GeometryConfig,
    /// Limb cylinder and skinning layout
    pub limb: LimbConfig,
    /// Torso create-vs-update behaviour
    pub torso_policy: TorsoPolicy,
    /// Negative torso radius handling
    pub handedness: HandednessPolicy,
    /// Output surface settings
    pub renderer: RendererConfig,
}

impl BodyConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Set the torso policy
    pub fn with_torso_policy(mut self, policy: TorsoPolicy) -> Self {
        self.torso_policy = policy;
        self
    }
    
    /// Set the handedness policy
    pub fn with_handedness(mut self, policy: HandednessPolicy) -> Self {
        self.handedness = policy;
        self
    }
    
    /// Set the limb layout
    pub fn with_limb(mut self, limb: LimbConfig) -> Self {
        self.limb = limb;
        self
    }
    
    /// Set the output pixel ratio
    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.renderer.pixel_ratio = ratio;
        self
    }
    
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid(format!("camera fov must be in (0, 180), got {}", camera.fov_degrees)));
        }
        if !positive(camera.near) || !positive(camera.far) || camera.far <= camera.near {
            return Err(invalid(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            )));
        }
        if !positive(camera.distance) {
            return Err(invalid(format!("camera distance must be positive, got {}", camera.distance)));
        }
        
        let geometry = &self.geometry;
        if geometry.head_width_segments < 3 || geometry.head_height_segments < 2 {
            return Err(invalid("head sphere needs at least 3x2 segments".to_string()));
        }
        if geometry.torso_radial_segments < 3 {
            return Err(invalid("torso needs at least 3 radial segments".to_string()));
        }
        if !positive(geometry.min_radius) {
            return Err(invalid(format!("min_radius must be positive, got {}", geometry.min_radius)));
        }
        
        let limb = &self.limb;
        if !positive(limb.radius) || !positive(limb.segment_height) {
            return Err(invalid(format!(
                "limb radius and segment height must be positive, got {} and {}",
                limb.radius, limb.segment_height
            )));
        }
        if limb.radial_segments < 3 || limb.height_segments == 0 {
            return Err(invalid("limb needs at least 3 radial and 1 height segment".to_string()));
        }
        
        if !positive(self.renderer.pixel_ratio) {
            return Err(invalid(format!("pixel ratio must be positive, got {}", self.renderer.pixel_ratio)));
        }
        
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

impl Config for BodyConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = BodyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.torso_policy, TorsoPolicy::UpdateInPlace);
        assert_eq!(config.lighting.point_lights.len(), 3);
        assert_eq!(config.limb.height(), 5.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            torso_policy = "Replace"

            [camera]
            fov_degrees = 60.0
        "#;
        let config = BodyConfig::from_str_with_format(text, "body.toml").unwrap();
        assert_eq!(config.torso_policy, TorsoPolicy::Replace);
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.far, 1000.0);
        assert_eq!(config.geometry.material_color, 0xeeeecc);
    }

    #[test]
    fn test_ron_config_parses() {
        let text = "(handedness: Reject, limb: (radius: 3.0))";
        let config = BodyConfig::from_str_with_format(text, "body.ron").unwrap();
        assert_eq!(config.handedness, HandednessPolicy::Reject);
        assert_eq!(config.limb.radius, 3.0);
        assert_eq!(config.limb.height_segments, 15);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = BodyConfig::from_str_with_format("", "body.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_nan_sizes_rejected() {
        let nan_ratio = BodyConfig::default().with_pixel_ratio(f32::NAN);
        assert!(matches!(nan_ratio.validate(), Err(ConfigError::Invalid(_))));
        
        let mut nan_limb = BodyConfig::default();
        nan_limb.limb.radius = f32::NAN;
        assert!(matches!(nan_limb.validate(), Err(ConfigError::Invalid(_))));
        
        let mut infinite_far = BodyConfig::default();
        infinite_far.camera.far = f32::INFINITY;
        assert!(matches!(infinite_far.validate(), Err(ConfigError::Invalid(_))));
        
        let mut nan_min_radius = BodyConfig::default();
        nan_min_radius.geometry.min_radius = f32::NAN;
        assert!(matches!(nan_min_radius.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_camera_planes() {
        let mut config = BodyConfig::default();
        config.camera.near = 10.0;
        config.camera.far = 5.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
