//! Material system for rendering

use crate::foundation::math::Vec3;
use super::lighting::color_from_hex;

/// Diffuse (Lambert) surface material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color (RGB)
    pub base_color: Vec3,
    
    /// Alpha/transparency (0.0 = transparent, 1.0 = opaque)
    pub alpha: f32,
}

impl Material {
    /// Create a new material with default properties
    pub fn new() -> Self {
        Self {
            base_color: Vec3::new(1.0, 1.0, 1.0),
            alpha: 1.0,
        }
    }
    
    /// Opaque material from a `0xRRGGBB` colour
    pub fn lambert(hex: u32) -> Self {
        Self::new().with_color(color_from_hex(hex))
    }
    
    /// Set the base color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.base_color = color;
        self
    }
    
    /// Set the alpha/transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
