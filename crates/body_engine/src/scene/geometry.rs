//! Geometry factory for the head and torso
//!
//! Turns derived frame parameters into primitive meshes, rejecting sizes that
//! would produce degenerate geometry.

use thiserror::Error;

use crate::core::{GeometryConfig, HandednessPolicy};
use crate::foundation::math::Vec3;
use crate::pose::{HeadParams, TorsoParams};
use crate::render::primitives::{CylinderParams, Mesh};

/// Geometry construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A radius or height is zero, negative or not finite
    #[error("Invalid geometry parameter {name}: {value}")]
    InvalidGeometryParameter {
        /// Which parameter
        name: &'static str,
        /// The rejected value
        value: f32,
    },
    
    /// Signed torso radii imply swapped left/right landmarks
    #[error("Inconsistent handedness: torso radii top={top}, bottom={bottom}")]
    InconsistentHandedness {
        /// Signed top radius
        top: f32,
        /// Signed bottom radius
        bottom: f32,
    },
}

/// Torso dimensions after validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsoShape {
    /// Cylinder centre
    pub center: Vec3,
    /// Shoulder-end radius, always positive
    pub top_radius: f32,
    /// Hip-end radius, always positive
    pub bottom_radius: f32,
    /// Cylinder height, always positive
    pub height: f32,
}

fn require_positive(name: &'static str, value: f32) -> Result<f32, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidGeometryParameter { name, value })
    }
}

/// Check a head radius
pub fn head_radius(params: &HeadParams) -> Result<f32, GeometryError> {
    require_positive("head radius", params.radius)
}

/// Build the head sphere
pub fn head_mesh(radius: f32, config: &GeometryConfig) -> Result<Mesh, GeometryError> {
    let radius = require_positive("head radius", radius)?;
    Ok(Mesh::sphere(radius, config.head_width_segments, config.head_height_segments))
}

/// Scale that makes a sphere created with `creation_radius` appear `radius` wide
///
/// Applied to X and Y only; depth keeps the creation size.
pub fn head_scale(radius: f32, creation_radius: f32) -> Vec3 {
    let ratio = radius / creation_radius;
    Vec3::new(ratio, ratio, 1.0)
}

/// Validate torso parameters
///
/// Negative radii mean the left/right landmarks arrived swapped. Depending on
/// `policy` they are clamped to `config.min_radius` or rejected. Zero radii and
/// a zero height are always rejected.
pub fn torso_shape(
    params: &TorsoParams,
    config: &GeometryConfig,
    policy: HandednessPolicy,
) -> Result<TorsoShape, GeometryError> {
    let height = require_positive("torso height", params.height)?;
    
    let (mut top, mut bottom) = (params.top_radius, params.bottom_radius);
    if top < 0.0 || bottom < 0.0 {
        match policy {
            HandednessPolicy::Reject => {
                return Err(GeometryError::InconsistentHandedness { top, bottom });
            }
            HandednessPolicy::Clamp => {
                log::warn!(
                    "Torso radii top={} bottom={} imply swapped landmarks, clamping to {}",
                    top, bottom, config.min_radius
                );
                if top < 0.0 {
                    top = config.min_radius;
                }
                if bottom < 0.0 {
                    bottom = config.min_radius;
                }
            }
        }
    }
    
    Ok(TorsoShape {
        center: params.center,
        top_radius: require_positive("torso top radius", top)?,
        bottom_radius: require_positive("torso bottom radius", bottom)?,
        height,
    })
}

/// Cylinder parameters of a validated torso
pub fn torso_cylinder(shape: &TorsoShape, config: &GeometryConfig) -> CylinderParams {
    CylinderParams::tapered(shape.top_radius, shape.bottom_radius, shape.height, config.torso_radial_segments)
}
