//! # 3D Camera
//!
//! Perspective camera for the body scene. The body is drawn in landmark
//! coordinates (pixels of the source image), so the camera sits far back on
//! the +Z axis with a wide field of view.

use crate::core::CameraConfig;
use crate::foundation::math::{Vec3, Mat4, Mat4Ext, utils};

/// 3D Camera for perspective projection
///
/// # Coordinate System
/// Uses standard right-handed Y-up coordinates in view space. The Y-down clip
/// convention is applied separately through `Mat4::clip_coordinate_transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    
    /// Point the camera is looking at in world space
    pub target: Vec3,
    
    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,
    
    /// Field of view angle in radians
    pub fov: f32,
    
    /// Aspect ratio (width / height) for projection calculations
    pub aspect: f32,
    
    /// Distance to near clipping plane
    pub near: f32,
    
    /// Distance to far clipping plane  
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera with standard Y-up orientation
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Field of view angle in degrees (converted to radians internally)
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }
    
    /// Create the body camera from configuration
    ///
    /// The camera is placed `config.distance` units along +Z, looking at the origin.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::perspective(
            Vec3::new(0.0, 0.0, config.distance),
            config.fov_degrees,
            aspect,
            config.near,
            config.far,
        )
    }
    
    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs changes larger than 0.01 to keep resize storms quiet.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }
    
    /// Generate view matrix for world-to-camera space transformation
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }
    
    /// Generate perspective projection matrix  
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }
    
    /// Generate combined view-projection matrix: P × X × V
    ///
    /// - P = Perspective projection matrix
    /// - X = Y-down coordinate transformation
    /// - V = View matrix (world to camera space)
    pub fn get_view_projection_matrix(&self) -> Mat4 {
        let view_matrix = self.get_view_matrix();
        let coord_transform = Mat4::clip_coordinate_transform();
        let projection_matrix = self.get_projection_matrix();
        
        projection_matrix * coord_transform * view_matrix
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_body_camera() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 1000.0));
        assert_relative_eq!(camera.fov, 75.0_f32.to_radians(), epsilon = 1e-6);
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_aspect_changes_horizontal_scale_only() {
        let mut camera = Camera::default();
        let before = camera.get_projection_matrix();
        camera.set_aspect_ratio(2.0);
        let after = camera.get_projection_matrix();
        
        assert_relative_eq!(after[(0, 0)], before[(0, 0)] / 2.0, epsilon = 1e-6);
        assert_relative_eq!(after[(1, 1)], before[(1, 1)], epsilon = 1e-6);
    }

    #[test]
    fn test_points_above_origin_project_to_negative_ndc_y() {
        let camera = Camera::default();
        let clip = camera.get_view_projection_matrix() * crate::foundation::math::Vec4::new(0.0, 100.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        assert!(clip.y / clip.w < 0.0, "Y-down clip space expected");
    }
}
