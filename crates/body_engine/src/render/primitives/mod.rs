//! Core primitive types for rendering
//!
//! This module contains fundamental data structures used throughout
//! the rendering system: meshes, vertices and the camera.

pub mod mesh;
pub mod camera;

// Re-export commonly used types
pub use mesh::{Mesh, Vertex, CylinderParams};
pub use camera::Camera;
