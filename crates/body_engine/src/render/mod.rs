//! # Rendering System
//!
//! Turns the body scene into draw data and hands it to an output surface.
//!
//! ## Architecture
//!
//! - **Renderer**: walks the scene, skins limbs, projects and shades vertices
//! - **RenderSurface**: the output seam; a window backend or the in-memory
//!   [`HeadlessSurface`]
//! - **Resource Types**: meshes, camera, materials and lighting

// Core primitives
pub mod primitives;

pub mod lighting;
pub mod material;
pub mod surface;
pub mod renderer;

// Core rendering types that applications need
pub use primitives::{Mesh, Vertex, CylinderParams, Camera};
pub use lighting::{Light, LightType, LightingEnvironment};
pub use material::Material;
pub use surface::{RenderSurface, HeadlessSurface};
pub use renderer::{Renderer, RenderFrame, DrawItem, DrawVertex};

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A rendering operation failed during execution
    ///
    /// Indicates failure while building or presenting a frame. Often
    /// recoverable by presenting the next frame.
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),
    
    /// Backend-specific error occurred
    ///
    /// Wraps errors of the concrete surface implementation.
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
