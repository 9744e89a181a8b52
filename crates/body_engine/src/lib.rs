//! # Body Engine
//!
//! Procedural pose-to-skeleton rendering: feed it frames of named body
//! landmarks and it keeps a persistent 3D body in sync with them.
//!
//! ## Features
//!
//! - **Pose Input**: typed landmark frames and pure parameter derivation
//! - **Procedural Geometry**: head sphere and tapered torso built on demand
//! - **Procedural Rigging**: three-bone limbs with computed skin weights
//! - **Stable Scene**: labelled components created once, then updated in place
//! - **Pluggable Output**: any [`render::RenderSurface`], headless included
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use body_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     body_engine::foundation::logging::init();
//!
//!     let mut body = Body::new(HeadlessSurface::new(1280, 720), BodyConfig::default())?;
//!     let frame = PoseFrame::new()
//!         .with_point(LandmarkName::Nose, 0.0, 260.0);
//!     // ...remaining landmarks from the pose estimator
//!
//!     match body.update(&frame) {
//!         Ok(report) => println!("{} parts created", report.created()),
//!         Err(BodyError::Pose(err)) => eprintln!("Skipping frame: {}", err),
//!         Err(err) => return Err(err.into()),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Shared configuration
pub mod core;
pub mod config;

pub mod foundation;
pub mod pose;
pub mod rig;
pub mod scene;
pub mod render;

mod body;

pub use body::{Body, BodyError, BodyResult, UpdateReport};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Body, BodyError, BodyResult, UpdateReport,
        foundation::math::{Vec3, Mat4, Transform},
        pose::{Landmark, LandmarkName, PoseFrame, PoseError},
        scene::{BodyPart, Resolution, Scene, SceneNode, GeometryError},
        render::{Camera, HeadlessSurface, RenderSurface, RenderFrame, RenderError},
        core::config::{BodyConfig, TorsoPolicy, HandednessPolicy},
        config::Config,
    };
}
