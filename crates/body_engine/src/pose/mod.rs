//! # Pose Input
//!
//! In-memory landmark frames as delivered by an external pose estimator, and
//! the derivation of body-part parameters from them.

pub mod landmark;
pub mod params;

pub use landmark::{Landmark, LandmarkName, PoseFrame};
pub use params::{FrameParams, HeadParams, LimbParams, TorsoParams};

use thiserror::Error;

/// Errors raised while reading a pose frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoseError {
    /// A required landmark is absent from the frame
    #[error("Missing landmark: {0}")]
    MissingLandmark(LandmarkName),
    
    /// A landmark position has a NaN or infinite coordinate
    #[error("Non-finite landmark position: {0}")]
    NonFiniteLandmark(LandmarkName),
    
    /// A landmark name string did not match any known joint
    #[error("Unknown landmark name: {0}")]
    UnknownLandmark(String),
}
