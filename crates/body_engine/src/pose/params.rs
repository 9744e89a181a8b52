//! Derivation of body-part parameters from a landmark frame
//!
//! Everything here is pure: a frame goes in, scalar and positional parameters
//! for the torso, head and four limbs come out. All derived positions lie in
//! the `z = 0` plane.

use crate::foundation::math::Vec3;
use super::{LandmarkName, PoseError, PoseFrame};

/// Torso cylinder parameters
///
/// `top_radius` and `bottom_radius` are signed: swapped left/right landmarks
/// make them negative. Sanitising them is the geometry factory's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsoParams {
    /// Cylinder centre
    pub center: Vec3,
    /// `|rightShoulder.x - leftShoulder.x|`
    pub width: f32,
    /// `|leftShoulder.y - leftHip.y|`
    pub height: f32,
    /// `rightShoulder.x - leftShoulder.x`
    pub top_radius: f32,
    /// `rightHip.x - leftHip.x`
    pub bottom_radius: f32,
}

/// Head sphere parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadParams {
    /// Sphere centre (the nose)
    pub center: Vec3,
    /// Half the horizontal ear distance
    pub radius: f32,
}

/// Joint positions of one limb, proximal to distal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbParams {
    /// Shoulder or hip
    pub near: Vec3,
    /// Elbow or knee
    pub mid: Vec3,
    /// Wrist or ankle
    pub far: Vec3,
}

impl LimbParams {
    /// Joints in bone order
    pub fn joints(&self) -> [Vec3; 3] {
        [self.near, self.mid, self.far]
    }
}

/// Everything the body needs from one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Torso
    pub torso: TorsoParams,
    /// Head
    pub head: HeadParams,
    /// Left arm
    pub left_arm: LimbParams,
    /// Right arm
    pub right_arm: LimbParams,
    /// Left leg
    pub left_leg: LimbParams,
    /// Right leg
    pub right_leg: LimbParams,
}

impl FrameParams {
    /// Derive all part parameters, failing on the first missing landmark
    pub fn derive(frame: &PoseFrame) -> Result<Self, PoseError> {
        frame.validate()?;
        let point = |name| frame.require(name).map(flatten);
        
        let left_shoulder = point(LandmarkName::LeftShoulder)?;
        let right_shoulder = point(LandmarkName::RightShoulder)?;
        let left_hip = point(LandmarkName::LeftHip)?;
        let right_hip = point(LandmarkName::RightHip)?;
        
        let width = (right_shoulder.x - left_shoulder.x).abs();
        let height = (left_shoulder.y - left_hip.y).abs();
        let torso = TorsoParams {
            center: Vec3::new(left_shoulder.x + width / 2.0, left_shoulder.y - height / 2.0, 0.0),
            width,
            height,
            top_radius: right_shoulder.x - left_shoulder.x,
            bottom_radius: right_hip.x - left_hip.x,
        };
        
        let left_ear = point(LandmarkName::LeftEar)?;
        let right_ear = point(LandmarkName::RightEar)?;
        let head = HeadParams {
            center: point(LandmarkName::Nose)?,
            radius: (right_ear.x - left_ear.x).abs() / 2.0,
        };
        
        let limb = |near: Vec3, mid, far| -> Result<LimbParams, PoseError> {
            Ok(LimbParams { near, mid: point(mid)?, far: point(far)? })
        };
        
        Ok(Self {
            torso,
            head,
            left_arm: limb(left_shoulder, LandmarkName::LeftElbow, LandmarkName::LeftWrist)?,
            right_arm: limb(right_shoulder, LandmarkName::RightElbow, LandmarkName::RightWrist)?,
            left_leg: limb(left_hip, LandmarkName::LeftKnee, LandmarkName::LeftAnkle)?,
            right_leg: limb(right_hip, LandmarkName::RightKnee, LandmarkName::RightAnkle)?,
        })
    }
}

fn flatten(position: Vec3) -> Vec3 {
    Vec3::new(position.x, position.y, 0.0)
}
