//! Landmarks and pose frames

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::foundation::math::Vec3;
use super::PoseError;

/// Named body joints a pose estimator can report
///
/// Names follow the 17-keypoint convention in camelCase (`leftShoulder`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LandmarkName {
    /// Nose tip, used as the head centre
    Nose,
    /// Left eye
    LeftEye,
    /// Right eye
    RightEye,
    /// Left ear
    LeftEar,
    /// Right ear
    RightEar,
    /// Left shoulder
    LeftShoulder,
    /// Right shoulder
    RightShoulder,
    /// Left elbow
    LeftElbow,
    /// Right elbow
    RightElbow,
    /// Left wrist
    LeftWrist,
    /// Right wrist
    RightWrist,
    /// Left hip
    LeftHip,
    /// Right hip
    RightHip,
    /// Left knee
    LeftKnee,
    /// Right knee
    RightKnee,
    /// Left ankle
    LeftAnkle,
    /// Right ankle
    RightAnkle,
}

impl LandmarkName {
    /// Every known landmark
    pub const ALL: [LandmarkName; 17] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];
    
    /// Landmarks a frame must carry before the body can be updated
    pub const REQUIRED: [LandmarkName; 15] = [
        Self::Nose,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];
    
    /// camelCase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "leftEye",
            Self::RightEye => "rightEye",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for LandmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LandmarkName {
    type Err = PoseError;
    
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| PoseError::UnknownLandmark(s.to_string()))
    }
}

/// A single joint sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Which joint this is
    pub name: LandmarkName,
    /// Position; `z` is zero for 2D estimators
    pub position: Vec3,
    /// Estimator confidence in `[0, 1]`
    pub confidence: f32,
}

impl Landmark {
    /// Create a landmark from a 3D position
    pub fn new(name: LandmarkName, position: Vec3, confidence: f32) -> Self {
        Self { name, position, confidence }
    }
    
    /// Create a landmark from a 2D position (`z = 0`)
    pub fn from_xy(name: LandmarkName, x: f32, y: f32, confidence: f32) -> Self {
        Self::new(name, Vec3::new(x, y, 0.0), confidence)
    }
}

/// All landmarks reported for one instant, keyed by joint name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseFrame {
    landmarks: HashMap<LandmarkName, Landmark>,
}

impl PoseFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Insert or replace a landmark
    pub fn insert(&mut self, landmark: Landmark) {
        self.landmarks.insert(landmark.name, landmark);
    }
    
    /// Builder-style insert of a 2D landmark with full confidence
    pub fn with_point(mut self, name: LandmarkName, x: f32, y: f32) -> Self {
        self.insert(Landmark::from_xy(name, x, y, 1.0));
        self
    }
    
    /// Remove a landmark, returning it if it was present
    pub fn remove(&mut self, name: LandmarkName) -> Option<Landmark> {
        self.landmarks.remove(&name)
    }
    
    /// Look up a landmark
    pub fn get(&self, name: LandmarkName) -> Option<&Landmark> {
        self.landmarks.get(&name)
    }
    
    /// Position of a landmark that must be present and finite
    pub fn require(&self, name: LandmarkName) -> Result<Vec3, PoseError> {
        let position = self
            .get(name)
            .map(|landmark| landmark.position)
            .ok_or(PoseError::MissingLandmark(name))?;
        if position.iter().all(|c| c.is_finite()) {
            Ok(position)
        } else {
            Err(PoseError::NonFiniteLandmark(name))
        }
    }
    
    /// Required landmarks absent from this frame, in declaration order
    pub fn missing(&self) -> Vec<LandmarkName> {
        LandmarkName::REQUIRED
            .iter()
            .copied()
            .filter(|name| !self.landmarks.contains_key(name))
            .collect()
    }
    
    /// Check that every required landmark is present
    pub fn validate(&self) -> Result<(), PoseError> {
        match self.missing().first() {
            Some(&name) => Err(PoseError::MissingLandmark(name)),
            None => Ok(()),
        }
    }
    
    /// Number of landmarks in the frame
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }
    
    /// Whether the frame carries no landmarks
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
    
    /// Iterate over all landmarks
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.values()
    }
}

impl FromIterator<Landmark> for PoseFrame {
    fn from_iter<T: IntoIterator<Item = Landmark>>(iter: T) -> Self {
        let mut frame = Self::new();
        for landmark in iter {
            frame.insert(landmark);
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_strings() {
        for name in LandmarkName::ALL {
            assert_eq!(name.as_str().parse::<LandmarkName>(), Ok(name));
        }
        assert!(matches!(
            "leftToe".parse::<LandmarkName>(),
            Err(PoseError::UnknownLandmark(_))
        ));
    }

    #[test]
    fn test_validate_reports_first_missing() {
        let frame: PoseFrame = LandmarkName::REQUIRED
            .iter()
            .filter(|name| **name != LandmarkName::LeftWrist && **name != LandmarkName::RightAnkle)
            .map(|name| Landmark::from_xy(*name, 0.0, 0.0, 1.0))
            .collect();
        
        assert_eq!(frame.missing(), vec![LandmarkName::LeftWrist, LandmarkName::RightAnkle]);
        assert_eq!(frame.validate(), Err(PoseError::MissingLandmark(LandmarkName::LeftWrist)));
    }

    #[test]
    fn test_eyes_are_optional() {
        let frame: PoseFrame = LandmarkName::REQUIRED
            .iter()
            .map(|name| Landmark::from_xy(*name, 1.0, 2.0, 0.9))
            .collect();
        assert!(frame.validate().is_ok());
        assert_eq!(frame.len(), 15);
        assert_eq!(frame.require(LandmarkName::Nose), Ok(Vec3::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_non_finite_positions_rejected() {
        let frame = PoseFrame::new()
            .with_point(LandmarkName::Nose, f32::NAN, 260.0)
            .with_point(LandmarkName::LeftWrist, f32::INFINITY, 80.0)
            .with_point(LandmarkName::RightWrist, 90.0, 80.0);
        
        assert_eq!(frame.require(LandmarkName::Nose), Err(PoseError::NonFiniteLandmark(LandmarkName::Nose)));
        assert_eq!(
            frame.require(LandmarkName::LeftWrist),
            Err(PoseError::NonFiniteLandmark(LandmarkName::LeftWrist))
        );
        assert!(frame.require(LandmarkName::RightWrist).is_ok());
    }
}
