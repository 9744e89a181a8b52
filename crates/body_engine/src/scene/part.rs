//! Semantic body part labels

use std::fmt;

/// The six parts a body is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyPart {
    /// Tapered cylinder between shoulders and hips
    Torso,
    /// Sphere centred on the nose
    Head,
    /// Shoulder, elbow, wrist
    LeftArm,
    /// Shoulder, elbow, wrist
    RightArm,
    /// Hip, knee, ankle
    LeftLeg,
    /// Hip, knee, ankle
    RightLeg,
}

impl BodyPart {
    /// Parts in the order a frame update resolves them
    pub const ALL: [BodyPart; 6] = [
        Self::Torso,
        Self::Head,
        Self::LeftArm,
        Self::RightArm,
        Self::LeftLeg,
        Self::RightLeg,
    ];
    
    /// The four skinned parts
    pub const LIMBS: [BodyPart; 4] = [Self::LeftArm, Self::RightArm, Self::LeftLeg, Self::RightLeg];
    
    /// Registry label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Torso => "torso",
            Self::Head => "head",
            Self::LeftArm => "left-arm",
            Self::RightArm => "right-arm",
            Self::LeftLeg => "left-leg",
            Self::RightLeg => "right-leg",
        }
    }
    
    /// Whether this part is an arm or leg
    pub const fn is_limb(self) -> bool {
        matches!(self, Self::LeftArm | Self::RightArm | Self::LeftLeg | Self::RightLeg)
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
